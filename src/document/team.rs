use super::{MatchRecord, RosterEntry, MATCHES_PREFIX};
use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const TEAM_ID: &str = "team_id";
const TEAM_LINK: &str = "team_link";
const ROSTER: &str = "Roster";

/// A team entry. Matches are held per season and written out as one
/// `"Matches <season>"` key each.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamRecord {
    pub team_id: String,
    pub team_link: String,
    pub roster: Option<Vec<RosterEntry>>,
    pub matches: IndexMap<String, Vec<MatchRecord>>,
    /// Keys this crate does not model, carried through untouched.
    pub extra: IndexMap<String, Value>,
}

impl TeamRecord {
    pub fn new(team_id: impl Into<String>, team_link: impl Into<String>) -> Self {
        Self {
            team_id: team_id.into(),
            team_link: team_link.into(),
            ..Default::default()
        }
    }

    pub fn has_roster(&self) -> bool {
        self.roster.as_ref().is_some_and(|r| !r.is_empty())
    }
}

impl Serialize for TeamRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 2 + usize::from(self.roster.is_some()) + self.extra.len() + self.matches.len();
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry(TEAM_ID, &self.team_id)?;
        map.serialize_entry(TEAM_LINK, &self.team_link)?;
        if let Some(roster) = &self.roster {
            map.serialize_entry(ROSTER, roster)?;
        }
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        for (season, matches) in &self.matches {
            map.serialize_entry(&format!("{MATCHES_PREFIX}{season}"), matches)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TeamRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;

        let mut team_id = None;
        let mut team_link = None;
        let mut record = TeamRecord::default();

        for (key, value) in raw {
            match key.as_str() {
                TEAM_ID => team_id = Some(string_field(TEAM_ID, value)?),
                TEAM_LINK => team_link = Some(string_field(TEAM_LINK, value)?),
                ROSTER => {
                    let roster = serde_json::from_value(value)
                        .map_err(|e| de::Error::custom(format!("{ROSTER}: {e}")))?;
                    record.roster = Some(roster);
                }
                _ => match key.strip_prefix(MATCHES_PREFIX) {
                    Some(season) => {
                        let matches = serde_json::from_value(value)
                            .map_err(|e| de::Error::custom(format!("{key}: {e}")))?;
                        record.matches.insert(season.to_string(), matches);
                    }
                    None => {
                        record.extra.insert(key, value);
                    }
                },
            }
        }

        record.team_id = team_id.ok_or_else(|| de::Error::missing_field(TEAM_ID))?;
        record.team_link = team_link.ok_or_else(|| de::Error::missing_field(TEAM_LINK))?;
        Ok(record)
    }
}

fn string_field<E: de::Error>(name: &str, value: Value) -> Result<String, E> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(E::custom(format!("{name}: expected a string, found {other}"))),
    }
}

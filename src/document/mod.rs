//! League Document
//!
//! The persisted hierarchy is `Division -> <division> -> Conference ->
//! <conference> -> Teams -> <team>`. Each phase loads it, merges new fields in
//! at a keyed path and writes it back.

mod team;
mod tests;

pub use team::TeamRecord;

use crate::error::{Result, ScrapeError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Division populated by the scraper.
pub const DEFAULT_DIVISION: &str = "Premier";

/// Prefix of the season-qualified match keys in the persisted file.
pub const MATCHES_PREFIX: &str = "Matches ";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueDocument {
    #[serde(rename = "Division")]
    pub divisions: IndexMap<String, DivisionRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DivisionRecord {
    #[serde(rename = "Conference")]
    pub conferences: IndexMap<String, ConferenceRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConferenceRecord {
    #[serde(rename = "Teams")]
    pub teams: IndexMap<String, TeamRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    #[serde(rename = "Player")]
    pub player: String,
    #[serde(rename = "Position")]
    pub position: String,
    #[serde(rename = "Appearances")]
    pub appearances: String,
}

/// One result row as read from a team page. The season lives on the key
/// the record is stored under, not in the record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Home Team")]
    pub home_team: String,
    #[serde(rename = "Away Team")]
    pub away_team: String,
    #[serde(rename = "Home Score")]
    pub home_score: String,
    #[serde(rename = "Away Score")]
    pub away_score: String,
    #[serde(rename = "Venue")]
    pub venue: String,
}

impl LeagueDocument {
    /// Fresh document holding one empty division.
    pub fn new(division: &str) -> Self {
        let mut doc = Self::default();
        doc.divisions
            .insert(division.to_string(), DivisionRecord::default());
        doc
    }

    pub fn conference(&self, division: &str, conference: &str) -> Option<&ConferenceRecord> {
        self.divisions
            .get(division)
            .and_then(|d| d.conferences.get(conference))
    }

    pub fn team(&self, division: &str, conference: &str, team: &str) -> Option<&TeamRecord> {
        self.conference(division, conference)
            .and_then(|c| c.teams.get(team))
    }

    fn team_mut(&mut self, division: &str, conference: &str, team: &str) -> Result<&mut TeamRecord> {
        self.divisions
            .get_mut(division)
            .and_then(|d| d.conferences.get_mut(conference))
            .and_then(|c| c.teams.get_mut(team))
            .ok_or_else(|| {
                ScrapeError::NotFound(format!("team {division}/{conference}/{team}"))
            })
    }

    /// Replace the `Teams` mapping of a conference, creating the division and
    /// conference when absent. Teams previously stored there are dropped.
    pub fn set_conference(
        &mut self,
        division: &str,
        conference: &str,
        teams: IndexMap<String, TeamRecord>,
    ) {
        self.divisions
            .entry(division.to_string())
            .or_default()
            .conferences
            .insert(conference.to_string(), ConferenceRecord { teams });
    }

    /// Replace a team's roster wholesale.
    pub fn set_roster(
        &mut self,
        division: &str,
        conference: &str,
        team: &str,
        roster: Vec<RosterEntry>,
    ) -> Result<()> {
        self.team_mut(division, conference, team)?.roster = Some(roster);
        Ok(())
    }

    /// Append to the season's match list, creating it on first use.
    /// Duplicates are kept; they are dropped when flattening.
    pub fn append_matches(
        &mut self,
        division: &str,
        conference: &str,
        team: &str,
        season: &str,
        matches: Vec<MatchRecord>,
    ) -> Result<()> {
        self.team_mut(division, conference, team)?
            .matches
            .entry(season.to_string())
            .or_default()
            .extend(matches);
        Ok(())
    }

    /// Every `(division, conference, team name, team)` in document order.
    pub fn teams(&self) -> impl Iterator<Item = (&str, &str, &str, &TeamRecord)> {
        self.divisions.iter().flat_map(|(division, d)| {
            d.conferences.iter().flat_map(move |(conference, c)| {
                c.teams.iter().map(move |(name, team)| {
                    (division.as_str(), conference.as_str(), name.as_str(), team)
                })
            })
        })
    }
}

/// Parse a persisted document.
pub fn load(text: &str) -> Result<LeagueDocument> {
    serde_json::from_str(text).map_err(|e| ScrapeError::Parse(format!("league document: {e}")))
}

/// Serialize with insertion-ordered keys and four-space indentation.
pub fn save(doc: &LeagueDocument) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    doc.serialize(&mut ser)
        .map_err(|e| ScrapeError::Parse(format!("league document: {e}")))?;
    String::from_utf8(buf).map_err(|e| ScrapeError::Parse(e.to_string()))
}

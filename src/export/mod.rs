//! Match Flattening and Export
//!
//! Turns the nested league document into one row per match for a single
//! conference, drops duplicates and orders the rows by date.

mod dates;

pub use dates::parse_match_date;

use crate::document::{LeagueDocument, MatchRecord};
use crate::error::Result;
use chrono::NaiveDate;
use log::debug;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Column order of the exported file.
pub const EXPORT_HEADER: [&str; 12] = [
    "Division",
    "Conference",
    "Date",
    "Home Team",
    "Away Team",
    "Home Score",
    "Away Score",
    "Venue",
    "Season",
    "Video Collected",
    "Source",
    "Link",
];

/// A match with its place in the hierarchy made explicit.
///
/// `video_collected`, `source` and `link` are blank placeholders filled in by
/// hand after export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatMatchRow {
    #[serde(rename = "Division")]
    pub division: String,
    #[serde(rename = "Conference")]
    pub conference: String,
    /// `None` when the page's date text could not be read as a date.
    #[serde(rename = "Date")]
    pub date: Option<NaiveDate>,
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
    #[serde(rename = "Season")]
    pub season: String,
    #[serde(rename = "Video Collected")]
    pub video_collected: String,
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Link")]
    pub link: String,
}

/// A stored match before dedup, still borrowing from the document.
struct Candidate<'a> {
    division: &'a str,
    conference: &'a str,
    season: &'a str,
    record: &'a MatchRecord,
}

type MatchKey<'a> = (&'a str, &'a str, &'a str, &'a str, &'a str, &'a str, &'a str);

impl<'a> Candidate<'a> {
    /// Venue and season are not part of the identity of a match.
    fn key(&self) -> MatchKey<'a> {
        let r = self.record;
        (
            self.division,
            self.conference,
            r.date.as_str(),
            r.home_team.as_str(),
            r.away_team.as_str(),
            r.home_score.as_str(),
            r.away_score.as_str(),
        )
    }

    fn into_row(self) -> FlatMatchRow {
        let r = self.record;
        FlatMatchRow {
            division: self.division.to_string(),
            conference: self.conference.to_string(),
            date: parse_match_date(&r.date),
            home_team: r.home_team.clone(),
            away_team: r.away_team.clone(),
            home_score: r.home_score.clone(),
            away_score: r.away_score.clone(),
            venue: r.venue.clone(),
            season: self.season.to_string(),
            video_collected: String::new(),
            source: String::new(),
            link: String::new(),
        }
    }
}

/// Flatten every match stored under `conference`, in any division.
///
/// Duplicates on (division, conference, date text, teams, scores) keep the
/// first one met in document order. Rows are then sorted by parsed date with
/// unparsable dates last; the sort is stable, so ties keep document order.
pub fn flatten_matches(doc: &LeagueDocument, conference: &str) -> Vec<FlatMatchRow> {
    let candidates = doc
        .teams()
        .filter(|(_, conf, _, _)| *conf == conference)
        .flat_map(|(division, conf, _, team)| {
            team.matches.iter().flat_map(move |(season, records)| {
                records.iter().map(move |record| Candidate {
                    division,
                    conference: conf,
                    season,
                    record,
                })
            })
        });

    let unique: Vec<Candidate> = dedupe!(candidates, by Candidate::key);
    let mut rows: Vec<FlatMatchRow> = unique.into_iter().map(Candidate::into_row).collect();
    rows.sort_by_key(|row| (row.date.is_none(), row.date));

    debug!("flattened {} unique matches for {conference}", rows.len());
    rows
}

/// Write `rows` as CSV, header first. The header is written even with no rows.
pub fn write_csv<W: Write>(rows: &[FlatMatchRow], out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);
    writer.write_record(EXPORT_HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_csv_file(rows: &[FlatMatchRow], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(rows, std::io::BufWriter::new(file))
}

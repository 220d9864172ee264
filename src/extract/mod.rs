//! Page Record Extraction
//!
//! Each pass reads one kind of record from a page that is already loaded in
//! a [`Session`]. Nothing here navigates or waits.

mod utils;

pub use utils::{join_lines, parse_appearances};
use utils::*;

use crate::browser::{Element, Session};
use crate::document::{MatchRecord, RosterEntry};
use crate::error::{Result, ScrapeError};
use crate::selectors::PageSelectors;
use log::warn;

/// Position recorded when the page lists fewer positions than players.
pub const UNKNOWN_POSITION: &str = "N/A";

/// One team card from the league's team list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamSummary {
    pub team_id: String,
    pub name: String,
    pub conference: String,
    pub link: String,
}

/// Results read from a team page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPage {
    /// Season currently selected on the page.
    pub season: String,
    pub matches: Vec<MatchRecord>,
    /// Rows dropped because a cell was missing.
    pub skipped: usize,
}

/// Read every team card. Relative links are resolved against `page_url`.
/// A card missing any required attribute fails the whole pass.
pub fn extract_team_cards<S: Session>(
    session: &S,
    page_url: &str,
    sel: &PageSelectors,
) -> Result<Vec<TeamSummary>> {
    let mut teams = Vec::new();
    for card in session.find_all(&sel.team_card)? {
        let team_id = required_attr(&card, &sel.team_card, &sel.team_id_attr)?;
        let name = required_attr(&card, &sel.team_card, &sel.team_name_attr)?;
        let conference = required_attr(&card, &sel.team_card, &sel.team_conference_attr)?;
        let anchor = card
            .find(&sel.team_anchor)?
            .ok_or_else(|| ScrapeError::missing_element(&sel.team_anchor))?;
        let href = required_attr(&anchor, &sel.team_anchor, &sel.team_href_attr)?;

        teams.push(TeamSummary {
            team_id,
            name,
            conference,
            link: resolve_link(page_url, &href)?,
        });
    }
    Ok(teams)
}

/// Read the roster. The three element lists are aligned by index; missing
/// positions become [`UNKNOWN_POSITION`] and missing or unparsable
/// appearance counts become `"0"`.
pub fn extract_roster<S: Session>(session: &S, sel: &PageSelectors) -> Result<Vec<RosterEntry>> {
    let names = session.find_all(&sel.roster_name)?;
    let positions = session.find_all(&sel.roster_position)?;
    let counts = session.find_all(&sel.roster_appearances)?;

    let mut roster = Vec::with_capacity(names.len());
    for (i, name) in names.iter().enumerate() {
        let position = match positions.get(i) {
            Some(el) => el.text()?.trim().to_string(),
            None => UNKNOWN_POSITION.to_string(),
        };
        let appearances = match counts.get(i) {
            Some(el) => parse_appearances(&el.text()?),
            None => NO_APPEARANCES.to_string(),
        };
        roster.push(RosterEntry {
            player: join_lines(&name.text()?),
            position,
            appearances,
        });
    }
    Ok(roster)
}

/// Read the results table and the selected season. The results must already
/// be revealed. Rows with a missing cell are logged and skipped.
pub fn extract_matches<S: Session>(session: &S, sel: &PageSelectors) -> Result<MatchPage> {
    let season = match session.find_all(&sel.season_label)?.first() {
        Some(label) => clean_text(&label.text()?),
        None => String::new(),
    };
    if season.is_empty() {
        return Err(ScrapeError::missing_element(&sel.season_label));
    }

    let mut matches = Vec::new();
    let mut skipped = 0;
    for (i, row) in session.find_all(&sel.results_row)?.iter().enumerate() {
        match parse_match_row(row, i, sel) {
            Ok(record) => matches.push(record),
            Err(e) if e.is_recoverable() => {
                warn!("skipping results row: {e}");
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(MatchPage {
        season,
        matches,
        skipped,
    })
}

fn parse_match_row<E: Element>(row: &E, index: usize, sel: &PageSelectors) -> Result<MatchRecord> {
    let cell = |n: usize| -> Result<String> {
        let selector = &sel.results_cells[n];
        let el = row.find(selector)?.ok_or_else(|| ScrapeError::ExtractionRow {
            row: index,
            reason: format!("missing cell `{selector}`"),
        })?;
        Ok(clean_text(&el.text()?))
    };

    Ok(MatchRecord {
        home_team: cell(0)?,
        away_team: cell(1)?,
        date: cell(2)?,
        home_score: cell(3)?,
        away_score: cell(4)?,
        venue: cell(5)?,
    })
}

//! Scrape Orchestration
//!
//! One method per phase. Every page fetch opens its own browser session
//! through [`with_session`], so a failing team never leaves a session
//! behind. Phases that load the persisted document only write it back after
//! the whole pass has run.

use crate::browser::{with_session, Driver, Element, Session};
use crate::config::Config;
use crate::document::{LeagueDocument, TeamRecord};
use crate::error::{Result, ScrapeError};
use crate::export::{flatten_matches, write_csv_file};
use crate::extract::{extract_matches, extract_roster, extract_team_cards};
use crate::store::DocumentStore;
use indexmap::IndexMap;
use log::{debug, info, warn};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    DiscoverTeamLinks,
    CollectRosters,
    CollectMatches,
    ExportMatches,
}

impl Phase {
    /// Command name of the phase.
    pub fn name(&self) -> &'static str {
        match self {
            Phase::DiscoverTeamLinks => "discover-team-links",
            Phase::CollectRosters => "collect-rosters",
            Phase::CollectMatches => "collect-matches",
            Phase::ExportMatches => "export-matches",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Completion summary of one phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseReport {
    pub phase: Phase,
    /// Teams (or exported rows) handled successfully.
    pub processed: usize,
    /// Teams that failed and were left unchanged.
    pub skipped: usize,
    /// File the phase wrote.
    pub artifact: String,
}

impl fmt::Display for PhaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} complete: {} processed, {} skipped, wrote {}",
            self.phase, self.processed, self.skipped, self.artifact
        )
    }
}

/// Owned path of a team, so the document can be mutated while iterating.
#[derive(Debug, Clone)]
struct TeamTarget {
    division: String,
    conference: String,
    team: String,
    link: String,
}

impl TeamTarget {
    fn new(division: &str, conference: &str, team: &str, record: &TeamRecord) -> Self {
        Self {
            division: division.to_string(),
            conference: conference.to_string(),
            team: team.to_string(),
            link: record.team_link.clone(),
        }
    }
}

pub struct Engine<'a, D: Driver, S: DocumentStore> {
    pub driver: &'a D,
    pub store: &'a S,
    pub config: &'a Config,
}

impl<'a, D: Driver, S: DocumentStore> Engine<'a, D, S> {
    pub fn new(driver: &'a D, store: &'a S, config: &'a Config) -> Self {
        Self {
            driver,
            store,
            config,
        }
    }

    /// Read every team card from the league page and replace the persisted
    /// document with a fresh one holding one conference per label seen.
    ///
    /// Any failure, including a page with no team cards, aborts before the
    /// store is touched.
    pub fn discover_team_links(&self) -> Result<PhaseReport> {
        let cfg = self.config;
        info!("discovering team links from {}", cfg.base_url);

        let teams = with_session(self.driver, |session| {
            session.navigate(&cfg.base_url)?;
            self.settle();
            extract_team_cards(session, &cfg.base_url, &cfg.selectors)
        })?;
        if teams.is_empty() {
            return Err(ScrapeError::missing_element(&cfg.selectors.team_card));
        }

        let mut conferences: IndexMap<String, IndexMap<String, TeamRecord>> = IndexMap::new();
        for team in &teams {
            debug!("{} / {} -> {}", team.conference, team.name, team.link);
            conferences
                .entry(team.conference.clone())
                .or_default()
                .insert(team.name.clone(), TeamRecord::new(&team.team_id, &team.link));
        }

        let mut doc = LeagueDocument::new(&cfg.division);
        for (conference, records) in conferences {
            info!("{conference}: {} teams", records.len());
            doc.set_conference(&cfg.division, &conference, records);
        }
        self.store.save(&doc)?;

        Ok(self.report(Phase::DiscoverTeamLinks, teams.len(), 0))
    }

    /// Fetch the roster of every team hosted under the configured site
    /// prefix. A team that fails is logged and keeps its previous roster.
    pub fn collect_rosters(&self) -> Result<PhaseReport> {
        let cfg = self.config;
        let mut doc = self.store.load()?;
        let targets = self.targets(&doc, |_, record| {
            record.team_link.starts_with(&cfg.site_prefix)
        });
        info!("collecting rosters for {} teams", targets.len());

        let (mut processed, mut skipped) = (0, 0);
        for target in &targets {
            info!("roster: {} ({})", target.team, target.link);
            let result = with_session(self.driver, |session| {
                session.navigate(&target.link)?;
                self.settle();
                extract_roster(session, &cfg.selectors)
            })
            .and_then(|roster| {
                debug!("{}: {} players", target.team, roster.len());
                doc.set_roster(&target.division, &target.conference, &target.team, roster)
            });

            match result {
                Ok(()) => processed += 1,
                Err(e) => {
                    warn!("skipping roster for {} ({}): {e}", target.team, target.link);
                    skipped += 1;
                }
            }
        }

        self.store.save(&doc)?;
        Ok(self.report(Phase::CollectRosters, processed, skipped))
    }

    /// Fetch the results of every rostered team in the target conference and
    /// append them under the season shown on the page. Running it again
    /// appends the same matches again; export drops the duplicates.
    pub fn collect_matches(&self) -> Result<PhaseReport> {
        let cfg = self.config;
        let sel = &cfg.selectors;
        let mut doc = self.store.load()?;
        let targets = self.targets(&doc, |conference, record| {
            conference == cfg.target_conference && record.has_roster()
        });
        if targets.is_empty() {
            warn!("no rostered teams in {}", cfg.target_conference);
        }

        let (mut processed, mut skipped) = (0, 0);
        for target in &targets {
            info!("matches: {} ({})", target.team, target.link);
            let result = with_session(self.driver, |session| {
                session.navigate(&target.link)?;
                self.settle();
                session
                    .wait_for_element(&sel.results_toggle, cfg.wait_timeout)?
                    .click()?;
                session.wait_for_element(&sel.results_body, cfg.wait_timeout)?;
                extract_matches(session, sel)
            })
            .and_then(|page| {
                info!(
                    "{}: {} matches for {} ({} rows skipped)",
                    target.team,
                    page.matches.len(),
                    page.season,
                    page.skipped
                );
                doc.append_matches(
                    &target.division,
                    &target.conference,
                    &target.team,
                    &page.season,
                    page.matches,
                )
            });

            match result {
                Ok(()) => processed += 1,
                Err(e) => {
                    warn!("skipping matches for {} ({}): {e}", target.team, target.link);
                    skipped += 1;
                }
            }
        }

        self.store.save(&doc)?;
        Ok(self.report(Phase::CollectMatches, processed, skipped))
    }

    /// Write the deduplicated, date-ordered matches of the target conference
    /// as CSV to `output`, or to the configured export file.
    pub fn export_matches(&self, output: Option<&Path>) -> Result<PhaseReport> {
        let cfg = self.config;
        let doc = self.store.load()?;
        let rows = flatten_matches(&doc, &cfg.target_conference);
        let path = output.unwrap_or(&cfg.export_file);

        write_csv_file(&rows, path)?;
        info!("exported {} matches to {}", rows.len(), path.display());

        Ok(PhaseReport {
            phase: Phase::ExportMatches,
            processed: rows.len(),
            skipped: 0,
            artifact: path.display().to_string(),
        })
    }

    fn targets(
        &self,
        doc: &LeagueDocument,
        keep: impl Fn(&str, &TeamRecord) -> bool,
    ) -> Vec<TeamTarget> {
        doc.teams()
            .filter(|(_, conference, _, record)| keep(conference, record))
            .map(|(division, conference, team, record)| {
                TeamTarget::new(division, conference, team, record)
            })
            .collect()
    }

    /// Fixed wait for client-side rendering after a navigation.
    fn settle(&self) {
        if !self.config.render_delay.is_zero() {
            std::thread::sleep(self.config.render_delay);
        }
    }

    fn report(&self, phase: Phase, processed: usize, skipped: usize) -> PhaseReport {
        PhaseReport {
            phase,
            processed,
            skipped,
            artifact: self.store.location(),
        }
    }
}

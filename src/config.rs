//! Runtime Configuration

use crate::document::DEFAULT_DIVISION;
use crate::error::{Result, ScrapeError};
use crate::selectors::PageSelectors;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://premier.upsl.com/teams/";
pub const DEFAULT_DATA_FILE: &str = "upsl_data.json";
pub const DEFAULT_EXPORT_FILE: &str = "upsl_matches.csv";
pub const DEFAULT_CONFERENCE: &str = "Midwest Central";
pub const DEFAULT_SITE_PREFIX: &str = "https://premier";

#[derive(Debug, Clone)]
pub struct Config {
    /// League page listing every team card.
    pub base_url: String,
    pub data_file: PathBuf,
    pub export_file: PathBuf,
    pub division: String,
    /// Conference used by match collection and export.
    pub target_conference: String,
    /// Only team links starting with this are visited for rosters.
    pub site_prefix: String,
    /// Fixed settle time after each navigation.
    pub render_delay: Duration,
    /// Upper bound for condition waits.
    pub wait_timeout: Duration,
    pub headless: bool,
    pub selectors: PageSelectors,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            data_file: DEFAULT_DATA_FILE.into(),
            export_file: DEFAULT_EXPORT_FILE.into(),
            division: DEFAULT_DIVISION.into(),
            target_conference: DEFAULT_CONFERENCE.into(),
            site_prefix: DEFAULT_SITE_PREFIX.into(),
            render_delay: Duration::from_secs(2),
            wait_timeout: Duration::from_secs(10),
            headless: true,
            selectors: PageSelectors::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `UPSL_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = Self::default();
        if let Some(v) = lookup("UPSL_BASE_URL") {
            cfg.base_url = v;
        }
        if let Some(v) = lookup("UPSL_DATA_FILE") {
            cfg.data_file = v.into();
        }
        if let Some(v) = lookup("UPSL_EXPORT_FILE") {
            cfg.export_file = v.into();
        }
        if let Some(v) = lookup("UPSL_DIVISION") {
            cfg.division = v;
        }
        if let Some(v) = lookup("UPSL_CONFERENCE") {
            cfg.target_conference = v;
        }
        if let Some(v) = lookup("UPSL_SITE_PREFIX") {
            cfg.site_prefix = v;
        }
        if let Some(v) = lookup("UPSL_RENDER_DELAY_MS") {
            cfg.render_delay = parse_millis("UPSL_RENDER_DELAY_MS", &v)?;
        }
        if let Some(v) = lookup("UPSL_WAIT_TIMEOUT_MS") {
            cfg.wait_timeout = parse_millis("UPSL_WAIT_TIMEOUT_MS", &v)?;
        }
        if let Some(v) = lookup("UPSL_HEADLESS") {
            cfg.headless = parse_bool("UPSL_HEADLESS", &v)?;
        }
        Ok(cfg)
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }

    pub fn with_conference(mut self, conference: &str) -> Self {
        self.target_conference = conference.to_string();
        self
    }

    pub fn with_site_prefix(mut self, prefix: &str) -> Self {
        self.site_prefix = prefix.to_string();
        self
    }

    pub fn with_render_delay(mut self, delay: Duration) -> Self {
        self.render_delay = delay;
        self
    }

    pub fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = timeout;
        self
    }
}

fn parse_millis(key: &str, value: &str) -> Result<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| ScrapeError::Parse(format!("{key}={value}: {e}")))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ScrapeError::Parse(format!("{key}={value}: expected a boolean"))),
    }
}

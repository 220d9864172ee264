#![doc = include_str!("../README.md")]

#[macro_use]
mod macros;

pub mod browser;
pub mod cli;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod export;
pub mod extract;
pub mod selectors;
pub mod store;


pub use config::Config;
pub use document::{LeagueDocument, MatchRecord, RosterEntry, TeamRecord};
pub use engine::{Engine, Phase, PhaseReport};
pub use error::{Result, ScrapeError};
pub use store::{DocumentStore, LocalFsStore, MemoryStore};

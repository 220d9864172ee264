use crate::browser::ChromeDriver;
use crate::config::Config;
use crate::engine::{Engine, Phase, PhaseReport};
use crate::store::LocalFsStore;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "upsl-scrape",
    version,
    about = "Scrape UPSL teams, rosters and match results",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read every team card and rebuild the league file
    DiscoverTeamLinks,
    /// Fetch rosters for every team in the league file
    CollectRosters,
    /// Fetch results for rostered teams in the target conference
    CollectMatches,
    /// Write deduplicated matches as CSV
    ExportMatches {
        /// Defaults to UPSL_EXPORT_FILE, or upsl_matches.csv
        output: Option<PathBuf>,
    },
}

impl Command {
    fn phase(&self) -> Phase {
        match self {
            Command::DiscoverTeamLinks => Phase::DiscoverTeamLinks,
            Command::CollectRosters => Phase::CollectRosters,
            Command::CollectMatches => Phase::CollectMatches,
            Command::ExportMatches { .. } => Phase::ExportMatches,
        }
    }
}

/// Parse arguments, run one phase and print its summary.
///
/// Missing or unknown commands print usage and exit non-zero.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    match dispatch(cli.cmd) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn dispatch(cmd: Command) -> anyhow::Result<PhaseReport> {
    let config = Config::from_env().context("reading UPSL_* configuration")?;
    let driver = ChromeDriver::new(config.headless);
    let store = LocalFsStore::new(&config.data_file);
    let engine = Engine::new(&driver, &store, &config);

    let phase = cmd.phase();
    let report = match cmd {
        Command::DiscoverTeamLinks => engine.discover_team_links(),
        Command::CollectRosters => engine.collect_rosters(),
        Command::CollectMatches => engine.collect_matches(),
        Command::ExportMatches { output } => engine.export_matches(output.as_deref()),
    }
    .with_context(|| format!("{phase} failed"))?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_command_names() {
        let cli = Cli::try_parse_from(["upsl-scrape", "collect-matches"]).unwrap();
        assert_eq!(cli.cmd.phase(), Phase::CollectMatches);

        let cli = Cli::try_parse_from(["upsl-scrape", "export-matches", "out.csv"]).unwrap();
        match cli.cmd {
            Command::ExportMatches { output } => assert_eq!(output, Some(PathBuf::from("out.csv"))),
            _ => panic!("expected export-matches"),
        }
    }

    #[test]
    fn test_missing_or_unknown_command_is_rejected() {
        assert!(Cli::try_parse_from(["upsl-scrape"]).is_err());
        assert!(Cli::try_parse_from(["upsl-scrape", "scrape-everything"]).is_err());
        assert!(Cli::try_parse_from(["upsl-scrape", "collect-rosters", "--fast"]).is_err());
    }
}

//! Command-line interface for raubair.
//!
//! This module provides the CLI structure and command handlers for the
//! `raubair` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, ListCommand, OutputFormat, ReportCommand, SearchCommand, SearchMethod};

/// raubair - airline reservation console
///
/// Records flight bookings in a flat text file, with an interactive booking
/// menu and non-interactive commands for listing, searching, and reporting.
#[derive(Debug, Parser)]
#[command(name = "raubair")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute; defaults to the interactive shell
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the interactive booking menu
    Shell,

    /// List stored reservations
    List(ListCommand),

    /// Look up a reservation by reference number
    Search(SearchCommand),

    /// Show the sales report
    Report(ReportCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "raubair");
    }

    #[test]
    fn test_no_subcommand_means_shell() {
        let cli = Cli::try_parse_from(["raubair"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_shell() {
        let cli = Cli::try_parse_from(["raubair", "shell"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Shell)));
    }

    #[test]
    fn test_parse_list_with_format() {
        let cli = Cli::try_parse_from(["raubair", "list", "--format", "json"]).unwrap();
        let Some(Command::List(cmd)) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(cmd.format, OutputFormat::Json);
        assert_eq!(cmd.limit, None);
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from(["raubair", "search", "RB3F9K2A"]).unwrap();
        let Some(Command::Search(cmd)) = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(cmd.reference, "RB3F9K2A");
        assert_eq!(cmd.method, SearchMethod::Linear);
    }

    #[test]
    fn test_parse_search_binary() {
        let cli =
            Cli::try_parse_from(["raubair", "search", "RB3F9K2A", "--method", "binary"]).unwrap();
        let Some(Command::Search(cmd)) = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(cmd.method, SearchMethod::Binary);
    }

    #[test]
    fn test_parse_report_json() {
        let cli = Cli::try_parse_from(["raubair", "report", "--json"]).unwrap();
        let Some(Command::Report(cmd)) = cli.command else {
            panic!("expected report command");
        };
        assert!(cmd.json);
    }

    #[test]
    fn test_parse_config_path() {
        let cli = Cli::try_parse_from(["raubair", "config", "path"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Config(ConfigCommand::Path))));
    }

    #[test]
    fn test_parse_with_config() {
        let cli = Cli::try_parse_from(["raubair", "-c", "/custom/config.toml", "report"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_verbosity_flags() {
        let cli = Cli::try_parse_from(["raubair", "-v", "report"]).unwrap();
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Verbose);

        let cli = Cli::try_parse_from(["raubair", "-vv", "report"]).unwrap();
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Trace);

        let cli = Cli::try_parse_from(["raubair", "-q", "report"]).unwrap();
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Quiet);

        let cli = Cli::try_parse_from(["raubair", "report"]).unwrap();
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Normal);
    }
}

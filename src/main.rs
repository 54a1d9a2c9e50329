//! The raubair binary.

use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use raubair::algo;
use raubair::cli::{
    Cli, Command, ConfigCommand, ListCommand, OutputFormat, ReportCommand, SearchCommand,
    SearchMethod,
};
use raubair::logging::init_logging;
use raubair::report::Summary;
use raubair::shell::{screens, Shell};
use raubair::{Config, Error, Store};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity());

    let config =
        Config::load_from(cli.config.clone()).context("failed to load configuration")?;
    debug!(data_path = %config.data_path().display(), "configuration loaded");

    match cli.command {
        None | Some(Command::Shell) => run_shell(&config),
        Some(Command::List(cmd)) => handle_list(&cmd, &config),
        Some(Command::Search(cmd)) => handle_search(&cmd, &config),
        Some(Command::Report(cmd)) => handle_report(&cmd, &config),
        Some(Command::Config(cmd)) => handle_config(&cmd, &config),
    }
}

fn open_store(config: &Config) -> anyhow::Result<Store> {
    Store::open(config.data_path()).context("failed to open the reservation store")
}

/// Run the interactive booking menu over stdin/stdout.
fn run_shell(config: &Config) -> anyhow::Result<()> {
    let mut store = open_store(config)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(stdin.lock(), stdout.lock(), &mut store, config);
    shell.run()?;
    Ok(())
}

fn handle_list(cmd: &ListCommand, config: &Config) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let shown = cmd.limit.unwrap_or(store.len()).min(store.len());
    let reservations = &store.reservations()[..shown];

    let mut out = io::stdout().lock();
    match cmd.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, reservations)?;
            writeln!(out)?;
        }
        OutputFormat::Table => {
            writeln!(
                out,
                "  {:<8}  {:<8}  {:<7}  {:>6}  {:>11}",
                "REF", "DEST", "TIME", "PARTY", "TOTAL"
            )?;
            for reservation in reservations {
                screens::reservation_line(&mut out, reservation)?;
            }
        }
        OutputFormat::Plain => {
            for reservation in reservations {
                writeln!(
                    out,
                    "{} {} RM{:.2}",
                    reservation.reference, reservation.destination, reservation.total_price
                )?;
            }
        }
    }
    if cmd.format != OutputFormat::Json && store.len() > shown {
        writeln!(out, "  ({} more not shown)", store.len() - shown)?;
    }
    Ok(())
}

fn handle_search(cmd: &SearchCommand, config: &Config) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let found = match cmd.method {
        SearchMethod::Linear => {
            algo::linear_search_by(store.reservations(), |r| r.reference == cmd.reference)
                .map(|index| store.reservations()[index].clone())
        }
        SearchMethod::Binary => {
            let mut sorted = store.reservations().to_vec();
            sorted.sort_by(|a, b| a.reference.cmp(&b.reference));
            algo::binary_search_by(&sorted, |r| r.reference.as_str().cmp(&cmd.reference))
                .map(|index| sorted[index].clone())
        }
    };

    let Some(reservation) = found else {
        return Err(Error::not_found(cmd.reference.clone()).into());
    };

    let mut out = io::stdout().lock();
    if cmd.json {
        serde_json::to_writer_pretty(&mut out, &reservation)?;
        writeln!(out)?;
    } else {
        screens::boarding_pass(&mut out, &reservation)?;
    }
    Ok(())
}

fn handle_report(cmd: &ReportCommand, config: &Config) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let totals = Summary::from_reservations(store.reservations());

    let mut out = io::stdout().lock();
    if cmd.json {
        serde_json::to_writer_pretty(&mut out, &totals)?;
        writeln!(out)?;
    } else {
        screens::summary(&mut out, &totals)?;
    }
    Ok(())
}

fn handle_config(cmd: &ConfigCommand, config: &Config) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    match cmd {
        ConfigCommand::Show { json } => {
            if *json {
                serde_json::to_writer_pretty(&mut out, config)?;
                writeln!(out)?;
            } else {
                writeln!(out, "data file       : {}", config.data_path().display())?;
                writeln!(out, "max party size  : {}", config.booking.max_party_size)?;
                writeln!(out, "coupons         :")?;
                for (code, rate) in &config.pricing.coupons {
                    writeln!(out, "  - {code:<14} {:.0}% off", rate * 100.0)?;
                }
            }
        }
        ConfigCommand::Path => {
            writeln!(out, "{}", Config::default_config_path().display())?;
        }
        ConfigCommand::Validate { file } => {
            let checked = Config::load_from(file.clone())?;
            checked.validate()?;
            writeln!(out, "Configuration is valid.")?;
        }
    }
    Ok(())
}

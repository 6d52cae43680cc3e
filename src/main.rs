mod config;
mod generator;
mod manager;

use crate::manager::Manager;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    #[arg(long)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a new synthetic series.
    Generate,

    /// Analyze every series and write one report per series.
    Analyze,

    /// Remove all reports.
    Clean,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    let mgr = Manager::new(args.data_dir).context("failed to construct mgr")?;

    match args.command {
        Command::Generate => mgr.generate_series()?,
        Command::Analyze => mgr.analyze_series()?,
        Command::Clean => mgr.clean_reports()?,
    }

    Ok(())
}

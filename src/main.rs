mod analysis;
mod config;

use crate::analysis::{Analyzer, save_job_reports, save_series_reports};
use crate::config::Config;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    #[arg(long)]
    config: PathBuf,

    /// Log intermediate sums of every statistic.
    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute the statistic of every job.
    Evaluate {
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Compute descriptive statistics of every series.
    Describe {
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Only load and validate the config.
    Check,
}

fn main() {
    let args = CLI::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli(args) {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli(args: CLI) -> Result<()> {
    log::info!("{args:#?}");

    let cfg = Config::from_file(&args.config).context("failed to construct cfg")?;
    log::debug!("{cfg:#?}");

    let analyzer = Analyzer::new(&cfg);
    match args.command {
        Command::Evaluate { output } => {
            let reports = analyzer.evaluate().context("failed to evaluate jobs")?;
            if let Some(output) = output {
                save_job_reports(&reports, output).context("failed to save job reports")?;
            }
        }
        Command::Describe { output } => {
            let reports = analyzer.describe();
            if let Some(output) = output {
                save_series_reports(&reports, output).context("failed to save series reports")?;
            }
        }
        Command::Check => log::info!("config is valid"),
    }

    Ok(())
}

//! ARCNET CLI - Solar active region classification from NOAA SRS reports.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod exit_codes;
mod utils;

use exit_codes::ExitCode;

#[derive(Parser)]
#[command(name = "arcnet")]
#[command(author, version, about = "Solar active region classification from NOAA SRS reports", long_about = None)]
#[command(after_help = exit_codes::HELP)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Read YYYYMMDDSRS.txt files from this directory instead of the NOAA archive
    #[arg(long, global = true, value_name = "DIR")]
    archive_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Suppress human-readable output (exit code only)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify the AR cutout centred on a heliographic position
    Classify {
        /// Observation time (e.g. 2022-11-12T13:14:15Z)
        #[arg(long, value_parser = utils::parse_time)]
        time: DateTime<Utc>,

        /// Cutout centre latitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Cutout centre longitude in degrees (west positive)
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },

    /// Detect and classify every catalogued AR on the full disk
    Detect {
        /// Observation time (e.g. 2022-11-12T13:14:15Z)
        #[arg(long, value_parser = utils::parse_time)]
        time: DateTime<Utc>,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "arcnet_core=info,arcnet=info,warn",
        _ => "arcnet_core=debug,arcnet=debug,info",
    };

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() {
                exit_codes::USAGE_ERROR
            } else {
                exit_codes::SUCCESS
            };
            // Help and version go to stdout, usage errors to stderr
            let _ = err.print();
            return std::process::ExitCode::from(code);
        }
    };

    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Classify { time, lat, lon } => {
            commands::classify::execute(cli.archive_dir, time, lat, lon, cli.json, cli.quiet)
                .await
        }
        Commands::Detect { time } => {
            commands::detect::execute(cli.archive_dir, time, cli.json, cli.quiet).await
        }
    };

    let exit = match result {
        Ok(()) => ExitCode::success(),
        Err(err) => ExitCode::from_anyhow(&err),
    };

    if let Some(message) = &exit.message {
        eprintln!("{} {}", "Error:".red().bold(), message);
    }

    std::process::ExitCode::from(exit.code)
}

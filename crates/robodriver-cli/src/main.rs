//! robodriver - validate car configurations and replay recorded race ticks
//!
//! No vehicle dynamics are simulated: `replay` feeds host-recorded snapshots
//! to a single controller and prints the command produced for each.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod error;
mod output;
mod scenario;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "robodriver")]
#[command(about = "Robot race driver - check car configs and replay recorded ticks")]
#[command(version)]
#[command(long_about = "
robodriver runs the per-tick race controller outside the host simulation.

Car, parameter and scenario files may be JSON or YAML (chosen by extension).
Use --json for machine-readable output suitable for scripting.
")]
struct Cli {
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a car file and print the coefficients derived at race start
    Check {
        /// Car specification file
        car: PathBuf,

        /// Tuning parameter file
        #[arg(short, long)]
        params: Option<PathBuf>,

        /// Host tick duration in seconds
        #[arg(long, env = "ROBODRIVER_TICK")]
        tick: Option<f32>,
    },

    /// Run a recorded scenario through one controller
    Replay {
        /// Scenario file (car, params, track and vehicle snapshots)
        scenario: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("robodriver={log_level}").into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match execute_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Check { car, params, tick } => {
            commands::check::execute(car, params.as_deref(), *tick, cli.json)
        }
        Commands::Replay { scenario } => commands::replay::execute(scenario, cli.json),
    }
}

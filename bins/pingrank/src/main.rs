//! pingrank - rank geolocated pings by distance
//!
//! Reads a CSV export of device pings, ranks every usable row by distance
//! from a reference point and lists the rows clustered around the last one.

use clap::{Args, Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use pingrank_cli::output::Status;
use pingrank_core::{FailureKind, ProcessError};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod context;

use context::Context;

/// Rank geolocated pings by distance and find clusters
#[derive(Parser)]
#[command(name = "pingrank")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (defaults to .pingrank.toml in the working directory)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print run metrics as JSON to stderr when done
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

/// CSV input plus an optional reference point override
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// CSV file with a header row (`-` reads stdin)
    pub file: PathBuf,

    /// Reference latitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Reference longitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lon: Option<f64>,
}

/// Output format for record listings
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned plain-text table
    Table,
    /// JSON array of objects
    Json,
    /// CSV with computed columns appended
    Csv,
}

/// How the nearby anchor is chosen
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorArg {
    /// Last valid row of the file
    LastRow,
    /// Row with the latest timestamp
    LatestTimestamp,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank every row by distance from the reference point
    Rank {
        #[command(flatten)]
        input: InputArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Show only the closest N rows
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// List rows within a radius of the last registered row
    Nearby {
        #[command(flatten)]
        input: InputArgs,

        /// Clustering radius in kilometers
        #[arg(short, long)]
        radius: Option<f64>,

        /// Anchor selection
        #[arg(long, value_enum)]
        anchor: Option<AnchorArg>,

        /// Timestamp column for `--anchor latest-timestamp`
        #[arg(long)]
        timestamp_column: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Count, min, max and mean distance from the reference point
    Summary {
        #[command(flatten)]
        input: InputArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Emit `{id, lat, lon}` points for map rendering
    Map {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Print an SMS deep link sharing the app
    Share {
        /// Recipient phone number
        phone: String,

        /// App URL to share
        #[arg(long)]
        url: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let ctx = match Context::load(cli.config.as_deref(), cli.verbose) {
        Ok(ctx) => ctx,
        Err(e) => return report(&e),
    };

    let result = match cli.command {
        Commands::Rank { input, format, limit } => commands::rank::run(&ctx, &input, format, limit),

        Commands::Nearby { input, radius, anchor, timestamp_column, format } => {
            let strategy = ctx.anchor_strategy(anchor, timestamp_column);
            commands::nearby::run(&ctx, &input, radius, &strategy, format)
        }

        Commands::Summary { input, json } => commands::summary::run(&ctx, &input, json),

        Commands::Map { input } => commands::map::run(&ctx, &input),

        Commands::Share { phone, url } => commands::share::run(&ctx, &phone, url.as_deref()),
    };

    if cli.metrics {
        let metrics = pingrank_telemetry::metrics().export_json();
        match serde_json::to_string_pretty(&metrics) {
            Ok(text) => eprintln!("{}", text),
            Err(e) => tracing::warn!(error = %e, "Could not serialise metrics"),
        }
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

/// Print an error and choose the exit code.
fn report(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<ProcessError>() {
        Some(process_err) => {
            match process_err.kind() {
                FailureKind::NoValidRows => {
                    Status::warning(&format!("No valid data: {}", no_valid_detail(process_err)));
                }
                kind => {
                    Status::error(&format!("{} ({}): {:#}", kind, process_err.code(), err));
                }
            }
            ExitCode::from(process_err.exit_code() as u8)
        }
        None => {
            eprintln!("{} {:#}", "Error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn no_valid_detail(err: &ProcessError) -> String {
    match err {
        ProcessError::NoValidRows { total: 0, .. } => "the file has no data rows".to_string(),
        ProcessError::NoValidRows { total, skipped } => {
            format!("{} of {} rows had unusable coordinates", skipped, total)
        }
        other => other.to_string(),
    }
}

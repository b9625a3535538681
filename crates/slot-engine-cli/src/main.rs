//! `slots` CLI — compute shared interview availability from busy schedules.
//!
//! ## Usage
//!
//! ```sh
//! # Slots for template 1 using slots.toml in the current directory
//! slots availability --template 1
//!
//! # Explicit window, working hours, and a pinned clock
//! slots availability --template 1 \
//!   --start 2030-01-01T09:00:00Z --end 2030-01-01T17:00:00Z \
//!   --start-hour 9 --end-hour 17 --now 2029-12-01T00:00:00Z
//!
//! # Common-free windows for interviewers 1 and 2
//! slots windows --interviewer 1,2 --start 2030-01-01T09:00:00Z --end 2030-01-01T17:00:00Z
//! ```
//!
//! JSON goes to stdout; logs and errors go to stderr.

mod config;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use slot_engine::interval::{parse_iso8601, to_iso8601_utc};
use slot_engine::timeline::common_free_windows_between;
use slot_engine::{availability_for_template, AvailabilityQuery, ScheduleProvider, SlotError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Shared interview availability from busy schedules"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log filter (e.g. "debug", "slot_engine=trace"); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Path to the TOML config (defaults to ./slots.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Busy-schedule JSON file, overriding the config entry
    #[arg(long, global = true)]
    schedules: Option<PathBuf>,

    /// Treat this ISO 8601 instant as "now" instead of the system clock
    #[arg(long, global = true)]
    now: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List every slot in which all of a template's interviewers are free
    Availability {
        /// Interview template id from the config
        #[arg(short, long)]
        template: u64,
        /// Search window start (ISO 8601); defaults to now + minimum notice
        #[arg(long)]
        start: Option<String>,
        /// Search window end (ISO 8601); defaults to start + 7 days
        #[arg(long)]
        end: Option<String>,
        /// First working hour of the UTC day (0-23, default 9)
        #[arg(long, allow_negative_numbers = true)]
        start_hour: Option<i64>,
        /// Closing hour of the UTC day (0-23, default 17)
        #[arg(long, allow_negative_numbers = true)]
        end_hour: Option<i64>,
        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Print the windows in which all listed interviewers are free
    Windows {
        /// Interviewer ids (comma-separated or repeated)
        #[arg(short, long = "interviewer", value_delimiter = ',', required = true)]
        interviewers: Vec<u64>,
        /// Search window start (ISO 8601)
        #[arg(long)]
        start: String,
        /// Search window end (ISO 8601)
        #[arg(long)]
        end: String,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WindowDto {
    start: String,
    end: String,
    duration_minutes: i64,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_error(&err),
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::resolve(cli.config.as_deref())?;
    let now = resolve_now(cli.now.as_deref())?;
    let provider = config.provider(cli.schedules.as_deref())?;

    match cli.command {
        Commands::Availability {
            template,
            start,
            end,
            start_hour,
            end_hour,
            compact,
        } => {
            let query = AvailabilityQuery {
                start,
                end,
                start_hour,
                end_hour,
            };
            info!(template, now = %to_iso8601_utc(now), "computing availability");

            let response = availability_for_template(
                &config.catalog(),
                template,
                &query,
                &provider,
                now,
                config.minimum_notice()?,
            )?;

            let out = if compact {
                serde_json::to_string(&response)?
            } else {
                serde_json::to_string_pretty(&response)?
            };
            println!("{}", out);
        }
        Commands::Windows {
            interviewers,
            start,
            end,
        } => {
            let start = parse_iso8601(&start)
                .with_context(|| format!("Invalid --start: {}", start))?;
            let end = parse_iso8601(&end).with_context(|| format!("Invalid --end: {}", end))?;
            if end <= start {
                return Err(SlotError::invalid_range("end", "end must be after start").into());
            }

            let schedules = provider.fetch_busy_schedules(&interviewers)?;
            let windows: Vec<WindowDto> = common_free_windows_between(&schedules, start, end)
                .iter()
                .map(|w| WindowDto {
                    start: to_iso8601_utc(w.start()),
                    end: to_iso8601_utc(w.end()),
                    duration_minutes: w.duration_minutes(),
                })
                .collect();

            println!("{}", serde_json::to_string_pretty(&windows)?);
        }
    }

    Ok(())
}

fn resolve_now(raw: Option<&str>) -> Result<DateTime<Utc>> {
    match raw {
        Some(raw) => parse_iso8601(raw).with_context(|| format!("Invalid --now: {}", raw)),
        None => Ok(Utc::now()),
    }
}

/// Print a structured error to stderr and pick the exit code.
///
/// Unknown templates exit with 2, rejected parameters and everything else with 1.
fn report_error(err: &anyhow::Error) -> ExitCode {
    let Some(slot_err) = err.downcast_ref::<SlotError>() else {
        eprintln!("Error: {:#}", err);
        return ExitCode::from(1);
    };

    match slot_err {
        SlotError::NotFound(_) => {
            eprintln!("{}", json!({ "error": "Interview template not found" }));
            ExitCode::from(2)
        }
        SlotError::InvalidQuery { field, message } | SlotError::InvalidRange { field, message } => {
            let mut body = serde_json::Map::new();
            body.insert(field.clone(), json!([message]));
            eprintln!("{}", serde_json::Value::Object(body));
            ExitCode::from(1)
        }
        _ => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(1)
        }
    }
}

//! Logs command - inspect the session event log

use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::DateTime;
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;
use teller_core::services::LogEntry;
use teller_core::{EntryPoint, LoggingService};

use super::ensure_teller_dir;
use crate::output;

#[derive(Subcommand)]
pub enum LogsCommands {
    /// Show the most recent events
    List {
        /// Number of events to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
        /// Only events that ended in an error
        #[arg(long)]
        failures: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Replay the steps of one session
    Session {
        /// Session id as shown by `logs list`
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Count sessions and failures
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete events older than a number of days
    Prune {
        #[arg(long, default_value = "30")]
        older_than_days: u32,
        /// Do not ask for confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },
    /// Write every event to a JSON file
    Export {
        /// Destination file
        output: PathBuf,
    },
}

fn open_log() -> Result<LoggingService> {
    LoggingService::new(&ensure_teller_dir()?, EntryPoint::Cli, env!("CARGO_PKG_VERSION"))
}

pub fn run(command: LogsCommands) -> Result<()> {
    let log = open_log()?;

    match command {
        LogsCommands::List {
            limit,
            failures,
            json,
        } => print_entries(&log.recent(limit, failures)?, json)?,
        LogsCommands::Session { id, json } => {
            let entries = log.session(&id)?;
            if entries.is_empty() {
                bail!("No events recorded for session {}", id);
            }
            print_entries(&entries, json)?;
        }
        LogsCommands::Stats { json } => {
            let stats = log.stats()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
                return Ok(());
            }
            let size = std::fs::metadata(log.db_path()).map(|m| m.len()).unwrap_or(0);
            println!("{}", "Session Log".bold());
            println!("  Sessions: {}", stats.sessions);
            println!("  Failed sessions: {}", stats.failed_sessions);
            println!("  Verification failures: {}", stats.verification_failures);
            println!("  Events: {}", stats.events);
            println!(
                "  Database: {} ({})",
                log.db_path().display(),
                output::format_size(size)
            );
        }
        LogsCommands::Prune {
            older_than_days,
            force,
        } => {
            let confirmed = force
                || Confirm::new()
                    .with_prompt(format!("Delete events older than {} days?", older_than_days))
                    .default(false)
                    .interact()?;
            if !confirmed {
                output::info("Nothing deleted");
                return Ok(());
            }
            let deleted = log.prune(older_than_days)?;
            output::success(&format!("Deleted {} event(s)", deleted));
        }
        LogsCommands::Export { output: path } => {
            let written = log.export_json(&path)?;
            output::success(&format!("Wrote {} event(s) to {}", written, path.display()));
        }
    }

    Ok(())
}

fn print_entries(entries: &[LogEntry], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }
    if entries.is_empty() {
        println!("No events recorded.");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Time", "Session", "Location", "Event", "Operation", "Error"]);
    for entry in entries {
        table.add_row(vec![
            recorded_at(entry.recorded_at),
            entry.session_id.clone().unwrap_or_else(|| "-".to_string()),
            entry.location.clone().unwrap_or_default(),
            entry.event.clone(),
            entry.operation.clone().unwrap_or_default(),
            entry.error_kind.clone().unwrap_or_default(),
        ]);
    }
    println!("{}", table);
    Ok(())
}

fn recorded_at(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| ms.to_string())
}

//! Teller CLI - a bank branch and its ATM in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;
mod terminal;

use commands::{accounts, config, logs, session};

/// Teller - a bank branch and its ATM in your terminal
#[derive(Parser)]
#[command(name = "teller", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an ATM session against the demo branch (default)
    Session {
        /// Treat a failed card/PIN verification as an error
        #[arg(long)]
        strict: bool,
        /// Read plain lines from stdin even on an interactive terminal
        #[arg(long)]
        plain: bool,
    },

    /// Show customers, accounts and cards of the demo branch
    Accounts {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// View or change branch and ATM settings
    Config {
        #[command(subcommand)]
        command: Option<config::ConfigCommands>,
    },

    /// View and manage the session event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::from(exit_status(&e))
        }
    }
}

/// Session errors keep their own status even when wrapped in context
fn exit_status(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<teller_core::Error>()
        .map(teller_core::Error::exit_code)
        .unwrap_or(1)
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        None => session::run(false, false),
        Some(Commands::Session { strict, plain }) => session::run(strict, plain),
        Some(Commands::Accounts { json }) => accounts::run(json),
        Some(Commands::Config { command }) => config::run(command),
        Some(Commands::Logs { command }) => logs::run(command),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    fn failing(err: teller_core::Error) -> Result<()> {
        Err(err.into())
    }

    #[test]
    fn test_exit_status_survives_context() {
        let err = failing(teller_core::Error::UnknownAccount("a1".into()))
            .context("Session failed")
            .unwrap_err();
        assert_eq!(exit_status(&err), 3);

        let err = failing(teller_core::Error::InsufficientFunds {
            balance: 10,
            requested: 20,
        })
        .context("first")
        .context("second")
        .unwrap_err();
        assert_eq!(exit_status(&err), 5);
    }

    #[test]
    fn test_other_errors_exit_with_one() {
        let err = anyhow::anyhow!("settings unreadable").context("Failed to initialize teller context");
        assert_eq!(exit_status(&err), 1);
    }
}

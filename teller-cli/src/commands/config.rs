//! Config command - view and change branch and ATM settings

use anyhow::{anyhow, Result};
use clap::{Subcommand, ValueEnum};
use colored::Colorize;
use teller_core::config::Config;

use super::ensure_teller_dir;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update configuration values
    Set {
        /// Bank name
        #[arg(long)]
        bank_name: Option<String>,
        /// Branch code, stamped on every opened account
        #[arg(long)]
        branch_code: Option<String>,
        /// Branch address
        #[arg(long)]
        branch_address: Option<String>,
        /// Where the ATM is installed
        #[arg(long)]
        atm_location: Option<String>,
        /// Turn the session event log on or off
        #[arg(long)]
        logging: Option<Toggle>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

pub fn run(command: Option<ConfigCommands>) -> Result<()> {
    let teller_dir = ensure_teller_dir()?;

    match command {
        Some(ConfigCommands::Show { json }) => show(&Config::load(&teller_dir)?, json),
        None => show(&Config::load(&teller_dir)?, false),
        Some(ConfigCommands::Set {
            bank_name,
            branch_code,
            branch_address,
            atm_location,
            logging,
        }) => {
            let mut config = Config::load(&teller_dir)?;
            if let Some(name) = bank_name {
                config.branch.bank_name = name;
            }
            if let Some(code) = branch_code {
                config.branch.branch_code = code;
            }
            if let Some(address) = branch_address {
                config.branch.branch_address = address;
            }
            if let Some(location) = atm_location {
                config.atm_location = location;
            }
            if let Some(toggle) = logging {
                config.set_logging(matches!(toggle, Toggle::On));
            }

            config
                .branch
                .validate()
                .map_err(|e| anyhow!("Invalid branch settings: {}", e))?;
            config.save(&teller_dir)?;
            println!("{}", "Configuration saved".green());
            Ok(())
        }
    }
}

fn show(config: &Config, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    println!("{}", "Teller Configuration".bold());
    println!("  Bank: {}", config.branch.bank_name);
    println!("  Branch code: {}", config.branch.branch_code);
    println!("  Branch address: {}", config.branch.branch_address);
    println!("  ATM location: {}", config.atm_location);
    let logging = if config.logging_enabled {
        "ON".green()
    } else {
        "OFF".yellow()
    };
    if config.logging_overridden() {
        println!("  Event log: {} (TELLER_LOGGING, this run only)", logging);
    } else {
        println!("  Event log: {}", logging);
    }
    Ok(())
}

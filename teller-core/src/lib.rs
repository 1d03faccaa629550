//! Teller Core - branch registry and ATM session logic
//!
//! This crate follows a hexagonal layout:
//!
//! - **domain**: ledger entities (Customer, Account, Card) and errors
//! - **ports**: trait definitions for external dependencies (Terminal)
//! - **services**: the branch registry, the ATM session, demo bootstrap, event log
//! - **adapters**: concrete implementations (console, scripted input, demo data)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod log_migrations;
pub mod ports;
pub mod services;

use std::path::Path;

use anyhow::Result;

use config::Config;
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{Error, Result as CoreResult};
pub use domain::{Account, AccountId, Branch, Card, CardId, Customer, CustomerId};
pub use ports::Terminal;
pub use services::{
    Atm, Bank, EntryPoint, LogEvent, LoggingService, OnboardedClient, SessionEvent,
    SessionOutcome,
};

/// Main context for Teller operations
///
/// Holds the configuration, the bootstrapped branch registry and the
/// optional event log.
pub struct TellerContext {
    pub config: Config,
    pub bank: Bank,
    pub clients: Vec<OnboardedClient>,
    pub logger: Option<LoggingService>,
}

impl TellerContext {
    /// Load settings from `teller_dir` and bootstrap the demo branch
    ///
    /// Event logging is skipped when disabled in settings or when the log
    /// database cannot be opened; it never blocks a session.
    pub fn new(teller_dir: &Path, entry_point: EntryPoint) -> Result<Self> {
        let config = Config::load(teller_dir)?;
        let DemoSetup { bank, clients } = DemoService::new(config.branch.clone()).bootstrap()?;

        let logger = if config.logging_enabled {
            LoggingService::new(teller_dir, entry_point, env!("CARGO_PKG_VERSION")).ok()
        } else {
            None
        };

        Ok(Self {
            config,
            bank,
            clients,
            logger,
        })
    }

    /// An ATM at the configured location, wired to the event log
    pub fn atm(&mut self) -> Atm<'_> {
        let atm = Atm::new(&mut self.bank, self.config.atm_location.clone());
        match &self.logger {
            Some(logger) => atm.with_logger(logger),
            None => atm,
        }
    }

    /// Note a CLI command in the event log, ignoring failures
    pub fn record_command(&self, name: &'static str) {
        if let Some(logger) = &self.logger {
            let _ = logger.record(LogEvent::command(name));
        }
    }
}

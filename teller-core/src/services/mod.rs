//! Service layer - business logic orchestration
//!
//! Services coordinate the ledger entities and the ports. Each service
//! focuses on one use case.

pub mod atm;
mod bank;
mod demo;
pub mod logging;

pub use atm::{Atm, Operation, SessionOutcome, SessionState};
pub use bank::{AccountListing, Bank, CustomerListing};
pub use demo::{DemoService, DemoSetup, OnboardedClient};
pub use logging::{EntryPoint, LogEntry, LogEvent, LogStats, LoggingService, SessionEvent};

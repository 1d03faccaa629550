//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - Console (any `BufRead` + `Write` pair) for the Terminal port
//! - Scripted replay for the Terminal port (tests, automation)
//! - Demo data for bootstrapping the branch

pub mod console;
pub mod demo;
pub mod scripted;

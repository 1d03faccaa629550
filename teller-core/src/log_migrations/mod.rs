//! Event log schema, embedded with include_str!
//!
//! Each entry is (version, sql). The log database remembers the highest
//! version it has applied in `log_schema` and runs only newer entries.

pub const LOG_SCHEMA_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS log_schema (version INTEGER PRIMARY KEY, applied_at TIMESTAMP DEFAULT current_timestamp)";

/// Schema steps in ascending version order
pub const LOG_MIGRATIONS: &[(u32, &str)] = &[(1, include_str!("001_session_events.sql"))];

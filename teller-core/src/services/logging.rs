//! Session event log, stored in logs.duckdb in the teller directory
//!
//! Every ATM session gets a short session id and its steps are appended to
//! `session_events` under that id. Rows hold only static event names, the
//! ATM location, operation names and error kinds. PINs, card and customer
//! ids, balances and amounts never reach the log: the event types below
//! have nowhere to put them.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Context, Result};
use chrono::{Duration, Utc};
use duckdb::{params, Connection, ToSql};
use serde::Serialize;

use crate::log_migrations::{LOG_MIGRATIONS, LOG_SCHEMA_TABLE};
use crate::services::atm::Operation;

const LOG_FILE: &str = "logs.duckdb";

const SELECT_COLUMNS: &str = "SELECT id, recorded_at, entry_point, app_version, session_id, \
     event, location, operation, error_kind FROM session_events";

/// Where the logged activity originated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPoint {
    Cli,
    Library,
}

impl EntryPoint {
    fn as_str(&self) -> &'static str {
        match self {
            EntryPoint::Cli => "cli",
            EntryPoint::Library => "library",
        }
    }
}

/// One step of an ATM session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Started,
    UserVerified,
    VerificationFailed,
    AccountSelected,
    TransactionCompleted(Operation),
    /// Operation and the error kind that ended it
    TransactionFailed(Operation, &'static str),
    Completed,
    /// Error kind that ended the session
    Failed(&'static str),
}

impl SessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::Started => "session_started",
            SessionEvent::UserVerified => "user_verified",
            SessionEvent::VerificationFailed => "verification_failed",
            SessionEvent::AccountSelected => "account_selected",
            SessionEvent::TransactionCompleted(_) => "transaction_completed",
            SessionEvent::TransactionFailed(..) => "transaction_failed",
            SessionEvent::Completed => "session_completed",
            SessionEvent::Failed(_) => "session_failed",
        }
    }

    fn operation(&self) -> Option<Operation> {
        match self {
            SessionEvent::TransactionCompleted(op) | SessionEvent::TransactionFailed(op, _) => {
                Some(*op)
            }
            _ => None,
        }
    }

    fn error_kind(&self) -> Option<&'static str> {
        match self {
            SessionEvent::TransactionFailed(_, kind) | SessionEvent::Failed(kind) => Some(kind),
            _ => None,
        }
    }
}

/// A row waiting to be appended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    event: &'static str,
    session_id: Option<String>,
    location: Option<String>,
    operation: Option<&'static str>,
    error_kind: Option<&'static str>,
}

impl LogEvent {
    /// A step of session `session_id` at the ATM installed in `location`
    pub fn session(session_id: &str, location: &str, event: SessionEvent) -> Self {
        Self {
            event: event.name(),
            session_id: Some(session_id.to_string()),
            location: Some(location.to_string()),
            operation: event.operation().map(|op| op.name()),
            error_kind: event.error_kind(),
        }
    }

    /// A CLI command being run
    pub fn command(name: &'static str) -> Self {
        Self {
            event: "command_executed",
            session_id: None,
            location: None,
            operation: Some(name),
            error_kind: None,
        }
    }
}

/// A stored row
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub id: i64,
    /// Unix time in milliseconds
    pub recorded_at: i64,
    pub entry_point: String,
    pub app_version: String,
    pub session_id: Option<String>,
    pub event: String,
    pub location: Option<String>,
    pub operation: Option<String>,
    pub error_kind: Option<String>,
}

fn row_to_entry(row: &duckdb::Row<'_>) -> duckdb::Result<LogEntry> {
    Ok(LogEntry {
        id: row.get(0)?,
        recorded_at: row.get(1)?,
        entry_point: row.get(2)?,
        app_version: row.get(3)?,
        session_id: row.get(4)?,
        event: row.get(5)?,
        location: row.get(6)?,
        operation: row.get(7)?,
        error_kind: row.get(8)?,
    })
}

/// Totals shown by `teller logs stats`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LogStats {
    pub events: u64,
    pub sessions: u64,
    pub failed_sessions: u64,
    pub verification_failures: u64,
}

pub struct LoggingService {
    conn: Mutex<Connection>,
    db_path: PathBuf,
    entry_point: EntryPoint,
    app_version: String,
}

impl LoggingService {
    /// Open or create the event log in `teller_dir`
    pub fn new(
        teller_dir: &Path,
        entry_point: EntryPoint,
        app_version: impl Into<String>,
    ) -> Result<Self> {
        let db_path = teller_dir.join(LOG_FILE);
        let conn = Connection::open(&db_path)
            .with_context(|| format!("Failed to open event log {:?}", db_path))?;
        migrate(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            db_path,
            entry_point,
            app_version: app_version.into(),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("event log connection poisoned"))
    }

    pub fn record(&self, event: LogEvent) -> Result<()> {
        self.conn()?.execute(
            "INSERT INTO session_events (recorded_at, entry_point, app_version, session_id, \
             event, location, operation, error_kind) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                Utc::now().timestamp_millis(),
                self.entry_point.as_str(),
                &self.app_version,
                &event.session_id,
                event.event,
                &event.location,
                event.operation,
                event.error_kind,
            ],
        )?;
        Ok(())
    }

    fn query(&self, sql: &str, params: &[&dyn ToSql]) -> Result<Vec<LogEntry>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(sql)?;
        let entries = stmt
            .query_map(params, row_to_entry)?
            .collect::<duckdb::Result<Vec<_>>>()?;
        Ok(entries)
    }

    /// Newest entries first; `failures_only` keeps rows that carry an error kind
    pub fn recent(&self, limit: usize, failures_only: bool) -> Result<Vec<LogEntry>> {
        let filter = if failures_only {
            "WHERE error_kind IS NOT NULL"
        } else {
            ""
        };
        let sql = format!("{} {} ORDER BY id DESC LIMIT ?", SELECT_COLUMNS, filter);
        self.query(&sql, params![limit as i64])
    }

    /// Every step of one session, in the order it happened
    pub fn session(&self, session_id: &str) -> Result<Vec<LogEntry>> {
        let sql = format!("{} WHERE session_id = ? ORDER BY id", SELECT_COLUMNS);
        self.query(&sql, params![session_id])
    }

    pub fn stats(&self) -> Result<LogStats> {
        let conn = self.conn()?;
        let stats = conn.query_row(
            "SELECT COUNT(*), \
                    COUNT(DISTINCT session_id), \
                    COUNT(*) FILTER (WHERE event = 'session_failed'), \
                    COUNT(*) FILTER (WHERE event = 'verification_failed') \
             FROM session_events",
            [],
            |row| {
                Ok(LogStats {
                    events: row.get(0)?,
                    sessions: row.get(1)?,
                    failed_sessions: row.get(2)?,
                    verification_failures: row.get(3)?,
                })
            },
        )?;
        Ok(stats)
    }

    /// Drop entries recorded more than `older_than_days` days ago
    pub fn prune(&self, older_than_days: u32) -> Result<u64> {
        let cutoff = (Utc::now() - Duration::days(older_than_days.into())).timestamp_millis();
        let deleted = self
            .conn()?
            .execute("DELETE FROM session_events WHERE recorded_at < ?", params![cutoff])?;
        Ok(deleted as u64)
    }

    /// Write every entry, oldest first, as a JSON array
    pub fn export_json(&self, output_path: &Path) -> Result<usize> {
        let entries = self.query(&format!("{} ORDER BY id", SELECT_COLUMNS), params![])?;
        let file = File::create(output_path)
            .with_context(|| format!("Failed to create {:?}", output_path))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &entries)?;
        Ok(entries.len())
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(LOG_SCHEMA_TABLE)?;
    let current: u32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM log_schema",
        [],
        |row| row.get(0),
    )?;

    for (version, sql) in LOG_MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        conn.execute_batch(sql)
            .with_context(|| format!("Event log schema version {} failed", version))?;
        conn.execute("INSERT INTO log_schema (version) VALUES (?)", params![version])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn service(dir: &Path) -> LoggingService {
        LoggingService::new(dir, EntryPoint::Library, "1.0.0").unwrap()
    }

    #[test]
    fn test_schema_applied_once() {
        let dir = tempdir().unwrap();
        service(dir.path())
            .record(LogEvent::session("s1", "Redmond", SessionEvent::Started))
            .unwrap();

        let reopened = service(dir.path());
        assert_eq!(reopened.recent(10, false).unwrap().len(), 1);
        let versions: u32 = reopened
            .conn()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM log_schema", [], |row| row.get(0))
            .unwrap();
        assert_eq!(versions, 1);
    }

    #[test]
    fn test_failed_transaction_row() {
        let dir = tempdir().unwrap();
        let log = service(dir.path());
        log.record(LogEvent::session(
            "s1",
            "Redmond",
            SessionEvent::TransactionFailed(Operation::Withdraw, "insufficient_funds"),
        ))
        .unwrap();

        let entry = &log.recent(1, false).unwrap()[0];
        assert_eq!(entry.event, "transaction_failed");
        assert_eq!(entry.session_id.as_deref(), Some("s1"));
        assert_eq!(entry.location.as_deref(), Some("Redmond"));
        assert_eq!(entry.operation.as_deref(), Some("withdraw"));
        assert_eq!(entry.error_kind.as_deref(), Some("insufficient_funds"));
        assert_eq!(entry.entry_point, "library");
    }

    #[test]
    fn test_command_row_has_no_session() {
        let dir = tempdir().unwrap();
        let log = service(dir.path());
        log.record(LogEvent::command("accounts")).unwrap();

        let entry = &log.recent(1, false).unwrap()[0];
        assert_eq!(entry.event, "command_executed");
        assert_eq!(entry.operation.as_deref(), Some("accounts"));
        assert!(entry.session_id.is_none());
        assert!(entry.location.is_none());
    }

    #[test]
    fn test_session_events_grouped_in_order() {
        let dir = tempdir().unwrap();
        let log = service(dir.path());
        log.record(LogEvent::session("s1", "Redmond", SessionEvent::Started)).unwrap();
        log.record(LogEvent::session("s2", "Redmond", SessionEvent::Started)).unwrap();
        log.record(LogEvent::session("s1", "Redmond", SessionEvent::VerificationFailed))
            .unwrap();
        log.record(LogEvent::session("s1", "Redmond", SessionEvent::Completed)).unwrap();

        let events: Vec<String> = log
            .session("s1")
            .unwrap()
            .into_iter()
            .map(|e| e.event)
            .collect();
        assert_eq!(events, ["session_started", "verification_failed", "session_completed"]);
        assert!(log.session("nope").unwrap().is_empty());
    }

    #[test]
    fn test_recent_failures_only() {
        let dir = tempdir().unwrap();
        let log = service(dir.path());
        log.record(LogEvent::session("s1", "Redmond", SessionEvent::Started)).unwrap();
        log.record(LogEvent::session("s1", "Redmond", SessionEvent::Failed("unknown_account")))
            .unwrap();

        let failures = log.recent(10, true).unwrap();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].event, "session_failed");
        assert_eq!(log.recent(10, false).unwrap()[0].id, failures[0].id);
    }

    #[test]
    fn test_stats() {
        let dir = tempdir().unwrap();
        let log = service(dir.path());
        for (session, event) in [
            ("s1", SessionEvent::Started),
            ("s1", SessionEvent::VerificationFailed),
            ("s1", SessionEvent::Completed),
            ("s2", SessionEvent::Started),
            ("s2", SessionEvent::Failed("invalid_amount")),
        ] {
            log.record(LogEvent::session(session, "Redmond", event)).unwrap();
        }
        log.record(LogEvent::command("session")).unwrap();

        assert_eq!(
            log.stats().unwrap(),
            LogStats {
                events: 6,
                sessions: 2,
                failed_sessions: 1,
                verification_failures: 1,
            }
        );
    }

    #[test]
    fn test_prune_drops_only_old_entries() {
        let dir = tempdir().unwrap();
        let log = service(dir.path());
        log.record(LogEvent::session("old", "Redmond", SessionEvent::Started)).unwrap();
        log.record(LogEvent::session("new", "Redmond", SessionEvent::Started)).unwrap();

        let three_days = Duration::days(3).num_milliseconds();
        log.conn()
            .unwrap()
            .execute(
                "UPDATE session_events SET recorded_at = recorded_at - ? WHERE session_id = 'old'",
                params![three_days],
            )
            .unwrap();

        assert_eq!(log.prune(30).unwrap(), 0);
        assert_eq!(log.prune(2).unwrap(), 1);
        let left = log.recent(10, false).unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].session_id.as_deref(), Some("new"));
    }

    #[test]
    fn test_export_json() {
        let dir = tempdir().unwrap();
        let log = service(dir.path());
        log.record(LogEvent::session("s1", "Redmond", SessionEvent::Started)).unwrap();
        log.record(LogEvent::session("s1", "Redmond", SessionEvent::Completed)).unwrap();

        let path = dir.path().join("events.json");
        assert_eq!(log.export_json(&path).unwrap(), 2);

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json[0]["event"], "session_started");
        assert_eq!(json[1]["event"], "session_completed");
    }
}

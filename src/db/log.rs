//! Audit trail in the `log` table (`log --print` renders it).

use crate::errors::AppResult;
use crate::ui::messages::warning;
use chrono::Local;
use rusqlite::Connection;
use rusqlite::params;

/// Append one audit line: what happened (`operation`), to whom or what
/// (`target`), and a human readable `message`.
pub fn ttlog(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<()> {
    conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?
    .execute(params![Local::now().to_rfc3339(), operation, target, message])?;

    Ok(())
}

/// Same as [`ttlog`], but a failure only prints a warning.
///
/// Called after the real work is committed.
pub fn ttlog_soft(conn: &Connection, operation: &str, target: &str, message: &str) {
    if let Err(e) = ttlog(conn, operation, target, message) {
        warning(format!("Failed to write audit log ({} {}): {}", operation, target, e));
    }
}

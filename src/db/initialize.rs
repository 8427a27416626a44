use crate::db::migrate::run_pending_migrations;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;

/// Tables the engine reads and writes; all created by migrations.
const REQUIRED_TABLES: &[&str] = &[
    "log",
    "workers",
    "station_needs",
    "assignments",
    "history",
    "pending_moves",
];

/// Bring the schema up to date and verify it.
///
/// No CREATE TABLE lives here: the migration list is the only source of
/// schema. A table still missing afterwards means the file is not one of
/// ours (or was tampered with).
pub fn init_db(conn: &Connection) -> AppResult<()> {
    run_pending_migrations(conn)?;

    let mut stmt = conn.prepare_cached(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
    )?;
    for table in REQUIRED_TABLES {
        let n: i64 = stmt.query_row([table], |row| row.get(0))?;
        if n == 0 {
            return Err(AppError::Migration(format!(
                "table '{}' missing after migrations",
                table
            )));
        }
    }

    Ok(())
}

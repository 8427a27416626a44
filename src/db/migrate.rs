use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ordered schema migrations: (version, description, SQL).
const MIGRATIONS: &[(&str, &str, &str)] = &[
    (
        "20260302_0001_create_roster",
        "Created workers table",
        r#"
        CREATE TABLE IF NOT EXISTS workers (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            shift       TEXT NOT NULL DEFAULT '',
            active      INTEGER NOT NULL DEFAULT 1 CHECK(active IN (0,1)),
            created_at  TEXT NOT NULL
        );
        "#,
    ),
    (
        "20260302_0002_create_planning",
        "Created station_needs, assignments and history tables",
        r#"
        CREATE TABLE IF NOT EXISTS station_needs (
            station  TEXT NOT NULL,
            date     TEXT NOT NULL,
            needed   INTEGER NOT NULL DEFAULT 0 CHECK(needed >= 0),
            PRIMARY KEY (station, date)
        );

        CREATE TABLE IF NOT EXISTS assignments (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            worker_id  TEXT NOT NULL,
            station    TEXT NOT NULL,
            lane       INTEGER,
            date       TEXT NOT NULL,
            manual     INTEGER NOT NULL DEFAULT 0 CHECK(manual IN (0,1))
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_assignments_date_worker
            ON assignments(date, worker_id) WHERE manual = 0;
        CREATE INDEX IF NOT EXISTS idx_assignments_date_station
            ON assignments(date, station);

        CREATE TABLE IF NOT EXISTS history (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            worker_id   TEXT NOT NULL,
            station     TEXT NOT NULL,
            lane        INTEGER,
            date        TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_history_worker_date ON history(worker_id, date);
        CREATE INDEX IF NOT EXISTS idx_history_date ON history(date);
        "#,
    ),
    (
        "20260415_0003_create_pending_moves",
        "Created pending_moves table",
        r#"
        CREATE TABLE IF NOT EXISTS pending_moves (
            token         INTEGER PRIMARY KEY AUTOINCREMENT,
            date          TEXT NOT NULL,
            worker_id     TEXT NOT NULL,
            from_station  TEXT NOT NULL,
            from_lane     INTEGER,
            to_station    TEXT NOT NULL,
            to_lane       INTEGER,
            count         INTEGER NOT NULL,
            threshold     REAL NOT NULL,
            created_at    TEXT NOT NULL
        );
        "#,
    ),
];

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply_migration(
    conn: &Connection,
    version: &str,
    description: &str,
    sql: &str,
) -> AppResult<()> {
    if is_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch(sql)
        .map_err(|e| AppError::Migration(format!("{}: {}", version, e)))?;

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, description],
    )?;

    success(format!("Migration applied: {} → {}", version, description));
    Ok(())
}

/// List the versions already recorded in the `log` table.
pub fn applied_versions(conn: &Connection) -> AppResult<Vec<String>> {
    ensure_log_table(conn)?;
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Public entry point: run all pending migrations.
///
/// Called by `db::initialize::init_db()`.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    for (version, description, sql) in MIGRATIONS {
        apply_migration(conn, version, description, sql)?;
    }

    Ok(())
}

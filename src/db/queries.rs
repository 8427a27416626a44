//! Records store: every SQL statement the engine issues lives here.
//!
//! All functions take a plain `&Connection`, so they run the same way on a
//! pooled connection or inside a `Transaction` (which derefs to one).

use crate::errors::{AppError, AppResult};
use crate::models::history::HistoryRecord;
use crate::models::need::StationNeed;
use crate::models::pending::PendingMove;
use crate::models::slot::Slot;
use crate::models::snapshot::Placement;
use crate::models::worker::Worker;
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn date_str(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn parse_date_col(row: &Row, col: &str) -> Result<NaiveDate> {
    let raw: String = row.get(col)?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(raw.clone())),
        )
    })
}

fn collect<T>(rows: impl Iterator<Item = Result<T>>) -> AppResult<Vec<T>> {
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// Roster
// ---------------------------

fn map_worker(row: &Row) -> Result<Worker> {
    Ok(Worker {
        id: row.get("id")?,
        name: row.get("name")?,
        shift: row.get("shift")?,
        active: row.get::<_, i32>("active")? == 1,
    })
}

pub fn insert_worker(conn: &Connection, w: &Worker) -> AppResult<()> {
    conn.execute(
        "INSERT INTO workers (id, name, shift, active, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            w.id,
            w.name,
            w.shift,
            if w.active { 1 } else { 0 },
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn list_active_workers(conn: &Connection) -> AppResult<Vec<Worker>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, shift, active FROM workers
         WHERE active = 1
         ORDER BY shift ASC, name ASC, id ASC",
    )?;
    let rows = stmt.query_map([], map_worker)?;
    collect(rows)
}

pub fn list_workers(conn: &Connection) -> AppResult<Vec<Worker>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, shift, active FROM workers
         ORDER BY active DESC, shift ASC, name ASC, id ASC",
    )?;
    let rows = stmt.query_map([], map_worker)?;
    collect(rows)
}

// ---------------------------
// Needs
// ---------------------------

pub fn upsert_station_need(
    conn: &Connection,
    station: &str,
    date: &NaiveDate,
    count: u32,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO station_needs (station, date, needed)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(station, date) DO UPDATE SET needed = excluded.needed",
        params![station, date_str(date), count],
    )?;
    Ok(())
}

pub fn load_needs(conn: &Connection, date: &NaiveDate) -> AppResult<Vec<StationNeed>> {
    let mut stmt = conn.prepare(
        "SELECT station, date, needed FROM station_needs
         WHERE date = ?1
         ORDER BY station ASC",
    )?;
    let rows = stmt.query_map([date_str(date)], |row| {
        Ok(StationNeed {
            station: row.get("station")?,
            date: parse_date_col(row, "date")?,
            needed: row.get("needed")?,
        })
    })?;
    collect(rows)
}

// ---------------------------
// Assignments
// ---------------------------

/// Delete every automatic (non-manual) assignment of a date.
pub fn delete_assignments(conn: &Connection, date: &NaiveDate) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM assignments WHERE date = ?1 AND manual = 0",
        [date_str(date)],
    )?;
    Ok(n)
}

pub fn insert_assignment(
    conn: &Connection,
    worker_id: &str,
    station: &str,
    lane: Option<u32>,
    date: &NaiveDate,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO assignments (worker_id, station, lane, date, manual)
         VALUES (?1, ?2, ?3, ?4, 0)",
        params![worker_id, station, lane, date_str(date)],
    )?;
    Ok(())
}

/// Delete ONE assignment row matching worker, date and slot.
///
/// Returns the number of rows removed (0 or 1).
pub fn delete_one_assignment(
    conn: &Connection,
    worker_id: &str,
    date: &NaiveDate,
    slot: &Slot,
) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM assignments WHERE id = (
             SELECT id FROM assignments
             WHERE worker_id = ?1 AND date = ?2 AND station = ?3
               AND lane IS ?4 AND manual = 0
             ORDER BY id ASC LIMIT 1
         )",
        params![worker_id, date_str(date), slot.station, slot.lane],
    )?;
    Ok(n)
}

/// Replace the free-text entry of the manual station for a date.
pub fn set_manual_entry(
    conn: &Connection,
    station: &str,
    text: &str,
    date: &NaiveDate,
) -> AppResult<()> {
    conn.execute(
        "DELETE FROM assignments WHERE date = ?1 AND manual = 1",
        [date_str(date)],
    )?;
    conn.execute(
        "INSERT INTO assignments (worker_id, station, lane, date, manual)
         VALUES (?1, ?2, NULL, ?3, 1)",
        params![text, station, date_str(date)],
    )?;
    Ok(())
}

/// Load the assignment rows of a date, in insertion order.
///
/// Returns the worker placements and the manual station's text, if any.
pub fn load_assignments(
    conn: &Connection,
    date: &NaiveDate,
) -> AppResult<(Vec<Placement>, Option<String>)> {
    let mut stmt = conn.prepare(
        "SELECT worker_id, station, lane, manual FROM assignments
         WHERE date = ?1
         ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([date_str(date)], |row| {
        Ok((
            row.get::<_, String>("worker_id")?,
            row.get::<_, String>("station")?,
            row.get::<_, Option<u32>>("lane")?,
            row.get::<_, i32>("manual")? == 1,
        ))
    })?;

    let mut placements = Vec::new();
    let mut manual = None;
    for r in rows {
        let (worker_id, station, lane, is_manual) = r?;
        if is_manual {
            manual = Some(worker_id);
        } else {
            placements.push(Placement {
                worker_id,
                station,
                lane,
            });
        }
    }
    Ok((placements, manual))
}

pub fn assignment_dates(conn: &Connection) -> AppResult<Vec<NaiveDate>> {
    distinct_dates(conn, "SELECT DISTINCT date FROM assignments WHERE manual = 0")
}

// ---------------------------
// History ledger
// ---------------------------

fn map_history(row: &Row) -> Result<HistoryRecord> {
    Ok(HistoryRecord {
        id: row.get("id")?,
        worker_id: row.get("worker_id")?,
        station: row.get("station")?,
        lane: row.get("lane")?,
        date: parse_date_col(row, "date")?,
    })
}

pub fn insert_history(
    conn: &Connection,
    worker_id: &str,
    station: &str,
    lane: Option<u32>,
    date: &NaiveDate,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO history (worker_id, station, lane, date, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            worker_id,
            station,
            lane,
            date_str(date),
            Local::now().to_rfc3339()
        ],
    )?;
    Ok(())
}

/// Delete ONE ledger row matching worker, date, station and lane.
pub fn delete_history(
    conn: &Connection,
    worker_id: &str,
    date: &NaiveDate,
    station: &str,
    lane: Option<u32>,
) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM history WHERE id = (
             SELECT id FROM history
             WHERE worker_id = ?1 AND date = ?2 AND station = ?3 AND lane IS ?4
             ORDER BY id DESC LIMIT 1
         )",
        params![worker_id, date_str(date), station, lane],
    )?;
    Ok(n)
}

pub fn delete_history_for_date(conn: &Connection, date: &NaiveDate) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM history WHERE date = ?1", [date_str(date)])?;
    Ok(n)
}

/// Ledger rows of one worker with `since <= date` (and `date < until`).
pub fn query_history(
    conn: &Connection,
    worker_id: &str,
    since: &NaiveDate,
    until: Option<&NaiveDate>,
) -> AppResult<Vec<HistoryRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, worker_id, station, lane, date FROM history
         WHERE worker_id = ?1 AND date >= ?2 AND (?3 IS NULL OR date < ?3)
         ORDER BY date ASC, id ASC",
    )?;
    let rows = stmt.query_map(
        params![worker_id, date_str(since), until.map(date_str)],
        map_history,
    )?;
    collect(rows)
}

/// Ledger rows of every worker, optionally bounded (both ends inclusive).
pub fn load_history_range(
    conn: &Connection,
    since: Option<&NaiveDate>,
    until: Option<&NaiveDate>,
) -> AppResult<Vec<HistoryRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, worker_id, station, lane, date FROM history
         WHERE (?1 IS NULL OR date >= ?1) AND (?2 IS NULL OR date <= ?2)
         ORDER BY date ASC, id ASC",
    )?;
    let rows = stmt.query_map(
        params![since.map(date_str), until.map(date_str)],
        map_history,
    )?;
    collect(rows)
}

pub fn load_history_for_date(conn: &Connection, date: &NaiveDate) -> AppResult<Vec<HistoryRecord>> {
    let d = Some(*date);
    load_history_range(conn, d.as_ref(), d.as_ref())
}

/// Most recent ledger station of a worker strictly before `before`.
pub fn last_station_before(
    conn: &Connection,
    worker_id: &str,
    before: &NaiveDate,
) -> AppResult<Option<String>> {
    let mut stmt = conn.prepare_cached(
        "SELECT station FROM history
         WHERE worker_id = ?1 AND date < ?2
         ORDER BY date DESC, id DESC
         LIMIT 1",
    )?;
    let station = stmt
        .query_row(params![worker_id, date_str(before)], |row| row.get(0))
        .optional()?;
    Ok(station)
}

pub fn history_dates(conn: &Connection) -> AppResult<Vec<NaiveDate>> {
    distinct_dates(conn, "SELECT DISTINCT date FROM history")
}

// ---------------------------
// Pending moves
// ---------------------------

fn map_pending(row: &Row) -> Result<PendingMove> {
    Ok(PendingMove {
        token: row.get("token")?,
        date: parse_date_col(row, "date")?,
        worker_id: row.get("worker_id")?,
        from: Slot {
            station: row.get("from_station")?,
            lane: row.get("from_lane")?,
        },
        to: Slot {
            station: row.get("to_station")?,
            lane: row.get("to_lane")?,
        },
        count: row.get("count")?,
        threshold: row.get("threshold")?,
        created_at: row.get("created_at")?,
    })
}

/// Store a held move and return its token.
pub fn insert_pending(
    conn: &Connection,
    date: &NaiveDate,
    worker_id: &str,
    from: &Slot,
    to: &Slot,
    count: u32,
    threshold: f64,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO pending_moves
            (date, worker_id, from_station, from_lane, to_station, to_lane, count, threshold, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            date_str(date),
            worker_id,
            from.station,
            from.lane,
            to.station,
            to.lane,
            count,
            threshold,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_pending(conn: &Connection, token: i64) -> AppResult<Option<PendingMove>> {
    let mut stmt = conn.prepare("SELECT * FROM pending_moves WHERE token = ?1")?;
    let pending = stmt.query_row([token], map_pending).optional()?;
    Ok(pending)
}

pub fn list_pending(conn: &Connection, date: Option<&NaiveDate>) -> AppResult<Vec<PendingMove>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM pending_moves
         WHERE (?1 IS NULL OR date = ?1)
         ORDER BY token ASC",
    )?;
    let rows = stmt.query_map([date.map(date_str)], map_pending)?;
    collect(rows)
}

pub fn delete_pending(conn: &Connection, token: i64) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM pending_moves WHERE token = ?1", [token])?;
    Ok(n)
}

/// Drop every held move of a date (they refer to a plan being replaced).
pub fn delete_pending_for_date(conn: &Connection, date: &NaiveDate) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM pending_moves WHERE date = ?1", [date_str(date)])?;
    Ok(n)
}

// ---------------------------
// Helpers
// ---------------------------

fn distinct_dates(conn: &Connection, sql: &str) -> AppResult<Vec<NaiveDate>> {
    // collect before the statement is dropped
    let raw: Vec<String> = {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        collect(rows)?
    };

    let mut out = Vec::new();
    for d in raw {
        let date = NaiveDate::parse_from_str(&d, "%Y-%m-%d")
            .map_err(|_| AppError::InvalidDate(d.clone()))?;
        out.push(date);
    }
    out.sort();
    Ok(out)
}

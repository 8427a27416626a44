//! HistoryIndex: per-station visit counts over a trailing window.
//!
//! Workers without ledger rows yield empty maps. Callers read missing
//! stations as zero.

use crate::db::queries::{last_station_before, query_history};
use crate::errors::AppResult;
use chrono::{Months, NaiveDate};
use rusqlite::Connection;
use std::collections::HashMap;

/// Visit counts keyed by station name.
pub type VisitCounts = HashMap<String, u32>;

/// `[start, end_exclusive)` over ledger dates. `None` end means open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryWindow {
    pub start: NaiveDate,
    pub end_exclusive: Option<NaiveDate>,
}

impl HistoryWindow {
    /// The `months` before `date`, excluding `date` itself.
    pub fn before(date: NaiveDate, months: u32) -> Self {
        Self {
            start: window_start(date, months),
            end_exclusive: Some(date),
        }
    }
}

/// Calendar-month subtraction, clamped to the month's last day
/// (2026-08-31 minus 6 months is 2026-02-28).
pub fn window_start(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}

/// Count a worker's ledger rows per station with `date >= window_start`.
pub fn history_for(
    conn: &Connection,
    worker_id: &str,
    window_start: &NaiveDate,
) -> AppResult<VisitCounts> {
    history_for_window(
        conn,
        worker_id,
        &HistoryWindow {
            start: *window_start,
            end_exclusive: None,
        },
    )
}

pub fn history_for_window(
    conn: &Connection,
    worker_id: &str,
    window: &HistoryWindow,
) -> AppResult<VisitCounts> {
    let rows = query_history(conn, worker_id, &window.start, window.end_exclusive.as_ref())?;

    let mut counts = VisitCounts::new();
    for r in rows {
        *counts.entry(r.station).or_insert(0) += 1;
    }
    Ok(counts)
}

/// Stations of `stations` with the fewest visits, in the given order.
///
/// Stations absent from `counts` count as zero. More than one entry means a
/// tie: any of them is a fair pick.
pub fn least_visited(stations: &[String], counts: &VisitCounts) -> Vec<String> {
    let visits = |s: &String| counts.get(s).copied().unwrap_or(0);
    let Some(min) = stations.iter().map(visits).min() else {
        return Vec::new();
    };

    stations
        .iter()
        .filter(|&s| visits(s) == min)
        .cloned()
        .collect()
}

/// Fetch every worker's counts and join them into one map.
///
/// The planner ranks only after this returns, because ranking needs the
/// complete set.
pub fn histories_for(
    conn: &Connection,
    worker_ids: &[String],
    window: &HistoryWindow,
) -> AppResult<HashMap<String, VisitCounts>> {
    let mut out = HashMap::with_capacity(worker_ids.len());
    for id in worker_ids {
        out.insert(id.clone(), history_for_window(conn, id, window)?);
    }
    Ok(out)
}

/// Each worker's most recent station strictly before `before`.
pub fn last_station_of(
    conn: &Connection,
    worker_ids: &[String],
    before: &NaiveDate,
) -> AppResult<HashMap<String, Option<String>>> {
    let mut out = HashMap::with_capacity(worker_ids.len());
    for id in worker_ids {
        out.insert(id.clone(), last_station_before(conn, id, before)?);
    }
    Ok(out)
}

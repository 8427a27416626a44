//! Assignment/ledger mirror check.
//!
//! For every date the ledger rows must be exactly the non-manual
//! assignment rows (as a multiset of worker, station, lane). A divergence
//! degrades rotation and overuse decisions silently, so it is detected here
//! and reported; nothing is repaired automatically.

use crate::db::queries::{assignment_dates, history_dates, load_assignments, load_history_for_date};
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use rusqlite::Connection;
use std::collections::{BTreeMap, BTreeSet};

type Key = (String, String, Option<u32>);

/// Differences found for one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Divergence {
    pub date: NaiveDate,
    /// Assignments with no matching ledger row.
    pub missing_in_ledger: Vec<Key>,
    /// Ledger rows with no matching assignment.
    pub missing_in_assignments: Vec<Key>,
}

impl Divergence {
    pub fn describe(&self) -> String {
        let fmt = |k: &Key| match k.2 {
            Some(l) => format!("{}@{}:{}", k.0, k.1, l),
            None => format!("{}@{}", k.0, k.1),
        };
        let a: Vec<String> = self.missing_in_ledger.iter().map(fmt).collect();
        let b: Vec<String> = self.missing_in_assignments.iter().map(fmt).collect();
        format!(
            "{}: not in ledger [{}], not in assignments [{}]",
            self.date,
            a.join(", "),
            b.join(", ")
        )
    }
}

fn multiset(keys: impl Iterator<Item = Key>) -> BTreeMap<Key, usize> {
    let mut m = BTreeMap::new();
    for k in keys {
        *m.entry(k).or_insert(0) += 1;
    }
    m
}

/// Surplus of `a` over `b`, one entry per extra occurrence.
fn surplus(a: &BTreeMap<Key, usize>, b: &BTreeMap<Key, usize>) -> Vec<Key> {
    let mut out = Vec::new();
    for (k, n) in a {
        let m = b.get(k).copied().unwrap_or(0);
        for _ in m..*n {
            out.push(k.clone());
        }
    }
    out
}

/// Compare assignments and ledger for one date.
pub fn check_date(conn: &Connection, date: &NaiveDate) -> AppResult<Option<Divergence>> {
    let (placements, _) = load_assignments(conn, date)?;
    let ledger = load_history_for_date(conn, date)?;

    let assigned = multiset(
        placements
            .into_iter()
            .map(|p| (p.worker_id, p.station, p.lane)),
    );
    let recorded = multiset(ledger.into_iter().map(|h| (h.worker_id, h.station, h.lane)));

    if assigned == recorded {
        return Ok(None);
    }

    Ok(Some(Divergence {
        date: *date,
        missing_in_ledger: surplus(&assigned, &recorded),
        missing_in_assignments: surplus(&recorded, &assigned),
    }))
}

/// Compare every date present in either table.
pub fn check_all(conn: &Connection) -> AppResult<Vec<Divergence>> {
    let mut dates: BTreeSet<NaiveDate> = assignment_dates(conn)?.into_iter().collect();
    dates.extend(history_dates(conn)?);

    let mut out = Vec::new();
    for d in dates {
        if let Some(div) = check_date(conn, &d)? {
            out.push(div);
        }
    }
    Ok(out)
}

/// Turn a divergence into the dedicated error kind.
pub fn ensure_mirrored(conn: &Connection, date: &NaiveDate) -> AppResult<()> {
    match check_date(conn, date)? {
        None => Ok(()),
        Some(div) => Err(AppError::InconsistentState(div.describe())),
    }
}

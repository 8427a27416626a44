//! AssignmentStore: loads a day's snapshot and applies single moves,
//! keeping the ledger mirrored.

use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries::{
    delete_history, delete_one_assignment, insert_assignment, insert_history, load_assignments,
};
use crate::errors::{AppError, AppResult};
use crate::models::slot::Slot;
use crate::models::snapshot::AssignmentSnapshot;
use chrono::NaiveDate;
use rusqlite::Connection;

/// Check that a worker may be dropped on `to`.
pub fn validate_destination(cfg: &Config, to: &Slot) -> AppResult<()> {
    if cfg.is_manual_station(&to.station) {
        return Err(AppError::InvalidMove(format!(
            "'{}' holds free text, not workers",
            to.station
        )));
    }

    let station = cfg
        .station(&to.station)
        .ok_or_else(|| AppError::UnknownStation(to.station.clone()))?;
    station.check_lane(to.lane)
}

/// The four sub-writes of a move, on an open transaction.
///
/// A missing assignment row is a caller error; an assignment row whose
/// ledger mirror is missing means the two tables already diverged and is
/// reported as inconsistent state. Either error leaves the transaction to
/// be rolled back by the caller.
pub(crate) fn move_rows(
    conn: &Connection,
    date: &NaiveDate,
    worker_id: &str,
    from: &Slot,
    to: &Slot,
) -> AppResult<()> {
    if delete_one_assignment(conn, worker_id, date, from)? == 0 {
        return Err(AppError::AssignmentNotFound {
            worker: worker_id.to_string(),
            slot: from.to_string(),
            date: date.to_string(),
        });
    }

    if delete_history(conn, worker_id, date, &from.station, from.lane)? == 0 {
        return Err(AppError::InconsistentState(format!(
            "assignment {}@{} on {} has no ledger row",
            worker_id, from, date
        )));
    }

    insert_assignment(conn, worker_id, &to.station, to.lane, date)?;
    insert_history(conn, worker_id, &to.station, to.lane, date)?;
    Ok(())
}

pub struct StoreLogic;

impl StoreLogic {
    pub fn load(conn: &Connection, date: &NaiveDate) -> AppResult<AssignmentSnapshot> {
        let (placements, manual_text) = load_assignments(conn, date)?;
        Ok(AssignmentSnapshot {
            date: *date,
            placements,
            manual_text,
        })
    }

    /// Move one worker and re-sync the ledger, all or nothing.
    ///
    /// `from == to` is a no-op that returns the current snapshot.
    pub fn apply_move(
        pool: &mut DbPool,
        date: &NaiveDate,
        worker_id: &str,
        from: &Slot,
        to: &Slot,
    ) -> AppResult<AssignmentSnapshot> {
        let current = Self::load(&pool.conn, date)?;
        if from == to {
            return Ok(current);
        }

        let next = current.apply_move(worker_id, from, to)?;

        let tx = pool.write_tx()?;
        move_rows(&tx, date, worker_id, from, to)?;
        tx.commit()?;

        Ok(next)
    }
}

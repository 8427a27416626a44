//! Interactive reassignment: `propose` a move, then `confirm` or `cancel`
//! it when the overuse guard held it back.

use crate::config::Config;
use crate::core::history::{HistoryWindow, history_for_window, last_station_of};
use crate::core::overuse::{self, OverusePolicy, Verdict};
use crate::core::rotation;
use crate::core::store::{StoreLogic, move_rows, validate_destination};
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_pending, insert_pending, list_pending, load_pending};
use crate::errors::{AppError, AppResult};
use crate::models::pending::PendingMove;
use crate::models::slot::Slot;
use crate::models::snapshot::AssignmentSnapshot;
use crate::ui::messages::warning;
use chrono::NaiveDate;
use rusqlite::Connection;

/// Outcome of a proposed move.
#[derive(Debug, Clone, PartialEq)]
pub enum Proposal {
    Applied(AssignmentSnapshot),
    Pending(PendingMove),
}

pub struct MoveLogic;

impl MoveLogic {
    /// Run a move through the rotation and overuse guards.
    ///
    /// Rotation is a hard refusal. Overuse stores the move as pending and
    /// returns its token; nothing changes until it is confirmed. Lane changes
    /// inside the same station skip both guards: the worker is already there.
    pub fn propose(
        pool: &mut DbPool,
        cfg: &Config,
        date: NaiveDate,
        worker_id: &str,
        from: &Slot,
        to: &Slot,
    ) -> AppResult<Proposal> {
        let current = StoreLogic::load(&pool.conn, &date)?;
        if from == to {
            return Ok(Proposal::Applied(current));
        }

        validate_destination(cfg, to)?;
        // fails early with AssignmentNotFound when `from` is wrong
        current.apply_move(worker_id, from, to)?;

        if from.station != to.station {
            if !Self::can_assign(&pool.conn, &date, worker_id, &to.station)? {
                return Err(AppError::RotationBlocked {
                    worker: worker_id.to_string(),
                    station: to.station.clone(),
                });
            }

            let window = HistoryWindow::before(date, cfg.history_window_months);
            let history = history_for_window(&pool.conn, worker_id, &window)?;

            if let Verdict::Warn { count, threshold } =
                overuse::evaluate(&to.station, &history, &OverusePolicy::from(cfg))
            {
                let token =
                    insert_pending(&pool.conn, &date, worker_id, from, to, count, threshold)?;
                ttlog_soft(
                    &pool.conn,
                    "move",
                    worker_id,
                    &format!(
                        "Held {} → {} on {} (token {}, {} visits > {:.2})",
                        from, to, date, token, count, threshold
                    ),
                );

                let pending = load_pending(&pool.conn, token)?
                    .ok_or(AppError::PendingNotFound(token))?;
                return Ok(Proposal::Pending(pending));
            }
        }

        let next = StoreLogic::apply_move(pool, &date, worker_id, from, to)?;
        ttlog_soft(
            &pool.conn,
            "move",
            worker_id,
            &format!("Moved {} → {} on {}", from, to, date),
        );
        Ok(Proposal::Applied(next))
    }

    /// Apply a held move verbatim, without re-running the guards.
    pub fn confirm(pool: &mut DbPool, token: i64) -> AppResult<AssignmentSnapshot> {
        let tx = pool.write_tx()?;

        let pending = load_pending(&tx, token)?.ok_or(AppError::PendingNotFound(token))?;
        if pending.from != pending.to
            && let Err(e) =
                move_rows(&tx, &pending.date, &pending.worker_id, &pending.from, &pending.to)
        {
            drop(tx);
            if matches!(e, AppError::AssignmentNotFound { .. }) {
                Self::discard_stale(pool, &pending)?;
            }
            return Err(e);
        }
        delete_pending(&tx, token)?;

        tx.commit()?;

        ttlog_soft(
            &pool.conn,
            "confirm",
            &pending.worker_id,
            &format!(
                "Confirmed {} → {} on {} (token {})",
                pending.from, pending.to, pending.date, token
            ),
        );

        StoreLogic::load(&pool.conn, &pending.date)
    }

    /// The worker is no longer at `from`: the token can never apply.
    fn discard_stale(pool: &mut DbPool, pending: &PendingMove) -> AppResult<()> {
        delete_pending(&pool.conn, pending.token)?;

        warning(format!(
            "Pending move {} dropped: {} is no longer at {} on {}.",
            pending.token, pending.worker_id, pending.from, pending.date
        ));
        ttlog_soft(
            &pool.conn,
            "cancel",
            &pending.worker_id,
            &format!(
                "Dropped stale {} → {} on {} (token {})",
                pending.from, pending.to, pending.date, pending.token
            ),
        );
        Ok(())
    }

    /// Drop a held move. Assignments are left untouched.
    pub fn cancel(pool: &mut DbPool, token: i64) -> AppResult<PendingMove> {
        let pending = load_pending(&pool.conn, token)?.ok_or(AppError::PendingNotFound(token))?;
        delete_pending(&pool.conn, token)?;

        ttlog_soft(
            &pool.conn,
            "cancel",
            &pending.worker_id,
            &format!(
                "Cancelled {} → {} on {} (token {})",
                pending.from, pending.to, pending.date, token
            ),
        );
        Ok(pending)
    }

    pub fn pending(conn: &Connection, date: Option<&NaiveDate>) -> AppResult<Vec<PendingMove>> {
        list_pending(conn, date)
    }

    /// Rotation check against the worker's last station before `date`.
    pub fn can_assign(
        conn: &Connection,
        date: &NaiveDate,
        worker_id: &str,
        station: &str,
    ) -> AppResult<bool> {
        let last = last_station_of(conn, &[worker_id.to_string()], date)?;
        Ok(rotation::can_assign(worker_id, station, &last))
    }

    /// Configured stations the worker may go to on `date`.
    pub fn available_stations(
        conn: &Connection,
        cfg: &Config,
        date: &NaiveDate,
        worker_id: &str,
    ) -> AppResult<Vec<String>> {
        let last = last_station_of(conn, &[worker_id.to_string()], date)?;
        Ok(rotation::available_stations(
            worker_id,
            &cfg.station_names(),
            &last,
        ))
    }
}

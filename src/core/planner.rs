//! AssignmentPlanner: greedy daily distribution.
//!
//! Stations are served from the highest need down; each station takes the
//! workers who visited it least within the history window. Ties are
//! resolved by configured station order and by selection order, so the same
//! input always yields the same plan.

use crate::config::Config;
use crate::core::history::{HistoryWindow, VisitCounts, histories_for};
use crate::core::needs::NeedsRegistry;
use crate::db::consistency::ensure_mirrored;
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::queries::{
    delete_assignments, delete_history_for_date, delete_pending_for_date, insert_assignment,
    insert_history, list_active_workers, load_assignments, set_manual_entry,
};
use crate::errors::{AppError, AppResult};
use crate::models::snapshot::{AssignmentSnapshot, Placement};
use crate::ui::messages::warning;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

/// Compute a day's assignment. Pure: no I/O.
///
/// `manual_text`, when non-blank, becomes the free-text station's entry
/// verbatim. Workers left in the pool once every need is served stay
/// unassigned.
pub fn distribute(
    selected: &[String],
    needs: &NeedsRegistry,
    histories: &HashMap<String, VisitCounts>,
    manual_text: &str,
) -> AppResult<AssignmentSnapshot> {
    if selected.is_empty() {
        return Err(AppError::EmptySelection);
    }

    let mut seen = HashSet::new();
    let mut pool: Vec<&str> = selected
        .iter()
        .map(String::as_str)
        .filter(|id| seen.insert(*id))
        .collect();

    let mut snapshot = AssignmentSnapshot::empty(needs.date);
    if !manual_text.trim().is_empty() {
        snapshot.manual_text = Some(manual_text.to_string());
    }

    for (station, needed) in needs.distribution_order() {
        if pool.is_empty() {
            break;
        }

        let visits = |id: &str| -> u32 {
            histories
                .get(id)
                .and_then(|h| h.get(&station.name))
                .copied()
                .unwrap_or(0)
        };

        // sort_by_key is stable: equal counts keep selection order
        let mut ranked = pool.clone();
        ranked.sort_by_key(|id| visits(id));

        let take = (needed as usize).min(ranked.len());
        let chosen: HashSet<&str> = ranked[..take].iter().copied().collect();

        for (k, id) in ranked[..take].iter().enumerate() {
            snapshot
                .placements
                .push(Placement::new(id, &station.name, station.lane_for_index(k)));
        }

        pool.retain(|id| !chosen.contains(id));
    }

    Ok(snapshot)
}

/// Selected workers the snapshot left without a station, in selection order.
pub fn unassigned(selected: &[String], snapshot: &AssignmentSnapshot) -> Vec<String> {
    let mut seen = HashSet::new();
    selected
        .iter()
        .filter(|id| seen.insert(id.as_str()))
        .filter(|id| !snapshot.is_assigned(id))
        .cloned()
        .collect()
}

pub struct PlanLogic;

impl PlanLogic {
    /// Distribute the selected workers for `date` and commit the result.
    ///
    /// Assignments (except the free-text entry when no new text is given)
    /// and ledger rows of the date are replaced in a single transaction.
    /// Moves still held for the date refer to the old plan and are dropped.
    pub fn run(
        pool: &mut DbPool,
        cfg: &Config,
        selected: &[String],
        manual_text: Option<&str>,
        date: NaiveDate,
    ) -> AppResult<AssignmentSnapshot> {
        if selected.is_empty() {
            return Err(AppError::EmptySelection);
        }

        //
        // 1. Every selected id must be an active roster worker
        //
        let active: HashSet<String> = list_active_workers(&pool.conn)?
            .into_iter()
            .map(|w| w.id)
            .collect();
        if let Some(unknown) = selected.iter().find(|id| !active.contains(*id)) {
            return Err(AppError::UnknownWorker(unknown.clone()));
        }

        //
        // 2. Needs + histories (all joined before ranking)
        //
        let needs = NeedsRegistry::load(&pool.conn, cfg, &date)?;
        let window = HistoryWindow::before(date, cfg.history_window_months);
        let histories = histories_for(&pool.conn, selected, &window)?;

        //
        // 3. Plan
        //
        let manual = manual_text.unwrap_or("");
        let mut snapshot = distribute(selected, &needs, &histories, manual)?;

        //
        // 4. Commit assignments + ledger as one unit
        //
        let tx = pool.write_tx()?;

        delete_assignments(&tx, &date)?;
        delete_history_for_date(&tx, &date)?;
        let dropped = delete_pending_for_date(&tx, &date)?;

        if let Some(text) = &snapshot.manual_text {
            set_manual_entry(&tx, &cfg.manual_station, text, &date)?;
        }

        for p in &snapshot.placements {
            insert_assignment(&tx, &p.worker_id, &p.station, p.lane, &date)?;
            insert_history(&tx, &p.worker_id, &p.station, p.lane, &date)?;
        }

        ensure_mirrored(&tx, &date)?;
        tx.commit()?;

        if snapshot.manual_text.is_none() {
            let (_, existing) = load_assignments(&pool.conn, &date)?;
            snapshot.manual_text = existing;
        }

        if dropped > 0 {
            warning(format!(
                "{} pending move(s) for {} discarded: they referred to the previous plan.",
                dropped, date
            ));
        }

        ttlog_soft(
            &pool.conn,
            "plan",
            &date.to_string(),
            &format!(
                "Placed {} of {} selected workers (need {})",
                snapshot.placements.len(),
                selected.len(),
                needs.total()
            ),
        );

        Ok(snapshot)
    }
}

use super::slot::Slot;
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::Serialize;

/// One worker placed at a station (and lane, for laned stations).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub worker_id: String,
    pub station: String,
    pub lane: Option<u32>,
}

impl Placement {
    pub fn new(worker_id: &str, station: &str, lane: Option<u32>) -> Self {
        Self {
            worker_id: worker_id.to_string(),
            station: station.to_string(),
            lane,
        }
    }

    pub fn slot(&self) -> Slot {
        Slot::new(&self.station, self.lane)
    }

    pub fn matches(&self, worker_id: &str, slot: &Slot) -> bool {
        self.worker_id == worker_id && self.station == slot.station && self.lane == slot.lane
    }
}

/// The full assignment state of one day.
///
/// Placements keep insertion order: planner order first, moved workers
/// appended at the end. `manual_text` is the free-text station's value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentSnapshot {
    pub date: NaiveDate,
    pub placements: Vec<Placement>,
    pub manual_text: Option<String>,
}

impl AssignmentSnapshot {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            placements: Vec::new(),
            manual_text: None,
        }
    }

    /// Workers at a station, across all its lanes.
    pub fn workers_at(&self, station: &str) -> Vec<&str> {
        self.placements
            .iter()
            .filter(|p| p.station == station)
            .map(|p| p.worker_id.as_str())
            .collect()
    }

    /// Workers in one lane of a station.
    pub fn workers_in(&self, slot: &Slot) -> Vec<&str> {
        self.placements
            .iter()
            .filter(|p| p.station == slot.station && p.lane == slot.lane)
            .map(|p| p.worker_id.as_str())
            .collect()
    }

    pub fn station_of(&self, worker_id: &str) -> Option<&Placement> {
        self.placements.iter().find(|p| p.worker_id == worker_id)
    }

    pub fn is_assigned(&self, worker_id: &str) -> bool {
        self.station_of(worker_id).is_some()
    }

    /// Move one worker between slots, returning the new snapshot.
    ///
    /// `from == to` returns an identical copy. Otherwise exactly one
    /// occurrence of `(worker, from)` is removed and `(worker, to)` appended;
    /// other workers sharing the source lane are untouched.
    pub fn apply_move(&self, worker_id: &str, from: &Slot, to: &Slot) -> AppResult<Self> {
        if from == to {
            return Ok(self.clone());
        }

        let idx = self
            .placements
            .iter()
            .position(|p| p.matches(worker_id, from))
            .ok_or_else(|| AppError::AssignmentNotFound {
                worker: worker_id.to_string(),
                slot: from.to_string(),
                date: self.date.to_string(),
            })?;

        let mut next = self.clone();
        next.placements.remove(idx);
        next.placements
            .push(Placement::new(worker_id, &to.station, to.lane));
        Ok(next)
    }
}

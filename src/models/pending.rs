use super::slot::Slot;
use chrono::NaiveDate;
use serde::Serialize;

/// A move held back by the overuse warning until confirmed or cancelled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingMove {
    pub token: i64,
    pub date: NaiveDate,
    pub worker_id: String,
    pub from: Slot,
    pub to: Slot,
    pub count: u32,      // visits to `to.station` inside the window
    pub threshold: f64,  // ratio * mean of the worker's non-zero visits
    pub created_at: String,
}

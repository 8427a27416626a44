// src/export/model.rs

use crate::models::history::HistoryRecord;
use serde::Serialize;

/// Flat ledger row, one per placement, for CSV / JSON.
#[derive(Serialize, Clone, Debug)]
pub struct LedgerExport {
    pub id: i64,
    pub date: String,
    pub worker_id: String,
    pub station: String,
    pub lane: Option<u32>,
}

impl From<&HistoryRecord> for LedgerExport {
    fn from(h: &HistoryRecord) -> Self {
        Self {
            id: h.id,
            date: h.date.format("%Y-%m-%d").to_string(),
            worker_id: h.worker_id.clone(),
            station: h.station.clone(),
            lane: h.lane,
        }
    }
}

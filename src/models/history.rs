use chrono::NaiveDate;
use serde::Serialize;

/// One ledger row: a single placement of a worker on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRecord {
    pub id: i64,
    pub worker_id: String,
    pub station: String,
    pub lane: Option<u32>,
    pub date: NaiveDate,
}

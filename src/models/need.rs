use chrono::NaiveDate;
use serde::Serialize;

/// Required headcount for a station on a date. A missing row means zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationNeed {
    pub station: String,
    pub date: NaiveDate,
    pub needed: u32,
}

use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse an optional `--date` argument, defaulting to today.
pub fn resolve_date(arg: Option<&String>) -> AppResult<NaiveDate> {
    match arg {
        Some(s) => parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string())),
        None => Ok(today()),
    }
}

/// Parse an optional bound (e.g. `--since`), keeping `None` as `None`.
pub fn parse_optional_date(arg: Option<&String>) -> AppResult<Option<NaiveDate>> {
    arg.map(|s| parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string())))
        .transpose()
}

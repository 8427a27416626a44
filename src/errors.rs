//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    /// Assignments and ledger disagree for a date. Never auto-repaired.
    #[error("Inconsistent state: {0}")]
    InconsistentState(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid slot '{0}': expected STATION or STATION:LANE")]
    InvalidSlot(String),

    // ---------------------------
    // Validation errors
    // ---------------------------
    #[error("No workers selected: pick at least one worker before distributing")]
    EmptySelection,

    #[error("Unknown or inactive worker: {0}")]
    UnknownWorker(String),

    #[error("Invalid worker id '{0}': must be non-empty and contain no commas")]
    InvalidWorkerId(String),

    #[error("Unknown station: {0}")]
    UnknownStation(String),

    #[error("Invalid lane for station {station}: {detail}")]
    InvalidLane { station: String, detail: String },

    #[error("Invalid move: {0}")]
    InvalidMove(String),

    #[error("Worker {worker} worked at {station} last time and cannot repeat it")]
    RotationBlocked { worker: String, station: String },

    #[error("No assignment for {worker} at {slot} on {date}")]
    AssignmentNotFound {
        worker: String,
        slot: String,
        date: String,
    },

    #[error("No pending move with token {0}")]
    PendingNotFound(i64),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// True for conditions the operator can fix by changing the input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::InvalidDate(_)
                | AppError::InvalidSlot(_)
                | AppError::EmptySelection
                | AppError::UnknownWorker(_)
                | AppError::InvalidWorkerId(_)
                | AppError::UnknownStation(_)
                | AppError::InvalidLane { .. }
                | AppError::InvalidMove(_)
                | AppError::RotationBlocked { .. }
                | AppError::AssignmentNotFound { .. }
                | AppError::PendingNotFound(_)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;

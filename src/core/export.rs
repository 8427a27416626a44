use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::queries::load_history_range;
use crate::errors::AppResult;
use crate::export::{ExportFormat, LedgerExport, ensure_writable, export_csv, export_json};
use crate::ui::messages::warning;
use chrono::NaiveDate;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export the placement ledger, optionally bounded by dates (inclusive).
    ///
    /// Returns the number of exported rows.
    pub fn export(
        pool: &mut DbPool,
        format: &ExportFormat,
        file: &str,
        since: Option<NaiveDate>,
        until: Option<NaiveDate>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);
        ensure_writable(path, force)?;

        let records = load_history_range(&pool.conn, since.as_ref(), until.as_ref())?;
        if records.is_empty() {
            warning("No ledger rows in the selected range: writing an empty export.");
        }

        let rows: Vec<LedgerExport> = records.iter().map(LedgerExport::from).collect();

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        ttlog_soft(
            &pool.conn,
            "export",
            format.as_str(),
            &format!("{} ledger rows → {}", rows.len(), path.display()),
        );

        Ok(rows.len())
    }
}

//! Minimal roster surface: the engine only needs to read active workers,
//! `add` exists so a fresh database can be populated from the CLI.

use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::queries::{insert_worker, list_active_workers, list_workers};
use crate::errors::{AppError, AppResult};
use crate::models::worker::Worker;

pub struct RosterLogic;

impl RosterLogic {
    pub fn add(pool: &mut DbPool, id: &str, name: &str, shift: &str) -> AppResult<Worker> {
        let id = id.trim();
        if id.is_empty() || id.contains(',') {
            return Err(AppError::InvalidWorkerId(id.to_string()));
        }

        let worker = Worker::new(id, name.trim(), shift.trim());
        insert_worker(&pool.conn, &worker)?;

        ttlog_soft(
            &pool.conn,
            "worker",
            &worker.id,
            &format!("Added {} (shift '{}')", worker.name, worker.shift),
        );
        Ok(worker)
    }

    pub fn active(pool: &DbPool) -> AppResult<Vec<Worker>> {
        list_active_workers(&pool.conn)
    }

    pub fn all(pool: &DbPool) -> AppResult<Vec<Worker>> {
        list_workers(&pool.conn)
    }
}

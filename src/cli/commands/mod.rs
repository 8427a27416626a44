pub mod backup;
pub mod config;
pub mod db;
pub mod export;
pub mod history;
pub mod init;
pub mod log;
pub mod moves;
pub mod need;
pub mod plan;
pub mod show;
pub mod stations;
pub mod worker;

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Open the configured database, applying any pending migration first.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}

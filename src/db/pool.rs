//! SQLite connection pool wrapper (lightweight for CLI usage).

use rusqlite::{Connection, Result, Transaction, TransactionBehavior};
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        Ok(Self { conn })
    }

    /// Begin a write transaction that takes the database lock up front.
    ///
    /// Dropping the returned transaction without `commit()` rolls it back.
    pub fn write_tx(&mut self) -> Result<Transaction<'_>> {
        self.conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
    }
}

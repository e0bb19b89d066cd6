//! SQLite persistence for orders, shifts and production metrics.
//!
//! [`Database`] wraps a single rusqlite connection. The async store in
//! [`crate::store`] opens one per operation on a blocking thread, so every
//! method here is synchronous and transaction-scoped.

use std::{path::Path, time::Duration};

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod metric_queries;
pub mod migrations;
pub mod order_queries;
pub mod shift_queries;
pub mod utils;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens a connection and brings the schema up to date.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = Self::open(path)?;
        db.initialize_schema()?;
        Ok(db)
    }

    /// Opens a connection to an already initialized database.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        connection
            .busy_timeout(BUSY_TIMEOUT)
            .db_context("Failed to set busy timeout")?;
        Ok(Self { connection })
    }

    /// Counter that changes whenever another connection commits to the file.
    pub fn data_version(&self) -> Result<i64> {
        self.connection
            .query_row("PRAGMA data_version", [], |row| row.get(0))
            .db_context("Failed to read data version")
    }
}

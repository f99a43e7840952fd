//! MedBlock Storage Layer
//!
//! A local, SQLite-backed ledger implementing the `LedgerAccessor` trait.
//!
//! # Architecture
//!
//! - `world_state` holds the current value of every key
//! - `transactions` records each commit, giving a total commit order
//! - Contract code runs against a [`LedgerTransaction`], which reads committed
//!   state and buffers its writes until [`LedgerTransaction::commit`]
//!
//! # Examples
//!
//! ```no_run
//! use medblock_store::SqliteLedger;
//! use chrono::Utc;
//!
//! let mut ledger = SqliteLedger::new(":memory:").unwrap();
//! let tx = ledger.begin("tx-1", Utc::now());
//! let receipt = tx.commit().unwrap();
//! assert_eq!(receipt.height, 1);
//! ```

#![warn(missing_docs)]

mod scan;
mod transaction;

pub use scan::StateScan;
pub use transaction::{CommitReceipt, LedgerTransaction};

use chrono::{DateTime, Utc};
use medblock_domain::LedgerError;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A transaction with this id was already committed
    #[error("Transaction already committed: {0}")]
    DuplicateTransaction(String),
}

impl From<StoreError> for LedgerError {
    fn from(e: StoreError) -> Self {
        LedgerError::Backend(e.to_string())
    }
}

/// Prefix scan as a key range, so the primary-key index bounds it.
/// `char(1114111)` is U+10FFFF, which sorts after every other code point.
const KEYS_WITH_PREFIX: &str =
    "SELECT key FROM world_state WHERE key >= ?1 AND key < ?1 || char(1114111) ORDER BY key";

/// SQLite-based ledger
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// `SqliteLedger` instance; the ordering of transactions is whatever order
/// they are committed in.
pub struct SqliteLedger {
    conn: Connection,
}

impl SqliteLedger {
    /// Open (or create) a ledger at the given database path
    ///
    /// Use `:memory:` for an in-memory ledger (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut ledger = Self { conn };
        ledger.initialize_schema()?;
        Ok(ledger)
    }

    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Start a transaction with the given id and ordering timestamp
    ///
    /// The timestamp is what contract code sees as the transaction time; it is
    /// assigned once by the submitter and never read from the local clock.
    pub fn begin(&mut self, tx_id: impl Into<String>, timestamp: DateTime<Utc>) -> LedgerTransaction<'_> {
        LedgerTransaction::new(self, tx_id.into(), timestamp)
    }

    /// Number of committed transactions
    pub fn height(&self) -> Result<u64, StoreError> {
        let height: Option<i64> = self
            .conn
            .query_row("SELECT MAX(seq) FROM transactions", [], |row| row.get(0))?;
        Ok(height.unwrap_or(0) as u64)
    }

    /// Read the committed value at `key`
    pub fn get_committed(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM world_state WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Committed keys starting with `prefix`, in key order
    pub fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let mut stmt = self.conn.prepare(KEYS_WITH_PREFIX)?;
        let keys = stmt
            .query_map(params![prefix], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(keys)
    }

    /// Whether a transaction with this id has been committed
    pub fn is_committed(&self, tx_id: &str) -> Result<bool, StoreError> {
        let exists = self
            .conn
            .query_row(
                "SELECT 1 FROM transactions WHERE tx_id = ?1",
                params![tx_id],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        Ok(exists)
    }

    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }

    pub(crate) fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_scan_searches_key_index() {
        let ledger = SqliteLedger::new(":memory:").unwrap();
        let mut stmt = ledger
            .conn
            .prepare(&format!("EXPLAIN QUERY PLAN {}", KEYS_WITH_PREFIX))
            .unwrap();
        let plan = stmt
            .query_map(params!["RECORD_"], |row| row.get::<_, String>(3))
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
            .join("\n");

        assert!(plan.contains("SEARCH"), "prefix scan walks the table: {}", plan);
        assert!(plan.contains("key>? AND key<?"), "unexpected plan: {}", plan);
    }
}

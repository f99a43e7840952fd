//! Transaction-scoped ledger access

use crate::scan::StateScan;
use crate::{SqliteLedger, StoreError};
use chrono::{DateTime, SecondsFormat, Utc};
use medblock_domain::{LedgerAccessor, LedgerError, QueryIterator, Selector};
use rusqlite::params;
use std::collections::BTreeMap;

/// Result of a successful commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReceipt {
    /// Id of the committed transaction
    pub tx_id: String,

    /// Ledger height after the commit
    pub height: u64,

    /// Number of keys written
    pub write_count: usize,
}

/// A single transaction against a [`SqliteLedger`]
///
/// Reads observe committed state only, never this transaction's own pending
/// writes. Writes collect in a write set that is applied atomically by
/// [`commit`](Self::commit); dropping the transaction discards them.
pub struct LedgerTransaction<'a> {
    ledger: &'a mut SqliteLedger,
    tx_id: String,
    timestamp: DateTime<Utc>,
    writes: BTreeMap<String, Vec<u8>>,
}

impl<'a> LedgerTransaction<'a> {
    pub(crate) fn new(ledger: &'a mut SqliteLedger, tx_id: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            ledger,
            tx_id,
            timestamp,
            writes: BTreeMap::new(),
        }
    }

    /// Keys written so far, in key order
    pub fn pending_keys(&self) -> impl Iterator<Item = &str> {
        self.writes.keys().map(String::as_str)
    }

    /// Apply the write set and record the transaction
    ///
    /// Everything happens in one SQLite transaction: either every write lands
    /// together with the transaction row, or nothing does.
    pub fn commit(self) -> Result<CommitReceipt, StoreError> {
        let Self {
            ledger,
            tx_id,
            timestamp,
            writes,
        } = self;

        if ledger.is_committed(&tx_id)? {
            return Err(StoreError::DuplicateTransaction(tx_id));
        }

        let db_tx = ledger.connection_mut().transaction()?;
        db_tx.execute(
            "INSERT INTO transactions (tx_id, timestamp, write_count) VALUES (?1, ?2, ?3)",
            params![
                &tx_id,
                timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true),
                writes.len() as i64,
            ],
        )?;
        let seq = db_tx.last_insert_rowid();

        for (key, value) in &writes {
            db_tx.execute(
                "INSERT INTO world_state (key, value, seq) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, seq = excluded.seq",
                params![key, value, seq],
            )?;
        }
        db_tx.commit()?;

        tracing::debug!(tx_id = %tx_id, height = seq, writes = writes.len(), "Committed transaction");

        Ok(CommitReceipt {
            tx_id,
            height: seq as u64,
            write_count: writes.len(),
        })
    }
}

impl LedgerAccessor for LedgerTransaction<'_> {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        validate_key(key)?;
        Ok(self.ledger.get_committed(key)?)
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        validate_key(key)?;
        self.writes.insert(key.to_string(), value);
        Ok(())
    }

    fn query(&self, selector: &str) -> Result<QueryIterator<'_>, LedgerError> {
        let selector =
            Selector::parse(selector).map_err(|e| LedgerError::InvalidQuery(e.to_string()))?;
        Ok(Box::new(StateScan::new(self.ledger.connection(), selector)))
    }

    fn tx_timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

fn validate_key(key: &str) -> Result<(), LedgerError> {
    if key.is_empty() || key.contains('\0') {
        return Err(LedgerError::InvalidKey(key.to_string()));
    }
    Ok(())
}

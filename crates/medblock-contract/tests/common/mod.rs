//! Shared test harness: a contract plus an in-memory ledger

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use medblock_contract::{ContractError, MedBlockContract, PolicyConfig};
use medblock_domain::{CallerIdentity, LedgerAccessor, LedgerError, QueryIterator, Selector};
use medblock_store::{LedgerTransaction, SqliteLedger};
use std::collections::BTreeMap;

pub fn hospital(id: &str) -> CallerIdentity {
    CallerIdentity::new(id, "HospitalMSP")
}

pub fn patient(id: &str) -> CallerIdentity {
    CallerIdentity::new(id, "PatientMSP")
}

pub fn insurer(id: &str) -> CallerIdentity {
    CallerIdentity::new(id, "InsuranceMSP")
}

/// Runs each call in its own ledger transaction, committing only on success
pub struct Harness {
    pub ledger: SqliteLedger,
    pub contract: MedBlockContract,
    tx_count: i64,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(PolicyConfig::default())
    }

    pub fn with_config(config: PolicyConfig) -> Self {
        Self {
            ledger: SqliteLedger::new(":memory:").unwrap(),
            contract: MedBlockContract::from_config(&config).unwrap(),
            tx_count: 0,
        }
    }

    pub fn timestamp(n: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + n, 0).unwrap()
    }

    /// Timestamp handed to the most recent transaction
    pub fn last_timestamp(&self) -> DateTime<Utc> {
        Self::timestamp(self.tx_count)
    }

    pub fn run<T, F>(&mut self, f: F) -> Result<T, ContractError>
    where
        F: FnOnce(&MedBlockContract, &mut LedgerTransaction<'_>) -> Result<T, ContractError>,
    {
        self.tx_count += 1;
        let contract = &self.contract;
        let mut tx = self
            .ledger
            .begin(format!("tx-{}", self.tx_count), Self::timestamp(self.tx_count));

        let result = f(contract, &mut tx);
        match &result {
            Ok(_) => {
                tx.commit().unwrap();
            }
            Err(_) => {
                assert_eq!(
                    tx.pending_keys().count(),
                    0,
                    "failed operation must not leave writes behind"
                );
            }
        }
        result
    }

    /// Write raw bytes under a key, bypassing the contract
    pub fn put_raw(&mut self, key: &str, value: &[u8]) {
        self.tx_count += 1;
        let mut tx = self
            .ledger
            .begin(format!("tx-{}", self.tx_count), Self::timestamp(self.tx_count));
        tx.put_state(key, value.to_vec()).unwrap();
        tx.commit().unwrap();
    }

    pub fn keys(&self, prefix: &str) -> Vec<String> {
        self.ledger.keys_with_prefix(prefix).unwrap()
    }

    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.ledger.get_committed(key).unwrap()
    }
}

/// Ledger whose writes always fail and whose scans break after one row
///
/// Reads are served from a fixed map so operations get far enough to write.
pub struct FaultyLedger {
    state: BTreeMap<String, Vec<u8>>,
}

impl FaultyLedger {
    pub fn new() -> Self {
        Self {
            state: BTreeMap::new(),
        }
    }

    pub fn with_entry(mut self, key: &str, value: Vec<u8>) -> Self {
        self.state.insert(key.to_string(), value);
        self
    }

    pub fn state(&self) -> &BTreeMap<String, Vec<u8>> {
        &self.state
    }
}

impl LedgerAccessor for FaultyLedger {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        Ok(self.state.get(key).cloned())
    }

    fn put_state(&mut self, _key: &str, _value: Vec<u8>) -> Result<(), LedgerError> {
        Err(LedgerError::Backend("disk full".to_string()))
    }

    fn query(&self, selector: &str) -> Result<QueryIterator<'_>, LedgerError> {
        let selector =
            Selector::parse(selector).map_err(|e| LedgerError::InvalidQuery(e.to_string()))?;
        let first = self
            .state
            .iter()
            .find(|(_, value)| {
                serde_json::from_slice(value)
                    .map(|doc| selector.matches(&doc))
                    .unwrap_or(false)
            })
            .map(|(key, value)| Ok((key.clone(), value.clone())));

        Ok(Box::new(first.into_iter().chain(std::iter::once(Err(
            LedgerError::Backend("io".to_string()),
        )))))
    }

    fn tx_timestamp(&self) -> DateTime<Utc> {
        Harness::timestamp(0)
    }
}

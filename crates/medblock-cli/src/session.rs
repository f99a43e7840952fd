//! Ledger session: the local ledger plus the contract that guards it.

use crate::error::Result;
use chrono::Utc;
use medblock_contract::{ContractError, MedBlockContract};
use medblock_gatekeeper::PolicyConfig;
use medblock_store::{CommitReceipt, LedgerTransaction, SqliteLedger};
use std::fs;
use std::path::Path;
use tracing::debug;
use uuid::Uuid;

/// An open ledger with the contract configured for it.
pub struct Session {
    ledger: SqliteLedger,
    contract: MedBlockContract,
}

impl Session {
    /// Open the ledger at `path`, creating it (and its directory) if needed.
    pub fn open(path: &Path, policy: &PolicyConfig) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Self::with_ledger(SqliteLedger::new(path)?, policy)
    }

    /// Open a throwaway in-memory ledger.
    pub fn in_memory(policy: &PolicyConfig) -> Result<Self> {
        Self::with_ledger(SqliteLedger::new(":memory:")?, policy)
    }

    fn with_ledger(ledger: SqliteLedger, policy: &PolicyConfig) -> Result<Self> {
        Ok(Self {
            ledger,
            contract: MedBlockContract::from_config(policy)?,
        })
    }

    /// Run a mutating operation as one ledger transaction.
    ///
    /// The transaction gets a fresh UUIDv7 id and the submission time as its
    /// timestamp. Nothing is written unless `op` succeeds.
    pub fn submit<T, F>(&mut self, op: F) -> Result<(T, CommitReceipt)>
    where
        F: FnOnce(&MedBlockContract, &mut LedgerTransaction<'_>) -> std::result::Result<T, ContractError>,
    {
        let tx_id = Uuid::now_v7().to_string();
        let contract = &self.contract;
        let mut tx = self.ledger.begin(tx_id, Utc::now());

        let value = op(contract, &mut tx)?;
        let receipt = tx.commit()?;

        debug!(
            tx_id = %receipt.tx_id,
            height = receipt.height,
            writes = receipt.write_count,
            "Committed transaction"
        );
        Ok((value, receipt))
    }

    /// Run a read-only operation against committed state.
    pub fn evaluate<T, F>(&mut self, op: F) -> Result<T>
    where
        F: FnOnce(&MedBlockContract, &LedgerTransaction<'_>) -> std::result::Result<T, ContractError>,
    {
        let contract = &self.contract;
        let tx = self.ledger.begin(Uuid::now_v7().to_string(), Utc::now());
        Ok(op(contract, &tx)?)
    }

    /// Number of committed transactions.
    pub fn height(&self) -> Result<u64> {
        Ok(self.ledger.height()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use medblock_domain::CallerIdentity;

    #[test]
    fn test_submit_commits_on_success() {
        let mut session = Session::in_memory(&PolicyConfig::default()).unwrap();
        let hospital = CallerIdentity::new("H1", "HospitalMSP");

        let (record, receipt) = session
            .submit(|c, tx| c.create_record(tx, &hospital, "R1", "P1", "Qm1"))
            .unwrap();
        assert_eq!(record.created_by, "H1");
        assert_eq!(receipt.height, 1);
        assert_eq!(receipt.write_count, 1);
        assert!(Uuid::parse_str(&receipt.tx_id).is_ok());

        let fetched = session.evaluate(|c, tx| c.get_record(tx, "R1")).unwrap();
        assert_eq!(fetched, record);
    }

    #[test]
    fn test_submit_discards_on_failure() {
        let mut session = Session::in_memory(&PolicyConfig::default()).unwrap();
        let patient = CallerIdentity::new("P1", "PatientMSP");

        let result = session.submit(|c, tx| c.create_record(tx, &patient, "R1", "P1", "Qm1"));
        assert!(matches!(result, Err(CliError::Contract(ContractError::Unauthorized { .. }))));
        assert_eq!(session.height().unwrap(), 0);
    }

    #[test]
    fn test_invalid_policy_is_rejected() {
        let mut policy = PolicyConfig::default();
        policy.memberships.insert(String::new(), medblock_domain::Role::Hospital);
        assert!(matches!(Session::in_memory(&policy), Err(CliError::Policy(_))));
    }

    #[test]
    fn test_open_creates_ledger_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("ledger.db");
        let hospital = CallerIdentity::new("H1", "HospitalMSP");

        {
            let mut session = Session::open(&path, &PolicyConfig::default()).unwrap();
            session
                .submit(|c, tx| c.create_record(tx, &hospital, "R1", "P1", "Qm1"))
                .unwrap();
        }

        let mut reopened = Session::open(&path, &PolicyConfig::default()).unwrap();
        assert_eq!(reopened.height().unwrap(), 1);
        assert!(reopened.evaluate(|c, tx| c.get_record(tx, "R1")).is_ok());
    }
}

//! MedBlock Contract
//!
//! The authorization-gated state-transition engine for medical records and
//! insurance claims.
//!
//! Every operation follows the same shape:
//! 1. Resolve the caller and check their role against the [`AccessPolicy`]
//! 2. Validate arguments and read whatever state the rules need
//! 3. Perform at most one ledger write, last
//!
//! The contract holds configuration only. The ledger and the caller are
//! passed into every call, so nothing is cached between transactions and
//! every replica computes the same result from the same ledger state.
//!
//! # Examples
//!
//! ```no_run
//! use chrono::Utc;
//! use medblock_contract::MedBlockContract;
//! use medblock_domain::CallerIdentity;
//! use medblock_store::SqliteLedger;
//!
//! let contract = MedBlockContract::default();
//! let mut ledger = SqliteLedger::new(":memory:").unwrap();
//! let hospital = CallerIdentity::new("H1", "HospitalMSP");
//!
//! let mut tx = ledger.begin("tx-1", Utc::now());
//! contract.create_record(&mut tx, &hospital, "R1", "P1", "QmHash").unwrap();
//! tx.commit().unwrap();
//! ```

#![warn(missing_docs)]

mod access;
mod claims;
mod codec;
mod error;
mod records;

pub use claims::ClaimStateMachine;
pub use error::{ContractError, EntityKind};
pub use records::{record_id_from_key, RecordIter, RecordListing, RecordManager};

pub use medblock_gatekeeper::{AccessPolicy, PolicyConfig};

use medblock_domain::{Claim, IdentityResolver, LedgerAccessor, MedicalRecord};
use medblock_gatekeeper::GatekeeperError;

/// Entry point exposing every contract operation
#[derive(Debug, Clone, Default)]
pub struct MedBlockContract {
    policy: AccessPolicy,
}

impl MedBlockContract {
    /// Create a contract enforcing `policy`
    pub fn new(policy: AccessPolicy) -> Self {
        Self { policy }
    }

    /// Create a contract from policy configuration
    pub fn from_config(config: &PolicyConfig) -> Result<Self, GatekeeperError> {
        Ok(Self::new(AccessPolicy::from_config(config)?))
    }

    /// Record manager view
    pub fn records(&self) -> RecordManager<'_> {
        RecordManager::new(&self.policy)
    }

    /// Claim state machine view
    pub fn claims(&self) -> ClaimStateMachine<'_> {
        ClaimStateMachine::new(&self.policy)
    }

    /// See [`RecordManager::create_record`]
    pub fn create_record<L, I>(
        &self,
        ledger: &mut L,
        caller: &I,
        id: &str,
        patient_id: &str,
        content_reference: &str,
    ) -> Result<MedicalRecord, ContractError>
    where
        L: LedgerAccessor + ?Sized,
        I: IdentityResolver + ?Sized,
    {
        self.records()
            .create_record(ledger, caller, id, patient_id, content_reference)
    }

    /// See [`RecordManager::get_record`]
    pub fn get_record<L>(&self, ledger: &L, id: &str) -> Result<MedicalRecord, ContractError>
    where
        L: LedgerAccessor + ?Sized,
    {
        self.records().get_record(ledger, id)
    }

    /// See [`RecordManager::list_records_for_patient`]
    pub fn list_records_for_patient<L, I>(
        &self,
        ledger: &L,
        caller: &I,
    ) -> Result<RecordListing, ContractError>
    where
        L: LedgerAccessor + ?Sized,
        I: IdentityResolver + ?Sized,
    {
        self.records().list_records_for_patient(ledger, caller)
    }

    /// See [`ClaimStateMachine::request_claim`]
    pub fn request_claim<L, I>(
        &self,
        ledger: &mut L,
        caller: &I,
        claim_id: &str,
        record_id: &str,
    ) -> Result<Claim, ContractError>
    where
        L: LedgerAccessor + ?Sized,
        I: IdentityResolver + ?Sized,
    {
        self.claims().request_claim(ledger, caller, claim_id, record_id)
    }

    /// See [`ClaimStateMachine::approve_claim`]
    pub fn approve_claim<L, I>(
        &self,
        ledger: &mut L,
        caller: &I,
        claim_id: &str,
    ) -> Result<Claim, ContractError>
    where
        L: LedgerAccessor + ?Sized,
        I: IdentityResolver + ?Sized,
    {
        self.claims().approve_claim(ledger, caller, claim_id)
    }

    /// See [`ClaimStateMachine::reject_claim`]
    pub fn reject_claim<L, I>(
        &self,
        ledger: &mut L,
        caller: &I,
        claim_id: &str,
    ) -> Result<Claim, ContractError>
    where
        L: LedgerAccessor + ?Sized,
        I: IdentityResolver + ?Sized,
    {
        self.claims().reject_claim(ledger, caller, claim_id)
    }

    /// See [`ClaimStateMachine::get_claim`]
    pub fn get_claim<L>(&self, ledger: &L, claim_id: &str) -> Result<Claim, ContractError>
    where
        L: LedgerAccessor + ?Sized,
    {
        self.claims().get_claim(ledger, claim_id)
    }
}

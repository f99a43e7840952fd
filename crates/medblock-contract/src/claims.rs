//! Claim state machine
//!
//! ```text
//!            approve_claim
//!          ┌──────────────► APPROVED
//! PENDING ─┤
//!          └──────────────► REJECTED
//!            reject_claim
//! ```
//!
//! Both decisions are final. Approving a rejected claim, rejecting an
//! approved one, or repeating a decision fails with
//! [`ContractError::InvalidTransition`].

use crate::access::{require_non_empty, require_role};
use crate::codec::{decode, encode};
use crate::{ContractError, EntityKind};
use medblock_domain::keys::{claim_key, record_key};
use medblock_domain::{Claim, ClaimStatus, IdentityResolver, LedgerAccessor, Role};
use medblock_gatekeeper::AccessPolicy;
use tracing::{debug, info, warn};

/// Creates, reads and decides insurance claims
pub struct ClaimStateMachine<'p> {
    policy: &'p AccessPolicy,
}

impl<'p> ClaimStateMachine<'p> {
    /// Create a state machine enforcing `policy`
    pub fn new(policy: &'p AccessPolicy) -> Self {
        Self { policy }
    }

    /// Open a new pending claim against a record
    ///
    /// Only patient members may request claims. The record reference is only
    /// checked when the policy enforces record references.
    ///
    /// # Errors
    /// - [`ContractError::Unauthorized`] unless the caller is a patient member
    /// - [`ContractError::InvalidArgument`] for empty ids
    /// - [`ContractError::AlreadyExists`] if the claim id is taken and duplicates are rejected
    /// - [`ContractError::ReferenceNotFound`] if references are enforced and the record is missing
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
        require_role(self.policy, caller, "request_claim", &[Role::Patient])?;

        require_non_empty("claim id", claim_id)?;
        require_non_empty("record id", record_id)?;

        let claim = Claim::new(claim_id.to_string(), record_id.to_string());
        let key = claim.key();
        if self.policy.rejects_duplicate_ids() && ledger.get_state(&key)?.is_some() {
            warn!(claim_id, "Refusing to overwrite existing claim");
            return Err(ContractError::AlreadyExists {
                kind: EntityKind::Claim,
                id: claim_id.to_string(),
            });
        }

        if self.policy.enforces_record_references()
            && ledger.get_state(&record_key(record_id))?.is_none()
        {
            warn!(claim_id, record_id, "Claim references a missing record");
            return Err(ContractError::ReferenceNotFound {
                record_id: record_id.to_string(),
            });
        }

        ledger.put_state(&key, encode(&claim)?)?;
        info!(claim_id, record_id, "Requested claim");

        Ok(claim)
    }

    /// Approve a pending claim
    ///
    /// # Errors
    /// - [`ContractError::Unauthorized`] unless the caller is an insurer member
    /// - [`ContractError::NotFound`] if the claim does not exist
    /// - [`ContractError::InvalidTransition`] if the claim is already decided
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
        self.decide(ledger, caller, claim_id, ClaimStatus::Approved, "approve_claim")
    }

    /// Reject a pending claim
    ///
    /// # Errors
    /// - [`ContractError::Unauthorized`] unless the caller is an insurer member
    /// - [`ContractError::NotFound`] if the claim does not exist
    /// - [`ContractError::InvalidTransition`] if the claim is already decided
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
        self.decide(ledger, caller, claim_id, ClaimStatus::Rejected, "reject_claim")
    }

    /// Load a claim by id
    ///
    /// # Errors
    /// [`ContractError::NotFound`] if nothing is stored under the id or the
    /// stored value does not decode.
    pub fn get_claim<L>(&self, ledger: &L, claim_id: &str) -> Result<Claim, ContractError>
    where
        L: LedgerAccessor + ?Sized,
    {
        let not_found = || ContractError::NotFound {
            kind: EntityKind::Claim,
            id: claim_id.to_string(),
        };

        let bytes = ledger.get_state(&claim_key(claim_id))?.ok_or_else(not_found)?;
        let claim = decode::<Claim>(&bytes).ok_or_else(|| {
            warn!(claim_id, "Stored claim does not decode");
            not_found()
        })?;

        debug!(claim_id, status = %claim.status, "Loaded claim");
        Ok(claim)
    }

    fn decide<L, I>(
        &self,
        ledger: &mut L,
        caller: &I,
        claim_id: &str,
        target: ClaimStatus,
        operation: &'static str,
    ) -> Result<Claim, ContractError>
    where
        L: LedgerAccessor + ?Sized,
        I: IdentityResolver + ?Sized,
    {
        require_role(self.policy, caller, operation, &[Role::Insurer])?;
        let reviewer = caller.caller_id()?;

        let mut claim = self.get_claim(ledger, claim_id)?;

        if !claim.status.can_transition_to(target) {
            let reason = refusal_reason(claim.status, target);
            warn!(claim_id, from = %claim.status, to = %target, reason, "Refused claim transition");
            return Err(ContractError::InvalidTransition {
                claim_id: claim_id.to_string(),
                from: claim.status,
                to: target,
                reason,
            });
        }

        claim.status = target;
        claim.approved_by = reviewer;

        ledger.put_state(&claim.key(), encode(&claim)?)?;
        info!(claim_id, status = %claim.status, reviewer = %claim.approved_by, "Decided claim");

        Ok(claim)
    }
}

fn refusal_reason(from: ClaimStatus, to: ClaimStatus) -> &'static str {
    match (from, to) {
        (ClaimStatus::Rejected, ClaimStatus::Approved) => {
            "rejected claims cannot be approved; a new claim must be requested"
        }
        (ClaimStatus::Rejected, _) => "claim has already been rejected",
        (ClaimStatus::Approved, ClaimStatus::Rejected) => {
            "approved claims cannot be rejected; the decision is final"
        }
        (ClaimStatus::Approved, _) => "claim has already been approved",
        (ClaimStatus::Pending, _) => "claims can only move from PENDING to APPROVED or REJECTED",
    }
}

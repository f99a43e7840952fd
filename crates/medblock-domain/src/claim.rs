//! Claim module - insurance claims and their lifecycle

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a claim
///
/// Claims start in `Pending` and move exactly once to either `Approved` or
/// `Rejected`. Both outcomes are terminal: a reviewer who changes their mind
/// cannot flip a decided claim, a new claim must be requested instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimStatus {
    /// Awaiting an insurer decision
    Pending,

    /// Accepted by an insurer
    Approved,

    /// Refused by an insurer
    Rejected,
}

impl ClaimStatus {
    /// Get the status name as stored on the ledger
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "PENDING",
            ClaimStatus::Approved => "APPROVED",
            ClaimStatus::Rejected => "REJECTED",
        }
    }

    /// Whether no further transition is permitted from this status
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ClaimStatus::Pending)
    }

    /// Whether a claim in this status may move to `next`
    pub fn can_transition_to(&self, next: ClaimStatus) -> bool {
        matches!(
            (self, next),
            (ClaimStatus::Pending, ClaimStatus::Approved)
                | (ClaimStatus::Pending, ClaimStatus::Rejected)
        )
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An insurance claim against a medical record
///
/// `approved_by` holds whoever last moved the claim out of `Pending`, whether
/// the decision was an approval or a rejection. It is empty while pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    /// Caller-supplied unique identifier
    pub claim_id: String,

    /// The medical record this claim concerns
    pub record_id: String,

    /// Current lifecycle state
    pub status: ClaimStatus,

    /// Identifier of the reviewer who decided the claim
    #[serde(default)]
    pub approved_by: String,
}

impl Claim {
    /// Create a new pending claim
    pub fn new(claim_id: String, record_id: String) -> Self {
        Self {
            claim_id,
            record_id,
            status: ClaimStatus::Pending,
            approved_by: String::new(),
        }
    }

    /// Ledger key this claim is stored under
    pub fn key(&self) -> String {
        crate::keys::claim_key(&self.claim_id)
    }
}

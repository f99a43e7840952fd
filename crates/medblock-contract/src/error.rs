//! Contract error types

use medblock_domain::{ClaimStatus, IdentityError, LedgerError, Role};
use std::fmt;
use thiserror::Error;

/// Entity kinds addressed by the contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A medical record
    Record,
    /// An insurance claim
    Claim,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Record => f.write_str("record"),
            EntityKind::Claim => f.write_str("claim"),
        }
    }
}

/// Errors returned by contract operations
///
/// A failed operation never leaves a write behind: every check runs before
/// the single ledger write an operation performs.
#[derive(Error, Debug)]
pub enum ContractError {
    /// The caller's membership does not map to a permitted role
    #[error("Unauthorized: {operation} requires {} but caller membership is '{membership}'", join_roles(.required))]
    Unauthorized {
        /// Operation that was refused
        operation: &'static str,
        /// Roles that would have been accepted
        required: Vec<Role>,
        /// The caller's membership tag
        membership: String,
    },

    /// No decodable entity exists under the id
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Kind of entity looked up
        kind: EntityKind,
        /// Requested id
        id: String,
    },

    /// The claim lifecycle does not allow the requested move
    #[error("Invalid transition for claim {claim_id} ({from} -> {to}): {reason}")]
    InvalidTransition {
        /// Claim being transitioned
        claim_id: String,
        /// Current status
        from: ClaimStatus,
        /// Requested status
        to: ClaimStatus,
        /// Why the move is refused
        reason: &'static str,
    },

    /// An entity with this id is already on the ledger
    #[error("{kind} already exists: {id}")]
    AlreadyExists {
        /// Kind of entity being created
        kind: EntityKind,
        /// Conflicting id
        id: String,
    },

    /// A claim names a record that is not on the ledger
    #[error("Referenced record not found: {record_id}")]
    ReferenceNotFound {
        /// The missing record id
        record_id: String,
    },

    /// An argument is empty or malformed
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The caller's identity could not be resolved
    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),

    /// The ledger failed
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// An entity could not be encoded for storage
    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

fn join_roles(roles: &[Role]) -> String {
    let names: Vec<&str> = roles.iter().map(Role::as_str).collect();
    names.join(" or ")
}

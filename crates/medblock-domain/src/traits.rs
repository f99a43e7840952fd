//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the contract and the hosting
//! runtime. The contract never reaches a ledger or a certificate directly;
//! implementations live in other crates (`medblock-store`, the CLI).

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors reported by a ledger implementation
///
/// The contract propagates these without interpreting them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The key is empty or otherwise unusable
    #[error("Invalid key: {0:?}")]
    InvalidKey(String),

    /// The rich query expression was rejected
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// The underlying store failed
    #[error("Ledger backend error: {0}")]
    Backend(String),
}

/// Errors reported by an identity resolver
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// The transaction carries no usable caller credential
    #[error("Caller identity unavailable: {0}")]
    Unavailable(String),
}

/// Lazy, finite, single-pass sequence of `(key, value)` query results
pub type QueryIterator<'a> = Box<dyn Iterator<Item = Result<(String, Vec<u8>), LedgerError>> + 'a>;

/// Deterministic key-value ledger as seen from inside one transaction
///
/// Implemented by the infrastructure layer (medblock-store). Every replica
/// running the same calls against the same prior state must end with the
/// same state, so implementations must not introduce clocks, randomness, or
/// unordered iteration.
pub trait LedgerAccessor {
    /// Read the value stored at `key`, if any
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Write `value` at `key`
    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError>;

    /// Run a rich selector query, yielding matches in commit order
    fn query(&self, selector: &str) -> Result<QueryIterator<'_>, LedgerError>;

    /// Timestamp of the current transaction, identical on every replica
    fn tx_timestamp(&self) -> DateTime<Utc>;
}

/// Source of the verified caller for the current transaction
///
/// Implementations have already verified the credential; the contract trusts
/// what they return.
pub trait IdentityResolver {
    /// Identifier of the calling user
    fn caller_id(&self) -> Result<String, IdentityError>;

    /// Membership tag of the caller's organization
    fn caller_membership(&self) -> Result<String, IdentityError>;
}

impl<T: IdentityResolver + ?Sized> IdentityResolver for &T {
    fn caller_id(&self) -> Result<String, IdentityError> {
        (**self).caller_id()
    }

    fn caller_membership(&self) -> Result<String, IdentityError> {
        (**self).caller_membership()
    }
}

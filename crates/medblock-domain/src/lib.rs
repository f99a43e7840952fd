//! MedBlock Domain Layer
//!
//! This crate contains the domain model shared by every other MedBlock crate:
//! the entities persisted on the ledger, the participant roles, the key layout,
//! and the trait interfaces through which the contract reaches its external
//! collaborators (the ledger and the identity resolver).
//!
//! ## Key Concepts
//!
//! - **MedicalRecord**: an immutable pointer to off-ledger clinical content
//! - **Claim**: an insurance claim moving through `PENDING → APPROVED | REJECTED`
//! - **Role**: the participant class a membership tag maps to
//! - **Selector**: a field-equality rich query over ledger documents
//!
//! ## Architecture
//!
//! - Pure data and rules, no I/O
//! - Infrastructure implementations (SQLite ledger, CLI identities) live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod claim;
pub mod identity;
pub mod keys;
pub mod record;
pub mod role;
pub mod selector;
pub mod traits;

// Re-exports for convenience
pub use claim::{Claim, ClaimStatus};
pub use identity::CallerIdentity;
pub use record::MedicalRecord;
pub use role::Role;
pub use selector::{Selector, SelectorError};
pub use traits::{IdentityError, IdentityResolver, LedgerAccessor, LedgerError, QueryIterator};

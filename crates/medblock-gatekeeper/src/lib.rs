//! MedBlock Gatekeeper
//!
//! The access policy shared by every contract operation.
//!
//! The Gatekeeper provides:
//! - Membership resolution (organization tag → role) by exact match
//! - Role checks for single- and multi-role operations
//! - The policy flags the contract validates writes against
//!
//! # Examples
//!
//! ```
//! use medblock_domain::Role;
//! use medblock_gatekeeper::{AccessPolicy, PolicyConfig};
//!
//! let policy = AccessPolicy::from_config(&PolicyConfig::default()).unwrap();
//! assert!(policy.is_authorized("HospitalMSP", &[Role::Hospital]));
//! assert!(!policy.is_authorized("NotHospitalMSP", &[Role::Hospital]));
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod membership;
mod policy;

pub use config::PolicyConfig;
pub use error::GatekeeperError;
pub use membership::MembershipMap;
pub use policy::AccessPolicy;

//! Gatekeeper configuration

use crate::membership::DEFAULT_MEMBERSHIPS;
use medblock_domain::Role;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for the access policy and write validation rules
///
/// Loaded from the `[policy]` table of the CLI configuration file. Every
/// field has a default, so an empty table yields [`PolicyConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Membership tag → role table, matched exactly
    #[serde(default = "default_memberships")]
    pub memberships: BTreeMap<String, Role>,

    /// Refuse to create a record or claim whose id is already on the ledger
    #[serde(default = "default_true")]
    pub reject_duplicate_ids: bool,

    /// Refuse claims whose record id does not resolve to a stored record
    #[serde(default)]
    pub enforce_record_references: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            memberships: default_memberships(),
            reject_duplicate_ids: true,
            enforce_record_references: false,
        }
    }
}

impl PolicyConfig {
    /// Create a permissive configuration (ids may be reused, references unchecked)
    pub fn permissive() -> Self {
        Self {
            memberships: default_memberships(),
            reject_duplicate_ids: false,
            enforce_record_references: false,
        }
    }

    /// Create a strict configuration (all write validations enabled)
    pub fn strict() -> Self {
        Self {
            memberships: default_memberships(),
            reject_duplicate_ids: true,
            enforce_record_references: true,
        }
    }
}

fn default_memberships() -> BTreeMap<String, Role> {
    DEFAULT_MEMBERSHIPS
        .iter()
        .map(|(tag, role)| (tag.to_string(), *role))
        .collect()
}

fn default_true() -> bool {
    true
}

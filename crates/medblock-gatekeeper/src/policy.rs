//! Role checks

use crate::{GatekeeperError, MembershipMap, PolicyConfig};
use medblock_domain::Role;

/// The access policy consulted before every ledger access
///
/// Holds configuration only. It answers yes or no and never errors on an
/// unknown membership tag; turning a refusal into an error is the caller's
/// job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    memberships: MembershipMap,
    reject_duplicate_ids: bool,
    enforce_record_references: bool,
}

impl AccessPolicy {
    /// Create a policy over the given membership map with default write rules
    pub fn new(memberships: MembershipMap) -> Self {
        let defaults = PolicyConfig::default();
        Self {
            memberships,
            reject_duplicate_ids: defaults.reject_duplicate_ids,
            enforce_record_references: defaults.enforce_record_references,
        }
    }

    /// Build a policy from configuration
    pub fn from_config(config: &PolicyConfig) -> Result<Self, GatekeeperError> {
        let memberships = MembershipMap::from_entries(
            config
                .memberships
                .iter()
                .map(|(tag, role)| (tag.as_str(), *role)),
        )?;

        Ok(Self {
            memberships,
            reject_duplicate_ids: config.reject_duplicate_ids,
            enforce_record_references: config.enforce_record_references,
        })
    }

    /// Role the membership tag maps to, if any
    pub fn role_of(&self, membership: &str) -> Option<Role> {
        self.memberships.resolve(membership)
    }

    /// Whether a caller with this membership tag holds one of `required`
    pub fn is_authorized(&self, membership: &str, required: &[Role]) -> bool {
        self.role_of(membership)
            .map(|role| required.contains(&role))
            .unwrap_or(false)
    }

    /// Whether creates must use ids not already on the ledger
    pub fn rejects_duplicate_ids(&self) -> bool {
        self.reject_duplicate_ids
    }

    /// Whether claims must reference an existing record
    pub fn enforces_record_references(&self) -> bool {
        self.enforce_record_references
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::new(MembershipMap::default())
    }
}

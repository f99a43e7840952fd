//! Membership tag to role mapping

use crate::GatekeeperError;
use medblock_domain::Role;
use std::collections::BTreeMap;

/// Membership tags recognised when no table is configured
pub(crate) const DEFAULT_MEMBERSHIPS: [(&str, Role); 3] = [
    ("HospitalMSP", Role::Hospital),
    ("PatientMSP", Role::Patient),
    ("InsuranceMSP", Role::Insurer),
];

/// Exact-match table from organization membership tags to roles
///
/// Tags are compared byte-for-byte: `HospitalMSP` does not match
/// `hospitalmsp`, and `NotHospitalMSP` is an unrelated organization.
/// Several tags may map to the same role (e.g. two hospital organizations).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipMap {
    entries: BTreeMap<String, Role>,
}

impl MembershipMap {
    /// Empty map (denies everyone)
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Build a map from `(tag, role)` pairs
    ///
    /// # Errors
    /// Returns an error if a tag is empty or contains surrounding whitespace,
    /// since such a tag could never match a verified membership.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, GatekeeperError>
    where
        I: IntoIterator<Item = (S, Role)>,
        S: Into<String>,
    {
        let mut map = Self::empty();
        for (tag, role) in entries {
            map = map.with_entry(tag, role)?;
        }
        Ok(map)
    }

    /// Add one mapping
    pub fn with_entry(mut self, tag: impl Into<String>, role: Role) -> Result<Self, GatekeeperError> {
        let tag = tag.into();
        if tag.is_empty() {
            return Err(GatekeeperError::Config("membership tag cannot be empty".to_string()));
        }
        if tag.trim() != tag {
            return Err(GatekeeperError::Config(format!(
                "membership tag '{}' has surrounding whitespace",
                tag
            )));
        }
        self.entries.insert(tag, role);
        Ok(self)
    }

    /// Role for a membership tag, if the tag is known
    pub fn resolve(&self, tag: &str) -> Option<Role> {
        self.entries.get(tag).copied()
    }
}

impl Default for MembershipMap {
    fn default() -> Self {
        let entries = DEFAULT_MEMBERSHIPS
            .iter()
            .map(|(tag, role)| (tag.to_string(), *role))
            .collect();
        Self { entries }
    }
}

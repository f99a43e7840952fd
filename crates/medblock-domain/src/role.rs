//! Role module - participant classes on the network

use serde::{Deserialize, Serialize};
use std::fmt;

/// Participant class a caller acts as
///
/// Roles are never supplied by the caller directly; they are derived from the
/// verified membership tag of the caller's organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Creates medical records
    Hospital,

    /// Owns records and requests claims
    Patient,

    /// Decides claims
    Insurer,
}

impl Role {
    /// All roles, in declaration order
    pub const ALL: [Role; 3] = [Role::Hospital, Role::Patient, Role::Insurer];

    /// Get the role name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Hospital => "HOSPITAL",
            Role::Patient => "PATIENT",
            Role::Insurer => "INSURER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_names_match_wire_form() {
        for role in Role::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role));
        }
    }

    #[test]
    fn test_role_serde() {
        let json = serde_json::to_string(&Role::Hospital).unwrap();
        assert_eq!(json, "\"HOSPITAL\"");
    }
}

//! Ledger key layout
//!
//! Each entity type owns a disjoint prefix so record and claim identifiers
//! can never collide.

/// Prefix for medical record keys
pub const RECORD_PREFIX: &str = "RECORD_";

/// Prefix for claim keys
pub const CLAIM_PREFIX: &str = "CLAIM_";

/// Key for the record with the given id
pub fn record_key(id: &str) -> String {
    format!("{}{}", RECORD_PREFIX, id)
}

/// Key for the claim with the given id
pub fn claim_key(id: &str) -> String {
    format!("{}{}", CLAIM_PREFIX, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_prefixed() {
        assert_eq!(record_key("42"), "RECORD_42");
        assert_eq!(claim_key("42"), "CLAIM_42");
        assert_ne!(record_key("42"), claim_key("42"));
    }
}

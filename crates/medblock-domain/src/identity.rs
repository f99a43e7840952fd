//! Caller identity values

use crate::traits::{IdentityError, IdentityResolver};

/// An already-verified caller: user identifier plus organization membership tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    id: String,
    membership: String,
}

impl CallerIdentity {
    /// Create a caller from its identifier and membership tag
    pub fn new(id: impl Into<String>, membership: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            membership: membership.into(),
        }
    }

    /// Create a caller from a raw X.509 identity string
    ///
    /// Raw identities look like `x509::/C=US/O=Org1/CN=doctor1::/C=US/O=Org1/CN=ca.org1`,
    /// subject first and issuer second. The subject's common name becomes the
    /// caller identifier; strings with no `/CN=` are used unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use medblock_domain::CallerIdentity;
    ///
    /// let caller = CallerIdentity::from_certificate_id(
    ///     "x509::/C=US/O=Hospital/CN=doctor1::/C=US/O=Hospital/CN=ca.hospital",
    ///     "HospitalMSP",
    /// );
    /// assert_eq!(caller.id(), "doctor1");
    /// ```
    pub fn from_certificate_id(raw: &str, membership: impl Into<String>) -> Self {
        Self::new(common_name(raw), membership)
    }

    /// Caller identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Membership tag
    pub fn membership(&self) -> &str {
        &self.membership
    }
}

impl IdentityResolver for CallerIdentity {
    fn caller_id(&self) -> Result<String, IdentityError> {
        if self.id.is_empty() {
            return Err(IdentityError::Unavailable("empty caller identifier".to_string()));
        }
        Ok(self.id.clone())
    }

    fn caller_membership(&self) -> Result<String, IdentityError> {
        if self.membership.is_empty() {
            return Err(IdentityError::Unavailable("empty membership tag".to_string()));
        }
        Ok(self.membership.clone())
    }
}

fn common_name(raw: &str) -> &str {
    match raw.split_once("/CN=") {
        Some((_, rest)) => {
            let end = rest
                .find("::")
                .into_iter()
                .chain(rest.find('/'))
                .min()
                .unwrap_or(rest.len());
            &rest[..end]
        }
        None => raw,
    }
}

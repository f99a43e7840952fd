//! Role enforcement shared by the record manager and the claim state machine

use crate::ContractError;
use medblock_domain::{IdentityResolver, Role};
use medblock_gatekeeper::AccessPolicy;
use tracing::warn;

/// Check the caller's membership against `required`
///
/// Returns the membership tag on success. Runs before any ledger access.
pub(crate) fn require_role<I>(
    policy: &AccessPolicy,
    caller: &I,
    operation: &'static str,
    required: &[Role],
) -> Result<String, ContractError>
where
    I: IdentityResolver + ?Sized,
{
    let membership = caller.caller_membership()?;

    if !policy.is_authorized(&membership, required) {
        warn!(operation, membership = %membership, "Caller denied by access policy");
        return Err(ContractError::Unauthorized {
            operation,
            required: required.to_vec(),
            membership,
        });
    }

    Ok(membership)
}

/// Reject empty identifiers before they become ledger keys
pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<(), ContractError> {
    if value.trim().is_empty() {
        return Err(ContractError::InvalidArgument(format!("{} cannot be empty", field)));
    }
    Ok(())
}

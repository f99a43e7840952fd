//! Claim command implementations.

use crate::cli::{ClaimIdArgs, RequestClaimArgs};
use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;
use medblock_domain::CallerIdentity;

/// Insurer decision on a pending claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Approve the claim
    Approve,
    /// Reject the claim
    Reject,
}

/// Execute the request-claim command.
pub fn execute_request_claim(
    args: RequestClaimArgs,
    session: &mut Session,
    caller: &CallerIdentity,
    formatter: &Formatter,
) -> Result<()> {
    let (claim, receipt) = session
        .submit(|contract, tx| contract.request_claim(tx, caller, &args.claim_id, &args.record_id))?;

    if let Some(line) = formatter.committed(&format!("Requested claim {}", claim.claim_id), &receipt) {
        println!("{}", line);
    }
    println!("{}", formatter.format_claim(&claim)?);
    Ok(())
}

/// Execute the approve-claim or reject-claim command.
pub fn execute_decide_claim(
    args: ClaimIdArgs,
    decision: Decision,
    session: &mut Session,
    caller: &CallerIdentity,
    formatter: &Formatter,
) -> Result<()> {
    let (claim, receipt) = session.submit(|contract, tx| match decision {
        Decision::Approve => contract.approve_claim(tx, caller, &args.claim_id),
        Decision::Reject => contract.reject_claim(tx, caller, &args.claim_id),
    })?;

    let message = format!("Claim {} is now {}", claim.claim_id, claim.status);
    if let Some(line) = formatter.committed(&message, &receipt) {
        println!("{}", line);
    }
    println!("{}", formatter.format_claim(&claim)?);
    Ok(())
}

/// Execute the get-claim command.
pub fn execute_get_claim(args: ClaimIdArgs, session: &mut Session, formatter: &Formatter) -> Result<()> {
    let claim = session.evaluate(|contract, tx| contract.get_claim(tx, &args.claim_id))?;
    println!("{}", formatter.format_claim(&claim)?);
    Ok(())
}

//! Command implementations.

pub mod claims;
pub mod profile;
pub mod records;

pub use self::claims::{execute_decide_claim, execute_get_claim, execute_request_claim, Decision};
pub use self::profile::execute_profile;
pub use self::records::{execute_create_record, execute_get_record, execute_list_records};

use crate::cli::LedgerCommand;
use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;
use medblock_domain::CallerIdentity;

/// Execute a ledger command against an open session.
///
/// `caller` is only resolved by commands that act on someone's behalf.
pub fn execute_ledger<F>(
    command: LedgerCommand,
    session: &mut Session,
    caller: F,
    formatter: &Formatter,
) -> Result<()>
where
    F: Fn() -> Result<CallerIdentity>,
{
    match command {
        LedgerCommand::CreateRecord(args) => execute_create_record(args, session, &caller()?, formatter),
        LedgerCommand::GetRecord(args) => execute_get_record(args, session, formatter),
        LedgerCommand::ListRecords => execute_list_records(session, &caller()?, formatter),
        LedgerCommand::RequestClaim(args) => execute_request_claim(args, session, &caller()?, formatter),
        LedgerCommand::ApproveClaim(args) => {
            execute_decide_claim(args, Decision::Approve, session, &caller()?, formatter)
        }
        LedgerCommand::RejectClaim(args) => {
            execute_decide_claim(args, Decision::Reject, session, &caller()?, formatter)
        }
        LedgerCommand::GetClaim(args) => execute_get_claim(args, session, formatter),
    }
}

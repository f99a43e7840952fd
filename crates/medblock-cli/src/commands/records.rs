//! Record command implementations.

use crate::cli::{CreateRecordArgs, RecordIdArgs};
use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;
use medblock_domain::CallerIdentity;

/// Execute the create-record command.
pub fn execute_create_record(
    args: CreateRecordArgs,
    session: &mut Session,
    caller: &CallerIdentity,
    formatter: &Formatter,
) -> Result<()> {
    let (record, receipt) = session.submit(|contract, tx| {
        contract.create_record(tx, caller, &args.id, &args.patient_id, &args.content_reference)
    })?;

    if let Some(line) = formatter.committed(&format!("Created record {}", record.id), &receipt) {
        println!("{}", line);
    }
    println!("{}", formatter.format_record(&record)?);
    Ok(())
}

/// Execute the get-record command.
pub fn execute_get_record(args: RecordIdArgs, session: &mut Session, formatter: &Formatter) -> Result<()> {
    let record = session.evaluate(|contract, tx| contract.get_record(tx, &args.id))?;
    println!("{}", formatter.format_record(&record)?);
    Ok(())
}

/// Execute the list-records command for the calling patient.
pub fn execute_list_records(
    session: &mut Session,
    caller: &CallerIdentity,
    formatter: &Formatter,
) -> Result<()> {
    let listing = session.evaluate(|contract, tx| contract.list_records_for_patient(tx, caller))?;
    println!("{}", formatter.format_listing(&listing)?);
    Ok(())
}

//! Ledger failures surface as `ContractError::Ledger` and write nothing

mod common;

use common::{hospital, insurer, patient, FaultyLedger, Harness};
use medblock_contract::{ContractError, MedBlockContract};
use medblock_domain::{Claim, LedgerError};

fn record_json(id: &str, patient_id: &str) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({
        "id": id,
        "patientId": patient_id,
        "contentReference": "Qm1",
        "createdAt": Harness::timestamp(0).to_rfc3339(),
        "createdBy": "H1",
    }))
    .unwrap()
}

fn is_backend(result: &ContractError, message: &str) -> bool {
    matches!(result, ContractError::Ledger(LedgerError::Backend(m)) if m == message)
}

#[test]
fn test_create_record_write_failure() {
    let contract = MedBlockContract::default();
    let mut ledger = FaultyLedger::new();

    let err = contract
        .create_record(&mut ledger, &hospital("H1"), "R1", "P1", "Qm1")
        .unwrap_err();
    assert!(is_backend(&err, "disk full"), "got {:?}", err);
    assert!(ledger.state().is_empty());
}

#[test]
fn test_request_claim_write_failure() {
    let contract = MedBlockContract::default();
    let mut ledger = FaultyLedger::new().with_entry("RECORD_R1", record_json("R1", "P1"));

    let err = contract
        .request_claim(&mut ledger, &patient("P1"), "C1", "R1")
        .unwrap_err();
    assert!(is_backend(&err, "disk full"), "got {:?}", err);
    assert!(!ledger.state().contains_key("CLAIM_C1"));
}

#[test]
fn test_approve_claim_write_failure_keeps_pending() {
    let contract = MedBlockContract::default();
    let pending = Claim::new("C1".to_string(), "R1".to_string());
    let stored = serde_json::to_vec(&pending).unwrap();
    let mut ledger = FaultyLedger::new().with_entry("CLAIM_C1", stored.clone());

    let err = contract
        .approve_claim(&mut ledger, &insurer("I1"), "C1")
        .unwrap_err();
    assert!(is_backend(&err, "disk full"), "got {:?}", err);
    assert_eq!(ledger.state()["CLAIM_C1"], stored);
    assert_eq!(contract.get_claim(&ledger, "C1").unwrap(), pending);
}

#[test]
fn test_listing_aborts_on_scan_failure() {
    let contract = MedBlockContract::default();
    let ledger = FaultyLedger::new()
        .with_entry("RECORD_R1", record_json("R1", "P1"))
        .with_entry("RECORD_R2", record_json("R2", "P1"));

    let err = contract
        .list_records_for_patient(&ledger, &patient("P1"))
        .unwrap_err();
    assert!(is_backend(&err, "io"), "got {:?}", err);
}

#[test]
fn test_lazy_listing_yields_rows_before_failure() {
    let contract = MedBlockContract::default();
    let ledger = FaultyLedger::new().with_entry("RECORD_R1", record_json("R1", "P1"));

    let mut iter = contract
        .records()
        .iter_records_for_patient(&ledger, &patient("P1"))
        .unwrap();
    assert_eq!(iter.next().unwrap().unwrap().id, "R1");
    let err = iter.next().unwrap().unwrap_err();
    assert!(is_backend(&err, "io"), "got {:?}", err);
}

//! Claim lifecycle through the contract surface

mod common;

use common::{hospital, insurer, patient, Harness};
use medblock_contract::{ContractError, EntityKind, PolicyConfig};
use medblock_domain::{CallerIdentity, Claim, ClaimStatus, Role};

fn stored_claim(h: &mut Harness, claim_id: &str) -> Claim {
    h.run(|c, tx| c.get_claim(tx, claim_id)).unwrap()
}

#[test]
fn test_request_claim_is_pending() {
    let mut h = Harness::new();
    let claim = h
        .run(|c, tx| c.request_claim(tx, &patient("P1"), "C1", "R1"))
        .unwrap();

    assert_eq!(claim.claim_id, "C1");
    assert_eq!(claim.record_id, "R1");
    assert_eq!(claim.status, ClaimStatus::Pending);
    assert!(claim.approved_by.is_empty());
    assert_eq!(stored_claim(&mut h, "C1"), claim);
}

#[test]
fn test_request_claim_ignores_record_validity_by_default() {
    let mut h = Harness::new();
    // No record R404 exists
    let claim = h
        .run(|c, tx| c.request_claim(tx, &patient("P1"), "C1", "R404"))
        .unwrap();
    assert_eq!(claim.status, ClaimStatus::Pending);
    assert!(claim.approved_by.is_empty());
}

#[test]
fn test_only_patients_request_claims() {
    let mut h = Harness::new();
    for caller in [hospital("H1"), insurer("I1"), CallerIdentity::new("X", "PatientMSPx")] {
        let result = h.run(|c, tx| c.request_claim(tx, &caller, "C1", "R1"));
        assert!(
            matches!(result, Err(ContractError::Unauthorized { ref required, .. }) if required == &vec![Role::Patient]),
            "unexpected result for {}: {:?}",
            caller.membership(),
            result
        );
    }
    assert!(h.keys("CLAIM_").is_empty());
}

#[test]
fn test_enforced_references() {
    let mut h = Harness::with_config(PolicyConfig::strict());

    let result = h.run(|c, tx| c.request_claim(tx, &patient("P1"), "C1", "R1"));
    assert!(matches!(
        result,
        Err(ContractError::ReferenceNotFound { ref record_id }) if record_id == "R1"
    ));
    assert!(h.keys("CLAIM_").is_empty());

    h.run(|c, tx| c.create_record(tx, &hospital("H1"), "R1", "P1", "Qm1"))
        .unwrap();
    let claim = h
        .run(|c, tx| c.request_claim(tx, &patient("P1"), "C1", "R1"))
        .unwrap();
    assert_eq!(claim.status, ClaimStatus::Pending);
}

#[test]
fn test_duplicate_claim_id_rejected() {
    let mut h = Harness::new();
    h.run(|c, tx| c.request_claim(tx, &patient("P1"), "C1", "R1"))
        .unwrap();
    h.run(|c, tx| c.approve_claim(tx, &insurer("I1"), "C1"))
        .unwrap();

    // Re-requesting must not reset an approved claim back to pending
    let result = h.run(|c, tx| c.request_claim(tx, &patient("P1"), "C1", "R1"));
    assert!(matches!(
        result,
        Err(ContractError::AlreadyExists { kind: EntityKind::Claim, .. })
    ));
    assert_eq!(stored_claim(&mut h, "C1").status, ClaimStatus::Approved);
}

#[test]
fn test_insurer_approves_pending_claim() {
    let mut h = Harness::new();
    h.run(|c, tx| c.request_claim(tx, &patient("P1"), "C1", "R1"))
        .unwrap();

    let claim = h
        .run(|c, tx| c.approve_claim(tx, &insurer("I1"), "C1"))
        .unwrap();
    assert_eq!(claim.status, ClaimStatus::Approved);
    assert_eq!(claim.approved_by, "I1");
    assert_eq!(stored_claim(&mut h, "C1"), claim);
}

#[test]
fn test_non_insurer_cannot_decide() {
    let mut h = Harness::new();
    h.run(|c, tx| c.request_claim(tx, &patient("P1"), "C1", "R1"))
        .unwrap();

    for caller in [hospital("H1"), patient("P1"), CallerIdentity::new("X", "Insurance")] {
        let approve = h.run(|c, tx| c.approve_claim(tx, &caller, "C1"));
        assert!(matches!(
            approve,
            Err(ContractError::Unauthorized { operation: "approve_claim", .. })
        ));

        let reject = h.run(|c, tx| c.reject_claim(tx, &caller, "C1"));
        assert!(matches!(
            reject,
            Err(ContractError::Unauthorized { operation: "reject_claim", .. })
        ));
    }

    let claim = stored_claim(&mut h, "C1");
    assert_eq!(claim.status, ClaimStatus::Pending);
    assert!(claim.approved_by.is_empty());
}

#[test]
fn test_unauthorized_checked_before_existence() {
    let mut h = Harness::new();
    let result = h.run(|c, tx| c.approve_claim(tx, &patient("P1"), "missing"));
    assert!(matches!(result, Err(ContractError::Unauthorized { .. })));
}

#[test]
fn test_decide_missing_claim() {
    let mut h = Harness::new();
    let approve = h.run(|c, tx| c.approve_claim(tx, &insurer("I1"), "C404"));
    assert!(matches!(
        approve,
        Err(ContractError::NotFound { kind: EntityKind::Claim, ref id }) if id == "C404"
    ));
    let reject = h.run(|c, tx| c.reject_claim(tx, &insurer("I1"), "C404"));
    assert!(matches!(reject, Err(ContractError::NotFound { .. })));
}

#[test]
fn test_get_missing_claim() {
    let mut h = Harness::new();
    let result = h.run(|c, tx| c.get_claim(tx, "C404"));
    assert!(matches!(
        result,
        Err(ContractError::NotFound { kind: EntityKind::Claim, .. })
    ));
}

#[test]
fn test_rejected_claim_cannot_be_approved() {
    let mut h = Harness::new();
    h.run(|c, tx| c.request_claim(tx, &patient("P1"), "C2", "R1"))
        .unwrap();
    let rejected = h
        .run(|c, tx| c.reject_claim(tx, &insurer("I1"), "C2"))
        .unwrap();
    assert_eq!(rejected.status, ClaimStatus::Rejected);
    assert_eq!(rejected.approved_by, "I1");

    let result = h.run(|c, tx| c.approve_claim(tx, &insurer("I2"), "C2"));
    match result {
        Err(ContractError::InvalidTransition { claim_id, from, to, reason }) => {
            assert_eq!(claim_id, "C2");
            assert_eq!(from, ClaimStatus::Rejected);
            assert_eq!(to, ClaimStatus::Approved);
            assert!(reason.contains("new claim must be requested"));
        }
        other => panic!("expected InvalidTransition, got {:?}", other),
    }

    let claim = stored_claim(&mut h, "C2");
    assert_eq!(claim.status, ClaimStatus::Rejected);
    assert_eq!(claim.approved_by, "I1");
}

#[test]
fn test_decisions_are_final() {
    let mut h = Harness::new();
    h.run(|c, tx| c.request_claim(tx, &patient("P1"), "A", "R1"))
        .unwrap();
    h.run(|c, tx| c.request_claim(tx, &patient("P1"), "B", "R1"))
        .unwrap();
    h.run(|c, tx| c.approve_claim(tx, &insurer("I1"), "A"))
        .unwrap();
    h.run(|c, tx| c.reject_claim(tx, &insurer("I1"), "B"))
        .unwrap();

    let attempts = [
        ("A", ClaimStatus::Approved, ClaimStatus::Rejected),
        ("A", ClaimStatus::Approved, ClaimStatus::Approved),
        ("B", ClaimStatus::Rejected, ClaimStatus::Rejected),
        ("B", ClaimStatus::Rejected, ClaimStatus::Approved),
    ];

    for (claim_id, current, target) in attempts {
        let result = h.run(|c, tx| match target {
            ClaimStatus::Approved => c.approve_claim(tx, &insurer("I2"), claim_id),
            _ => c.reject_claim(tx, &insurer("I2"), claim_id),
        });
        assert!(
            matches!(result, Err(ContractError::InvalidTransition { from, to, .. }) if from == current && to == target),
            "{} {} -> {} should be refused",
            claim_id,
            current,
            target
        );

        let claim = stored_claim(&mut h, claim_id);
        assert_eq!(claim.status, current);
        assert_eq!(claim.approved_by, "I1");
    }
}

#[test]
fn test_end_to_end_approval_scenario() {
    let mut h = Harness::new();

    let record = h
        .run(|c, tx| c.create_record(tx, &hospital("H1"), "R1", "P1", "QmScan"))
        .unwrap();
    h.run(|c, tx| c.request_claim(tx, &patient("P1"), "C1", "R1"))
        .unwrap();
    h.run(|c, tx| c.approve_claim(tx, &insurer("I1"), "C1"))
        .unwrap();

    assert_eq!(h.run(|c, tx| c.get_record(tx, "R1")).unwrap(), record);

    let claim = stored_claim(&mut h, "C1");
    assert_eq!(claim.status, ClaimStatus::Approved);
    assert_eq!(claim.approved_by, "I1");
    assert_eq!(claim.record_id, "R1");
}

#[test]
fn test_undecodable_claim_is_not_found() {
    let mut h = Harness::new();
    h.put_raw("CLAIM_C1", br#"{"claimId":"C1","recordId":"R1","status":"ESCALATED"}"#);

    let result = h.run(|c, tx| c.get_claim(tx, "C1"));
    assert!(matches!(result, Err(ContractError::NotFound { .. })));

    let result = h.run(|c, tx| c.approve_claim(tx, &insurer("I1"), "C1"));
    assert!(matches!(result, Err(ContractError::NotFound { .. })));
}

#[test]
fn test_claim_written_by_older_deployment_loads() {
    let mut h = Harness::new();
    h.put_raw(
        "CLAIM_C1",
        br#"{"claimId":"C1","recordId":"R1","status":"PENDING","approvedBy":"","note":"legacy"}"#,
    );

    let claim = h
        .run(|c, tx| c.approve_claim(tx, &insurer("I1"), "C1"))
        .unwrap();
    assert_eq!(claim.status, ClaimStatus::Approved);
}

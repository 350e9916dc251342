use std::sync::Arc;

use storeguard_core::errors::{ComplianceError, RecordStoreError};
use storeguard_core::models::{Actor, Role};
use storeguard_core::records::{AuditStatus, ItemResult, ItemWeight};
use storeguard_core::traits::RecordStore;
use storeguard_lifecycle::{AuditLifecycle, AuditPatch, ItemPatch, NewAudit, NewAuditItem};
use storeguard_scoring::ScoringEngine;
use test_fixtures::{builders, FixedClock, InMemoryRecords};

struct Harness {
    records: Arc<InMemoryRecords>,
    engine: AuditLifecycle,
    ops: Actor,
    coordinator: Actor,
}

fn harness() -> Harness {
    let records = Arc::new(InMemoryRecords::new());
    records.insert_store(&builders::store("s1")).unwrap();
    let clock = Arc::new(FixedClock::at_ymd(2024, 3, 1));
    let engine = AuditLifecycle::new(
        records.clone(),
        ScoringEngine::new(records.clone()),
        clock,
    );
    Harness {
        records,
        engine,
        ops: Actor::new("ops", Role::OpsManager),
        coordinator: Actor::new("coord", Role::PropertyCoordinator),
    }
}

fn new_audit(store_id: &str) -> NewAudit {
    NewAudit {
        store_id: store_id.to_string(),
        assigned_to_id: Some("coord".to_string()),
        ..Default::default()
    }
}

fn checklist() -> Vec<NewAuditItem> {
    vec![
        NewAuditItem {
            category: "safety".to_string(),
            question: "Extinguishers serviced?".to_string(),
            result: ItemResult::Pass,
            weight: ItemWeight::new(8),
            notes: None,
        },
        NewAuditItem {
            category: "safety".to_string(),
            question: "Exits clear?".to_string(),
            result: ItemResult::Fail,
            weight: ItemWeight::new(8),
            notes: None,
        },
    ]
}

// ── Creation ─────────────────────────────────────────────────────────────

#[test]
fn create_produces_a_draft_owned_by_the_actor() {
    let h = harness();
    let audit = h.engine.create(new_audit("s1"), &h.ops).unwrap();
    assert_eq!(audit.status, AuditStatus::Draft);
    assert_eq!(audit.created_by_id, "ops");
    assert_eq!(audit.compliance_score, None);
}

#[test]
fn create_for_missing_store_is_not_found() {
    let h = harness();
    let err = h.engine.create(new_audit("ghost"), &h.ops).unwrap_err();
    assert!(matches!(err, ComplianceError::NotFound { kind: "store", .. }));
}

// ── Start ────────────────────────────────────────────────────────────────

#[test]
fn start_moves_draft_to_in_progress_for_the_assignee() {
    let h = harness();
    let audit = h.engine.create(new_audit("s1"), &h.ops).unwrap();
    let started = h.engine.start(&audit.id, &h.coordinator).unwrap();
    assert_eq!(started.status, AuditStatus::InProgress);
}

#[test]
fn start_from_in_progress_fails_and_changes_nothing() {
    let h = harness();
    let audit = h.engine.create(new_audit("s1"), &h.ops).unwrap();
    h.engine.start(&audit.id, &h.coordinator).unwrap();
    let before = h.records.get_audit(&audit.id).unwrap().unwrap();

    let err = h.engine.start(&audit.id, &h.coordinator).unwrap_err();
    match err {
        ComplianceError::InvalidState { current, required } => {
            assert_eq!(current, AuditStatus::InProgress);
            assert_eq!(required, "DRAFT");
        }
        other => panic!("expected InvalidState, got {other:?}"),
    }

    let after = h.records.get_audit(&audit.id).unwrap().unwrap();
    assert_eq!(after.status, before.status);
    assert_eq!(after.version, before.version);
    assert_eq!(after.updated_at, before.updated_at);
}

#[test]
fn start_by_non_assignee_is_forbidden() {
    let h = harness();
    let audit = h.engine.create(new_audit("s1"), &h.ops).unwrap();
    let stranger = Actor::new("other", Role::PropertyCoordinator);
    let err = h.engine.start(&audit.id, &stranger).unwrap_err();
    assert!(matches!(err, ComplianceError::Forbidden { .. }));
}

// ── Submit ───────────────────────────────────────────────────────────────

#[test]
fn submit_scores_and_stamps_the_audit_atomically() {
    let h = harness();
    let audit = h.engine.create(new_audit("s1"), &h.ops).unwrap();
    h.engine
        .add_items(&audit.id, checklist(), &h.coordinator)
        .unwrap();
    h.engine.start(&audit.id, &h.coordinator).unwrap();

    let outcome = h.engine.submit(&audit.id, &h.coordinator).unwrap();
    assert_eq!(outcome.audit.status, AuditStatus::Submitted);
    assert_eq!(outcome.audit.compliance_score, Some(50.0));
    assert!(outcome.audit.completed_date.is_some());
    assert!(outcome.store_score_error.is_none());
}

#[test]
fn submit_requires_in_progress() {
    let h = harness();
    let audit = h.engine.create(new_audit("s1"), &h.ops).unwrap();
    let err = h.engine.submit(&audit.id, &h.coordinator).unwrap_err();
    match err {
        ComplianceError::InvalidState { current, required } => {
            assert_eq!(current, AuditStatus::Draft);
            assert_eq!(required, "IN_PROGRESS");
        }
        other => panic!("expected InvalidState, got {other:?}"),
    }
}

#[test]
fn submit_by_non_assignee_is_forbidden() {
    let h = harness();
    let audit = h.engine.create(new_audit("s1"), &h.ops).unwrap();
    h.engine.start(&audit.id, &h.coordinator).unwrap();
    let err = h.engine.submit(&audit.id, &h.ops).unwrap_err();
    assert!(matches!(err, ComplianceError::Forbidden { .. }));
}

#[test]
fn second_submit_loses_with_invalid_state() {
    let h = harness();
    let audit = h.engine.create(new_audit("s1"), &h.ops).unwrap();
    h.engine.start(&audit.id, &h.coordinator).unwrap();

    h.engine.submit(&audit.id, &h.coordinator).unwrap();
    let err = h.engine.submit(&audit.id, &h.coordinator).unwrap_err();
    match err {
        ComplianceError::InvalidState { current, .. } => {
            assert_eq!(current, AuditStatus::Submitted);
        }
        other => panic!("expected InvalidState, got {other:?}"),
    }
}

#[test]
fn stale_version_write_is_rejected_by_the_store() {
    let h = harness();
    let audit = h.engine.create(new_audit("s1"), &h.ops).unwrap();
    let stale = h.records.get_audit(&audit.id).unwrap().unwrap();

    // A competing transition bumps the version.
    h.engine.start(&audit.id, &h.coordinator).unwrap();

    let err = h.records.update_audit(&stale, stale.version).unwrap_err();
    assert!(matches!(
        err,
        ComplianceError::Storage(RecordStoreError::VersionConflict { .. })
    ));
}

#[test]
fn submit_survives_a_failing_store_score_recompute() {
    let h = harness();

    // A prior approved audit makes the recompute attempt a write.
    let mut approved = builders::audit("old", "s1", AuditStatus::Approved);
    approved.compliance_score = Some(90.0);
    approved.completed_date = Some(builders::epoch());
    h.records.insert_audit(&approved).unwrap();

    let audit = h.engine.create(new_audit("s1"), &h.ops).unwrap();
    h.engine.start(&audit.id, &h.coordinator).unwrap();

    h.records
        .fail_store_score_writes
        .store(true, std::sync::atomic::Ordering::SeqCst);
    let outcome = h.engine.submit(&audit.id, &h.coordinator).unwrap();

    // The transition stands; the follow-up failure is surfaced.
    assert_eq!(outcome.audit.status, AuditStatus::Submitted);
    assert!(outcome.store_score_error.is_some());
}

// ── Approve / reject ─────────────────────────────────────────────────────

#[test]
fn approve_is_terminal_and_updates_the_store_score() {
    let h = harness();
    let audit = h.engine.create(new_audit("s1"), &h.ops).unwrap();
    h.engine
        .add_items(&audit.id, checklist(), &h.coordinator)
        .unwrap();
    h.engine.start(&audit.id, &h.coordinator).unwrap();
    h.engine.submit(&audit.id, &h.coordinator).unwrap();

    let approved = h.engine.approve(&audit.id, &h.ops).unwrap();
    assert_eq!(approved.status, AuditStatus::Approved);
    assert_eq!(approved.approved_by_id.as_deref(), Some("ops"));

    // The newly approved audit now feeds the rolling aggregate.
    let store = h.records.get_store("s1").unwrap().unwrap();
    assert_eq!(store.compliance_score, Some(50.0));

    let err = h
        .engine
        .update(&audit.id, AuditPatch::default(), &h.ops)
        .unwrap_err();
    assert!(matches!(err, ComplianceError::InvalidState { .. }));
}

#[test]
fn approve_requires_submitted() {
    let h = harness();
    let audit = h.engine.create(new_audit("s1"), &h.ops).unwrap();
    let err = h.engine.approve(&audit.id, &h.ops).unwrap_err();
    match err {
        ComplianceError::InvalidState { current, required } => {
            assert_eq!(current, AuditStatus::Draft);
            assert_eq!(required, "SUBMITTED");
        }
        other => panic!("expected InvalidState, got {other:?}"),
    }
}

#[test]
fn reject_returns_the_audit_to_in_progress_for_rework() {
    let h = harness();
    let audit = h.engine.create(new_audit("s1"), &h.ops).unwrap();
    h.engine
        .add_items(&audit.id, checklist(), &h.coordinator)
        .unwrap();
    h.engine.start(&audit.id, &h.coordinator).unwrap();
    h.engine.submit(&audit.id, &h.coordinator).unwrap();

    let rejected = h
        .engine
        .reject(&audit.id, "photos missing", &h.ops)
        .unwrap();
    assert_eq!(rejected.status, AuditStatus::InProgress);
    assert_eq!(rejected.rejection_reason.as_deref(), Some("photos missing"));
    // Score fields are cleared until the next submission.
    assert_eq!(rejected.compliance_score, None);
    assert_eq!(rejected.completed_date, None);

    // The coordinator can fix items and resubmit.
    let outcome = h.engine.submit(&audit.id, &h.coordinator).unwrap();
    assert_eq!(outcome.audit.status, AuditStatus::Submitted);
}

// ── Items ────────────────────────────────────────────────────────────────

#[test]
fn bulk_added_items_keep_insertion_order() {
    let h = harness();
    let audit = h.engine.create(new_audit("s1"), &h.ops).unwrap();
    let items = h
        .engine
        .add_items(&audit.id, checklist(), &h.coordinator)
        .unwrap();
    assert_eq!(items[0].sort_order, 0);
    assert_eq!(items[1].sort_order, 1);
}

#[test]
fn items_freeze_once_the_audit_is_submitted() {
    let h = harness();
    let audit = h.engine.create(new_audit("s1"), &h.ops).unwrap();
    let items = h
        .engine
        .add_items(&audit.id, checklist(), &h.coordinator)
        .unwrap();
    h.engine.start(&audit.id, &h.coordinator).unwrap();
    h.engine.submit(&audit.id, &h.coordinator).unwrap();

    let err = h
        .engine
        .add_items(&audit.id, checklist(), &h.coordinator)
        .unwrap_err();
    assert!(matches!(err, ComplianceError::InvalidState { .. }));

    let patch = ItemPatch {
        result: Some(ItemResult::Pass),
        ..Default::default()
    };
    let err = h
        .engine
        .update_item(&audit.id, &items[1].id, patch, &h.coordinator)
        .unwrap_err();
    assert!(matches!(err, ComplianceError::InvalidState { .. }));
}

#[test]
fn update_item_rejects_an_item_of_another_audit() {
    let h = harness();
    let first = h.engine.create(new_audit("s1"), &h.ops).unwrap();
    let second = h.engine.create(new_audit("s1"), &h.ops).unwrap();
    let items = h
        .engine
        .add_items(&first.id, checklist(), &h.coordinator)
        .unwrap();

    let err = h
        .engine
        .update_item(&second.id, &items[0].id, ItemPatch::default(), &h.coordinator)
        .unwrap_err();
    assert!(matches!(err, ComplianceError::NotFound { .. }));
}

// ── Update / photos ──────────────────────────────────────────────────────

#[test]
fn coordinator_may_only_update_own_audits() {
    let h = harness();
    let audit = h.engine.create(new_audit("s1"), &h.ops).unwrap();
    let stranger = Actor::new("other", Role::PropertyCoordinator);

    let patch = AuditPatch {
        notes: Some("visited".to_string()),
        ..Default::default()
    };
    let err = h.engine.update(&audit.id, patch.clone(), &stranger).unwrap_err();
    assert!(matches!(err, ComplianceError::Forbidden { .. }));

    // The ops manager is not ownership-restricted.
    let updated = h.engine.update(&audit.id, patch, &h.ops).unwrap();
    assert_eq!(updated.notes.as_deref(), Some("visited"));
}

#[test]
fn photos_attach_to_existing_audits_only() {
    let h = harness();
    let audit = h.engine.create(new_audit("s1"), &h.ops).unwrap();
    h.engine
        .attach_photo(&audit.id, None, Some("storefront".to_string()), &h.coordinator)
        .unwrap();
    assert_eq!(h.engine.photos(&audit.id).unwrap().len(), 1);

    let err = h
        .engine
        .attach_photo("ghost", None, None, &h.coordinator)
        .unwrap_err();
    assert!(matches!(err, ComplianceError::NotFound { .. }));
}

use std::sync::Arc;

use storeguard_core::errors::ComplianceError;
use storeguard_core::models::{Actor, Role};
use storeguard_core::records::AuditStatus;
use storeguard_core::traits::RecordStore;
use storeguard_access::capability::{self, Operation};
use storeguard_access::{AccessScopePolicy, AssignmentAdmin, AuditScope};
use test_fixtures::{builders, FixedClock, InMemoryRecords};

fn seeded() -> (Arc<InMemoryRecords>, AccessScopePolicy) {
    let records = Arc::new(InMemoryRecords::new());
    records.insert_store(&builders::store("s1")).unwrap();
    records.insert_store(&builders::store("s2")).unwrap();

    // Audits across two stores, one assigned to the coordinator.
    let mut mine = builders::audit("mine", "s1", AuditStatus::Draft);
    mine.assigned_to_id = Some("coord".to_string());
    records.insert_audit(&mine).unwrap();
    records
        .insert_audit(&builders::audit("other", "s2", AuditStatus::Draft))
        .unwrap();

    // Certificates in both stores.
    records
        .insert_certificate(&builders::certificate(
            "cert1",
            "s1",
            chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        ))
        .unwrap();
    records
        .insert_certificate(&builders::certificate(
            "cert2",
            "s2",
            chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        ))
        .unwrap();

    let policy = AccessScopePolicy::new(records.clone());
    (records, policy)
}

// ── Audit scopes ─────────────────────────────────────────────────────────

#[test]
fn ops_manager_and_exec_see_everything() {
    let (_, policy) = seeded();
    for role in [Role::OpsManager, Role::Exec] {
        let scope = policy.audit_scope(&Actor::new("boss", role)).unwrap();
        assert_eq!(scope, AuditScope::All);
    }
}

#[test]
fn coordinator_scope_is_their_own_assignments() {
    let (records, policy) = seeded();
    let coordinator = Actor::new("coord", Role::PropertyCoordinator);

    let scope = policy.audit_scope(&coordinator).unwrap();
    assert_eq!(scope, AuditScope::AssignedTo("coord".to_string()));

    let visible = policy
        .filter_audits(&coordinator, records.list_audits().unwrap())
        .unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, "mine");
}

#[test]
fn store_actor_resolves_its_single_active_assignment() {
    let (records, policy) = seeded();
    records
        .insert_assignment(&builders::assignment("shopkeeper", "s1", true))
        .unwrap();
    let store_actor = Actor::new("shopkeeper", Role::Store);

    let scope = policy.audit_scope(&store_actor).unwrap();
    assert_eq!(scope, AuditScope::Store("s1".to_string()));

    let visible = policy
        .filter_audits(&store_actor, records.list_audits().unwrap())
        .unwrap();
    assert!(visible.iter().all(|a| a.store_id == "s1"));
}

#[test]
fn store_actor_without_assignment_is_forbidden() {
    let (_, policy) = seeded();
    let err = policy
        .audit_scope(&Actor::new("nobody", Role::Store))
        .unwrap_err();
    match err {
        ComplianceError::Forbidden { reason } => {
            assert_eq!(reason, "no store assignment found");
        }
        other => panic!("expected Forbidden, got {other:?}"),
    }
}

#[test]
fn inactive_assignments_do_not_grant_scope() {
    let (records, policy) = seeded();
    records
        .insert_assignment(&builders::assignment("shopkeeper", "s1", false))
        .unwrap();
    let err = policy
        .audit_scope(&Actor::new("shopkeeper", Role::Store))
        .unwrap_err();
    assert!(matches!(err, ComplianceError::Forbidden { .. }));
}

// ── Certificate scoping ──────────────────────────────────────────────────

#[test]
fn coordinator_certificates_are_limited_to_assigned_stores() {
    let (records, policy) = seeded();
    records
        .insert_assignment(&builders::assignment("coord", "s1", true))
        .unwrap();
    let coordinator = Actor::new("coord", Role::PropertyCoordinator);

    let all = records.certificates_for_store("s1").unwrap();
    let mut everything = all;
    everything.extend(records.certificates_for_store("s2").unwrap());

    let visible = policy.filter_certificates(&coordinator, everything).unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, "cert1");

    policy.certificate_access(&coordinator, "s1").unwrap();
    let err = policy.certificate_access(&coordinator, "s2").unwrap_err();
    assert!(matches!(err, ComplianceError::Forbidden { .. }));
}

#[test]
fn ops_manager_passes_certificate_access_everywhere() {
    let (_, policy) = seeded();
    let ops = Actor::new("boss", Role::OpsManager);
    policy.certificate_access(&ops, "s1").unwrap();
    policy.certificate_access(&ops, "s2").unwrap();
}

// ── Capability table ─────────────────────────────────────────────────────

#[test]
fn mutating_operations_follow_the_role_table() {
    let ops = Actor::new("boss", Role::OpsManager);
    let coordinator = Actor::new("coord", Role::PropertyCoordinator);
    let exec = Actor::new("suit", Role::Exec);
    let shop = Actor::new("keeper", Role::Store);

    capability::require(&ops, Operation::ApproveAudit).unwrap();
    capability::require(&ops, Operation::RejectAudit).unwrap();
    capability::require(&coordinator, Operation::StartAudit).unwrap();
    capability::require(&coordinator, Operation::SubmitAudit).unwrap();
    capability::require(&coordinator, Operation::CreateAudit).unwrap();

    assert!(capability::require(&coordinator, Operation::ApproveAudit).is_err());
    assert!(capability::require(&ops, Operation::StartAudit).is_err());
    assert!(capability::require(&exec, Operation::ApproveAudit).is_err());
    assert!(capability::require(&exec, Operation::CreateAudit).is_err());
    assert!(capability::require(&shop, Operation::ManageCertificates).is_err());
}

#[test]
fn every_role_may_view_with_scoping() {
    for role in [
        Role::Store,
        Role::PropertyCoordinator,
        Role::OpsManager,
        Role::Exec,
    ] {
        let actor = Actor::new("someone", role);
        capability::require(&actor, Operation::ViewAudits).unwrap();
        capability::require(&actor, Operation::ViewCertificates).unwrap();
    }
}

// ── Assignment administration ────────────────────────────────────────────

#[test]
fn reassignment_supersedes_and_keeps_history() {
    let (records, _) = seeded();
    let clock = Arc::new(FixedClock::at_ymd(2024, 3, 1));
    let admin = AssignmentAdmin::new(records.clone(), clock);
    let ops = Actor::new("boss", Role::OpsManager);

    admin.assign_coordinator("s1", "coord", &ops).unwrap();
    admin.assign_coordinator("s1", "coord", &ops).unwrap();

    let rows = records.assignments_for_pair("coord", "s1").unwrap();
    assert_eq!(rows.len(), 2, "history rows survive supersession");
    assert_eq!(rows.iter().filter(|a| a.is_active).count(), 1);
}

#[test]
fn deactivation_is_idempotent() {
    let (records, _) = seeded();
    let clock = Arc::new(FixedClock::at_ymd(2024, 3, 1));
    let admin = AssignmentAdmin::new(records.clone(), clock);
    let ops = Actor::new("boss", Role::OpsManager);

    admin.assign_coordinator("s1", "coord", &ops).unwrap();
    admin.deactivate_assignment("s1", "coord").unwrap();
    admin.deactivate_assignment("s1", "coord").unwrap();

    let rows = records.assignments_for_pair("coord", "s1").unwrap();
    assert!(rows.iter().all(|a| !a.is_active));
}

#[test]
fn assigning_to_a_missing_store_is_not_found() {
    let (records, _) = seeded();
    let clock = Arc::new(FixedClock::at_ymd(2024, 3, 1));
    let admin = AssignmentAdmin::new(records, clock);
    let ops = Actor::new("boss", Role::OpsManager);

    let err = admin.assign_coordinator("ghost", "coord", &ops).unwrap_err();
    assert!(matches!(err, ComplianceError::NotFound { .. }));
}

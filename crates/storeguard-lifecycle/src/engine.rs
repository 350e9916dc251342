use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use storeguard_core::errors::{ComplianceError, ComplianceResult, RecordStoreError};
use storeguard_core::models::{Actor, Role};
use storeguard_core::records::{Audit, AuditItem, AuditPhoto, AuditStatus};
use storeguard_core::traits::{Clock, RecordStore};
use storeguard_scoring::ScoringEngine;

use crate::requests::{AuditPatch, ItemPatch, NewAudit, NewAuditItem, SubmitOutcome};

const REQUIRES_DRAFT: &str = "DRAFT";
const REQUIRES_IN_PROGRESS: &str = "IN_PROGRESS";
const REQUIRES_SUBMITTED: &str = "SUBMITTED";
const REQUIRES_MUTABLE: &str = "DRAFT or IN_PROGRESS";
const REQUIRES_NOT_APPROVED: &str = "DRAFT, IN_PROGRESS or SUBMITTED";

/// The audit state machine.
///
/// Reads and writes audits through the record-store port; every
/// transition commits with an optimistic version check so that two
/// concurrent transitions on the same audit cannot both succeed.
pub struct AuditLifecycle {
    records: Arc<dyn RecordStore>,
    scoring: ScoringEngine,
    clock: Arc<dyn Clock>,
}

impl AuditLifecycle {
    pub fn new(
        records: Arc<dyn RecordStore>,
        scoring: ScoringEngine,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            records,
            scoring,
            clock,
        }
    }

    /// Create a new audit in DRAFT for an existing store.
    ///
    /// Role gating (ops manager / coordinator) is the caller's concern;
    /// this component only requires the target store to exist.
    pub fn create(&self, request: NewAudit, actor: &Actor) -> ComplianceResult<Audit> {
        if self.records.get_store(&request.store_id)?.is_none() {
            return Err(ComplianceError::not_found("store", request.store_id.as_str()));
        }

        let now = self.clock.now();
        let audit = Audit {
            id: Uuid::new_v4().to_string(),
            store_id: request.store_id,
            assigned_to_id: request.assigned_to_id,
            created_by_id: actor.id.clone(),
            approved_by_id: None,
            status: AuditStatus::Draft,
            title: request.title,
            scheduled_date: request.scheduled_date,
            completed_date: None,
            compliance_score: None,
            rejection_reason: None,
            notes: request.notes,
            version: 0,
            created_at: now,
            updated_at: now,
        };
        self.records.insert_audit(&audit)?;
        info!(audit_id = %audit.id, store_id = %audit.store_id, "audit created");
        Ok(audit)
    }

    /// Fetch one audit or fail with NotFound.
    pub fn get(&self, id: &str) -> ComplianceResult<Audit> {
        self.records
            .get_audit(id)?
            .ok_or_else(|| ComplianceError::not_found("audit", id))
    }

    /// Apply a field patch to a non-approved audit.
    ///
    /// Coordinators may only touch audits assigned to them; an approved
    /// audit rejects every modification.
    pub fn update(&self, id: &str, patch: AuditPatch, actor: &Actor) -> ComplianceResult<Audit> {
        let mut audit = self.get(id)?;

        if audit.is_terminal() {
            return Err(ComplianceError::InvalidState {
                current: audit.status,
                required: REQUIRES_NOT_APPROVED,
            });
        }
        if actor.role == Role::PropertyCoordinator
            && audit.assigned_to_id.as_deref() != Some(actor.id.as_str())
        {
            return Err(ComplianceError::forbidden(
                "you can only update audits assigned to you",
            ));
        }

        let expected = audit.version;
        if let Some(assigned_to) = patch.assigned_to_id {
            audit.assigned_to_id = Some(assigned_to);
        }
        if let Some(title) = patch.title {
            audit.title = Some(title);
        }
        if let Some(date) = patch.scheduled_date {
            audit.scheduled_date = Some(date);
        }
        if let Some(notes) = patch.notes {
            audit.notes = Some(notes);
        }
        audit.updated_at = self.clock.now();

        self.commit(audit, expected, REQUIRES_NOT_APPROVED, |s| {
            s != AuditStatus::Approved
        })
    }

    /// DRAFT → IN_PROGRESS. Only the assigned coordinator may start.
    pub fn start(&self, id: &str, actor: &Actor) -> ComplianceResult<Audit> {
        let mut audit = self.get(id)?;

        require_status(&audit, AuditStatus::Draft, REQUIRES_DRAFT)?;
        require_assignee(&audit, actor, "you can only start audits assigned to you")?;

        let expected = audit.version;
        audit.status = AuditStatus::InProgress;
        audit.updated_at = self.clock.now();

        let audit = self.commit(audit, expected, REQUIRES_DRAFT, |s| s == AuditStatus::Draft)?;
        info!(audit_id = %audit.id, "audit started");
        Ok(audit)
    }

    /// IN_PROGRESS → SUBMITTED. Scores the checklist, stamps the
    /// completion time, and commits all of it atomically, then triggers
    /// the store rolling-score recompute as a best-effort follow-up.
    pub fn submit(&self, id: &str, actor: &Actor) -> ComplianceResult<SubmitOutcome> {
        let mut audit = self.get(id)?;

        require_status(&audit, AuditStatus::InProgress, REQUIRES_IN_PROGRESS)?;
        require_assignee(
            &audit,
            actor,
            "only the assigned coordinator can submit this audit",
        )?;

        let score = self.scoring.score_audit(id)?;

        let expected = audit.version;
        audit.status = AuditStatus::Submitted;
        audit.compliance_score = Some(score);
        audit.completed_date = Some(self.clock.now());
        audit.updated_at = self.clock.now();

        let audit = self.commit(audit, expected, REQUIRES_IN_PROGRESS, |s| {
            s == AuditStatus::InProgress
        })?;
        info!(audit_id = %audit.id, score, "audit submitted");

        // Follow-up effect: the transition stands even if this fails.
        let mut outcome = SubmitOutcome {
            store_score: None,
            store_score_error: None,
            audit,
        };
        match self.scoring.recompute_store_score(&outcome.audit.store_id) {
            Ok(written) => outcome.store_score = written,
            Err(e) => {
                error!(
                    audit_id = %outcome.audit.id,
                    store_id = %outcome.audit.store_id,
                    error = %e,
                    "store score recompute failed after submit"
                );
                outcome.store_score_error = Some(e.to_string());
            }
        }
        Ok(outcome)
    }

    /// SUBMITTED → APPROVED. Any authorized approver; no ownership check.
    /// Terminal: the audit accepts no further modification.
    pub fn approve(&self, id: &str, actor: &Actor) -> ComplianceResult<Audit> {
        let mut audit = self.get(id)?;

        require_status(&audit, AuditStatus::Submitted, REQUIRES_SUBMITTED)?;

        let expected = audit.version;
        audit.status = AuditStatus::Approved;
        audit.approved_by_id = Some(actor.id.clone());
        audit.updated_at = self.clock.now();

        let audit = self.commit(audit, expected, REQUIRES_SUBMITTED, |s| {
            s == AuditStatus::Submitted
        })?;
        info!(audit_id = %audit.id, approved_by = %actor.id, "audit approved");

        // Only approved audits feed the rolling aggregate, so refresh it now.
        if let Err(e) = self.scoring.recompute_store_score(&audit.store_id) {
            error!(
                audit_id = %audit.id,
                store_id = %audit.store_id,
                error = %e,
                "store score recompute failed after approval"
            );
        }
        Ok(audit)
    }

    /// SUBMITTED → IN_PROGRESS with a recorded reason.
    ///
    /// There is no dedicated rejected status: the audit goes back to the
    /// coordinator for rework, and the score fields are cleared until the
    /// next submission.
    pub fn reject(&self, id: &str, reason: &str, actor: &Actor) -> ComplianceResult<Audit> {
        let mut audit = self.get(id)?;

        require_status(&audit, AuditStatus::Submitted, REQUIRES_SUBMITTED)?;

        let expected = audit.version;
        audit.status = AuditStatus::InProgress;
        audit.rejection_reason = Some(reason.to_string());
        audit.compliance_score = None;
        audit.completed_date = None;
        audit.updated_at = self.clock.now();

        let audit = self.commit(audit, expected, REQUIRES_SUBMITTED, |s| {
            s == AuditStatus::Submitted
        })?;
        warn!(audit_id = %audit.id, rejected_by = %actor.id, reason, "audit rejected");
        Ok(audit)
    }

    /// Bulk-add checklist items. Sort order follows batch position.
    pub fn add_items(
        &self,
        audit_id: &str,
        items: Vec<NewAuditItem>,
        _actor: &Actor,
    ) -> ComplianceResult<Vec<AuditItem>> {
        let audit = self.get(audit_id)?;

        if !audit.items_mutable() {
            return Err(ComplianceError::InvalidState {
                current: audit.status,
                required: REQUIRES_MUTABLE,
            });
        }

        let now = self.clock.now();
        let records: Vec<AuditItem> = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| AuditItem {
                id: Uuid::new_v4().to_string(),
                audit_id: audit_id.to_string(),
                category: item.category,
                question: item.question,
                result: item.result,
                weight: item.weight,
                notes: item.notes,
                sort_order: index as i32,
                created_at: now,
                updated_at: now,
            })
            .collect();

        self.records.insert_items(&records)?;
        Ok(records)
    }

    /// Patch one checklist item while the audit is still mutable.
    pub fn update_item(
        &self,
        audit_id: &str,
        item_id: &str,
        patch: ItemPatch,
        _actor: &Actor,
    ) -> ComplianceResult<AuditItem> {
        let audit = self.get(audit_id)?;

        if !audit.items_mutable() {
            return Err(ComplianceError::InvalidState {
                current: audit.status,
                required: REQUIRES_MUTABLE,
            });
        }

        let mut item = self
            .records
            .get_item(item_id)?
            .filter(|i| i.audit_id == audit_id)
            .ok_or_else(|| ComplianceError::not_found("audit item", item_id))?;

        if let Some(category) = patch.category {
            item.category = category;
        }
        if let Some(question) = patch.question {
            item.question = question;
        }
        if let Some(result) = patch.result {
            item.result = result;
        }
        if let Some(weight) = patch.weight {
            item.weight = weight;
        }
        if let Some(notes) = patch.notes {
            item.notes = Some(notes);
        }
        item.updated_at = self.clock.now();

        self.records.update_item(&item)?;
        Ok(item)
    }

    /// Attach a photo to an existing audit.
    pub fn attach_photo(
        &self,
        audit_id: &str,
        audit_item_id: Option<String>,
        caption: Option<String>,
        actor: &Actor,
    ) -> ComplianceResult<AuditPhoto> {
        self.get(audit_id)?;
        let photo = AuditPhoto {
            id: Uuid::new_v4().to_string(),
            audit_id: audit_id.to_string(),
            audit_item_id,
            uploaded_by_id: actor.id.clone(),
            caption,
            created_at: self.clock.now(),
        };
        self.records.insert_photo(&photo)?;
        Ok(photo)
    }

    /// Photos of an existing audit.
    pub fn photos(&self, audit_id: &str) -> ComplianceResult<Vec<AuditPhoto>> {
        self.get(audit_id)?;
        self.records.photos_for_audit(audit_id)
    }

    /// Version-checked write. On a conflict the audit is re-read: if its
    /// status no longer satisfies the precondition the caller gets an
    /// InvalidState naming the real current status; otherwise the
    /// conflict itself is propagated so the caller may retry.
    fn commit(
        &self,
        audit: Audit,
        expected_version: u64,
        required: &'static str,
        still_legal: impl Fn(AuditStatus) -> bool,
    ) -> ComplianceResult<Audit> {
        match self.records.update_audit(&audit, expected_version) {
            Ok(stored) => Ok(stored),
            Err(ComplianceError::Storage(RecordStoreError::VersionConflict { .. })) => {
                let current = self.get(&audit.id)?;
                if still_legal(current.status) {
                    Err(ComplianceError::Storage(RecordStoreError::VersionConflict {
                        audit_id: audit.id,
                        expected: expected_version,
                        found: current.version,
                    }))
                } else {
                    Err(ComplianceError::InvalidState {
                        current: current.status,
                        required,
                    })
                }
            }
            Err(e) => Err(e),
        }
    }
}

fn require_status(
    audit: &Audit,
    expected: AuditStatus,
    required: &'static str,
) -> ComplianceResult<()> {
    if audit.status != expected {
        return Err(ComplianceError::InvalidState {
            current: audit.status,
            required,
        });
    }
    Ok(())
}

fn require_assignee(audit: &Audit, actor: &Actor, reason: &str) -> ComplianceResult<()> {
    if audit.assigned_to_id.as_deref() != Some(actor.id.as_str()) {
        return Err(ComplianceError::forbidden(reason));
    }
    Ok(())
}

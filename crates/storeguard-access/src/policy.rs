use std::sync::Arc;

use storeguard_core::errors::{ComplianceError, ComplianceResult};
use storeguard_core::models::{Actor, Role};
use storeguard_core::records::{Audit, Certificate};
use storeguard_core::traits::RecordStore;

/// Visibility scope over audits for one actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditScope {
    /// Unrestricted (ops manager, exec).
    All,
    /// Only audits assigned to this user (coordinator).
    AssignedTo(String),
    /// Only audits of this store (store role).
    Store(String),
}

/// The read-scoping predicate consumed by every list operation.
///
/// Mutation-side ownership checks live inside the lifecycle engine;
/// this component decides what an actor may see at all.
pub struct AccessScopePolicy {
    records: Arc<dyn RecordStore>,
}

impl AccessScopePolicy {
    pub fn new(records: Arc<dyn RecordStore>) -> Self {
        Self { records }
    }

    /// Resolve the audit visibility scope for an actor.
    pub fn audit_scope(&self, actor: &Actor) -> ComplianceResult<AuditScope> {
        match actor.role {
            Role::OpsManager | Role::Exec => Ok(AuditScope::All),
            Role::PropertyCoordinator => Ok(AuditScope::AssignedTo(actor.id.clone())),
            Role::Store => Ok(AuditScope::Store(self.single_active_store(actor)?)),
        }
    }

    /// Store ids visible to the actor. None means unrestricted.
    pub fn visible_store_ids(&self, actor: &Actor) -> ComplianceResult<Option<Vec<String>>> {
        match actor.role {
            Role::OpsManager | Role::Exec => Ok(None),
            Role::PropertyCoordinator => {
                let assignments = self.records.active_assignments_for_user(&actor.id)?;
                Ok(Some(assignments.into_iter().map(|a| a.store_id).collect()))
            }
            Role::Store => Ok(Some(vec![self.single_active_store(actor)?])),
        }
    }

    /// Gate access to one store's certificates.
    pub fn certificate_access(&self, actor: &Actor, store_id: &str) -> ComplianceResult<()> {
        match actor.role {
            Role::OpsManager | Role::Exec => Ok(()),
            Role::PropertyCoordinator | Role::Store => {
                let pair = self.records.assignments_for_pair(&actor.id, store_id)?;
                if pair.iter().any(|a| a.is_active) {
                    Ok(())
                } else {
                    Err(ComplianceError::forbidden(
                        "access denied to this store's certificates",
                    ))
                }
            }
        }
    }

    /// Drop every audit outside the actor's scope, whatever filters the
    /// caller supplied upstream.
    pub fn filter_audits(&self, actor: &Actor, audits: Vec<Audit>) -> ComplianceResult<Vec<Audit>> {
        let scope = self.audit_scope(actor)?;
        Ok(audits
            .into_iter()
            .filter(|audit| match &scope {
                AuditScope::All => true,
                AuditScope::AssignedTo(user_id) => {
                    audit.assigned_to_id.as_deref() == Some(user_id.as_str())
                }
                AuditScope::Store(store_id) => audit.store_id == *store_id,
            })
            .collect())
    }

    /// Drop every certificate belonging to a store the actor cannot see.
    pub fn filter_certificates(
        &self,
        actor: &Actor,
        certificates: Vec<Certificate>,
    ) -> ComplianceResult<Vec<Certificate>> {
        match self.visible_store_ids(actor)? {
            None => Ok(certificates),
            Some(store_ids) => Ok(certificates
                .into_iter()
                .filter(|c| store_ids.contains(&c.store_id))
                .collect()),
        }
    }

    /// A STORE actor must resolve exactly one active assignment.
    fn single_active_store(&self, actor: &Actor) -> ComplianceResult<String> {
        let mut assignments = self.records.active_assignments_for_user(&actor.id)?;
        match assignments.len() {
            0 => Err(ComplianceError::forbidden("no store assignment found")),
            1 => Ok(assignments.remove(0).store_id),
            _ => Err(ComplianceError::forbidden(
                "multiple active store assignments",
            )),
        }
    }
}

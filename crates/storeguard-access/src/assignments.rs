use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use storeguard_core::errors::{ComplianceError, ComplianceResult};
use storeguard_core::models::Actor;
use storeguard_core::records::StoreAssignment;
use storeguard_core::traits::{Clock, RecordStore};

/// Administration of coordinator/store links.
///
/// Assignments are soft-deactivated, never deleted, so the history of
/// who was assigned where survives supersession.
pub struct AssignmentAdmin {
    records: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
}

impl AssignmentAdmin {
    pub fn new(records: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        Self { records, clock }
    }

    /// Assign a user to a store, superseding any prior assignment for
    /// the pair. Keeps at most one active row per (user, store).
    pub fn assign_coordinator(
        &self,
        store_id: &str,
        user_id: &str,
        actor: &Actor,
    ) -> ComplianceResult<StoreAssignment> {
        if self.records.get_store(store_id)?.is_none() {
            return Err(ComplianceError::not_found("store", store_id));
        }

        self.deactivate_assignment(store_id, user_id)?;

        let assignment = StoreAssignment {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            store_id: store_id.to_string(),
            is_active: true,
            assigned_by_id: Some(actor.id.clone()),
            assigned_at: self.clock.now(),
        };
        self.records.insert_assignment(&assignment)?;
        info!(store_id, user_id, assigned_by = %actor.id, "coordinator assigned");
        Ok(assignment)
    }

    /// Deactivate every active row for the pair. Idempotent.
    pub fn deactivate_assignment(&self, store_id: &str, user_id: &str) -> ComplianceResult<()> {
        for mut assignment in self.records.assignments_for_pair(user_id, store_id)? {
            if assignment.is_active {
                assignment.is_active = false;
                self.records.update_assignment(&assignment)?;
            }
        }
        Ok(())
    }
}

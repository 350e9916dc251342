use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Link between a coordinator/store user and a store.
///
/// Assignments are soft-deactivated, never deleted, so the full history
/// survives. At most one active row per (user, store) pair is meaningful
/// for access scoping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreAssignment {
    pub id: String,
    pub user_id: String,
    pub store_id: String,
    pub is_active: bool,
    /// Actor that created the assignment.
    pub assigned_by_id: Option<String>,
    pub assigned_at: DateTime<Utc>,
}

impl PartialEq for StoreAssignment {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::weight::ItemWeight;

/// Outcome of one checklist question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemResult {
    Pass,
    Fail,
    #[default]
    NotApplicable,
}

impl ItemResult {
    /// Items marked not-applicable contribute to neither side of the score.
    pub fn is_applicable(self) -> bool {
        self != Self::NotApplicable
    }
}

/// One checklist question inside an audit.
///
/// Frozen once the owning audit leaves DRAFT/IN_PROGRESS.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditItem {
    pub id: String,
    pub audit_id: String,
    pub category: String,
    pub question: String,
    pub result: ItemResult,
    pub weight: ItemWeight,
    pub notes: Option<String>,
    /// Assigned by insertion order on bulk adds.
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PartialEq for AuditItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

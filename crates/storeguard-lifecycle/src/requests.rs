use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use storeguard_core::records::{Audit, ItemResult, ItemWeight};

/// Input for creating a new audit in DRAFT.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewAudit {
    pub store_id: String,
    pub assigned_to_id: Option<String>,
    pub title: Option<String>,
    pub scheduled_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Partial update applied to a non-approved audit. Absent fields are
/// left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditPatch {
    pub assigned_to_id: Option<String>,
    pub title: Option<String>,
    pub scheduled_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Input for one checklist item in a bulk add. Sort order is assigned
/// by position in the batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewAuditItem {
    pub category: String,
    pub question: String,
    #[serde(default)]
    pub result: ItemResult,
    #[serde(default)]
    pub weight: ItemWeight,
    pub notes: Option<String>,
}

/// Partial update applied to a checklist item while its audit is still
/// mutable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemPatch {
    pub category: Option<String>,
    pub question: Option<String>,
    pub result: Option<ItemResult>,
    pub weight: Option<ItemWeight>,
    pub notes: Option<String>,
}

/// Result of a submit transition.
///
/// The transition itself is atomic; the follow-up store-score recompute
/// is best-effort, and its failure is carried here instead of rolling
/// anything back.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub audit: Audit,
    /// Store aggregate written by the follow-up recompute, if any.
    pub store_score: Option<f64>,
    /// Failure message from the follow-up recompute, if it failed.
    pub store_score_error: Option<String>,
}

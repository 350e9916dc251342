use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an audit.
///
/// Rejection returns a SUBMITTED audit to IN_PROGRESS with a recorded
/// reason; there is no dedicated rejected status. APPROVED is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditStatus {
    Draft,
    InProgress,
    Submitted,
    Approved,
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Draft => "DRAFT",
            Self::InProgress => "IN_PROGRESS",
            Self::Submitted => "SUBMITTED",
            Self::Approved => "APPROVED",
        };
        f.write_str(s)
    }
}

/// One compliance audit engagement for one store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Audit {
    /// UUID v4 identifier.
    pub id: String,
    /// Store under audit.
    pub store_id: String,
    /// Coordinator conducting the audit, if assigned.
    pub assigned_to_id: Option<String>,
    /// Actor that created the audit.
    pub created_by_id: String,
    /// Actor that approved the audit. Set on approval only.
    pub approved_by_id: Option<String>,
    pub status: AuditStatus,
    pub title: Option<String>,
    pub scheduled_date: Option<NaiveDate>,
    /// Set when the audit is submitted, together with the score.
    pub completed_date: Option<DateTime<Utc>>,
    /// Weighted compliance score, 0-100. Non-null iff SUBMITTED or APPROVED.
    pub compliance_score: Option<f64>,
    /// Reason recorded on the most recent rejection.
    pub rejection_reason: Option<String>,
    pub notes: Option<String>,
    /// Optimistic-concurrency version, bumped on every committed write.
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Audit {
    /// Whether the audit has reached its terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status == AuditStatus::Approved
    }

    /// Checklist items are mutable only while DRAFT or IN_PROGRESS.
    pub fn items_mutable(&self) -> bool {
        matches!(self.status, AuditStatus::Draft | AuditStatus::InProgress)
    }
}

/// Identity equality: two audits are equal if they have the same ID.
impl PartialEq for Audit {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

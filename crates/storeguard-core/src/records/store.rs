use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A retail store, the target of audits and certificates.
///
/// `compliance_score` is a rolling aggregate over the store's most recent
/// approved audits. The scoring engine is its only writer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    pub id: String,
    pub name: String,
    pub store_code: Option<String>,
    pub compliance_score: Option<f64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PartialEq for Store {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

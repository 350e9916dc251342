use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A photo attached to an audit, optionally pinned to one checklist item.
/// Not scored; file storage mechanics live behind an external boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditPhoto {
    pub id: String,
    pub audit_id: String,
    pub audit_item_id: Option<String>,
    pub uploaded_by_id: String,
    pub caption: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PartialEq for AuditPhoto {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

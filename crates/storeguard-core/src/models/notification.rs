use serde::{Deserialize, Serialize};

/// Notification categories emitted by the expiry sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    CertificateExpiryCritical,
    CertificateExpiryWarning,
    CertificateExpired,
}

/// One notification handed to the external sink. Fire-and-record; no
/// response is processed beyond success/failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub store_id: String,
    pub user_id: Option<String>,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// Structured payload, e.g. certificate id and days until expiry.
    pub data: serde_json::Value,
}

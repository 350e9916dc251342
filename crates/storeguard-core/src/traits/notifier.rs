use crate::errors::ComplianceResult;
use crate::models::NotificationRequest;

/// External notification delivery.
///
/// The sweep builds whole buckets in memory and hands each bucket over
/// in a single `create_bulk` call, so a sink failure costs at most one
/// bucket.
pub trait NotificationSink: Send + Sync {
    fn create(&self, request: &NotificationRequest) -> ComplianceResult<()>;
    fn create_bulk(&self, requests: &[NotificationRequest]) -> ComplianceResult<()>;
}

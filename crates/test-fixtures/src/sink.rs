use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use storeguard_core::errors::{ComplianceError, ComplianceResult, RecordStoreError};
use storeguard_core::models::{NotificationKind, NotificationRequest};
use storeguard_core::traits::NotificationSink;

/// A sink that records everything it is handed.
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<NotificationRequest>>,
    /// When set, bulk delivery fails.
    pub fail_bulk: AtomicBool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<NotificationRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_of_kind(&self, kind: NotificationKind) -> Vec<NotificationRequest> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.kind == kind)
            .cloned()
            .collect()
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl NotificationSink for RecordingSink {
    fn create(&self, request: &NotificationRequest) -> ComplianceResult<()> {
        self.sent.lock().unwrap().push(request.clone());
        Ok(())
    }

    fn create_bulk(&self, requests: &[NotificationRequest]) -> ComplianceResult<()> {
        if self.fail_bulk.load(Ordering::SeqCst) {
            return Err(ComplianceError::Storage(RecordStoreError::Backend {
                message: "injected failure: notification sink down".to_string(),
            }));
        }
        self.sent.lock().unwrap().extend_from_slice(requests);
        Ok(())
    }
}

use std::sync::atomic::{AtomicBool, Ordering};

use dashmap::DashMap;

use storeguard_core::errors::{ComplianceError, ComplianceResult, RecordStoreError};
use storeguard_core::records::{
    Audit, AuditItem, AuditPhoto, AuditStatus, Certificate, Store, StoreAssignment,
};
use storeguard_core::traits::RecordStore;

/// Thread-safe in-memory record store.
///
/// Audit writes are version-checked like a real backend: a stale
/// `expected_version` fails with a version conflict and changes nothing.
#[derive(Default)]
pub struct InMemoryRecords {
    audits: DashMap<String, Audit>,
    items: DashMap<String, AuditItem>,
    photos: DashMap<String, AuditPhoto>,
    certificates: DashMap<String, Certificate>,
    stores: DashMap<String, Store>,
    assignments: DashMap<String, StoreAssignment>,
    /// When set, certificate writes fail with a backend error.
    pub fail_certificate_updates: AtomicBool,
    /// When set, store-score writes fail with a backend error.
    pub fail_store_score_writes: AtomicBool,
}

impl InMemoryRecords {
    pub fn new() -> Self {
        Self::default()
    }

    fn backend_error(context: &str) -> ComplianceError {
        ComplianceError::Storage(RecordStoreError::Backend {
            message: format!("injected failure: {context}"),
        })
    }
}

impl RecordStore for InMemoryRecords {
    // --- Audits ---

    fn insert_audit(&self, audit: &Audit) -> ComplianceResult<()> {
        self.audits.insert(audit.id.clone(), audit.clone());
        Ok(())
    }

    fn get_audit(&self, id: &str) -> ComplianceResult<Option<Audit>> {
        Ok(self.audits.get(id).map(|r| r.value().clone()))
    }

    fn update_audit(&self, audit: &Audit, expected_version: u64) -> ComplianceResult<Audit> {
        let mut entry = self.audits.get_mut(&audit.id).ok_or_else(|| {
            ComplianceError::Storage(RecordStoreError::Backend {
                message: format!("audit {} not stored", audit.id),
            })
        })?;
        if entry.version != expected_version {
            return Err(ComplianceError::Storage(RecordStoreError::VersionConflict {
                audit_id: audit.id.clone(),
                expected: expected_version,
                found: entry.version,
            }));
        }
        let mut stored = audit.clone();
        stored.version = expected_version + 1;
        *entry = stored.clone();
        Ok(stored)
    }

    fn audits_for_store(
        &self,
        store_id: &str,
        status: Option<AuditStatus>,
    ) -> ComplianceResult<Vec<Audit>> {
        Ok(self
            .audits
            .iter()
            .filter(|r| r.store_id == store_id && status.map_or(true, |s| r.status == s))
            .map(|r| r.value().clone())
            .collect())
    }

    fn list_audits(&self) -> ComplianceResult<Vec<Audit>> {
        Ok(self.audits.iter().map(|r| r.value().clone()).collect())
    }

    // --- Audit items ---

    fn insert_items(&self, items: &[AuditItem]) -> ComplianceResult<()> {
        for item in items {
            self.items.insert(item.id.clone(), item.clone());
        }
        Ok(())
    }

    fn get_item(&self, id: &str) -> ComplianceResult<Option<AuditItem>> {
        Ok(self.items.get(id).map(|r| r.value().clone()))
    }

    fn update_item(&self, item: &AuditItem) -> ComplianceResult<()> {
        self.items.insert(item.id.clone(), item.clone());
        Ok(())
    }

    fn items_for_audit(&self, audit_id: &str) -> ComplianceResult<Vec<AuditItem>> {
        let mut items: Vec<AuditItem> = self
            .items
            .iter()
            .filter(|r| r.audit_id == audit_id)
            .map(|r| r.value().clone())
            .collect();
        items.sort_by_key(|i| i.sort_order);
        Ok(items)
    }

    // --- Audit photos ---

    fn insert_photo(&self, photo: &AuditPhoto) -> ComplianceResult<()> {
        self.photos.insert(photo.id.clone(), photo.clone());
        Ok(())
    }

    fn photos_for_audit(&self, audit_id: &str) -> ComplianceResult<Vec<AuditPhoto>> {
        Ok(self
            .photos
            .iter()
            .filter(|r| r.audit_id == audit_id)
            .map(|r| r.value().clone())
            .collect())
    }

    // --- Certificates ---

    fn insert_certificate(&self, cert: &Certificate) -> ComplianceResult<()> {
        self.certificates.insert(cert.id.clone(), cert.clone());
        Ok(())
    }

    fn get_certificate(&self, id: &str) -> ComplianceResult<Option<Certificate>> {
        Ok(self.certificates.get(id).map(|r| r.value().clone()))
    }

    fn update_certificate(&self, cert: &Certificate) -> ComplianceResult<()> {
        if self.fail_certificate_updates.load(Ordering::SeqCst) {
            return Err(Self::backend_error("certificate update"));
        }
        self.certificates.insert(cert.id.clone(), cert.clone());
        Ok(())
    }

    fn active_certificates(&self) -> ComplianceResult<Vec<Certificate>> {
        Ok(self
            .certificates
            .iter()
            .filter(|r| r.is_active)
            .map(|r| r.value().clone())
            .collect())
    }

    fn certificates_for_store(&self, store_id: &str) -> ComplianceResult<Vec<Certificate>> {
        Ok(self
            .certificates
            .iter()
            .filter(|r| r.store_id == store_id)
            .map(|r| r.value().clone())
            .collect())
    }

    // --- Stores ---

    fn insert_store(&self, store: &Store) -> ComplianceResult<()> {
        self.stores.insert(store.id.clone(), store.clone());
        Ok(())
    }

    fn get_store(&self, id: &str) -> ComplianceResult<Option<Store>> {
        Ok(self.stores.get(id).map(|r| r.value().clone()))
    }

    fn set_store_score(&self, store_id: &str, score: f64) -> ComplianceResult<()> {
        if self.fail_store_score_writes.load(Ordering::SeqCst) {
            return Err(Self::backend_error("store score write"));
        }
        let mut store = self.stores.get_mut(store_id).ok_or_else(|| {
            ComplianceError::Storage(RecordStoreError::Backend {
                message: format!("store {store_id} not stored"),
            })
        })?;
        store.compliance_score = Some(score);
        Ok(())
    }

    // --- Store assignments ---

    fn insert_assignment(&self, assignment: &StoreAssignment) -> ComplianceResult<()> {
        self.assignments
            .insert(assignment.id.clone(), assignment.clone());
        Ok(())
    }

    fn update_assignment(&self, assignment: &StoreAssignment) -> ComplianceResult<()> {
        self.assignments
            .insert(assignment.id.clone(), assignment.clone());
        Ok(())
    }

    fn active_assignments_for_user(&self, user_id: &str) -> ComplianceResult<Vec<StoreAssignment>> {
        Ok(self
            .assignments
            .iter()
            .filter(|r| r.user_id == user_id && r.is_active)
            .map(|r| r.value().clone())
            .collect())
    }

    fn assignments_for_pair(
        &self,
        user_id: &str,
        store_id: &str,
    ) -> ComplianceResult<Vec<StoreAssignment>> {
        Ok(self
            .assignments
            .iter()
            .filter(|r| r.user_id == user_id && r.store_id == store_id)
            .map(|r| r.value().clone())
            .collect())
    }
}

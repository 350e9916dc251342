use crate::errors::ComplianceResult;
use crate::records::{
    Audit, AuditItem, AuditPhoto, AuditStatus, Certificate, Store, StoreAssignment,
};

/// CRUD + filtered-query access to the five record kinds, plus the
/// version-checked audit write that makes lifecycle transitions atomic.
pub trait RecordStore: Send + Sync {
    // --- Audits ---
    fn insert_audit(&self, audit: &Audit) -> ComplianceResult<()>;
    fn get_audit(&self, id: &str) -> ComplianceResult<Option<Audit>>;
    /// Commit an audit write only if the stored version still equals
    /// `expected_version`; bumps the version on success. A stale write
    /// fails with a version-conflict storage error and changes nothing.
    fn update_audit(&self, audit: &Audit, expected_version: u64) -> ComplianceResult<Audit>;
    fn audits_for_store(
        &self,
        store_id: &str,
        status: Option<AuditStatus>,
    ) -> ComplianceResult<Vec<Audit>>;
    fn list_audits(&self) -> ComplianceResult<Vec<Audit>>;

    // --- Audit items ---
    fn insert_items(&self, items: &[AuditItem]) -> ComplianceResult<()>;
    fn get_item(&self, id: &str) -> ComplianceResult<Option<AuditItem>>;
    fn update_item(&self, item: &AuditItem) -> ComplianceResult<()>;
    fn items_for_audit(&self, audit_id: &str) -> ComplianceResult<Vec<AuditItem>>;

    // --- Audit photos ---
    fn insert_photo(&self, photo: &AuditPhoto) -> ComplianceResult<()>;
    fn photos_for_audit(&self, audit_id: &str) -> ComplianceResult<Vec<AuditPhoto>>;

    // --- Certificates ---
    fn insert_certificate(&self, cert: &Certificate) -> ComplianceResult<()>;
    fn get_certificate(&self, id: &str) -> ComplianceResult<Option<Certificate>>;
    fn update_certificate(&self, cert: &Certificate) -> ComplianceResult<()>;
    fn active_certificates(&self) -> ComplianceResult<Vec<Certificate>>;
    fn certificates_for_store(&self, store_id: &str) -> ComplianceResult<Vec<Certificate>>;

    // --- Stores ---
    fn insert_store(&self, store: &Store) -> ComplianceResult<()>;
    fn get_store(&self, id: &str) -> ComplianceResult<Option<Store>>;
    /// Write the rolling aggregate. The scoring engine is the only caller.
    fn set_store_score(&self, store_id: &str, score: f64) -> ComplianceResult<()>;

    // --- Store assignments ---
    fn insert_assignment(&self, assignment: &StoreAssignment) -> ComplianceResult<()>;
    fn update_assignment(&self, assignment: &StoreAssignment) -> ComplianceResult<()>;
    fn active_assignments_for_user(&self, user_id: &str) -> ComplianceResult<Vec<StoreAssignment>>;
    /// Every assignment row for the pair, active or not.
    fn assignments_for_pair(
        &self,
        user_id: &str,
        store_id: &str,
    ) -> ComplianceResult<Vec<StoreAssignment>>;
}

/// Record-store port errors.
#[derive(Debug, thiserror::Error)]
pub enum RecordStoreError {
    #[error("backend error: {message}")]
    Backend { message: String },

    #[error("version conflict on audit {audit_id}: expected {expected}, found {found}")]
    VersionConflict {
        audit_id: String,
        expected: u64,
        found: u64,
    },
}

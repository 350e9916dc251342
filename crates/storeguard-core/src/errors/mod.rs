//! Error taxonomy for the compliance engine.
//!
//! Four domain categories (`NotFound`, `Forbidden`, `InvalidState`,
//! `Configuration`) plus a transport variant wrapping record-store
//! failures. Lifecycle and scoring errors are reported synchronously to
//! the caller and never retried here.

mod store_error;

pub use store_error::RecordStoreError;

use crate::records::AuditStatus;

/// Result alias used across the workspace.
pub type ComplianceResult<T> = Result<T, ComplianceError>;

/// Top-level error for every engine operation.
#[derive(Debug, thiserror::Error)]
pub enum ComplianceError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("forbidden: {reason}")]
    Forbidden { reason: String },

    #[error("invalid state: audit is {current}, operation requires {required}")]
    InvalidState {
        current: AuditStatus,
        required: &'static str,
    },

    #[error("configuration error: {reason}")]
    Configuration { reason: String },

    #[error(transparent)]
    Storage(#[from] RecordStoreError),
}

impl ComplianceError {
    /// Shorthand for a missing record of the given kind.
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Shorthand for an ownership or role violation.
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }
}

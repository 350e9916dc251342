//! Audit lifecycle state machine.
//!
//! `DRAFT → IN_PROGRESS → SUBMITTED → APPROVED`, with a
//! `SUBMITTED → IN_PROGRESS` back-edge on rejection. Every operation
//! takes the acting identity and fails closed.

pub mod engine;
pub mod requests;

pub use engine::AuditLifecycle;
pub use requests::{AuditPatch, ItemPatch, NewAudit, NewAuditItem, SubmitOutcome};

//! # storeguard-core
//!
//! Foundation crate for the Storeguard compliance engine.
//! Defines all records, models, ports, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod records;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::ExpiryConfig;
pub use errors::{ComplianceError, ComplianceResult};
pub use models::{Actor, Role};
pub use records::{Audit, AuditItem, AuditStatus, Certificate, ItemResult, ItemWeight, Store};

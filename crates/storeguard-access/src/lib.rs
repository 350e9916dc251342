//! Access scoping for the compliance engine.
//!
//! `capability` answers "may this role perform this operation at all";
//! `policy` answers "which records may this actor see"; `assignments`
//! administers the coordinator/store links both rely on.

pub mod assignments;
pub mod capability;
pub mod policy;

pub use assignments::AssignmentAdmin;
pub use capability::Operation;
pub use policy::{AccessScopePolicy, AuditScope};

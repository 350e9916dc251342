pub mod assignment;
pub mod audit;
pub mod audit_item;
pub mod certificate;
pub mod photo;
pub mod store;
pub mod weight;

pub use assignment::StoreAssignment;
pub use audit::{Audit, AuditStatus};
pub use audit_item::{AuditItem, ItemResult};
pub use certificate::Certificate;
pub use photo::AuditPhoto;
pub use store::Store;
pub use weight::ItemWeight;

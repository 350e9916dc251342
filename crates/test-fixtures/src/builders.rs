//! Record builders with sane defaults. Each takes only the fields a
//! test usually varies; everything else is neutral.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use storeguard_core::records::{
    Audit, AuditItem, AuditStatus, Certificate, ItemResult, ItemWeight, Store, StoreAssignment,
};

/// A fixed, boring timestamp so records built without a clock agree.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

pub fn store(id: &str) -> Store {
    Store {
        id: id.to_string(),
        name: format!("Store {id}"),
        store_code: None,
        compliance_score: None,
        is_active: true,
        created_at: epoch(),
        updated_at: epoch(),
    }
}

pub fn audit(id: &str, store_id: &str, status: AuditStatus) -> Audit {
    Audit {
        id: id.to_string(),
        store_id: store_id.to_string(),
        assigned_to_id: None,
        created_by_id: "creator".to_string(),
        approved_by_id: None,
        status,
        title: None,
        scheduled_date: None,
        completed_date: None,
        compliance_score: None,
        rejection_reason: None,
        notes: None,
        version: 0,
        created_at: epoch(),
        updated_at: epoch(),
    }
}

pub fn item(audit_id: &str, result: ItemResult, weight: u8) -> AuditItem {
    AuditItem {
        id: Uuid::new_v4().to_string(),
        audit_id: audit_id.to_string(),
        category: "general".to_string(),
        question: "Is the requirement met?".to_string(),
        result,
        weight: ItemWeight::new(weight),
        notes: None,
        sort_order: 0,
        created_at: epoch(),
        updated_at: epoch(),
    }
}

pub fn certificate(id: &str, store_id: &str, expiry_date: NaiveDate) -> Certificate {
    Certificate {
        id: id.to_string(),
        store_id: store_id.to_string(),
        uploaded_by_id: "uploader".to_string(),
        name: format!("Certificate {id}"),
        kind: "fire-safety".to_string(),
        issued_date: None,
        expiry_date,
        days_until_expiry: None,
        is_expired: false,
        is_expiring_soon: false,
        is_active: true,
        created_at: epoch(),
        updated_at: epoch(),
    }
}

pub fn assignment(user_id: &str, store_id: &str, active: bool) -> StoreAssignment {
    StoreAssignment {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        store_id: store_id.to_string(),
        is_active: active,
        assigned_by_id: None,
        assigned_at: epoch(),
    }
}

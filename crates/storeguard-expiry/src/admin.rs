use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use storeguard_core::errors::{ComplianceError, ComplianceResult};
use storeguard_core::models::Actor;
use storeguard_core::records::Certificate;
use storeguard_core::traits::{Clock, RecordStore};

/// Input for registering a certificate against a store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewCertificate {
    pub store_id: String,
    pub name: String,
    pub kind: String,
    pub issued_date: Option<NaiveDate>,
    pub expiry_date: NaiveDate,
}

/// Certificate record administration.
///
/// The derived expiry fields are computed at every write, so a freshly
/// created certificate is classifiable before the next sweep runs.
pub struct CertificateAdmin {
    records: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
}

impl CertificateAdmin {
    pub fn new(records: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        Self { records, clock }
    }

    /// Register a certificate for an existing store.
    pub fn create(&self, request: NewCertificate, actor: &Actor) -> ComplianceResult<Certificate> {
        if self.records.get_store(&request.store_id)?.is_none() {
            return Err(ComplianceError::not_found("store", request.store_id.as_str()));
        }

        let now = self.clock.now();
        let mut cert = Certificate {
            id: Uuid::new_v4().to_string(),
            store_id: request.store_id,
            uploaded_by_id: actor.id.clone(),
            name: request.name,
            kind: request.kind,
            issued_date: request.issued_date,
            expiry_date: request.expiry_date,
            days_until_expiry: None,
            is_expired: false,
            is_expiring_soon: false,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        cert.refresh_expiry_status(now);

        self.records.insert_certificate(&cert)?;
        info!(certificate_id = %cert.id, store_id = %cert.store_id, "certificate registered");
        Ok(cert)
    }

    /// Soft-deactivate a certificate, hiding it from the sweep and from
    /// scoped listings.
    pub fn deactivate(&self, id: &str) -> ComplianceResult<()> {
        let mut cert = self
            .records
            .get_certificate(id)?
            .ok_or_else(|| ComplianceError::not_found("certificate", id))?;
        cert.is_active = false;
        cert.updated_at = self.clock.now();
        self.records.update_certificate(&cert)?;
        info!(certificate_id = id, "certificate deactivated");
        Ok(())
    }
}

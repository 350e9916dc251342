use std::collections::HashSet;
use std::sync::Arc;

use serde_json::json;
use tracing::{error, info, warn};

use storeguard_core::config::ExpiryConfig;
use storeguard_core::models::{
    NotificationKind, NotificationRequest, StepFailure, SweepReport, SweepStep,
};
use storeguard_core::records::Certificate;
use storeguard_core::traits::{Clock, ConfigSource, NotificationSink, RecordStore};

use crate::classify;
use crate::policy::{NotificationPolicy, NotifyEveryRun};

/// The certificate expiry sweep.
///
/// Directly callable; scheduling lives in [`crate::scheduler`]. Steps run
/// in a fixed order (refresh → critical → warning → expired) because the
/// warning bucket is defined as the set difference against the critical
/// one. Both thresholds are read once per sweep.
pub struct ExpirySweep {
    records: Arc<dyn RecordStore>,
    sink: Arc<dyn NotificationSink>,
    clock: Arc<dyn Clock>,
    config: Arc<dyn ConfigSource>,
    policy: Arc<dyn NotificationPolicy>,
}

impl ExpirySweep {
    pub fn new(
        records: Arc<dyn RecordStore>,
        sink: Arc<dyn NotificationSink>,
        clock: Arc<dyn Clock>,
        config: Arc<dyn ConfigSource>,
    ) -> Self {
        Self {
            records,
            sink,
            clock,
            config,
            policy: Arc::new(NotifyEveryRun),
        }
    }

    /// Replace the default every-run notification policy.
    pub fn with_policy(mut self, policy: Arc<dyn NotificationPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Execute one sweep. Never fails as a whole: each step records its
    /// own failures on the report and later steps still run.
    pub fn run(&self) -> SweepReport {
        info!("running certificate expiry sweep");
        let config = self.thresholds();
        let mut report = SweepReport::default();

        self.refresh_statuses(&mut report);
        let critical_ids = self.notify_critical(&config, &mut report);
        self.notify_warning(&config, &critical_ids, &mut report);
        self.notify_expired(&mut report);

        info!(
            refreshed = report.refreshed,
            notifications = report.notifications_sent(),
            failures = report.step_failures.len(),
            "certificate expiry sweep completed"
        );
        report
    }

    /// Run the status-refresh step alone, outside a full sweep.
    pub fn refresh_expiry_statuses(&self) -> SweepReport {
        let mut report = SweepReport::default();
        self.refresh_statuses(&mut report);
        report
    }

    /// Read both thresholds exactly once; fall back to the documented
    /// defaults when the source is unreadable.
    fn thresholds(&self) -> ExpiryConfig {
        match self.config.expiry_config() {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "expiry config unreadable, using defaults");
                ExpiryConfig::default()
            }
        }
    }

    /// Step 1: recompute derived expiry fields for every active
    /// certificate; persist only the changed ones.
    fn refresh_statuses(&self, report: &mut SweepReport) {
        let now = self.clock.now();
        let certificates = match self.records.active_certificates() {
            Ok(certs) => certs,
            Err(e) => {
                record_failure(report, SweepStep::Refresh, None, &e.to_string());
                return;
            }
        };

        for mut cert in certificates {
            if cert.refresh_expiry_status(now) {
                match self.records.update_certificate(&cert) {
                    Ok(()) => report.refreshed += 1,
                    Err(e) => record_failure(
                        report,
                        SweepStep::Refresh,
                        Some(cert.id.as_str()),
                        &e.to_string(),
                    ),
                }
            }
        }
        info!(refreshed = report.refreshed, "expiry statuses refreshed");
    }

    /// Step 2: certificates inside the critical window. Returns the ids
    /// counted as critical so the warning step can exclude them.
    fn notify_critical(&self, config: &ExpiryConfig, report: &mut SweepReport) -> HashSet<String> {
        let bucket = match self.fetch_bucket(SweepStep::Critical, report, |c| {
            classify::expiring_within(c, config.critical_days)
        }) {
            Some(certs) => certs,
            None => return HashSet::new(),
        };

        let ids: HashSet<String> = bucket.iter().map(|c| c.id.clone()).collect();
        let requests: Vec<NotificationRequest> = bucket
            .iter()
            .filter(|c| {
                self.policy
                    .should_notify(c, NotificationKind::CertificateExpiryCritical)
            })
            .map(critical_request)
            .collect();

        report.critical_sent = self.deliver(SweepStep::Critical, requests, report);
        ids
    }

    /// Step 3: certificates inside the warning window, minus the
    /// critical set.
    fn notify_warning(
        &self,
        config: &ExpiryConfig,
        critical_ids: &HashSet<String>,
        report: &mut SweepReport,
    ) {
        let bucket = match self.fetch_bucket(SweepStep::Warning, report, |c| {
            classify::expiring_within(c, config.warning_days) && !critical_ids.contains(&c.id)
        }) {
            Some(certs) => certs,
            None => return,
        };

        let requests: Vec<NotificationRequest> = bucket
            .iter()
            .filter(|c| {
                self.policy
                    .should_notify(c, NotificationKind::CertificateExpiryWarning)
            })
            .map(warning_request)
            .collect();

        report.warning_sent = self.deliver(SweepStep::Warning, requests, report);
    }

    /// Step 4: certificates already past expiry, re-notified every run.
    fn notify_expired(&self, report: &mut SweepReport) {
        let bucket = match self.fetch_bucket(SweepStep::Expired, report, classify::expired) {
            Some(certs) => certs,
            None => return,
        };

        let requests: Vec<NotificationRequest> = bucket
            .iter()
            .filter(|c| {
                self.policy
                    .should_notify(c, NotificationKind::CertificateExpired)
            })
            .map(expired_request)
            .collect();

        report.expired_sent = self.deliver(SweepStep::Expired, requests, report);
    }

    fn fetch_bucket(
        &self,
        step: SweepStep,
        report: &mut SweepReport,
        predicate: impl Fn(&Certificate) -> bool,
    ) -> Option<Vec<Certificate>> {
        match self.records.active_certificates() {
            Ok(certs) => Some(certs.into_iter().filter(|c| predicate(c)).collect()),
            Err(e) => {
                record_failure(report, step, None, &e.to_string());
                None
            }
        }
    }

    /// One bulk sink call per bucket, so a sink failure costs at most
    /// this bucket's notifications.
    fn deliver(
        &self,
        step: SweepStep,
        requests: Vec<NotificationRequest>,
        report: &mut SweepReport,
    ) -> usize {
        if requests.is_empty() {
            return 0;
        }
        match self.sink.create_bulk(&requests) {
            Ok(()) => {
                info!(step = %step, count = requests.len(), "expiry notifications sent");
                requests.len()
            }
            Err(e) => {
                record_failure(report, step, None, &e.to_string());
                0
            }
        }
    }
}

fn record_failure(report: &mut SweepReport, step: SweepStep, cert_id: Option<&str>, message: &str) {
    error!(step = %step, certificate_id = ?cert_id, message, "expiry sweep step failure");
    report.step_failures.push(StepFailure {
        step,
        certificate_id: cert_id.map(str::to_string),
        message: message.to_string(),
    });
}

fn certificate_data(cert: &Certificate) -> serde_json::Value {
    json!({
        "certificate_id": cert.id,
        "certificate_name": cert.name,
        "expiry_date": cert.expiry_date,
        "days_until_expiry": cert.days_until_expiry,
    })
}

fn critical_request(cert: &Certificate) -> NotificationRequest {
    let days = cert.days_until_expiry.unwrap_or_default();
    NotificationRequest {
        store_id: cert.store_id.clone(),
        user_id: None,
        kind: NotificationKind::CertificateExpiryCritical,
        title: format!("Certificate expiring in {days} day(s)"),
        message: format!(
            "\"{}\" expires on {}. Immediate action required.",
            cert.name, cert.expiry_date
        ),
        data: certificate_data(cert),
    }
}

fn warning_request(cert: &Certificate) -> NotificationRequest {
    let days = cert.days_until_expiry.unwrap_or_default();
    NotificationRequest {
        store_id: cert.store_id.clone(),
        user_id: None,
        kind: NotificationKind::CertificateExpiryWarning,
        title: format!("Certificate expiring soon ({days} days)"),
        message: format!("\"{}\" expires on {}.", cert.name, cert.expiry_date),
        data: certificate_data(cert),
    }
}

fn expired_request(cert: &Certificate) -> NotificationRequest {
    NotificationRequest {
        store_id: cert.store_id.clone(),
        user_id: None,
        kind: NotificationKind::CertificateExpired,
        title: "Certificate expired".to_string(),
        message: format!("\"{}\" has expired. Please renew immediately.", cert.name),
        data: json!({
            "certificate_id": cert.id,
            "expiry_date": cert.expiry_date,
        }),
    }
}

use std::sync::Arc;

use tracing::{debug, info};

use storeguard_core::constants::ROLLING_SCORE_WINDOW;
use storeguard_core::errors::ComplianceResult;
use storeguard_core::records::AuditStatus;
use storeguard_core::traits::RecordStore;

use crate::formula::{self, round2};

/// Scoring engine over the record-store port.
///
/// Computes audit scores on submit and maintains each store's rolling
/// aggregate. Nothing else writes `Store::compliance_score`.
pub struct ScoringEngine {
    records: Arc<dyn RecordStore>,
}

impl ScoringEngine {
    pub fn new(records: Arc<dyn RecordStore>) -> Self {
        Self { records }
    }

    /// Score one audit from its current checklist items.
    pub fn score_audit(&self, audit_id: &str) -> ComplianceResult<f64> {
        let items = self.records.items_for_audit(audit_id)?;
        let breakdown = formula::compute_breakdown(&items);
        debug!(
            audit_id,
            score = breakdown.score,
            passed_weight = breakdown.passed_weight,
            total_weight = breakdown.total_weight,
            "audit scored"
        );
        Ok(breakdown.score)
    }

    /// Recompute a store's rolling score from its most recent approved
    /// audits.
    ///
    /// Takes at most the last three by completed date, drops null-scored
    /// entries, and leaves the prior aggregate untouched when nothing
    /// remains. Returns the written score, or None when no write happened.
    pub fn recompute_store_score(&self, store_id: &str) -> ComplianceResult<Option<f64>> {
        let mut approved = self
            .records
            .audits_for_store(store_id, Some(AuditStatus::Approved))?;

        approved.sort_by(|a, b| b.completed_date.cmp(&a.completed_date));

        let scores: Vec<f64> = approved
            .iter()
            .take(ROLLING_SCORE_WINDOW)
            .filter_map(|a| a.compliance_score)
            .collect();

        if scores.is_empty() {
            return Ok(None);
        }

        let average = scores.iter().sum::<f64>() / scores.len() as f64;
        let rounded = round2(average);

        self.records.set_store_score(store_id, rounded)?;
        info!(store_id, score = rounded, "store compliance score updated");
        Ok(Some(rounded))
    }
}

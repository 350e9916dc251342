use storeguard_core::constants::EMPTY_AUDIT_SCORE;
use storeguard_core::records::{AuditItem, ItemResult};

/// Weighted pass-ratio score.
///
/// ```text
/// score = Σ(weight | result = PASS) / Σ(weight | result ≠ NOT_APPLICABLE) × 100
/// ```
///
/// NOT_APPLICABLE items are excluded from both sides. With no applicable
/// items the score is exactly 100: nothing was checked, nothing failed.
/// Deterministic; reads item state only.
pub fn score_items(items: &[AuditItem]) -> f64 {
    compute_breakdown(items).score
}

/// Per-component view of one score computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub passed_weight: u32,
    pub total_weight: u32,
    pub score: f64,
}

pub fn compute_breakdown(items: &[AuditItem]) -> ScoreBreakdown {
    let applicable: Vec<&AuditItem> = items.iter().filter(|i| i.result.is_applicable()).collect();

    if applicable.is_empty() {
        return ScoreBreakdown {
            passed_weight: 0,
            total_weight: 0,
            score: EMPTY_AUDIT_SCORE,
        };
    }

    let total_weight: u32 = applicable.iter().map(|i| u32::from(i.weight.value())).sum();
    let passed_weight: u32 = applicable
        .iter()
        .filter(|i| i.result == ItemResult::Pass)
        .map(|i| u32::from(i.weight.value()))
        .sum();

    ScoreBreakdown {
        passed_weight,
        total_weight,
        score: round2(f64::from(passed_weight) / f64::from(total_weight) * 100.0),
    }
}

/// Round to 2 decimal places: scale by 100, round half-up, scale back.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four ordered steps of one expiry sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SweepStep {
    Refresh,
    Critical,
    Warning,
    Expired,
}

impl fmt::Display for SweepStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Refresh => "refresh",
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Expired => "expired",
        };
        f.write_str(s)
    }
}

/// A caught, non-fatal failure inside one sweep step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepFailure {
    pub step: SweepStep,
    pub certificate_id: Option<String>,
    pub message: String,
}

/// Outcome of one expiry sweep.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SweepReport {
    /// Certificates whose derived expiry fields changed in the refresh step.
    pub refreshed: usize,
    pub critical_sent: usize,
    pub warning_sent: usize,
    pub expired_sent: usize,
    pub step_failures: Vec<StepFailure>,
}

impl SweepReport {
    pub fn is_clean(&self) -> bool {
        self.step_failures.is_empty()
    }

    pub fn notifications_sent(&self) -> usize {
        self.critical_sent + self.warning_sent + self.expired_sent
    }
}

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{ComplianceError, ComplianceResult};

/// Certificate-expiry subsystem configuration.
///
/// Both thresholds are read once at the start of each sweep so a
/// mid-sweep change cannot split the critical/warning partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpiryConfig {
    /// Certificates expiring within this many days get a warning notice.
    pub warning_days: i64,
    /// Certificates expiring within this many days get a critical notice.
    pub critical_days: i64,
    /// Local hour (0-23) at which the daily sweep fires.
    pub sweep_hour: u32,
}

impl Default for ExpiryConfig {
    fn default() -> Self {
        Self {
            warning_days: defaults::DEFAULT_EXPIRY_WARNING_DAYS,
            critical_days: defaults::DEFAULT_EXPIRY_CRITICAL_DAYS,
            sweep_hour: defaults::DEFAULT_SWEEP_HOUR,
        }
    }
}

impl ExpiryConfig {
    /// Parse from a TOML document, validating threshold sanity.
    pub fn from_toml_str(raw: &str) -> ComplianceResult<Self> {
        let config: Self = toml::from_str(raw).map_err(|e| ComplianceError::Configuration {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Thresholds must be non-negative and critical must not exceed warning.
    pub fn validate(&self) -> ComplianceResult<()> {
        if self.warning_days < 0 || self.critical_days < 0 {
            return Err(ComplianceError::Configuration {
                reason: format!(
                    "expiry thresholds must be non-negative (warning={}, critical={})",
                    self.warning_days, self.critical_days
                ),
            });
        }
        if self.critical_days > self.warning_days {
            return Err(ComplianceError::Configuration {
                reason: format!(
                    "critical_days ({}) must not exceed warning_days ({})",
                    self.critical_days, self.warning_days
                ),
            });
        }
        if self.sweep_hour > 23 {
            return Err(ComplianceError::Configuration {
                reason: format!("sweep_hour ({}) must be 0-23", self.sweep_hour),
            });
        }
        Ok(())
    }
}

use crate::config::ExpiryConfig;
use crate::errors::ComplianceResult;

/// Source of expiry thresholds, read exactly once at the start of each
/// sweep. A failed read falls back to the documented defaults.
pub trait ConfigSource: Send + Sync {
    fn expiry_config(&self) -> ComplianceResult<ExpiryConfig>;
}

/// Fixed configuration decided at composition time.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigSource {
    config: ExpiryConfig,
}

impl StaticConfigSource {
    pub fn new(config: ExpiryConfig) -> Self {
        Self { config }
    }
}

impl ConfigSource for StaticConfigSource {
    fn expiry_config(&self) -> ComplianceResult<ExpiryConfig> {
        Ok(self.config.clone())
    }
}

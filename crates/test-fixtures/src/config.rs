use storeguard_core::config::ExpiryConfig;
use storeguard_core::errors::{ComplianceError, ComplianceResult};
use storeguard_core::traits::ConfigSource;

/// A config source whose reads always fail, for default-fallback tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingConfigSource;

impl ConfigSource for FailingConfigSource {
    fn expiry_config(&self) -> ComplianceResult<ExpiryConfig> {
        Err(ComplianceError::Configuration {
            reason: "config backend unavailable".to_string(),
        })
    }
}

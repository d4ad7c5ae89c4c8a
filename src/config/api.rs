//! Backend API configuration

use serde::Deserialize;
use std::time::Duration;

use super::environment::{validate_url, Environment};
use super::error::ValidationError;

/// Backend API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL that relative request paths are joined to
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate API configuration
    pub fn validate(&self, environment: Environment) -> Result<(), ValidationError> {
        validate_url(&self.base_url, "API_BASE_URL", environment)?;
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_timeout() -> u64 {
    30
}

//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PORTAL` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use portal_core::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("API at {}", config.api.base_url);
//! ```

mod api;
mod environment;
mod error;
mod roles;
mod storage;
mod telemetry;

pub use api::ApiConfig;
pub use environment::Environment;
pub use error::{ConfigError, ValidationError};
pub use roles::RolesConfig;
pub use storage::StorageConfig;
pub use telemetry::{LogFormat, TelemetryConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Environment name
    #[serde(default)]
    pub environment: Environment,

    /// Backend API (login endpoint and authenticated calls)
    pub api: ApiConfig,

    /// Session persistence
    #[serde(default)]
    pub storage: StorageConfig,

    /// Role lookup (optional)
    #[serde(default)]
    pub roles: RolesConfig,

    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PORTAL` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PORTAL__API__BASE_URL=https://api.example.com` -> `api.base_url`
    /// - `PORTAL__STORAGE__PATH=/var/lib/portal/session.json` -> `storage.path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PORTAL")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.api.validate(self.environment)?;
        self.storage.validate()?;
        self.roles.validate(self.environment)?;
        self.telemetry.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("PORTAL__API__BASE_URL", "http://localhost:8000/api");
    }

    fn clear_env() {
        env::remove_var("PORTAL__API__BASE_URL");
        env::remove_var("PORTAL__API__TIMEOUT_SECS");
        env::remove_var("PORTAL__ENVIRONMENT");
        env::remove_var("PORTAL__STORAGE__TOKEN_KEY");
        env::remove_var("PORTAL__ROLES__BASE_URL");
        env::remove_var("PORTAL__TELEMETRY__FORMAT");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.storage.token_key, "token");
        assert_eq!(config.storage.user_key, "user");
        assert!(!config.roles.is_enabled());
        assert_eq!(config.telemetry.format, LogFormat::Pretty);
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("PORTAL__API__TIMEOUT_SECS", "10");
        env::set_var("PORTAL__STORAGE__TOKEN_KEY", "auth_token");
        env::set_var("PORTAL__ROLES__BASE_URL", "http://localhost:54321/rest/v1");
        env::set_var("PORTAL__TELEMETRY__FORMAT", "json");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.storage.token_key, "auth_token");
        assert!(config.roles.is_enabled());
        assert_eq!(config.telemetry.format, LogFormat::Json);
    }

    #[test]
    fn test_missing_base_url_fails() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_err());
    }

    #[test]
    fn test_production_requires_https() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("PORTAL__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert_eq!(
            config.validate(),
            Err(ValidationError::MustBeHttps("API_BASE_URL"))
        );
    }
}

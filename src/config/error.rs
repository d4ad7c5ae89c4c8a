//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid URL for {0}: expected http:// or https://")]
    InvalidUrl(&'static str),

    #[error("{0} must use HTTPS in production")]
    MustBeHttps(&'static str),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Storage keys must be non-empty and distinct")]
    InvalidStorageKeys,
}

//! Deployment environment

use serde::Deserialize;
use std::fmt;

/// Application environment
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        };
        write!(f, "{}", s)
    }
}

/// Checks that `url` is an http(s) URL, and HTTPS when `environment` is production.
pub(crate) fn validate_url(
    url: &str,
    name: &'static str,
    environment: Environment,
) -> Result<(), super::ValidationError> {
    use super::ValidationError;

    if url.trim().is_empty() {
        return Err(ValidationError::MissingRequired(name));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ValidationError::InvalidUrl(name));
    }
    if environment.is_production() && !url.starts_with("https://") {
        return Err(ValidationError::MustBeHttps(name));
    }
    Ok(())
}

//! Role lookup configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::environment::{validate_url, Environment};
use super::error::ValidationError;
use crate::adapters::roles::RoleLookupConfig;

/// Hosted backend holding user roles. Role lookup is off without a base URL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RolesConfig {
    pub base_url: Option<String>,

    /// Project key sent as the `apikey` header
    pub api_key: Option<SecretString>,
}

impl RolesConfig {
    pub fn is_enabled(&self) -> bool {
        self.base_url.as_ref().is_some_and(|url| !url.is_empty())
    }

    /// Adapter configuration, or `None` when role lookup is disabled.
    pub fn lookup_config(&self) -> Option<RoleLookupConfig> {
        let base_url = self.base_url.as_ref().filter(|url| !url.is_empty())?;
        let config = RoleLookupConfig::new(base_url.clone());
        Some(match &self.api_key {
            Some(key) => config.with_api_key(key.expose_secret().clone()),
            None => config,
        })
    }

    /// Validate role lookup configuration
    pub fn validate(&self, environment: Environment) -> Result<(), ValidationError> {
        match &self.base_url {
            Some(url) if !url.is_empty() => validate_url(url, "ROLES_BASE_URL", environment),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_without_base_url() {
        let config = RolesConfig::default();
        assert!(!config.is_enabled());
        assert!(config.lookup_config().is_none());
        assert!(config.validate(Environment::Production).is_ok());
    }

    #[test]
    fn test_enabled_with_base_url() {
        let config = RolesConfig {
            base_url: Some("https://db.club.test/rest/v1".to_string()),
            api_key: Some(SecretString::new("anon-key".to_string())),
        };
        assert!(config.is_enabled());
        assert_eq!(
            config.lookup_config().unwrap().base_url,
            "https://db.club.test/rest/v1"
        );
    }

    #[test]
    fn test_invalid_url_rejected() {
        let config = RolesConfig {
            base_url: Some("db.club.test".to_string()),
            api_key: None,
        };
        assert_eq!(
            config.validate(Environment::Development),
            Err(ValidationError::InvalidUrl("ROLES_BASE_URL"))
        );
    }
}

//! Session persistence configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::application::StorageKeys;

/// Where and under which keys the session is persisted
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// JSON file backing the key-value store
    #[serde(default = "default_path")]
    pub path: PathBuf,

    #[serde(default = "default_token_key")]
    pub token_key: String,

    #[serde(default = "default_user_key")]
    pub user_key: String,
}

impl StorageConfig {
    pub fn keys(&self) -> StorageKeys {
        StorageKeys {
            token: self.token_key.clone(),
            user: self.user_key.clone(),
        }
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE_PATH"));
        }
        let token_key = self.token_key.trim();
        let user_key = self.user_key.trim();
        if token_key.is_empty() || user_key.is_empty() || token_key == user_key {
            return Err(ValidationError::InvalidStorageKeys);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            token_key: default_token_key(),
            user_key: default_user_key(),
        }
    }
}

fn default_path() -> PathBuf {
    PathBuf::from("./data/session.json")
}

fn default_token_key() -> String {
    "token".to_string()
}

fn default_user_key() -> String {
    "user".to_string()
}

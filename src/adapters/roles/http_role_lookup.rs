//! Role lookup against the hosted backend's REST table endpoint.
//!
//! Queries `GET {base_url}/user_roles?user_id=eq.<id>&select=role` and
//! expects rows like `[{ "role": "PLAYER" }]`. Tags outside the known role
//! set are skipped.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::foundation::{Role, RoleSet, UserId};
use crate::ports::{RoleLookup, RoleLookupError};

/// Configuration for the role lookup adapter.
#[derive(Debug, Clone)]
pub struct RoleLookupConfig {
    pub base_url: String,
    /// Project key sent as the `apikey` header, when the backend wants one.
    api_key: Option<SecretString>,
    pub timeout: Duration,
}

impl RoleLookupConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(api_key.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn roles_url(&self) -> String {
        format!("{}/user_roles", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct RoleRow {
    role: String,
}

pub struct HttpRoleLookup {
    config: RoleLookupConfig,
    client: Client,
}

impl HttpRoleLookup {
    pub fn new(config: RoleLookupConfig) -> Result<Self, RoleLookupError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RoleLookupError::Unavailable(e.to_string()))?;
        Ok(Self { config, client })
    }

    fn collect_roles(rows: Vec<RoleRow>) -> RoleSet {
        rows.into_iter()
            .filter_map(|row| match row.role.parse::<Role>() {
                Ok(role) => Some(role),
                Err(_) => {
                    tracing::debug!(tag = %row.role, "Skipping unknown role tag");
                    None
                }
            })
            .collect()
    }
}

#[async_trait]
impl RoleLookup for HttpRoleLookup {
    async fn roles_for(&self, user_id: &UserId) -> Result<RoleSet, RoleLookupError> {
        let mut request = self
            .client
            .get(self.config.roles_url())
            .query(&[
                ("user_id", format!("eq.{}", user_id)),
                ("select", "role".to_string()),
            ]);
        if let Some(key) = &self.config.api_key {
            request = request.header("apikey", key.expose_secret().as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| RoleLookupError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RoleLookupError::Unavailable(format!(
                "HTTP {}",
                status.as_u16()
            )));
        }

        let rows: Vec<RoleRow> = response
            .json()
            .await
            .map_err(|e| RoleLookupError::InvalidResponse(e.to_string()))?;

        Ok(Self::collect_roles(rows))
    }
}

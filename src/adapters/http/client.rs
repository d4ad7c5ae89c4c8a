//! HTTP API client - reqwest wrapper carrying the session's bearer token.
//!
//! Implements the `ApiClient` port: once the session store sets a token,
//! every request built here carries `Authorization: Bearer <token>` until
//! the token is cleared.
//!
//! # Example
//!
//! ```ignore
//! let client = Arc::new(HttpApiClient::new("https://api.example.com", Duration::from_secs(30))?);
//! let store = SessionStore::with_keys(auth_api, client.clone(), storage, notifier, keys);
//!
//! // Later, from a request executor's producer:
//! let teams: Vec<Team> = client.get_json("/teams").await?;
//! ```

use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::Credential;
use crate::ports::ApiClient;

/// Errors from outbound API calls.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_connect() {
            ApiError::Network(format!("Connection failed: {}", err))
        } else {
            ApiError::Network(err.to_string())
        }
    }

    /// Status code for `Status` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true for failures where no response was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Timeout | ApiError::Network(_))
    }
}

/// Error body shapes the backend is known to send.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Outbound API client with a default credential header.
#[derive(Debug)]
pub struct HttpApiClient {
    base_url: String,
    client: Client,
    token: RwLock<Option<Credential>>,
}

impl HttpApiClient {
    /// Creates a client for `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            token: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The underlying reqwest client, shared with adapters on the same backend.
    pub fn http(&self) -> &Client {
        &self.client
    }

    /// Joins `path` onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Credential currently attached to outbound requests.
    pub fn token(&self) -> Option<Credential> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Starts a request, attaching the bearer header when a token is set.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match self.token() {
            Some(token) => builder.header(AUTHORIZATION, token.bearer()),
            None => builder,
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .request(Method::GET, path)
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        Self::decode(response).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::POST, path)
            .json(body)
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        Self::decode(response).await
    }

    /// Turns a response into `T`, or into `ApiError::Status` carrying the
    /// backend's message for non-success statuses.
    pub async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
            let message = body
                .message
                .or(body.error)
                .filter(|m| !m.trim().is_empty())
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl ApiClient for HttpApiClient {
    fn set_token(&self, token: Credential) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    fn clear_token(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> HttpApiClient {
        HttpApiClient::new("https://api.example.com/", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn url_joins_without_double_slash() {
        let client = client();
        assert_eq!(client.base_url(), "https://api.example.com");
        assert_eq!(client.url("/teams"), "https://api.example.com/teams");
        assert_eq!(client.url("teams/1"), "https://api.example.com/teams/1");
    }

    #[test]
    fn token_starts_empty() {
        assert!(client().token().is_none());
    }

    #[test]
    fn set_and_clear_token() {
        let client = client();

        client.set_token(Credential::new("tok"));
        assert_eq!(client.token().map(|t| t.expose().to_string()).as_deref(), Some("tok"));

        client.clear_token();
        assert!(client.token().is_none());
    }

    #[test]
    fn request_carries_bearer_header_only_when_set() {
        let client = client();

        let anonymous = client.request(Method::GET, "/me").build().unwrap();
        assert!(anonymous.headers().get(AUTHORIZATION).is_none());

        client.set_token(Credential::new("tok"));
        let authed = client.request(Method::GET, "/me").build().unwrap();
        assert_eq!(authed.headers().get(AUTHORIZATION).unwrap(), "Bearer tok");
    }

    #[test]
    fn api_error_status_accessors() {
        let err = ApiError::Status {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Not Found");
        assert!(!err.is_transport());
        assert!(ApiError::Timeout.is_transport());
    }
}

//! HTTP adapter for the authentication API.
//!
//! Posts `{ "email", "password" }` to `{base_url}/auth/login` and expects
//! `{ "token", "user" }` back. Status mapping:
//!
//! - 401 / 403 -> `AuthError::InvalidCredentials`
//! - other non-success -> `AuthError::Rejected` with the backend's message
//! - no response -> `AuthError::ServiceUnavailable`
//! - unusable body -> `AuthError::InvalidResponse`

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::adapters::http::{ApiError, HttpApiClient};
use crate::domain::foundation::{AuthError, AuthGrant, Credential, LoginCredentials, UserIdentity};
use crate::ports::AuthApi;

const LOGIN_PATH: &str = "/auth/login";

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
    user: UserIdentity,
}

/// Authentication API served by the portal backend.
pub struct HttpAuthApi {
    client: Arc<HttpApiClient>,
}

impl HttpAuthApi {
    /// Shares the outbound client (and thus base URL and timeout).
    pub fn new(client: Arc<HttpApiClient>) -> Self {
        Self { client }
    }

    fn map_error(err: ApiError) -> AuthError {
        match err {
            ApiError::Status { status: 401 | 403, .. } => AuthError::InvalidCredentials,
            ApiError::Status { message, .. } => AuthError::Rejected(message),
            ApiError::Decode(message) => AuthError::InvalidResponse(message),
            ApiError::Timeout => AuthError::service_unavailable("request timed out"),
            ApiError::Network(message) | ApiError::ClientBuild(message) => {
                AuthError::ServiceUnavailable(message)
            }
        }
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthGrant, AuthError> {
        let body = LoginRequest {
            email: credentials.identifier(),
            password: credentials.secret(),
        };

        // Login never carries a stale bearer header.
        let response = self
            .client
            .http()
            .request(Method::POST, self.client.url(LOGIN_PATH))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AuthError::service_unavailable("request timed out")
                } else {
                    AuthError::service_unavailable(e.to_string())
                }
            })?;

        let parsed: LoginResponse = HttpApiClient::decode(response)
            .await
            .map_err(Self::map_error)?;

        let token = Credential::new(parsed.token);
        if token.is_empty() {
            return Err(AuthError::InvalidResponse("empty token".to_string()));
        }

        tracing::debug!(user_id = %parsed.user.id, "Login accepted by backend");

        Ok(AuthGrant {
            token,
            user: parsed.user,
        })
    }
}

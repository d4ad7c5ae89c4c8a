//! Authentication types for the client core.
//!
//! These types describe who is signed in and with which bearer credential.
//! They have **no transport dependencies** - the HTTP adapter, the mock
//! adapter and persisted storage all populate the same values.
//!
//! # Design Decisions
//!
//! - `Credential` wraps a `SecretString` so tokens never leak through `Debug`
//!   or tracing fields
//! - `UserIdentity` keeps unknown backend fields so persisting and restoring a
//!   record does not drop data the UI may still read
//! - `AuthError` is domain-centric, not provider-specific

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{UserId, ValidationError};

/// Message shown when a login failure carries no usable text.
pub const GENERIC_LOGIN_FAILURE: &str = "Login failed. Please try again.";

/// Identity of the signed-in user, as returned by the authentication API
/// and persisted under the user key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    /// The unique user identifier.
    pub id: UserId,

    /// First name, used to greet the user.
    #[serde(default)]
    pub first_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Any other fields the backend sent along.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserIdentity {
    /// Creates an identity with only the fields the core relies on.
    pub fn new(id: UserId, first_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: None,
            email: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    /// Full name for display, falling back to the first name alone.
    pub fn full_name(&self) -> String {
        match self.last_name.as_deref() {
            Some(last) if !last.is_empty() => format!("{} {}", self.first_name, last),
            _ => self.first_name.clone(),
        }
    }
}

/// Opaque bearer token authorizing outbound API calls.
pub struct Credential(SecretString);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::new(token.into()))
    }

    /// Exposes the raw token (for persisting and request headers).
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// Value for an `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.expose())
    }

    pub fn is_empty(&self) -> bool {
        self.expose().trim().is_empty()
    }
}

impl Clone for Credential {
    fn clone(&self) -> Self {
        Self::new(self.expose().to_string())
    }
}

impl PartialEq for Credential {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

/// Validated login input.
///
/// ## Invariants
/// - `identifier` is trimmed and non-empty.
/// - `secret` is non-empty but keeps caller-provided whitespace.
pub struct LoginCredentials {
    identifier: String,
    secret: SecretString,
}

impl LoginCredentials {
    /// Construct credentials from raw identifier/secret inputs.
    pub fn try_from_parts(identifier: &str, secret: &str) -> Result<Self, ValidationError> {
        let normalized = identifier.trim();
        if normalized.is_empty() {
            return Err(ValidationError::empty_field("identifier"));
        }
        if secret.is_empty() {
            return Err(ValidationError::empty_field("secret"));
        }
        Ok(Self {
            identifier: normalized.to_string(),
            secret: SecretString::new(secret.to_string()),
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn secret(&self) -> &str {
        self.secret.expose_secret()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("identifier", &self.identifier)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Successful response of the authentication API.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthGrant {
    pub token: Credential,
    pub user: UserIdentity,
}

/// Authentication errors surfaced by the login flow.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    /// The backend refused the identifier/secret pair.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The backend rejected the request with its own message.
    #[error("{0}")]
    Rejected(String),

    /// Network failure or backend outage.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The backend answered with a body we could not use.
    #[error("Unexpected auth response: {0}")]
    InvalidResponse(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    /// Text for the user-facing notification; generic when the error has none.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_LOGIN_FAILURE.to_string()
        } else {
            message
        }
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}

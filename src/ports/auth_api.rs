//! Authentication API port.
//!
//! Exchanges login credentials for a bearer token and the signed-in user's
//! identity. The session store is the only caller.
//!
//! # Example
//!
//! ```ignore
//! let creds = LoginCredentials::try_from_parts("a@b.com", "x")?;
//! let grant = auth_api.login(&creds).await?;
//! api_client.set_token(grant.token.clone());
//! ```

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthGrant, LoginCredentials};

/// Remote authentication endpoint.
///
/// # Contract
///
/// Implementations must:
/// - Return `AuthGrant` with a non-empty token on success
/// - Return `AuthError::InvalidCredentials` when the backend refuses the pair
/// - Return `AuthError::ServiceUnavailable` for network failures
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthGrant, AuthError>;
}

//! Mock authentication adapter for testing.
//!
//! Implements the `AuthApi` port without a backend, avoiding the need for a
//! live login endpoint in tests.
//!
//! # Example
//!
//! ```ignore
//! use portal_core::adapters::auth::MockAuthApi;
//!
//! let api = MockAuthApi::new().with_account("a@b.com", "x", "tok", ann);
//! let grant = api.login(&LoginCredentials::try_from_parts("a@b.com", "x")?).await?;
//! assert_eq!(grant.token.expose(), "tok");
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::foundation::{
    AuthError, AuthGrant, Credential, LoginCredentials, UserId, UserIdentity,
};
use crate::ports::AuthApi;

struct Account {
    secret: String,
    token: String,
    user: UserIdentity,
}

/// Mock authentication API.
///
/// Stores a map of identifiers to accounts. Unknown identifiers or wrong
/// secrets return `InvalidCredentials`.
#[derive(Default)]
pub struct MockAuthApi {
    accounts: RwLock<HashMap<String, Account>>,
    /// Optional error to return for all logins (for error testing)
    force_error: RwLock<Option<AuthError>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockAuthApi {
    /// Creates a new mock with no accounts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an account that logs in with `identifier` / `secret`.
    pub fn with_account(
        self,
        identifier: impl Into<String>,
        secret: impl Into<String>,
        token: impl Into<String>,
        user: UserIdentity,
    ) -> Self {
        self.accounts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                identifier.into(),
                Account {
                    secret: secret.into(),
                    token: token.into(),
                    user,
                },
            );
        self
    }

    /// Registers a simple test account keyed by user id.
    pub fn with_test_account(self, user_id: &str, first_name: &str) -> Self {
        let user = match UserId::new(user_id) {
            Ok(id) => UserIdentity::new(id, first_name)
                .with_email(format!("{}@test.example.com", user_id)),
            Err(_) => return self,
        };
        self.with_account(
            format!("{}@test.example.com", user_id),
            "password",
            format!("token-{}", user_id),
            user,
        )
    }

    /// Forces all logins to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap_or_else(PoisonError::into_inner) = Some(error);
        self
    }

    /// Delays every login, to keep a call in flight during a test.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Clears the forced error and returns to normal operation.
    pub fn clear_error(&self) {
        *self.force_error.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Number of `login` calls received.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthApi for MockAuthApi {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthGrant, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self
            .force_error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            return Err(error);
        }

        let accounts = self.accounts.read().unwrap_or_else(PoisonError::into_inner);
        match accounts.get(credentials.identifier()) {
            Some(account) if account.secret == credentials.secret() => Ok(AuthGrant {
                token: Credential::new(account.token.clone()),
                user: account.user.clone(),
            }),
            _ => Err(AuthError::InvalidCredentials),
        }
    }
}

//! SessionStore - the client's authentication state.
//!
//! Owns the in-memory session and keeps three things in step with it: the
//! persisted token and user record, the outbound API client's bearer header,
//! and every subscriber of the published [`SessionState`].
//!
//! # Lifecycle
//!
//! ```text
//! new() -> hydrate() -> login() / logout() ...
//! ```
//!
//! `login` and `logout` hydrate first when called on a fresh store, so the
//! persisted session is never silently overwritten by stale defaults.

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::foundation::{
    AuthError, AuthGrant, Credential, LoginCredentials, StateMachine, UserIdentity,
};
use crate::domain::notification::Notification;
use crate::domain::session::{Session, SessionState, SessionStatus};
use crate::ports::{ApiClient, AuthApi, KeyValueStore, NotificationSink};

/// Keys under which the session is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub token: String,
    pub user: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            token: "token".to_string(),
            user: "user".to_string(),
        }
    }
}

struct Inner {
    auth_api: Arc<dyn AuthApi>,
    api_client: Arc<dyn ApiClient>,
    storage: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn NotificationSink>,
    keys: StorageKeys,
    state: watch::Sender<SessionState>,
}

/// Injectable holder of the session. Clones share the same state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl SessionStore {
    /// Creates an unhydrated store using the default storage keys.
    pub fn new(
        auth_api: Arc<dyn AuthApi>,
        api_client: Arc<dyn ApiClient>,
        storage: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self::with_keys(auth_api, api_client, storage, notifier, StorageKeys::default())
    }

    pub fn with_keys(
        auth_api: Arc<dyn AuthApi>,
        api_client: Arc<dyn ApiClient>,
        storage: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn NotificationSink>,
        keys: StorageKeys,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            inner: Arc::new(Inner {
                auth_api,
                api_client,
                storage,
                notifier,
                keys,
                state,
            }),
        }
    }

    /// Restores the session from persisted storage.
    ///
    /// Runs once; later calls log and return the current status. A missing
    /// or unparseable entry discards both persisted entries and settles as
    /// `Anonymous`.
    pub fn hydrate(&self) -> SessionStatus {
        let claimed = self.inner.state.send_if_modified(|state| {
            match state.status.transition_to(SessionStatus::Hydrating) {
                Ok(next) => {
                    state.status = next;
                    true
                }
                Err(_) => false,
            }
        });
        if !claimed {
            let status = self.status();
            tracing::debug!(status = %status, "Session already hydrated");
            return status;
        }

        let session = match self.read_persisted() {
            Some(session) => session,
            None => {
                self.remove_persisted();
                Session::anonymous()
            }
        };

        if let Some(token) = session.token() {
            self.inner.api_client.set_token(token.clone());
        }

        let target = if session.is_authenticated() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Anonymous
        };

        self.inner.state.send_if_modified(|state| {
            if state.status != SessionStatus::Hydrating {
                // A login settled the session while storage was being read.
                return false;
            }
            state.session = session;
            advance(state, target);
            state.loading = false;
            true
        });

        let status = self.status();
        tracing::info!(status = %status, "Session hydrated");
        status
    }

    /// Exchanges credentials for a session.
    ///
    /// On success the new session replaces any previous one, is persisted,
    /// and its token becomes the API client's default credential. On failure
    /// the session is unchanged and the error is returned after an error
    /// notification.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<UserIdentity, AuthError> {
        self.ensure_hydrated();
        self.inner.state.send_modify(|state| state.loading = true);

        match self.inner.auth_api.login(credentials).await {
            Ok(AuthGrant { token, user }) => {
                self.persist(&token, &user);
                self.inner.api_client.set_token(token.clone());

                let settled = Session::authenticated(user.clone(), token);
                self.inner.state.send_modify(|state| {
                    state.session = settled;
                    advance(state, SessionStatus::Authenticated);
                    state.loading = false;
                });

                tracing::info!(user_id = %user.id, "Login succeeded");
                self.inner
                    .notifier
                    .notify(Notification::success("Login successful", welcome(&user)));
                Ok(user)
            }
            Err(err) => {
                self.inner.state.send_modify(|state| state.loading = false);

                tracing::warn!(error = %err, transient = err.is_transient(), "Login failed");
                self.inner
                    .notifier
                    .notify(Notification::error("Login failed", err.user_message()));
                Err(err)
            }
        }
    }

    /// Ends the session. Never fails and may be called repeatedly.
    pub fn logout(&self) {
        self.ensure_hydrated();

        self.inner.state.send_modify(|state| {
            state.session = Session::anonymous();
            advance(state, SessionStatus::Anonymous);
        });
        self.remove_persisted();
        self.inner.api_client.clear_token();

        tracing::info!("Logged out");
        self.inner.notifier.notify(Notification::info(
            "Logged out",
            "You have been logged out successfully.",
        ));
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().loading
    }

    pub fn user(&self) -> Option<UserIdentity> {
        self.inner.state.borrow().user().cloned()
    }

    pub fn token(&self) -> Option<Credential> {
        self.inner.state.borrow().token().cloned()
    }

    pub fn status(&self) -> SessionStatus {
        self.inner.state.borrow().status
    }

    /// Receiver notified after every atomic session update.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    fn ensure_hydrated(&self) {
        if self.status() == SessionStatus::Uninitialized {
            self.hydrate();
        }
    }

    fn read_persisted(&self) -> Option<Session> {
        let token = self.read_key(&self.inner.keys.token)?;
        let raw_user = self.read_key(&self.inner.keys.user)?;

        if token.is_empty() {
            tracing::debug!("Persisted token is empty");
            return None;
        }

        match serde_json::from_str::<UserIdentity>(&raw_user) {
            Ok(user) => Some(Session::authenticated(user, Credential::new(token))),
            Err(err) => {
                tracing::warn!(error = %err, "Discarding unreadable persisted user");
                None
            }
        }
    }

    fn read_key(&self, key: &str) -> Option<String> {
        match self.inner.storage.get(key) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, error = %err, "Failed to read persisted session");
                None
            }
        }
    }

    fn persist(&self, token: &Credential, user: &UserIdentity) {
        let keys = &self.inner.keys;
        if let Err(err) = self.inner.storage.set(&keys.token, token.expose()) {
            tracing::warn!(key = %keys.token, error = %err, "Failed to persist session");
        }

        match serde_json::to_string(user) {
            Ok(json) => {
                if let Err(err) = self.inner.storage.set(&keys.user, &json) {
                    tracing::warn!(key = %keys.user, error = %err, "Failed to persist session");
                }
            }
            Err(err) => tracing::warn!(error = %err, "Failed to serialize user"),
        }
    }

    fn remove_persisted(&self) {
        for key in [&self.inner.keys.token, &self.inner.keys.user] {
            if let Err(err) = self.inner.storage.remove(key) {
                tracing::warn!(key = %key, error = %err, "Failed to remove persisted session");
            }
        }
    }
}

fn advance(state: &mut SessionState, target: SessionStatus) {
    match state.status.transition_to(target) {
        Ok(next) => state.status = next,
        Err(err) => tracing::warn!(error = %err, "Ignoring session status change"),
    }
}

fn welcome(user: &UserIdentity) -> String {
    if user.first_name.trim().is_empty() {
        "Welcome back!".to_string()
    } else {
        format!("Welcome back, {}!", user.first_name)
    }
}

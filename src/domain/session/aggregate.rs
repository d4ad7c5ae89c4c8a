//! Session value and the state published by the session store.

use crate::domain::foundation::{Credential, UserIdentity};

use super::SessionStatus;

/// The pairing of a user identity and its bearer credential.
///
/// # Invariants
///
/// - user and token are present together or absent together; there is no
///   constructor that sets one without the other
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    authenticated: Option<Principal>,
}

#[derive(Debug, Clone, PartialEq)]
struct Principal {
    user: UserIdentity,
    token: Credential,
}

impl Session {
    /// An empty session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: UserIdentity, token: Credential) -> Self {
        Self {
            authenticated: Some(Principal { user, token }),
        }
    }

    pub fn user(&self) -> Option<&UserIdentity> {
        self.authenticated.as_ref().map(|p| &p.user)
    }

    pub fn token(&self) -> Option<&Credential> {
        self.authenticated.as_ref().map(|p| &p.token)
    }

    /// Derived on every read: token present and user present.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some() && self.user().is_some()
    }
}

/// Snapshot published to session subscribers after every atomic update.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub session: Session,
    pub status: SessionStatus,
    /// True until hydration finishes and while a login is in flight.
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            session: Session::anonymous(),
            status: SessionStatus::Uninitialized,
            loading: true,
        }
    }
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn user(&self) -> Option<&UserIdentity> {
        self.session.user()
    }

    pub fn token(&self) -> Option<&Credential> {
        self.session.token()
    }
}

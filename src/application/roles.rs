//! RoleResolver - roles of the signed-in user.
//!
//! Role data is advisory: a failed lookup degrades to "no roles" with a
//! warning and never surfaces to the user.

use std::sync::Arc;

use tokio::sync::{watch, Mutex};

use crate::domain::foundation::{RoleSet, UserId, UserIdentity};
use crate::domain::session::SessionState;
use crate::ports::RoleLookup;

struct Inner {
    lookup: Arc<dyn RoleLookup>,
    resolved_for: Mutex<Option<UserId>>,
    current: watch::Sender<RoleSet>,
}

/// Resolves and caches the role set of the current user.
#[derive(Clone)]
pub struct RoleResolver {
    inner: Arc<Inner>,
}

impl RoleResolver {
    pub fn new(lookup: Arc<dyn RoleLookup>) -> Self {
        let (current, _) = watch::channel(RoleSet::new());
        Self {
            inner: Arc::new(Inner {
                lookup,
                resolved_for: Mutex::new(None),
                current,
            }),
        }
    }

    /// Resolves roles for `user`, querying only when the user changed since
    /// the last call. `None` resets to the empty set.
    pub async fn refresh(&self, user: Option<&UserIdentity>) -> RoleSet {
        let mut resolved_for = self.inner.resolved_for.lock().await;

        let Some(user) = user else {
            *resolved_for = None;
            self.inner.current.send_replace(RoleSet::new());
            return RoleSet::new();
        };

        if resolved_for.as_ref() == Some(&user.id) {
            return self.current();
        }

        let roles = match self.inner.lookup.roles_for(&user.id).await {
            Ok(roles) => {
                tracing::debug!(user_id = %user.id, count = roles.len(), "Roles resolved");
                roles
            }
            Err(err) => {
                tracing::warn!(user_id = %user.id, error = %err, "Role lookup failed, assuming no roles");
                RoleSet::new()
            }
        };

        *resolved_for = Some(user.id.clone());
        self.inner.current.send_replace(roles.clone());
        roles
    }

    /// Last resolved role set.
    pub fn current(&self) -> RoleSet {
        self.inner.current.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RoleSet> {
        self.inner.current.subscribe()
    }

    /// Keeps roles in step with a session until its sender is dropped.
    pub async fn follow(&self, mut session: watch::Receiver<SessionState>) {
        loop {
            let user = session.borrow_and_update().user().cloned();
            self.refresh(user.as_ref()).await;

            if session.changed().await.is_err() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::roles::MockRoleLookup;
    use crate::domain::foundation::{Credential, Role};
    use crate::domain::session::Session;
    use crate::ports::RoleLookupError;

    fn user(id: &str) -> UserIdentity {
        UserIdentity::new(UserId::new(id).unwrap(), "Ann")
    }

    #[tokio::test]
    async fn refresh_resolves_roles_once_per_user() {
        let lookup = Arc::new(MockRoleLookup::new().with_roles("u1", [Role::Admin]));
        let resolver = RoleResolver::new(lookup.clone());

        let roles = resolver.refresh(Some(&user("u1"))).await;
        resolver.refresh(Some(&user("u1"))).await;

        assert!(roles.contains(Role::Admin));
        assert!(resolver.current().is_staff());
        assert_eq!(lookup.call_count(), 1);
    }

    #[tokio::test]
    async fn refresh_queries_again_for_a_different_user() {
        let lookup = Arc::new(
            MockRoleLookup::new()
                .with_roles("u1", [Role::Admin])
                .with_roles("u2", [Role::Player]),
        );
        let resolver = RoleResolver::new(lookup.clone());

        resolver.refresh(Some(&user("u1"))).await;
        let roles = resolver.refresh(Some(&user("u2"))).await;

        assert!(roles.contains(Role::Player));
        assert!(!roles.is_staff());
        assert_eq!(lookup.call_count(), 2);
    }

    #[tokio::test]
    async fn refresh_without_user_is_empty() {
        let lookup = Arc::new(MockRoleLookup::new().with_roles("u1", [Role::Trainer]));
        let resolver = RoleResolver::new(lookup.clone());
        resolver.refresh(Some(&user("u1"))).await;

        let roles = resolver.refresh(None).await;

        assert!(roles.is_empty());
        assert!(resolver.current().is_empty());
    }

    #[tokio::test]
    async fn lookup_failure_degrades_to_no_roles() {
        let lookup = Arc::new(
            MockRoleLookup::new().with_error(RoleLookupError::Unavailable("timeout".into())),
        );
        let resolver = RoleResolver::new(lookup);

        let roles = resolver.refresh(Some(&user("u1"))).await;

        assert!(roles.is_empty());
    }

    #[tokio::test]
    async fn follow_tracks_session_changes() {
        let lookup = Arc::new(MockRoleLookup::new().with_roles("u1", [Role::Moderator]));
        let resolver = RoleResolver::new(lookup);
        let (session_tx, session_rx) = watch::channel(SessionState::default());
        let mut roles = resolver.subscribe();

        let following = tokio::spawn({
            let resolver = resolver.clone();
            async move { resolver.follow(session_rx).await }
        });

        session_tx.send_modify(|state| {
            state.session = Session::authenticated(user("u1"), Credential::new("t1"));
        });
        roles
            .wait_for(|roles| roles.contains(Role::Moderator))
            .await
            .unwrap();

        session_tx.send_modify(|state| state.session = Session::anonymous());
        roles.wait_for(|roles| roles.is_empty()).await.unwrap();

        drop(session_tx);
        following.await.unwrap();
    }
}

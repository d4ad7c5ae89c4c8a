//! Mock role lookup for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::foundation::{Role, RoleSet, UserId};
use crate::ports::{RoleLookup, RoleLookupError};

/// Serves roles from a map. Unknown users have no roles.
#[derive(Debug, Default)]
pub struct MockRoleLookup {
    roles: RwLock<HashMap<String, RoleSet>>,
    force_error: RwLock<Option<RoleLookupError>>,
    calls: AtomicUsize,
}

impl MockRoleLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_roles(self, user_id: &str, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user_id.to_string(), roles.into_iter().collect());
        self
    }

    /// Forces all lookups to return the specified error.
    pub fn with_error(self, error: RoleLookupError) -> Self {
        *self.force_error.write().unwrap_or_else(PoisonError::into_inner) = Some(error);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoleLookup for MockRoleLookup {
    async fn roles_for(&self, user_id: &UserId) -> Result<RoleSet, RoleLookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self
            .force_error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            return Err(error);
        }

        Ok(self
            .roles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(user_id.as_str())
            .cloned()
            .unwrap_or_default())
    }
}

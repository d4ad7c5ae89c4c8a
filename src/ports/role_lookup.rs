//! Role lookup port.
//!
//! Resolves the role tags a user holds on the hosted backend. Consumers
//! degrade a failed lookup to an empty role set; see
//! [`RoleResolver`](crate::application::RoleResolver).

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{RoleSet, UserId};

/// Errors from the role backend.
#[derive(Debug, Clone, Error)]
pub enum RoleLookupError {
    #[error("Role service unavailable: {0}")]
    Unavailable(String),

    #[error("Unexpected role response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait RoleLookup: Send + Sync {
    /// Roles held by `user_id`; an unknown user has no roles.
    async fn roles_for(&self, user_id: &UserId) -> Result<RoleSet, RoleLookupError>;
}

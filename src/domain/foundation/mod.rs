//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the portal client core.

mod auth;
mod errors;
mod ids;
mod roles;
mod state_machine;

pub use auth::{
    AuthError, AuthGrant, Credential, LoginCredentials, UserIdentity, GENERIC_LOGIN_FAILURE,
};
pub use errors::ValidationError;
pub use ids::UserId;
pub use roles::{Role, RoleSet};
pub use state_machine::StateMachine;

//! Application layer - Stateful services driven by the UI.
//!
//! This layer orchestrates domain types and coordinates between ports:
//! - `executor` - Request and mutation executors publishing `QueryState`
//! - `session` - The session store (hydrate, login, logout)
//! - `roles` - Role resolution for the signed-in user

pub mod executor;
pub mod roles;
pub mod session;

pub use executor::{MutationExecutor, MutationOptions, QueryOptions, RequestExecutor};
pub use roles::RoleResolver;
pub use session::{SessionStore, StorageKeys};

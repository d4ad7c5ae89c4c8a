//! Domain layer containing the client core's value types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, identities, credentials, roles, errors)
//! - `notification` - User-visible notifications
//! - `query` - Executor state and wrapped failures
//! - `session` - Session value, status machine and published snapshot

pub mod foundation;
pub mod notification;
pub mod query;
pub mod session;

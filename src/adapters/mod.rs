//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the client core to external systems:
//! - `auth` - Login endpoint (HTTP, mock)
//! - `http` - Outbound API client holding the bearer credential
//! - `notifications` - Notification sinks (tracing, recording)
//! - `roles` - Role lookup (HTTP, mock)
//! - `storage` - Persisted key-value storage (file, in-memory)

pub mod auth;
pub mod http;
pub mod notifications;
pub mod roles;
pub mod storage;

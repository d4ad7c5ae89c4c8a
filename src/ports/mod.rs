//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the client core and the outside world. Adapters implement these ports.
//!
//! - `AuthApi` - Exchanges credentials for a token and identity
//! - `ApiClient` - Default credential header of outbound calls
//! - `KeyValueStore` - Persisted storage surviving restarts
//! - `NotificationSink` - User-visible notifications
//! - `RoleLookup` - Role tags held on the hosted backend

mod api_client;
mod auth_api;
mod key_value_store;
mod notification_sink;
mod role_lookup;

pub use api_client::ApiClient;
pub use auth_api::AuthApi;
pub use key_value_store::{KeyValueStore, StorageError};
pub use notification_sink::NotificationSink;
pub use role_lookup::{RoleLookup, RoleLookupError};

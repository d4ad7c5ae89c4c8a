//! Authentication adapters.
//!
//! Implementations of the `AuthApi` port:
//!
//! - `mock` - Test implementation that doesn't require a backend
//! - `http_auth_api` - Portal backend login endpoint over HTTP

mod http_auth_api;
mod mock;

pub use http_auth_api::HttpAuthApi;
pub use mock::MockAuthApi;

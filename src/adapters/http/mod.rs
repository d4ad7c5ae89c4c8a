//! HTTP adapters - outbound REST client.
//!
//! - `HttpApiClient` - reqwest client implementing the `ApiClient` port
//! - `MockApiClient` - test double recording token changes

mod client;
mod mock;

pub use client::{ApiError, HttpApiClient};
pub use mock::{MockApiClient, TokenChange};

//! Role lookup adapters.
//!
//! - `HttpRoleLookup` - Hosted backend REST endpoint
//! - `MockRoleLookup` - In-memory map for tests

mod http_role_lookup;
mod mock;

pub use http_role_lookup::{HttpRoleLookup, RoleLookupConfig};
pub use mock::MockRoleLookup;

//! Query domain module.
//!
//! Value types shared by the request and mutation executors.

mod error;
mod state;

pub use error::{BoxError, QueryError, GENERIC_QUERY_FAILURE};
pub use state::QueryState;

//! Request and mutation executors.
//!
//! Both wrap an async operation and publish `{data, loading, error}` through
//! a watch channel. Failures are surfaced as one error notification per
//! failed invocation.

mod mutation;
mod options;
mod request;

pub use mutation::MutationExecutor;
pub use options::{
    ErrorCallback, MutationErrorCallback, MutationOptions, MutationSuccessCallback, QueryOptions,
    SuccessCallback,
};
pub use request::RequestExecutor;

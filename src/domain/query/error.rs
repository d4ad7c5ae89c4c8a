//! Wrapped failure of an executor's producer.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Boxed error accepted from producer functions.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Message used when a failure carries no text of its own.
pub const GENERIC_QUERY_FAILURE: &str = "An unexpected error occurred";

/// Failure stored in [`QueryState::error`](super::QueryState) and handed to
/// `on_error` callbacks.
///
/// Cloneable so it can live inside published state; the original error is
/// kept behind an `Arc` and reachable through [`Error::source`].
#[derive(Clone)]
pub struct QueryError {
    message: String,
    source: Option<Arc<dyn Error + Send + Sync>>,
}

impl QueryError {
    /// Creates an error with a message and no underlying cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: non_empty(message.into()),
            source: None,
        }
    }

    /// Wraps any producer failure. String failures become the message;
    /// failures whose text is blank get [`GENERIC_QUERY_FAILURE`].
    pub fn wrap<E: Into<BoxError>>(err: E) -> Self {
        let boxed: BoxError = err.into();
        Self {
            message: non_empty(boxed.to_string()),
            source: Some(Arc::from(boxed)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

fn non_empty(message: String) -> String {
    if message.trim().is_empty() {
        GENERIC_QUERY_FAILURE.to_string()
    } else {
        message
    }
}

impl fmt::Debug for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryError")
            .field("message", &self.message)
            .field("has_source", &self.source.is_some())
            .finish()
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for QueryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|err| err as &(dyn Error + 'static))
    }
}

impl PartialEq for QueryError {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message
    }
}

//! Lifecycle state of one asynchronous operation.

use super::QueryError;

/// Observable state of a request or mutation executor.
///
/// # Invariants
///
/// - `loading` is true only while an invocation is in flight
/// - once an invocation settles, exactly one of `data` / `error` is set
///
/// The transition methods below are the only way executors change state, and
/// each one is applied and published as a single update.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<QueryError>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> QueryState<T> {
    /// An invocation started. Previous data stays visible until it settles.
    pub fn start(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn succeed(&mut self, data: T) {
        self.data = Some(data);
        self.error = None;
        self.loading = false;
    }

    pub fn fail(&mut self, error: QueryError) {
        self.data = None;
        self.error = Some(error);
        self.loading = false;
    }

    /// Drops data and error; `loading` is left alone.
    pub fn clear(&mut self) {
        self.data = None;
        self.error = None;
    }

    pub fn is_success(&self) -> bool {
        !self.loading && self.data.is_some()
    }

    pub fn is_error(&self) -> bool {
        !self.loading && self.error.is_some()
    }

    pub fn is_idle(&self) -> bool {
        !self.loading && self.data.is_none() && self.error.is_none()
    }
}

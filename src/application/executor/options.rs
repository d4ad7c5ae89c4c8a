//! Callback options for executors.
//!
//! Each field is independently optional; a callback runs only when present.

use std::fmt;
use std::sync::Arc;

use crate::domain::query::QueryError;

pub type SuccessCallback<T> = Arc<dyn Fn(&T) + Send + Sync>;
pub type ErrorCallback = Arc<dyn Fn(&QueryError) + Send + Sync>;
pub type MutationSuccessCallback<I, T> = Arc<dyn Fn(&T, &I) + Send + Sync>;
pub type MutationErrorCallback<I> = Arc<dyn Fn(&QueryError, &I) + Send + Sync>;

/// Options for a [`RequestExecutor`](super::RequestExecutor).
pub struct QueryOptions<T> {
    /// Whether the executor runs automatically. Defaults to true.
    pub enabled: bool,
    pub on_success: Option<SuccessCallback<T>>,
    pub on_error: Option<ErrorCallback>,
}

impl<T> Default for QueryOptions<T> {
    fn default() -> Self {
        Self {
            enabled: true,
            on_success: None,
            on_error: None,
        }
    }
}

impl<T> QueryOptions<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn on_success(mut self, callback: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Arc::new(callback));
        self
    }

    pub fn on_error(mut self, callback: impl Fn(&QueryError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(callback));
        self
    }
}

impl<T> fmt::Debug for QueryOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryOptions")
            .field("enabled", &self.enabled)
            .field("on_success", &self.on_success.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

/// Options for a [`MutationExecutor`](super::MutationExecutor).
pub struct MutationOptions<I, T> {
    pub on_success: Option<MutationSuccessCallback<I, T>>,
    pub on_error: Option<MutationErrorCallback<I>>,
}

impl<I, T> Default for MutationOptions<I, T> {
    fn default() -> Self {
        Self {
            on_success: None,
            on_error: None,
        }
    }
}

impl<I, T> MutationOptions<I, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_success(mut self, callback: impl Fn(&T, &I) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Arc::new(callback));
        self
    }

    pub fn on_error(mut self, callback: impl Fn(&QueryError, &I) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(callback));
        self
    }
}

impl<I, T> fmt::Debug for MutationOptions<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutationOptions")
            .field("on_success", &self.on_success.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

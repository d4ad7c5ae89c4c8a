//! RequestExecutor - runs a read operation and tracks its lifecycle.
//!
//! The producer runs automatically when the executor is activated with
//! `enabled` set, and again every time `enabled` flips back to true.
//! `refetch` runs it on demand regardless of `enabled`.
//!
//! # Overlapping invocations
//!
//! Invocations are neither de-duplicated nor cancelled. A `refetch` issued
//! while another is in flight starts a second independent run, and whichever
//! completes last determines the final state. Callers that need at most one
//! run in flight must gate `refetch` themselves.
//!
//! # Example
//!
//! ```ignore
//! let client = api_client.clone();
//! let teams = RequestExecutor::new(
//!     move || {
//!         let client = client.clone();
//!         async move { client.get_json::<Vec<Team>>("/teams").await }
//!     },
//!     QueryOptions::new().enabled(session.is_authenticated()),
//!     notifier.clone(),
//! );
//! teams.activate().await;
//! ```

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use tokio::sync::watch;

use super::options::QueryOptions;
use crate::domain::notification::Notification;
use crate::domain::query::{BoxError, QueryError, QueryState};
use crate::ports::NotificationSink;

type Producer<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<T, QueryError>> + Send + Sync>;

struct Inner<T> {
    producer: Producer<T>,
    options: QueryOptions<T>,
    enabled: AtomicBool,
    activated: AtomicBool,
    invocations: AtomicU64,
    state: watch::Sender<QueryState<T>>,
    notifier: Arc<dyn NotificationSink>,
}

/// Cloneable handle to one read operation and its published state.
pub struct RequestExecutor<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for RequestExecutor<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> RequestExecutor<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Creates an inactive executor. Nothing runs until [`activate`](Self::activate)
    /// or [`refetch`](Self::refetch).
    pub fn new<F, Fut, E>(
        producer: F,
        options: QueryOptions<T>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: Into<BoxError>,
    {
        let producer: Producer<T> = Arc::new(move || {
            let fut = producer();
            async move { fut.await.map_err(QueryError::wrap) }.boxed()
        });
        let (state, _) = watch::channel(QueryState::default());
        let enabled = options.enabled;

        Self {
            inner: Arc::new(Inner {
                producer,
                options,
                enabled: AtomicBool::new(enabled),
                activated: AtomicBool::new(false),
                invocations: AtomicU64::new(0),
                state,
                notifier,
            }),
        }
    }

    /// First activation: runs the producer if enabled. Later calls do nothing.
    pub async fn activate(&self) {
        if self.inner.activated.swap(true, Ordering::SeqCst) {
            return;
        }
        if self.is_enabled() {
            self.execute().await;
        }
    }

    /// Updates `enabled`; a false -> true transition on an activated executor
    /// runs the producer. Disabling never touches state.
    pub async fn set_enabled(&self, enabled: bool) {
        let was_enabled = self.inner.enabled.swap(enabled, Ordering::SeqCst);
        if enabled && !was_enabled && self.inner.activated.load(Ordering::SeqCst) {
            self.execute().await;
        }
    }

    /// Runs the producer now, regardless of `enabled`.
    pub async fn refetch(&self) {
        self.execute().await;
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.enabled.load(Ordering::SeqCst)
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> QueryState<T> {
        self.inner.state.borrow().clone()
    }

    pub fn data(&self) -> Option<T> {
        self.inner.state.borrow().data.clone()
    }

    pub fn error(&self) -> Option<QueryError> {
        self.inner.state.borrow().error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().loading
    }

    /// Receiver notified after every state update.
    pub fn subscribe(&self) -> watch::Receiver<QueryState<T>> {
        self.inner.state.subscribe()
    }

    async fn execute(&self) {
        let inner = &self.inner;
        let invocation = inner.invocations.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(invocation, "Query started");

        inner.state.send_modify(|state| state.start());

        match (inner.producer)().await {
            Ok(data) => {
                inner.state.send_modify(|state| state.succeed(data.clone()));
                tracing::debug!(invocation, "Query succeeded");
                if let Some(callback) = &inner.options.on_success {
                    callback(&data);
                }
            }
            Err(error) => {
                inner.state.send_modify(|state| state.fail(error.clone()));
                tracing::warn!(invocation, error = %error, "Query failed");
                if let Some(callback) = &inner.options.on_error {
                    callback(&error);
                }
                inner
                    .notifier
                    .notify(Notification::error("Error", error.message()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::notifications::RecordingNotifier;
    use crate::domain::notification::Severity;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;
    use tokio::sync::Notify;

    fn counting_executor(
        options: QueryOptions<u32>,
        notifier: Arc<RecordingNotifier>,
    ) -> (RequestExecutor<u32>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let executor = RequestExecutor::new(
            move || {
                let n = counter.fetch_add(1, Ordering::SeqCst) as u32 + 1;
                async move { Ok::<_, String>(n * 10) }
            },
            options,
            notifier,
        );
        (executor, calls)
    }

    #[tokio::test]
    async fn successful_run_stores_data() {
        let notifier = Arc::new(RecordingNotifier::new());
        let seen = Arc::new(Mutex::new(None));
        let seen_by_callback = seen.clone();
        let (executor, _) = counting_executor(
            QueryOptions::new().on_success(move |value: &u32| {
                *seen_by_callback.lock().unwrap() = Some(*value);
            }),
            notifier.clone(),
        );

        executor.activate().await;

        let state = executor.state();
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.data, Some(10));
        assert_eq!(*seen.lock().unwrap(), Some(10));
        assert_eq!(notifier.count(), 0);
    }

    #[tokio::test]
    async fn failed_run_stores_error_and_notifies_once() {
        let notifier = Arc::new(RecordingNotifier::new());
        let seen = Arc::new(Mutex::new(None));
        let seen_by_callback = seen.clone();
        let executor: RequestExecutor<u32> = RequestExecutor::new(
            || async { Err::<u32, _>("roster service down") },
            QueryOptions::new().on_error(move |err: &QueryError| {
                *seen_by_callback.lock().unwrap() = Some(err.message().to_string());
            }),
            notifier.clone(),
        );

        executor.activate().await;

        let state = executor.state();
        assert!(!state.loading);
        assert!(state.data.is_none());
        assert_eq!(state.error.unwrap().message(), "roster service down");
        assert_eq!(seen.lock().unwrap().as_deref(), Some("roster service down"));

        let sent = notifier.notifications();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].message, "roster service down");
        assert_eq!(sent[0].severity, Severity::Error);
    }

    #[tokio::test]
    async fn failure_without_message_gets_generic_error() {
        let notifier = Arc::new(RecordingNotifier::new());
        let executor: RequestExecutor<u32> = RequestExecutor::new(
            || async { Err::<u32, _>(String::new()) },
            QueryOptions::new(),
            notifier.clone(),
        );

        executor.refetch().await;

        assert_eq!(
            executor.error().unwrap().message(),
            crate::domain::query::GENERIC_QUERY_FAILURE
        );
        assert_eq!(
            notifier.last().unwrap().message,
            crate::domain::query::GENERIC_QUERY_FAILURE
        );
    }

    #[tokio::test]
    async fn disabled_executor_does_not_run_on_activate() {
        let notifier = Arc::new(RecordingNotifier::new());
        let (executor, calls) = counting_executor(QueryOptions::new().enabled(false), notifier);

        executor.activate().await;

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(executor.state().is_idle());
    }

    #[tokio::test]
    async fn enabling_runs_on_each_false_to_true_transition() {
        let notifier = Arc::new(RecordingNotifier::new());
        let (executor, calls) = counting_executor(QueryOptions::new().enabled(false), notifier);
        executor.activate().await;

        executor.set_enabled(true).await;
        executor.set_enabled(true).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        executor.set_enabled(false).await;
        assert_eq!(executor.data(), Some(10));

        executor.set_enabled(true).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(executor.data(), Some(20));
    }

    #[tokio::test]
    async fn enabling_before_activation_waits_for_activation() {
        let notifier = Arc::new(RecordingNotifier::new());
        let (executor, calls) = counting_executor(QueryOptions::new().enabled(false), notifier);

        executor.set_enabled(true).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        executor.activate().await;
        executor.activate().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn refetch_ignores_enabled() {
        let notifier = Arc::new(RecordingNotifier::new());
        let (executor, calls) = counting_executor(QueryOptions::new().enabled(false), notifier);

        executor.refetch().await;
        executor.refetch().await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(executor.data(), Some(20));
    }

    #[tokio::test]
    async fn loading_is_true_only_while_in_flight() {
        let notifier = Arc::new(RecordingNotifier::new());
        let gate = Arc::new(Notify::new());
        let producer_gate = gate.clone();
        let executor = RequestExecutor::new(
            move || {
                let gate = producer_gate.clone();
                async move {
                    gate.notified().await;
                    Ok::<_, String>(5u32)
                }
            },
            QueryOptions::new(),
            notifier,
        );
        let mut updates = executor.subscribe();

        let running = tokio::spawn({
            let executor = executor.clone();
            async move { executor.refetch().await }
        });

        updates.wait_for(|state| state.loading).await.unwrap();
        assert!(executor.is_loading());
        assert!(executor.data().is_none());

        gate.notify_one();
        running.await.unwrap();

        assert!(!executor.is_loading());
        assert_eq!(executor.data(), Some(5));
    }

    #[tokio::test]
    async fn new_run_clears_previous_error() {
        let notifier = Arc::new(RecordingNotifier::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let executor = RequestExecutor::new(
            move || {
                let first = counter.fetch_add(1, Ordering::SeqCst) == 0;
                async move {
                    if first {
                        Err("temporary".to_string())
                    } else {
                        Ok(3u32)
                    }
                }
            },
            QueryOptions::new(),
            notifier.clone(),
        );

        executor.refetch().await;
        assert!(executor.error().is_some());

        executor.refetch().await;
        assert!(executor.error().is_none());
        assert_eq!(executor.data(), Some(3));
        assert_eq!(notifier.count(), 1);
    }

    #[tokio::test]
    async fn overlapping_refetches_last_completion_wins() {
        let notifier = Arc::new(RecordingNotifier::new());
        let gates = [Arc::new(Notify::new()), Arc::new(Notify::new())];
        let (started_tx, mut started_rx) = tokio::sync::mpsc::unbounded_channel();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let producer_gates = gates.clone();
        let executor = RequestExecutor::new(
            move || {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                let gate = producer_gates[n].clone();
                let started = started_tx.clone();
                async move {
                    let _ = started.send(n);
                    gate.notified().await;
                    Ok::<_, String>(if n == 0 { "first issued" } else { "second issued" })
                }
            },
            QueryOptions::new(),
            notifier,
        );

        let first = tokio::spawn({
            let executor = executor.clone();
            async move { executor.refetch().await }
        });
        assert_eq!(started_rx.recv().await, Some(0));

        let second = tokio::spawn({
            let executor = executor.clone();
            async move { executor.refetch().await }
        });
        assert_eq!(started_rx.recv().await, Some(1));

        gates[1].notify_one();
        second.await.unwrap();
        assert_eq!(executor.data(), Some("second issued"));
        assert!(!executor.is_loading());

        gates[0].notify_one();
        first.await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(executor.data(), Some("first issued"));
        assert!(!executor.is_loading());
    }
}

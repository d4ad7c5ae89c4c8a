//! MutationExecutor - runs a write operation on demand.
//!
//! Unlike [`RequestExecutor`](super::RequestExecutor) nothing runs
//! automatically; every invocation comes from [`MutationExecutor::mutate`]
//! and the caller gets the outcome back as well as the published state.

use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use tokio::sync::watch;

use super::options::MutationOptions;
use crate::domain::notification::Notification;
use crate::domain::query::{BoxError, QueryError, QueryState};
use crate::ports::NotificationSink;

type Mutator<I, T> = Arc<dyn Fn(I) -> BoxFuture<'static, Result<T, QueryError>> + Send + Sync>;

struct Inner<I, T> {
    mutator: Mutator<I, T>,
    options: MutationOptions<I, T>,
    state: watch::Sender<QueryState<T>>,
    notifier: Arc<dyn NotificationSink>,
}

/// Cloneable handle to one write operation and its published state.
pub struct MutationExecutor<I, T> {
    inner: Arc<Inner<I, T>>,
}

impl<I, T> Clone for MutationExecutor<I, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<I, T> MutationExecutor<I, T>
where
    I: Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    pub fn new<F, Fut, E>(
        mutator: F,
        options: MutationOptions<I, T>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self
    where
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: Into<BoxError>,
    {
        let mutator: Mutator<I, T> = Arc::new(move |input| {
            let fut = mutator(input);
            async move { fut.await.map_err(QueryError::wrap) }.boxed()
        });
        let (state, _) = watch::channel(QueryState::default());

        Self {
            inner: Arc::new(Inner {
                mutator,
                options,
                state,
                notifier,
            }),
        }
    }

    /// Runs the operation with `input`.
    ///
    /// On failure the error is published, `on_error` runs, one error
    /// notification is emitted, and the same error is returned.
    pub async fn mutate(&self, input: I) -> Result<T, QueryError> {
        let inner = &self.inner;
        inner.state.send_modify(|state| state.start());

        match (inner.mutator)(input.clone()).await {
            Ok(data) => {
                inner.state.send_modify(|state| state.succeed(data.clone()));
                tracing::debug!("Mutation succeeded");
                if let Some(callback) = &inner.options.on_success {
                    callback(&data, &input);
                }
                Ok(data)
            }
            Err(error) => {
                inner.state.send_modify(|state| state.fail(error.clone()));
                tracing::warn!(error = %error, "Mutation failed");
                if let Some(callback) = &inner.options.on_error {
                    callback(&error, &input);
                }
                inner
                    .notifier
                    .notify(Notification::error("Error", error.message()));
                Err(error)
            }
        }
    }

    /// Clears `data` and `error`. `loading` is left as is.
    pub fn reset(&self) {
        self.inner.state.send_modify(|state| state.clear());
    }

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

    pub fn subscribe(&self) -> watch::Receiver<QueryState<T>> {
        self.inner.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::notifications::RecordingNotifier;
    use proptest::prelude::*;
    use std::sync::Mutex;
    use tokio::sync::Notify;

    #[derive(Debug, Clone, PartialEq)]
    struct NewTeam {
        name: String,
    }

    fn create_team(
        notifier: Arc<RecordingNotifier>,
        options: MutationOptions<NewTeam, u64>,
    ) -> MutationExecutor<NewTeam, u64> {
        MutationExecutor::new(
            |input: NewTeam| async move {
                if input.name.is_empty() {
                    Err("Team name is required".to_string())
                } else {
                    Ok(input.name.len() as u64)
                }
            },
            options,
            notifier,
        )
    }

    #[tokio::test]
    async fn mutate_returns_and_publishes_result() {
        let notifier = Arc::new(RecordingNotifier::new());
        let seen = Arc::new(Mutex::new(None));
        let seen_by_callback = seen.clone();
        let executor = create_team(
            notifier.clone(),
            MutationOptions::new().on_success(move |id: &u64, input: &NewTeam| {
                *seen_by_callback.lock().unwrap() = Some((*id, input.name.clone()));
            }),
        );

        let id = executor
            .mutate(NewTeam {
                name: "Falcons".into(),
            })
            .await
            .unwrap();

        assert_eq!(id, 7);
        assert_eq!(executor.data(), Some(7));
        assert!(!executor.is_loading());
        assert!(executor.error().is_none());
        assert_eq!(*seen.lock().unwrap(), Some((7, "Falcons".to_string())));
        assert_eq!(notifier.count(), 0);
    }

    #[tokio::test]
    async fn failed_mutation_returns_error_and_notifies_once() {
        let notifier = Arc::new(RecordingNotifier::new());
        let seen = Arc::new(Mutex::new(None));
        let seen_by_callback = seen.clone();
        let executor = create_team(
            notifier.clone(),
            MutationOptions::new().on_error(move |err: &QueryError, input: &NewTeam| {
                *seen_by_callback.lock().unwrap() =
                    Some((err.message().to_string(), input.clone()));
            }),
        );

        let err = executor
            .mutate(NewTeam {
                name: String::new(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.message(), "Team name is required");
        assert_eq!(executor.error(), Some(err));
        assert!(executor.data().is_none());
        assert!(!executor.is_loading());

        let (message, input) = seen.lock().unwrap().clone().unwrap();
        assert_eq!(message, "Team name is required");
        assert!(input.name.is_empty());

        assert_eq!(notifier.count(), 1);
        assert_eq!(notifier.last().unwrap().message, "Team name is required");
    }

    #[tokio::test]
    async fn failure_after_success_clears_data() {
        let notifier = Arc::new(RecordingNotifier::new());
        let executor = create_team(notifier, MutationOptions::new());

        executor
            .mutate(NewTeam { name: "Owls".into() })
            .await
            .unwrap();
        let _ = executor
            .mutate(NewTeam {
                name: String::new(),
            })
            .await;

        assert!(executor.data().is_none());
        assert!(executor.error().is_some());
    }

    #[tokio::test]
    async fn reset_clears_outcome() {
        let notifier = Arc::new(RecordingNotifier::new());
        let executor = create_team(notifier, MutationOptions::new());
        let _ = executor
            .mutate(NewTeam {
                name: String::new(),
            })
            .await;

        executor.reset();

        let state = executor.state();
        assert!(state.data.is_none());
        assert!(state.error.is_none());
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn reset_during_flight_keeps_loading_and_later_outcome() {
        let notifier = Arc::new(RecordingNotifier::new());
        let gate = Arc::new(Notify::new());
        let mutator_gate = gate.clone();
        let executor = MutationExecutor::new(
            move |score: u32| {
                let gate = mutator_gate.clone();
                async move {
                    if score > 5 {
                        gate.notified().await;
                    }
                    Ok::<_, String>(score)
                }
            },
            MutationOptions::new(),
            notifier,
        );
        executor.mutate(3).await.unwrap();
        let mut updates = executor.subscribe();

        let pending = tokio::spawn({
            let executor = executor.clone();
            async move { executor.mutate(7).await }
        });
        updates.wait_for(|state| state.loading).await.unwrap();
        assert_eq!(executor.data(), Some(3));

        executor.reset();

        let state = executor.state();
        assert!(state.loading);
        assert!(state.data.is_none());
        assert!(state.error.is_none());

        gate.notify_one();
        assert_eq!(pending.await.unwrap().unwrap(), 7);

        let state = executor.state();
        assert!(!state.loading);
        assert_eq!(state.data, Some(7));
    }

    proptest! {
        #[test]
        fn reset_always_clears_data_and_error(names in proptest::collection::vec("[a-z]{0,6}", 0..5)) {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async {
                let notifier = Arc::new(RecordingNotifier::new());
                let executor = create_team(notifier, MutationOptions::new());
                for name in names {
                    let _ = executor.mutate(NewTeam { name }).await;
                }

                executor.reset();

                let state = executor.state();
                assert!(state.data.is_none());
                assert!(state.error.is_none());
            });
        }
    }
}

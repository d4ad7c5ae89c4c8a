//! Notification sink adapters.
//!
//! - `TracingNotifier` - Logs notifications through `tracing`
//! - `RecordingNotifier` - Captures notifications for assertions

mod recording;
mod tracing_notifier;

pub use recording::RecordingNotifier;
pub use tracing_notifier::TracingNotifier;

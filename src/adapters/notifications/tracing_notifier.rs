//! Notification sink that writes to the tracing subscriber.
//!
//! Used by headless front-ends (the probe binary, background jobs) where
//! the log is the only surface the user sees.

use crate::domain::notification::{Notification, Severity};
use crate::ports::NotificationSink;

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl NotificationSink for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let Notification {
            title,
            message,
            severity,
            ..
        } = notification;

        match severity {
            Severity::Error => tracing::error!(target: "notification", %title, "{}", message),
            Severity::Warning => tracing::warn!(target: "notification", %title, "{}", message),
            Severity::Info | Severity::Success => {
                tracing::info!(target: "notification", %title, %severity, "{}", message)
            }
        }
    }
}

//! Recording notification sink for tests.

use std::sync::{PoisonError, RwLock};

use crate::domain::notification::{Notification, Severity};
use crate::ports::NotificationSink;

/// Captures every notification for later assertions.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    received: RwLock<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications so far, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.received
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn count(&self) -> usize {
        self.received
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn of_severity(&self, severity: Severity) -> Vec<Notification> {
        self.notifications()
            .into_iter()
            .filter(|n| n.severity == severity)
            .collect()
    }

    pub fn last(&self) -> Option<Notification> {
        self.received
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Clears captured notifications (for test isolation).
    pub fn clear(&self) {
        self.received
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.received
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

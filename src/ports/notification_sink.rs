//! NotificationSink port - user-visible toast messages.

use crate::domain::notification::Notification;

/// Port for showing notifications to the user.
///
/// Fire-and-forget: implementations must not block and callers never
/// inspect an outcome.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

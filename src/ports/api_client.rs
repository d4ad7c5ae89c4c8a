//! Outbound API client port.
//!
//! Every outbound call made after login carries the session's bearer
//! credential as a default header. The session store keeps that header in
//! step with the session through this port.

use crate::domain::foundation::Credential;

/// Holder of the default credential header for outbound calls.
///
/// Both methods are infallible and take effect for every request issued
/// after they return.
pub trait ApiClient: Send + Sync {
    fn set_token(&self, token: Credential);

    fn clear_token(&self);
}

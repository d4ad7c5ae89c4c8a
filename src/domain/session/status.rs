//! SessionStatus enum for tracking the lifecycle of the client session.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle status of the session store.
///
/// ```text
/// Uninitialized -> Hydrating -> Authenticated <-> Anonymous
///                            \-> Anonymous
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Uninitialized,
    Hydrating,
    Authenticated,
    Anonymous,
}

impl SessionStatus {
    /// Returns true once hydration has finished.
    pub fn is_settled(&self) -> bool {
        matches!(self, SessionStatus::Authenticated | SessionStatus::Anonymous)
    }
}

impl StateMachine for SessionStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        use SessionStatus::*;
        match self {
            Uninitialized => vec![Hydrating],
            Hydrating => vec![Authenticated, Anonymous],
            // A fresh login replaces the session; logout is idempotent.
            Authenticated => vec![Authenticated, Anonymous],
            Anonymous => vec![Authenticated, Anonymous],
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::Uninitialized => "Uninitialized",
            SessionStatus::Hydrating => "Hydrating",
            SessionStatus::Authenticated => "Authenticated",
            SessionStatus::Anonymous => "Anonymous",
        };
        write!(f, "{}", s)
    }
}

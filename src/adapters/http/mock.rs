//! Mock API client recording token changes.

use std::sync::{Mutex, PoisonError};

use crate::domain::foundation::Credential;
use crate::ports::ApiClient;

/// One change made through the `ApiClient` port.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenChange {
    Set(String),
    Cleared,
}

/// API client double that only remembers what was done to its header.
#[derive(Debug, Default)]
pub struct MockApiClient {
    changes: Mutex<Vec<TokenChange>>,
}

impl MockApiClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw token currently in effect.
    pub fn current_token(&self) -> Option<String> {
        match self.changes().last() {
            Some(TokenChange::Set(token)) => Some(token.clone()),
            _ => None,
        }
    }

    pub fn changes(&self) -> Vec<TokenChange> {
        self.changes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ApiClient for MockApiClient {
    fn set_token(&self, token: Credential) {
        self.changes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(TokenChange::Set(token.expose().to_string()));
    }

    fn clear_token(&self) {
        self.changes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(TokenChange::Cleared);
    }
}

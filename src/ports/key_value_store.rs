//! Key-value storage port for persisting the session across restarts.
//!
//! Synchronous and process-wide, like browser local storage. The session
//! store reads on startup, writes on login and deletes on logout.

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to serialize value: {0}")]
    SerializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for persisting string values under string keys
pub trait KeyValueStore: Send + Sync {
    /// Read a value
    ///
    /// # Returns
    /// `None` if nothing is stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a value; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

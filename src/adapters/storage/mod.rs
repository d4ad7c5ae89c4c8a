//! Storage Adapters
//!
//! Implementations of the KeyValueStore port for persisting the session.
//!
//! ## Available Adapters
//!
//! - **FileKeyValueStore** - Stores all keys in one JSON file on disk
//! - **InMemoryKeyValueStore** - Stores values in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileKeyValueStore, InMemoryKeyValueStore};
//!
//! // Production: file-based storage
//! let storage = FileKeyValueStore::open("./data/session.json")?;
//!
//! // Testing: in-memory storage
//! let storage = InMemoryKeyValueStore::new();
//! ```

mod file_key_value_store;
mod in_memory_key_value_store;

pub use file_key_value_store::FileKeyValueStore;
pub use in_memory_key_value_store::InMemoryKeyValueStore;

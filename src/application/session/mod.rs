//! Session store and its storage layout.

mod store;

pub use store::{SessionStore, StorageKeys};

//! File-based Key-Value Store Adapter
//!
//! Keeps all keys in a single JSON object on disk, loaded once on open and
//! written through on every change. A missing file is an empty store; an
//! unreadable one is logged and treated as empty so a corrupt file can never
//! block startup.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::ports::{KeyValueStore, StorageError};

/// File-backed key-value storage
#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FileKeyValueStore {
    /// Open the store at `path`
    ///
    /// # Errors
    /// Returns `StorageError::IoError` only when an existing file cannot be
    /// read at all; parse failures fall back to an empty store
    ///
    /// # Example
    /// ```ignore
    /// let store = FileKeyValueStore::open("./data/session.json")?;
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| StorageError::IoError(e.to_string()))?;
            match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
                Ok(values) => values,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Discarding unreadable storage file");
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the whole map to a sibling temp file, then rename over the target
    fn flush(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StorageError::IoError(e.to_string()))?;
            }
        }

        let json = serde_json::to_string_pretty(values)
            .map_err(|e| StorageError::SerializationFailed(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| StorageError::IoError(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| StorageError::IoError(e.to_string()))?;

        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        let previous = values.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush(&values) {
            // keep memory and disk in agreement
            match previous {
                Some(old) => values.insert(key.to_string(), old),
                None => values.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(previous) = values.remove(key) else {
            return Ok(());
        };
        if let Err(e) = self.flush(&values) {
            values.insert(key.to_string(), previous);
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::open(temp_dir.path().join("session.json")).unwrap();

        store.set("token", "t1").unwrap();

        assert_eq!(store.get("token").unwrap().as_deref(), Some("t1"));
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");

        {
            let store = FileKeyValueStore::open(&path).unwrap();
            store.set("token", "t1").unwrap();
            store.set("user", r#"{"id":"u1","firstName":"Ann"}"#).unwrap();
        }

        let reopened = FileKeyValueStore::open(&path).unwrap();
        assert_eq!(reopened.get("token").unwrap().as_deref(), Some("t1"));
        assert_eq!(
            reopened.get("user").unwrap().as_deref(),
            Some(r#"{"id":"u1","firstName":"Ann"}"#)
        );
    }

    #[test]
    fn test_file_store_remove_persists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");

        let store = FileKeyValueStore::open(&path).unwrap();
        store.set("token", "t1").unwrap();
        store.remove("token").unwrap();
        store.remove("token").unwrap();

        let reopened = FileKeyValueStore::open(&path).unwrap();
        assert_eq!(reopened.get("token").unwrap(), None);
    }

    #[test]
    fn test_file_store_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("session.json");

        let store = FileKeyValueStore::open(&path).unwrap();
        store.set("token", "t1").unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_file_store_corrupt_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        fs::write(&path, "{not valid json").unwrap();

        let store = FileKeyValueStore::open(&path).unwrap();

        assert_eq!(store.get("token").unwrap(), None);

        store.set("token", "t2").unwrap();
        let reopened = FileKeyValueStore::open(&path).unwrap();
        assert_eq!(reopened.get("token").unwrap().as_deref(), Some("t2"));
    }

    #[test]
    fn test_file_store_failed_remove_keeps_value() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        let store = FileKeyValueStore::open(&path).unwrap();
        store.set("token", "t1").unwrap();

        // A directory in the temp file's place makes the next flush fail.
        let blocker = path.with_extension("json.tmp");
        fs::create_dir(&blocker).unwrap();

        assert!(store.remove("token").is_err());
        assert_eq!(store.get("token").unwrap().as_deref(), Some("t1"));

        fs::remove_dir(&blocker).unwrap();
        store.remove("token").unwrap();

        let reopened = FileKeyValueStore::open(&path).unwrap();
        assert_eq!(reopened.get("token").unwrap(), None);
    }

    #[test]
    fn test_file_store_missing_file_is_not_created_until_write() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");

        let store = FileKeyValueStore::open(&path).unwrap();
        store.remove("token").unwrap();

        assert!(!path.exists());
        assert_eq!(store.path(), path.as_path());
    }
}

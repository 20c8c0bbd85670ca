//! Key-value persistence boundary
//!
//! Every collection is stored as one JSON value under a string key. Any
//! backend with get/set/remove-by-key semantics can stand in for the files
//! used by the application.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde_json::Value;

use super::file_io::{read_json, remove_file_if_exists, write_json_atomic};
use crate::error::{FinanceError, FinanceResult};

/// A store of JSON values addressed by string keys
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> FinanceResult<Option<Value>>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &Value) -> FinanceResult<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> FinanceResult<()>;
}

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> FinanceResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(FinanceError::Storage(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> FinanceResult<Option<Value>> {
        read_json(self.path_for(key)?)
    }

    fn set(&self, key: &str, value: &Value) -> FinanceResult<()> {
        write_json_atomic(self.path_for(key)?, value)
    }

    fn remove(&self, key: &str) -> FinanceResult<()> {
        remove_file_if_exists(self.path_for(key)?)
    }
}

/// In-process store, handy for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.data.read().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> FinanceResult<Option<Value>> {
        let data = self.data.read().map_err(|e| {
            FinanceError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.get(key).cloned())
    }

    fn set(&self, key: &str, value: &Value) -> FinanceResult<()> {
        let mut data = self.data.write().map_err(|e| {
            FinanceError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        data.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> FinanceResult<()> {
        let mut data = self.data.write().map_err(|e| {
            FinanceError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        data.remove(key);
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> FinanceResult<Option<Value>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &Value) -> FinanceResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> FinanceResult<()> {
        (**self).remove(key)
    }
}

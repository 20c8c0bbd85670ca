//! Storage layer for Tandem
//!
//! Persists each record collection as a whole JSON list under a fixed key.
//! Writes always replace the entire collection; there is no field-level
//! patching.

pub mod file_io;
pub mod kv;

pub use file_io::{read_json, write_json_atomic};
pub use kv::{FileStore, KeyValueStore, MemoryStore};

use std::fmt;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::config::paths::TandemPaths;
use crate::error::{FinanceError, FinanceResult};

/// The persisted collections and their storage keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Expenses,
    Incomes,
    CurrentUser,
    Partner,
    Accounts,
    Categories,
    Transactions,
    Budgets,
}

impl Collection {
    pub const ALL: [Collection; 8] = [
        Self::Expenses,
        Self::Incomes,
        Self::CurrentUser,
        Self::Partner,
        Self::Accounts,
        Self::Categories,
        Self::Transactions,
        Self::Budgets,
    ];

    /// The key this collection is stored under
    pub fn key(&self) -> &'static str {
        match self {
            Self::Expenses => "finances_expenses",
            Self::Incomes => "finances_incomes",
            Self::CurrentUser => "currentUser",
            Self::Partner => "partner",
            Self::Accounts => "accounts",
            Self::Categories => "categories",
            Self::Transactions => "transactions",
            Self::Budgets => "budgets",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Typed access to collections on top of a key-value backend
#[derive(Debug)]
pub struct RecordStore<S> {
    backend: S,
}

impl RecordStore<FileStore> {
    /// Open the file-backed store under the configured data directory
    pub fn open(paths: &TandemPaths) -> FinanceResult<Self> {
        paths.ensure_directories()?;
        Ok(Self::new(FileStore::new(paths.data_dir())))
    }
}

impl<S: KeyValueStore> RecordStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Load every record of a collection, in stored order
    ///
    /// An absent key yields an empty list.
    pub fn load<T: DeserializeOwned>(&self, collection: Collection) -> FinanceResult<Vec<T>> {
        match self.backend.get(collection.key())? {
            Some(value) => {
                let records: Vec<T> = serde_json::from_value(value).map_err(|e| {
                    FinanceError::Storage(format!("Failed to decode {}: {}", collection, e))
                })?;
                tracing::debug!(collection = %collection, count = records.len(), "loaded collection");
                Ok(records)
            }
            None => Ok(Vec::new()),
        }
    }

    /// Replace a whole collection with `records`
    pub fn save_all<T: Serialize>(&self, collection: Collection, records: &[T]) -> FinanceResult<()> {
        let value = encode(collection, records)?;
        self.backend.set(collection.key(), &value)?;
        tracing::debug!(collection = %collection, count = records.len(), "saved collection");
        Ok(())
    }

    /// Load a single-object collection such as the current user
    pub fn load_one<T: DeserializeOwned>(&self, collection: Collection) -> FinanceResult<Option<T>> {
        match self.backend.get(collection.key())? {
            Some(Value::Null) | None => Ok(None),
            Some(value) => serde_json::from_value(value).map(Some).map_err(|e| {
                FinanceError::Storage(format!("Failed to decode {}: {}", collection, e))
            }),
        }
    }

    /// Store a single-object collection
    pub fn save_one<T: Serialize>(&self, collection: Collection, record: &T) -> FinanceResult<()> {
        let value = encode(collection, record)?;
        self.backend.set(collection.key(), &value)
    }

    /// Remove a collection entirely
    pub fn clear(&self, collection: Collection) -> FinanceResult<()> {
        self.backend.remove(collection.key())
    }
}

fn encode<T: Serialize + ?Sized>(collection: Collection, data: &T) -> FinanceResult<Value> {
    serde_json::to_value(data)
        .map_err(|e| FinanceError::Storage(format!("Failed to encode {}: {}", collection, e)))
}

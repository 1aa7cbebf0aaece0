//! Key-value persistence for the record collections.
//!
//! The application keeps every collection as a JSON array under a single key,
//! the way a browser page keeps data in `localStorage`. The `KeyValueStore`
//! trait is the seam between the record logic and wherever those strings
//! actually live; `StorageAdapter` adds the JSON encoding on top.
//!
//! # Module Structure
//!
//! - `memory`: `HashMap`-backed store, used by tests and embedders
//! - `file`: single JSON file on disk, guarded by an advisory lock

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::errors::{AppResult, StorageError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

/// A string-to-string store with browser `localStorage` semantics.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> AppResult<()>;
    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> AppResult<()>;

    /// Reads `key`, computes its replacement with `f` and stores it as one
    /// step. `f` returns the new value along with a result for the caller.
    ///
    /// Stores shared between processes override this to hold their lock
    /// across the whole read-modify-write.
    fn update<R, F>(&mut self, key: &str, f: F) -> AppResult<R>
    where
        F: FnOnce(Option<String>) -> AppResult<(String, R)>,
    {
        let (value, result) = f(self.get(key)?)?;
        self.set(key, &value)?;
        Ok(result)
    }
}

/// Checks that replacing `key` with `value` keeps the store within `quota`.
///
/// Usage is counted as the byte length of every key plus its value.
pub(crate) fn check_quota<'a, I>(
    entries: I,
    key: &str,
    value: &str,
    quota: usize,
) -> Result<(), StorageError>
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    let others: usize = entries
        .into_iter()
        .filter(|(k, _)| k.as_str() != key)
        .map(|(k, v)| k.len() + v.len())
        .sum();
    let needed = others + key.len() + value.len();

    if needed > quota {
        return Err(StorageError::QuotaExceeded {
            key: key.to_string(),
            needed,
            quota,
        });
    }
    Ok(())
}

/// Reads and writes record collections as JSON arrays.
///
/// # Examples
///
/// ```
/// use soulcare::storage::{MemoryStore, StorageAdapter};
///
/// let mut adapter = StorageAdapter::new(MemoryStore::new());
/// adapter.save("numbers", &[3, 2, 1]).unwrap();
///
/// let numbers: Vec<i32> = adapter.load("numbers");
/// assert_eq!(numbers, vec![3, 2, 1]);
///
/// let missing: Vec<i32> = adapter.load("nothing-here");
/// assert!(missing.is_empty());
/// ```
#[derive(Debug)]
pub struct StorageAdapter<S> {
    store: S,
}

impl<S: KeyValueStore> StorageAdapter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Loads the collection stored under `key`.
    ///
    /// An absent key, a value that is not a JSON array of `T`, or a failing
    /// store all read as an empty collection. Nothing is surfaced to the
    /// caller; the cause is logged.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        match self.store.get(key) {
            Ok(raw) => decode(key, raw),
            Err(e) => {
                warn!("Failed to read '{}', treating as empty: {}", key, e);
                Vec::new()
            }
        }
    }

    /// Saves `records` under `key` as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the records cannot be encoded,
    /// or whatever the underlying store reports (e.g. `QuotaExceeded`).
    /// Failed writes are not retried.
    pub fn save<T: Serialize>(&mut self, key: &str, records: &[T]) -> AppResult<()> {
        let json = encode(key, records)?;
        self.store.set(key, &json)
    }

    /// Loads the collection under `key`, lets `f` change it and saves the
    /// result without another writer getting in between.
    ///
    /// The collection handed to `f` follows the same rules as [`load`]:
    /// absent or malformed data starts out empty.
    ///
    /// [`load`]: StorageAdapter::load
    pub fn update<T, R>(&mut self, key: &str, f: impl FnOnce(&mut Vec<T>) -> R) -> AppResult<R>
    where
        T: Serialize + DeserializeOwned,
    {
        self.store.update(key, |raw| {
            let mut records = decode(key, raw);
            let result = f(&mut records);
            Ok((encode(key, &records)?, result))
        })
    }

    /// Removes the collection stored under `key`.
    pub fn remove(&mut self, key: &str) -> AppResult<()> {
        debug!("Removing '{}'", key);
        self.store.remove(key)
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

}

fn decode<T: DeserializeOwned>(key: &str, raw: Option<String>) -> Vec<T> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        warn!("Ignoring malformed data under '{}': {}", key, e);
        Vec::new()
    })
}

fn encode<T: Serialize>(key: &str, records: &[T]) -> AppResult<String> {
    let json = serde_json::to_string(records).map_err(|source| StorageError::Serialization {
        key: key.to_string(),
        source,
    })?;
    debug!("Encoded {} records ({} bytes) under '{}'", records.len(), json.len(), key);
    Ok(json)
}

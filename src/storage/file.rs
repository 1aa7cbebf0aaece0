//! On-disk key-value store.
//!
//! All keys live in one JSON object file. Every access holds an exclusive
//! advisory lock on a sidecar `<file>.lock`, and writes replace the file
//! atomically through a temp file in the same directory.

use super::{check_quota, KeyValueStore};
use crate::errors::{AppError, AppResult, LockError, StorageError};
use fs2::FileExt;
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// POSIX permissions for a newly created data directory (owner only).
#[cfg(unix)]
const DATA_DIR_PERMISSIONS: u32 = 0o700;

/// `KeyValueStore` persisted as a single JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    quota: usize,
}

impl FileStore {
    /// Opens the store at `path`, creating its parent directory if needed.
    ///
    /// The file itself is created lazily on the first write.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the parent directory cannot be created.
    pub fn open(path: impl Into<PathBuf>, quota: usize) -> AppResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            ensure_data_directory_exists(parent)?;
        }
        debug!("Opened file store at {:?}", path);
        Ok(Self { path, quota })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        let mut lock_path = self.path.clone().into_os_string();
        lock_path.push(".lock");
        PathBuf::from(lock_path)
    }

    /// Runs `f` while holding the exclusive lock on the sidecar file.
    fn with_lock<T>(&self, f: impl FnOnce() -> AppResult<T>) -> AppResult<T> {
        let lock_path = self.lock_path();
        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|source| LockError::AcquisitionFailed {
                path: lock_path.clone(),
                source,
            })?;

        FileExt::lock_exclusive(&lock_file).map_err(|source| LockError::AcquisitionFailed {
            path: lock_path.clone(),
            source,
        })?;

        let result = f();

        if let Err(e) = FileExt::unlock(&lock_file) {
            warn!("Failed to release lock {:?}: {}", lock_path, e);
        }
        result
    }

    fn read_entries(&self) -> AppResult<BTreeMap<String, String>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!("Store file {:?} is malformed, treating as empty: {}", self.path, e);
                Ok(BTreeMap::new())
            }
        }
    }

    fn write_entries(&self, key: &str, entries: &BTreeMap<String, String>) -> AppResult<()> {
        let json =
            serde_json::to_string_pretty(entries).map_err(|source| StorageError::Serialization {
                key: key.to_string(),
                source,
            })?;

        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(json.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| AppError::Io(e.error))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.with_lock(|| Ok(self.read_entries()?.get(key).cloned()))
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.with_lock(|| {
            let mut entries = self.read_entries()?;
            check_quota(&entries, key, value, self.quota)?;
            entries.insert(key.to_string(), value.to_string());
            self.write_entries(key, &entries)
        })
    }

    fn update<R, F>(&mut self, key: &str, f: F) -> AppResult<R>
    where
        F: FnOnce(Option<String>) -> AppResult<(String, R)>,
    {
        self.with_lock(|| {
            let mut entries = self.read_entries()?;
            let (value, result) = f(entries.get(key).cloned())?;
            check_quota(&entries, key, &value, self.quota)?;
            entries.insert(key.to_string(), value);
            self.write_entries(key, &entries)?;
            Ok(result)
        })
    }

    fn remove(&mut self, key: &str) -> AppResult<()> {
        self.with_lock(|| {
            let mut entries = self.read_entries()?;
            if entries.remove(key).is_some() {
                self.write_entries(key, &entries)?;
            }
            Ok(())
        })
    }
}

/// Ensures the data directory exists, creating it with owner-only
/// permissions if necessary.
///
/// # Errors
///
/// Returns `AppError::Io` if the directory cannot be created.
pub fn ensure_data_directory_exists(data_dir: &Path) -> AppResult<()> {
    if data_dir.as_os_str().is_empty() || data_dir.exists() {
        return Ok(());
    }

    fs::create_dir_all(data_dir).map_err(|e| {
        AppError::Io(io::Error::new(
            e.kind(),
            format!("Failed to create data directory: {}", e),
        ))
    })?;

    #[cfg(unix)]
    fs::set_permissions(data_dir, fs::Permissions::from_mode(DATA_DIR_PERMISSIONS))?;

    Ok(())
}

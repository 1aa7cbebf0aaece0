//! Export, import and clearing of all stored records.

use crate::constants::{CLEAR_CONFIRM_QUESTION, EXPORT_FILE_NAME};
use crate::errors::{AppError, AppResult, StorageError};
use crate::prompt::Confirm;
use crate::records::{JournalEntry, MoodEntry, RecordStore};
use crate::storage::KeyValueStore;
use blake3::Hasher;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Both collections in full, newest first, as written to `soulcare-data.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportBundle {
    #[serde(default)]
    pub moods: Vec<MoodEntry>,
    #[serde(default)]
    pub journal: Vec<JournalEntry>,
}

/// Report of a completed export.
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub path: PathBuf,
    pub moods: usize,
    pub journal: usize,
    /// Size of the written file in bytes.
    pub bytes: u64,
    /// BLAKE3 checksum of the written file.
    pub checksum: String,
}

/// Serializes both collections as pretty-printed JSON.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the records cannot be encoded.
pub fn export_data<S: KeyValueStore>(store: &RecordStore<S>) -> AppResult<String> {
    to_json(&bundle_of(store))
}

fn bundle_of<S: KeyValueStore>(store: &RecordStore<S>) -> ExportBundle {
    ExportBundle {
        moods: store.moods(),
        journal: store.journal(),
    }
}

fn to_json<T: Serialize>(bundle: &T) -> AppResult<String> {
    serde_json::to_string_pretty(bundle).map_err(|source| {
        StorageError::Serialization {
            key: EXPORT_FILE_NAME.to_string(),
            source,
        }
        .into()
    })
}

/// Writes the export to `path`, creating parent directories as needed.
pub fn export_to_file<S: KeyValueStore>(
    store: &RecordStore<S>,
    path: &Path,
) -> AppResult<ExportReport> {
    info!("Exporting data to {:?}", path);

    let bundle = bundle_of(store);
    let json = to_json(&bundle)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, json.as_bytes())?;

    let mut hasher = Hasher::new();
    hasher.update(json.as_bytes());
    let checksum = hasher.finalize().to_hex().to_string();
    debug!("Export checksum: {}", checksum);

    Ok(ExportReport {
        path: path.to_path_buf(),
        moods: bundle.moods.len(),
        journal: bundle.journal.len(),
        bytes: json.len() as u64,
        checksum,
    })
}

/// Parses an export bundle. Missing arrays read as empty.
///
/// # Errors
///
/// Returns `AppError::Import` if the text is not a valid bundle.
pub fn parse_bundle(json: &str) -> AppResult<ExportBundle> {
    serde_json::from_str(json)
        .map_err(|e| AppError::Import(format!("Not a valid SoulCare export: {}", e)))
}

/// Replaces both collections with the contents of an export.
pub fn import_data<S: KeyValueStore>(
    store: &mut RecordStore<S>,
    json: &str,
) -> AppResult<ExportBundle> {
    let bundle = parse_bundle(json)?;
    store.replace(&bundle.moods, &bundle.journal)?;
    info!(
        "Imported {} moods and {} journal entries",
        bundle.moods.len(),
        bundle.journal.len()
    );
    Ok(bundle)
}

/// Clears both collections once the user confirms.
///
/// Returns `false` without touching the store if the user declines.
pub fn clear_all_data<S: KeyValueStore>(
    store: &mut RecordStore<S>,
    confirm: &mut dyn Confirm,
) -> AppResult<bool> {
    if !confirm.confirm(CLEAR_CONFIRM_QUESTION) {
        debug!("Clear declined");
        return Ok(false);
    }
    store.clear()?;
    Ok(true)
}

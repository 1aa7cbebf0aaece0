//! Mood and journal records and the store that persists them.
//!
//! Both collections are kept newest-first. The in-memory vectors are never
//! cached: every operation reloads from the key-value store, mutates a fresh
//! copy and writes it back, so the store is the single source of truth.

use crate::constants::{ENTRY_DATE_FORMAT, JOURNAL_KEY, MOODS_KEY, MOOD_PRESETS};
use crate::errors::{AppError, AppResult};
use crate::storage::{KeyValueStore, StorageAdapter};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A timestamped mood check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    /// Creation time in milliseconds since the Unix epoch.
    pub id: i64,
    /// Creation time formatted for display.
    pub date: String,
    pub label: String,
    pub emoji: String,
}

/// A timestamped free-text note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Creation time in milliseconds since the Unix epoch.
    pub id: i64,
    /// Creation time formatted for display.
    pub date: String,
    /// Trimmed, never empty.
    pub text: String,
}

/// Result of submitting journal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalSubmission {
    Saved(JournalEntry),
    /// The text was empty after trimming; nothing was stored.
    NothingToSave,
}

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Record id for a creation time.
pub fn entry_id(at: &DateTime<Local>) -> i64 {
    at.timestamp_millis()
}

/// Display string for a creation time, e.g. `3/7/2024, 9:05:02 PM`.
pub fn display_date(at: &DateTime<Local>) -> String {
    at.format(ENTRY_DATE_FORMAT).to_string()
}

/// Looks up the preset emoji for a mood label, ignoring case.
///
/// ```
/// use soulcare::records::preset_emoji;
///
/// assert_eq!(preset_emoji("calm"), Some("😌"));
/// assert_eq!(preset_emoji("Elated"), None);
/// ```
pub fn preset_emoji(label: &str) -> Option<&'static str> {
    find_preset(label).map(|(_, emoji)| emoji)
}

fn find_preset(label: &str) -> Option<(&'static str, &'static str)> {
    MOOD_PRESETS
        .iter()
        .find(|(preset, _)| preset.eq_ignore_ascii_case(label.trim()))
        .copied()
}

/// Resolves the label and emoji for a mood check-in.
///
/// A label matching a preset, in any case, is stored with the preset's
/// spelling and may omit the emoji; any other label needs one.
///
/// # Errors
///
/// Returns `AppError::Record` if the label is empty, or if it is not a
/// preset and no emoji was given.
pub fn resolve_mood(label: &str, emoji: Option<&str>) -> AppResult<(String, String)> {
    let label = label.trim();
    if label.is_empty() {
        return Err(AppError::Record("Mood label cannot be empty".to_string()));
    }

    let preset = find_preset(label);
    let label = preset.map_or(label, |(preset_label, _)| preset_label);

    let emoji = match (emoji.map(str::trim).filter(|e| !e.is_empty()), preset) {
        (Some(emoji), _) => emoji,
        (None, Some((_, preset_emoji))) => preset_emoji,
        (None, None) => {
            let presets: Vec<&str> = MOOD_PRESETS.iter().map(|(l, _)| *l).collect();
            return Err(AppError::Record(format!(
                "No emoji for mood '{}'. Pass one explicitly or use a preset: {}",
                label,
                presets.join(", ")
            )));
        }
    };

    Ok((label.to_string(), emoji.to_string()))
}

/// The two record collections, persisted through a `StorageAdapter`.
#[derive(Debug)]
pub struct RecordStore<S> {
    storage: StorageAdapter<S>,
}

impl<S: KeyValueStore> RecordStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            storage: StorageAdapter::new(store),
        }
    }

    /// All mood entries, newest first.
    pub fn moods(&self) -> Vec<MoodEntry> {
        self.storage.load(MOODS_KEY)
    }

    /// All journal entries, newest first.
    pub fn journal(&self) -> Vec<JournalEntry> {
        self.storage.load(JOURNAL_KEY)
    }

    /// Records a mood at the front of the collection.
    pub fn add_mood(
        &mut self,
        label: &str,
        emoji: &str,
        at: DateTime<Local>,
    ) -> AppResult<MoodEntry> {
        let entry = MoodEntry {
            id: entry_id(&at),
            date: display_date(&at),
            label: label.to_string(),
            emoji: emoji.to_string(),
        };

        self.storage.update(MOODS_KEY, |moods: &mut Vec<MoodEntry>| {
            moods.insert(0, entry.clone())
        })?;

        info!("Saved mood '{}' (id {})", entry.label, entry.id);
        Ok(entry)
    }

    /// Records journal text at the front of the collection.
    ///
    /// Whitespace-only text is not stored and yields
    /// `JournalSubmission::NothingToSave`.
    pub fn add_journal(
        &mut self,
        raw_text: &str,
        at: DateTime<Local>,
    ) -> AppResult<JournalSubmission> {
        let text = raw_text.trim();
        if text.is_empty() {
            debug!("Journal submission was empty");
            return Ok(JournalSubmission::NothingToSave);
        }

        let entry = JournalEntry {
            id: entry_id(&at),
            date: display_date(&at),
            text: text.to_string(),
        };

        self.storage.update(JOURNAL_KEY, |journal: &mut Vec<JournalEntry>| {
            journal.insert(0, entry.clone())
        })?;

        info!(
            "Saved journal entry (id {}, {} chars)",
            entry.id,
            entry.text.chars().count()
        );
        Ok(JournalSubmission::Saved(entry))
    }

    /// Deletes every mood with `id`. Returns how many were removed.
    pub fn delete_mood(&mut self, id: i64) -> AppResult<usize> {
        let removed = self.storage.update(MOODS_KEY, |moods: &mut Vec<MoodEntry>| {
            let before = moods.len();
            moods.retain(|m| m.id != id);
            before - moods.len()
        })?;
        debug!("Deleted {} mood(s) with id {}", removed, id);
        Ok(removed)
    }

    /// Deletes every journal entry with `id`. Returns how many were removed.
    pub fn delete_journal(&mut self, id: i64) -> AppResult<usize> {
        let removed = self.storage.update(JOURNAL_KEY, |journal: &mut Vec<JournalEntry>| {
            let before = journal.len();
            journal.retain(|j| j.id != id);
            before - journal.len()
        })?;
        debug!("Deleted {} journal entr(ies) with id {}", removed, id);
        Ok(removed)
    }

    /// Removes both collections from the store.
    pub fn clear(&mut self) -> AppResult<()> {
        self.storage.remove(MOODS_KEY)?;
        self.storage.remove(JOURNAL_KEY)?;
        info!("Cleared all moods and journal entries");
        Ok(())
    }

    /// Overwrites both collections.
    pub fn replace(&mut self, moods: &[MoodEntry], journal: &[JournalEntry]) -> AppResult<()> {
        self.storage.save(MOODS_KEY, moods)?;
        self.storage.save(JOURNAL_KEY, journal)?;
        info!(
            "Replaced data: {} moods, {} journal entries",
            moods.len(),
            journal.len()
        );
        Ok(())
    }

    pub fn storage(&self) -> &StorageAdapter<S> {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::{Duration, TimeZone};

    fn at(hour: u32, minute: u32, second: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 7, hour, minute, second).unwrap()
    }

    #[test]
    fn test_display_date_matches_browser_locale_style() {
        assert_eq!(display_date(&at(21, 5, 2)), "3/7/2024, 9:05:02 PM");
        assert_eq!(display_date(&at(0, 0, 9)), "3/7/2024, 12:00:09 AM");
    }

    #[test]
    fn test_entry_id_is_millisecond_timestamp() {
        let t = at(8, 0, 0);
        assert_eq!(entry_id(&t), t.timestamp() * 1000);
    }

    #[test]
    fn test_resolve_mood() {
        assert_eq!(
            resolve_mood(" calm ", None).unwrap(),
            ("Calm".to_string(), "😌".to_string())
        );
        assert_eq!(
            resolve_mood("TIRED", Some("🥱")).unwrap(),
            ("Tired".to_string(), "🥱".to_string())
        );
        assert_eq!(
            resolve_mood("Elated", Some("🤩")).unwrap(),
            ("Elated".to_string(), "🤩".to_string())
        );
        assert!(matches!(resolve_mood("Elated", None), Err(AppError::Record(_))));
        assert!(matches!(resolve_mood("  ", Some("🙂")), Err(AppError::Record(_))));
    }

    #[test]
    fn test_add_mood_prepends() {
        let mut store = RecordStore::new(MemoryStore::new());
        let first = store.add_mood("Calm", "😌", at(9, 0, 0)).unwrap();
        let second = store.add_mood("Sad", "😢", at(10, 0, 0)).unwrap();

        let moods = store.moods();
        assert_eq!(moods, vec![second, first]);
    }

    #[test]
    fn test_insertion_order_wins_over_id_order() {
        let mut store = RecordStore::new(MemoryStore::new());
        let later = at(10, 0, 0);
        store.add_mood("Calm", "😌", later).unwrap();
        store.add_mood("Sad", "😢", later - Duration::hours(1)).unwrap();

        let labels: Vec<String> = store.moods().into_iter().map(|m| m.label).collect();
        assert_eq!(labels, vec!["Sad", "Calm"]);
    }

    #[test]
    fn test_add_journal_trims_and_rejects_blank() {
        let mut store = RecordStore::new(MemoryStore::new());

        assert_eq!(
            store.add_journal(" \n\t ", at(9, 0, 0)).unwrap(),
            JournalSubmission::NothingToSave
        );
        assert!(store.journal().is_empty());

        match store.add_journal("  slept well  ", at(9, 0, 0)).unwrap() {
            JournalSubmission::Saved(entry) => assert_eq!(entry.text, "slept well"),
            other => panic!("Expected saved entry, got {:?}", other),
        }
        assert_eq!(store.journal()[0].text, "slept well");
    }

    #[test]
    fn test_delete_removes_all_entries_with_id() {
        let mut store = RecordStore::new(MemoryStore::new());
        let t = at(9, 0, 0);
        store.add_mood("Calm", "😌", t).unwrap();
        store.add_mood("Happy", "😊", t).unwrap();
        let other = store.add_mood("Sad", "😢", at(9, 0, 1)).unwrap();

        assert_eq!(store.delete_mood(entry_id(&t)).unwrap(), 2);
        assert_eq!(store.moods(), vec![other]);
    }

    #[test]
    fn test_delete_missing_id_is_noop() {
        let mut store = RecordStore::new(MemoryStore::new());
        store.add_journal("one", at(9, 0, 0)).unwrap();
        let before = store.journal();

        assert_eq!(store.delete_journal(42).unwrap(), 0);
        assert_eq!(store.journal(), before);
    }

    #[test]
    fn test_clear_and_replace() {
        let mut store = RecordStore::new(MemoryStore::new());
        let mood = store.add_mood("Calm", "😌", at(9, 0, 0)).unwrap();
        store.add_journal("note", at(9, 1, 0)).unwrap();

        store.clear().unwrap();
        assert!(store.moods().is_empty());
        assert!(store.journal().is_empty());
        assert_eq!(store.storage().store().get(MOODS_KEY).unwrap(), None);

        store.replace(&[mood.clone()], &[]).unwrap();
        assert_eq!(store.moods(), vec![mood]);
    }
}

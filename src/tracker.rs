//! The tracker: user actions in, persisted records and refreshed views out.
//!
//! Every mutation follows the same path: change the record store, persist,
//! raise a toast where the user expects one, then push a fresh [`View`] to the
//! surface.

use crate::constants::{TOAST_DATA_CLEARED, TOAST_EMPTY_JOURNAL, TOAST_SAVED};
use crate::errors::AppResult;
use crate::export::{self, ExportBundle, ExportReport};
use crate::prompt::Confirm;
use crate::records::{Clock, JournalSubmission, MoodEntry, RecordStore, SystemClock};
use crate::storage::KeyValueStore;
use crate::toast::{Notifier, ToastTarget};
use crate::view::{self, Action, Surface, View};
use std::path::Path;
use tracing::debug;

pub struct Tracker<S, N, V> {
    records: RecordStore<S>,
    clock: Box<dyn Clock>,
    notifier: N,
    surface: V,
    journal_input: String,
}

impl<S, N, V> Tracker<S, N, V>
where
    S: KeyValueStore,
    N: Notifier,
    V: Surface,
{
    pub fn new(store: S, notifier: N, surface: V) -> Self {
        Self {
            records: RecordStore::new(store),
            clock: Box::new(SystemClock),
            notifier,
            surface,
            journal_input: String::new(),
        }
    }

    /// Replaces the clock used to stamp new entries.
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn records(&self) -> &RecordStore<S> {
        &self.records
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn surface(&self) -> &V {
        &self.surface
    }

    /// Rebuilds the view from storage and pushes it to the surface.
    pub fn refresh(&mut self) -> View {
        let view = view::refresh(&self.records);
        debug!(
            "Refreshed view: {} moods, {} journal entries",
            view.total_moods, view.total_journal
        );
        self.surface.present(&view);
        view
    }

    /// Records a mood check-in.
    pub fn add_mood(&mut self, label: &str, emoji: &str) -> AppResult<MoodEntry> {
        let entry = self.records.add_mood(label, emoji, self.clock.now())?;
        self.notifier.notify(ToastTarget::MoodSaved, TOAST_SAVED);
        self.refresh();
        Ok(entry)
    }

    /// Current contents of the journal input field.
    pub fn journal_text(&self) -> &str {
        &self.journal_input
    }

    pub fn set_journal_text(&mut self, text: impl Into<String>) {
        self.journal_input = text.into();
    }

    pub fn clear_journal_field(&mut self) {
        self.journal_input.clear();
    }

    /// Saves the journal input field as a new entry.
    ///
    /// Blank input leaves the store and the field untouched and toasts
    /// "Write something first". A saved entry clears the field.
    pub fn save_journal(&mut self) -> AppResult<JournalSubmission> {
        let submission = self
            .records
            .add_journal(&self.journal_input, self.clock.now())?;

        match &submission {
            JournalSubmission::NothingToSave => {
                self.notifier
                    .notify(ToastTarget::JournalSaved, TOAST_EMPTY_JOURNAL);
            }
            JournalSubmission::Saved(_) => {
                self.journal_input.clear();
                self.notifier.notify(ToastTarget::JournalSaved, TOAST_SAVED);
                self.refresh();
            }
        }
        Ok(submission)
    }

    /// Deletes moods by id. Returns how many were removed.
    pub fn delete_mood(&mut self, id: i64) -> AppResult<usize> {
        let removed = self.records.delete_mood(id)?;
        self.refresh();
        Ok(removed)
    }

    /// Deletes journal entries by id. Returns how many were removed.
    pub fn delete_journal(&mut self, id: i64) -> AppResult<usize> {
        let removed = self.records.delete_journal(id)?;
        self.refresh();
        Ok(removed)
    }

    /// Runs an action bound to a rendered row.
    pub fn dispatch(&mut self, action: Action) -> AppResult<usize> {
        match action {
            Action::DeleteMood(id) => self.delete_mood(id),
            Action::DeleteJournal(id) => self.delete_journal(id),
        }
    }

    pub fn export_data(&self) -> AppResult<String> {
        export::export_data(&self.records)
    }

    pub fn export_to_file(&self, path: &Path) -> AppResult<ExportReport> {
        export::export_to_file(&self.records, path)
    }

    /// Replaces all data with an export and refreshes.
    pub fn import_data(&mut self, json: &str) -> AppResult<ExportBundle> {
        let bundle = export::import_data(&mut self.records, json)?;
        self.refresh();
        Ok(bundle)
    }

    /// Clears everything after confirmation. Returns whether data was cleared.
    pub fn clear_all_data(&mut self, confirm: &mut dyn Confirm) -> AppResult<bool> {
        let cleared = export::clear_all_data(&mut self.records, confirm)?;
        if cleared {
            self.refresh();
            self.notifier.notify(ToastTarget::Alert, TOAST_DATA_CLEARED);
        }
        Ok(cleared)
    }
}

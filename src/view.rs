//! Declarative view of the record collections.
//!
//! `refresh` turns the stored collections into a [`View`]: the most recent
//! rows of each list plus the full counts. Rows carry an [`Action`] for their
//! delete control instead of handler markup, so a surface only has to hand the
//! action back to `Tracker::dispatch`.

use crate::constants::RECENT_LIMIT;
use crate::records::{JournalEntry, MoodEntry, RecordStore};
use crate::storage::KeyValueStore;
use std::fmt::Write;

/// A user action bound to a rendered row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    DeleteMood(i64),
    DeleteJournal(i64),
}

impl Action {
    /// Name used in the `data-action` attribute.
    pub fn name(self) -> &'static str {
        match self {
            Action::DeleteMood(_) => "delete-mood",
            Action::DeleteJournal(_) => "delete-journal",
        }
    }

    pub fn id(self) -> i64 {
        match self {
            Action::DeleteMood(id) | Action::DeleteJournal(id) => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodRow {
    pub emoji: String,
    pub label: String,
    pub date: String,
    pub on_delete: Action,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalRow {
    pub date: String,
    pub text: String,
    pub on_delete: Action,
}

impl From<&MoodEntry> for MoodRow {
    fn from(entry: &MoodEntry) -> Self {
        MoodRow {
            emoji: entry.emoji.clone(),
            label: entry.label.clone(),
            date: entry.date.clone(),
            on_delete: Action::DeleteMood(entry.id),
        }
    }
}

impl From<&JournalEntry> for JournalRow {
    fn from(entry: &JournalEntry) -> Self {
        JournalRow {
            date: entry.date.clone(),
            text: entry.text.clone(),
            on_delete: Action::DeleteJournal(entry.id),
        }
    }
}

/// Everything the page shows about the stored records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    pub moods: Vec<MoodRow>,
    pub journal: Vec<JournalRow>,
    /// Size of the full mood collection, not just the rows shown.
    pub total_moods: usize,
    /// Size of the full journal collection, not just the rows shown.
    pub total_journal: usize,
}

/// Builds the view from the current contents of `store`.
pub fn refresh<S: KeyValueStore>(store: &RecordStore<S>) -> View {
    build_view(&store.moods(), &store.journal())
}

/// Builds the view from already-loaded collections.
pub fn build_view(moods: &[MoodEntry], journal: &[JournalEntry]) -> View {
    View {
        moods: moods.iter().take(RECENT_LIMIT).map(MoodRow::from).collect(),
        journal: journal.iter().take(RECENT_LIMIT).map(JournalRow::from).collect(),
        total_moods: moods.len(),
        total_journal: journal.len(),
    }
}

/// A display that receives refreshed views.
///
/// Every method defaults to doing nothing, which is how a surface without
/// that element behaves.
pub trait Surface {
    fn mood_list(&mut self, _rows: &[MoodRow]) {}
    fn journal_list(&mut self, _rows: &[JournalRow]) {}
    fn counters(&mut self, _total_moods: usize, _total_journal: usize) {}

    /// Pushes a whole view to the surface.
    fn present(&mut self, view: &View) {
        self.mood_list(&view.moods);
        self.journal_list(&view.journal);
        self.counters(view.total_moods, view.total_journal);
    }
}

/// A surface with no elements at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSurface;

impl Surface for NoSurface {}

/// Escapes the five HTML-special characters.
///
/// ```
/// use soulcare::view::escape_html;
///
/// assert_eq!(
///     escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
///     "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;"
/// );
/// ```
pub fn escape_html(unsafe_text: &str) -> String {
    let mut escaped = String::with_capacity(unsafe_text.len());
    for ch in unsafe_text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn delete_button(out: &mut String, action: Action) {
    let _ = write!(
        out,
        r#"<button class="icon-btn" data-action="{}" data-id="{}">Delete</button>"#,
        action.name(),
        action.id()
    );
}

/// Renders the view as HTML fragments keyed by the page's element ids.
pub fn render_html(view: &View) -> String {
    let mut out = String::new();

    out.push_str("<ul id=\"moodList\">\n");
    for row in &view.moods {
        let _ = write!(
            out,
            r#"<li><div><strong>{} {}</strong><div class="muted small">{}</div></div>"#,
            escape_html(&row.emoji),
            escape_html(&row.label),
            escape_html(&row.date)
        );
        delete_button(&mut out, row.on_delete);
        out.push_str("</li>\n");
    }
    out.push_str("</ul>\n");

    out.push_str("<ul id=\"journalList\">\n");
    for row in &view.journal {
        let _ = write!(
            out,
            r#"<li><div><strong class="muted small">{}</strong><div>{}</div></div>"#,
            escape_html(&row.date),
            escape_html(&row.text)
        );
        delete_button(&mut out, row.on_delete);
        out.push_str("</li>\n");
    }
    out.push_str("</ul>\n");

    let _ = writeln!(out, r#"<span id="totalMoods">{}</span>"#, view.total_moods);
    let _ = writeln!(out, r#"<span id="totalJournal">{}</span>"#, view.total_journal);
    out
}

/// Renders the view as a plain-text listing for a terminal.
pub fn render_text(view: &View) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Moods ({} total)", view.total_moods);
    if view.moods.is_empty() {
        out.push_str("  (none yet)\n");
    }
    for row in &view.moods {
        let _ = writeln!(
            out,
            "  {} {}  {}  [id {}]",
            row.emoji,
            row.label,
            row.date,
            row.on_delete.id()
        );
    }

    let _ = writeln!(out, "\nJournal ({} total)", view.total_journal);
    if view.journal.is_empty() {
        out.push_str("  (none yet)\n");
    }
    for row in &view.journal {
        let _ = writeln!(out, "  {}  [id {}]", row.date, row.on_delete.id());
        for line in row.text.lines() {
            let _ = writeln!(out, "    {}", line);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mood(id: i64) -> MoodEntry {
        MoodEntry {
            id,
            date: format!("date {}", id),
            label: "Calm".to_string(),
            emoji: "😌".to_string(),
        }
    }

    fn note(id: i64, text: &str) -> JournalEntry {
        JournalEntry {
            id,
            date: format!("date {}", id),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_view_truncates_rows_but_counts_everything() {
        let moods: Vec<MoodEntry> = (0..20).rev().map(mood).collect();
        let journal = vec![note(1, "only one")];

        let view = build_view(&moods, &journal);

        assert_eq!(view.moods.len(), RECENT_LIMIT);
        assert_eq!(view.moods[0].on_delete, Action::DeleteMood(19));
        assert_eq!(view.moods[11].on_delete, Action::DeleteMood(8));
        assert_eq!(view.total_moods, 20);
        assert_eq!(view.journal.len(), 1);
        assert_eq!(view.total_journal, 1);
    }

    #[test]
    fn test_journal_markup_is_escaped() {
        let view = build_view(&[], &[note(7, "<script>alert('x')</script>")]);
        let html = render_html(&view);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#039;x&#039;)&lt;/script&gt;"));
        assert!(html.contains(r#"data-action="delete-journal" data-id="7""#));
    }

    #[test]
    fn test_html_has_counters_and_lists() {
        let view = build_view(&[mood(3)], &[]);
        let html = render_html(&view);

        assert!(html.contains(r#"<ul id="moodList">"#));
        assert!(html.contains(r#"<ul id="journalList">"#));
        assert!(html.contains(r#"<span id="totalMoods">1</span>"#));
        assert!(html.contains(r#"<span id="totalJournal">0</span>"#));
        assert!(html.contains(r#"data-action="delete-mood" data-id="3""#));
    }

    #[test]
    fn test_render_text() {
        let view = build_view(&[mood(3)], &[note(5, "line one\nline two")]);
        let text = render_text(&view);

        assert!(text.contains("Moods (1 total)"));
        assert!(text.contains("😌 Calm  date 3  [id 3]"));
        assert!(text.contains("    line one\n    line two\n"));

        let empty = render_text(&View::default());
        assert!(empty.contains("(none yet)"));
    }

    #[derive(Default)]
    struct CountersOnly {
        seen: Option<(usize, usize)>,
    }

    impl Surface for CountersOnly {
        fn counters(&mut self, total_moods: usize, total_journal: usize) {
            self.seen = Some((total_moods, total_journal));
        }
    }

    #[test]
    fn test_surface_without_lists_still_gets_counters() {
        let mut surface = CountersOnly::default();
        surface.present(&build_view(&[mood(1), mood(2)], &[]));
        assert_eq!(surface.seen, Some((2, 0)));

        NoSurface.present(&View::default());
    }
}

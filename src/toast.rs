//! Transient notifications.
//!
//! A toast is a short message shown on a named target and hidden again after
//! [`TOAST_VISIBLE_MS`]. Showing another toast on the same target replaces
//! its text and pushes the hide deadline back; nothing is queued.

use crate::constants::TOAST_VISIBLE_MS;
use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::debug;

/// Where a toast is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastTarget {
    MoodSaved,
    JournalSaved,
    /// Blocking alert used for completed destructive actions.
    Alert,
}

impl ToastTarget {
    /// Element id of the target on the page.
    pub fn element_id(self) -> &'static str {
        match self {
            ToastTarget::MoodSaved => "moodSaved",
            ToastTarget::JournalSaved => "journalSaved",
            ToastTarget::Alert => "alert",
        }
    }
}

impl fmt::Display for ToastTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

/// Receives toasts.
pub trait Notifier {
    fn notify(&mut self, target: ToastTarget, text: &str);
}

/// Tracks the text and visibility of every toast target.
#[derive(Debug, Clone)]
pub struct ToastBoard {
    visible_for: Duration,
    shown: HashMap<ToastTarget, (String, Instant)>,
}

impl Default for ToastBoard {
    fn default() -> Self {
        Self::new(Duration::from_millis(TOAST_VISIBLE_MS))
    }
}

impl ToastBoard {
    pub fn new(visible_for: Duration) -> Self {
        Self {
            visible_for,
            shown: HashMap::new(),
        }
    }

    /// Shows `text` on `target` at time `now`, resetting its hide deadline.
    pub fn show_at(&mut self, target: ToastTarget, text: &str, now: Instant) {
        self.shown
            .insert(target, (text.to_string(), now + self.visible_for));
    }

    /// Last text shown on `target`, whether or not it is still visible.
    pub fn text(&self, target: ToastTarget) -> Option<&str> {
        self.shown.get(&target).map(|(text, _)| text.as_str())
    }

    /// Whether `target` is still showing at time `now`.
    pub fn is_visible_at(&self, target: ToastTarget, now: Instant) -> bool {
        self.shown
            .get(&target)
            .map_or(false, |(_, hide_at)| now < *hide_at)
    }

    pub fn is_visible(&self, target: ToastTarget) -> bool {
        self.is_visible_at(target, Instant::now())
    }
}

impl Notifier for ToastBoard {
    fn notify(&mut self, target: ToastTarget, text: &str) {
        debug!("Toast on {}: {}", target, text);
        self.show_at(target, text, Instant::now());
    }
}

/// Writes toasts as lines to a terminal stream.
pub struct TerminalNotifier<W> {
    out: W,
}

impl TerminalNotifier<std::io::Stderr> {
    pub fn stderr() -> Self {
        Self {
            out: std::io::stderr(),
        }
    }
}

impl<W: Write> TerminalNotifier<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Notifier for TerminalNotifier<W> {
    fn notify(&mut self, target: ToastTarget, text: &str) {
        debug!("Toast on {}: {}", target, text);
        // A toast that cannot be printed is simply not seen.
        let _ = writeln!(self.out, "{}", text);
    }
}

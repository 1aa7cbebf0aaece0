/*!
# SoulCare

SoulCare is a small personal wellbeing tracker. It records mood check-ins and
journal notes in a local key-value store, shows the most recent of each, exports
and clears data, and runs a breathing-pulse meditation aid.

## Architecture

- `storage`: key-value stores and the JSON adapter over them
- `records`: the mood and journal collections
- `view`: declarative views of the collections and their renderers
- `toast`: transient notifications
- `export`: export, import and clearing of all data
- `meditation`: the breathing session and its audio
- `tracker`: ties user actions to storage, notifications and views
- `cli`, `config`, `logging`, `errors`: the application shell

## Usage Example

```rust
use soulcare::storage::MemoryStore;
use soulcare::toast::{ToastBoard, ToastTarget};
use soulcare::view::NoSurface;
use soulcare::Tracker;

fn main() -> soulcare::AppResult<()> {
    let mut tracker = Tracker::new(MemoryStore::new(), ToastBoard::default(), NoSurface);

    tracker.add_mood("Calm", "😌")?;
    tracker.set_journal_text("Walked by the river.");
    tracker.save_journal()?;

    let view = tracker.refresh();
    assert_eq!(view.total_moods, 1);
    assert_eq!(view.journal[0].text, "Walked by the river.");
    assert!(tracker.notifier().is_visible(ToastTarget::JournalSaved));
    Ok(())
}
```
*/

/// Command-line interface handling using clap
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// Error types and utilities for error handling
pub mod errors;
/// Export, import and clear operations
pub mod export;
/// Tracing subscriber setup
pub mod logging;
/// Breathing meditation session
pub mod meditation;
/// Yes/no confirmation prompts
pub mod prompt;
/// Mood and journal records
pub mod records;
/// Key-value persistence
pub mod storage;
/// Transient notifications
pub mod toast;
/// User action controller
pub mod tracker;
/// Declarative views and renderers
pub mod view;

pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use records::{JournalEntry, MoodEntry};
pub use tracker::Tracker;

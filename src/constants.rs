//! Constants used throughout the application.
//!
//! This module contains all constants used in the SoulCare application, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "soulcare";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str =
    "A small wellbeing tracker: mood check-ins, journal notes and a breathing timer";

// Logging
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";

// Configuration Keys & Environment Variables
/// Environment variable for the SoulCare data directory.
pub const ENV_VAR_SOULCARE_DIR: &str = "SOULCARE_DIR";
/// Environment variable for the meditation audio file.
pub const ENV_VAR_SOULCARE_AUDIO: &str = "SOULCARE_AUDIO";
/// Environment variable for the command used to play meditation audio.
pub const ENV_VAR_SOULCARE_PLAYER: &str = "SOULCARE_PLAYER";
/// Environment variable overriding the storage quota, in bytes.
pub const ENV_VAR_SOULCARE_QUOTA: &str = "SOULCARE_QUOTA_BYTES";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default data directory relative to the user's home directory.
pub const DEFAULT_DATA_SUBDIR: &str = ".local/share/soulcare";

// Validation
/// Characters forbidden in the audio player command.
pub const COMMAND_FORBIDDEN_CHARS: &[char] =
    &['|', '&', ';', '$', '(', ')', '`', '\\', '<', '>', '\'', '"'];

// Storage
/// Storage key holding the mood collection.
pub const MOODS_KEY: &str = "soulcare_moods_v1";
/// Storage key holding the journal collection.
pub const JOURNAL_KEY: &str = "soulcare_journal_v1";
/// File name of the on-disk key-value store inside the data directory.
pub const STORE_FILE_NAME: &str = "soulcare-storage.json";
/// Default storage quota, matching the usual per-origin browser limit.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;
/// Default file name for exported data.
pub const EXPORT_FILE_NAME: &str = "soulcare-data.json";

// View
/// Number of most recent entries shown per list.
pub const RECENT_LIMIT: usize = 12;
/// Display format for entry dates (en-US style, e.g. `3/7/2024, 9:05:02 PM`).
pub const ENTRY_DATE_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

// Notifications
/// Toast text shown after a successful save.
pub const TOAST_SAVED: &str = "Saved ✓";
/// Toast text shown when the journal input is empty.
pub const TOAST_EMPTY_JOURNAL: &str = "Write something first";
/// Notification shown after all data has been cleared.
pub const TOAST_DATA_CLEARED: &str = "Data cleared";
/// Question asked before clearing all data.
pub const CLEAR_CONFIRM_QUESTION: &str =
    "Clear all saved moods & journals? This cannot be undone.";
/// How long a toast stays visible after being shown, in milliseconds.
pub const TOAST_VISIBLE_MS: u64 = 1600;

// Meditation
/// Period of one full breath (grow and shrink), in milliseconds.
pub const BREATH_PERIOD_MS: u64 = 4000;
/// Peak scale of the breathing circle.
pub const BREATH_PEAK_SCALE: f64 = 1.28;
/// Resting scale of the breathing circle.
pub const BREATH_REST_SCALE: f64 = 1.0;
/// Interval between animation frames, in milliseconds.
pub const BREATH_FRAME_MS: u64 = 50;

/// Label/emoji pairs offered by the mood picker.
pub const MOOD_PRESETS: &[(&str, &str)] = &[
    ("Happy", "😊"),
    ("Calm", "😌"),
    ("Okay", "😐"),
    ("Sad", "😢"),
    ("Anxious", "😟"),
    ("Angry", "😠"),
    ("Tired", "😴"),
];

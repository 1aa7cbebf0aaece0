//! Configuration management for the soulcare application.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults.
//!
//! # Environment Variables
//!
//! - `SOULCARE_DIR`: Path to the data directory (defaults to ~/.local/share/soulcare)
//! - `SOULCARE_AUDIO`: Audio file played during meditation (optional)
//! - `SOULCARE_PLAYER`: Command used to play the audio file (optional)
//! - `SOULCARE_QUOTA_BYTES`: Storage quota in bytes (defaults to 5 MiB)
//! - `HOME`: Used for expanding the default data directory path

use crate::constants::{
    COMMAND_FORBIDDEN_CHARS, DEFAULT_DATA_SUBDIR, DEFAULT_QUOTA_BYTES, ENV_VAR_HOME,
    ENV_VAR_SOULCARE_AUDIO, ENV_VAR_SOULCARE_DIR, ENV_VAR_SOULCARE_PLAYER,
    ENV_VAR_SOULCARE_QUOTA, STORE_FILE_NAME,
};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Configuration for the soulcare application.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use soulcare::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     data_dir: PathBuf::from("/path/to/data"),
///     audio_file: None,
///     audio_player: None,
///     quota_bytes: 1024,
/// };
/// assert!(config.validate().is_ok());
/// ```
pub struct Config {
    /// Directory holding the key-value store file.
    pub data_dir: PathBuf,

    /// Audio file played while meditating, if any.
    pub audio_file: Option<PathBuf>,

    /// Player command used for `audio_file`, if any.
    pub audio_player: Option<String>,

    /// Maximum size of the key-value store in bytes.
    pub quota_bytes: usize,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("data_dir", &"[REDACTED_PATH]")
            .field(
                "audio_file",
                &self.audio_file.as_ref().map(|_| "[REDACTED_PATH]"),
            )
            .field(
                "audio_player",
                &self.audio_player.as_ref().map(|_| "[REDACTED_COMMAND]"),
            )
            .field("quota_bytes", &self.quota_bytes)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from(""),
            audio_file: None,
            audio_player: None,
            quota_bytes: DEFAULT_QUOTA_BYTES,
        }
    }
}

impl Config {
    /// Validates an audio player command string.
    ///
    /// The player is spawned directly (never through a shell), so the command
    /// must be a single program name or path without spaces or shell
    /// metacharacters.
    fn validate_player_command(player_cmd: &str) -> AppResult<&str> {
        if player_cmd.is_empty() {
            return Err(AppError::Config(
                "Audio player command cannot be empty".to_string(),
            ));
        }

        if player_cmd.contains(' ') {
            return Err(AppError::Config(
                "Audio player command cannot contain spaces. Use a wrapper script for players requiring arguments".to_string(),
            ));
        }

        if let Some(ch) = player_cmd
            .chars()
            .find(|ch| COMMAND_FORBIDDEN_CHARS.contains(ch))
        {
            return Err(AppError::Config(format!(
                "Audio player command cannot contain shell metacharacters: '{}'",
                ch
            )));
        }

        Ok(player_cmd)
    }

    fn expand_path(raw: &str) -> AppResult<PathBuf> {
        let expanded = shellexpand::full(raw)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;
        Ok(PathBuf::from(expanded.into_owned()))
    }

    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - A path fails to expand
    /// - The data directory resolves to an empty path
    /// - The player command fails validation
    /// - The quota is not a positive integer
    pub fn load() -> AppResult<Self> {
        let data_dir_str = env::var(ENV_VAR_SOULCARE_DIR).unwrap_or_else(|_| {
            let home = env::var(ENV_VAR_HOME).unwrap_or_default();
            format!("{}/{}", home, DEFAULT_DATA_SUBDIR)
        });
        let data_dir = Self::expand_path(&data_dir_str)?;

        if data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        let audio_file = match env::var(ENV_VAR_SOULCARE_AUDIO) {
            Ok(raw) if !raw.is_empty() => Some(Self::expand_path(&raw)?),
            _ => None,
        };

        let audio_player = match env::var(ENV_VAR_SOULCARE_PLAYER) {
            Ok(raw) => Some(Self::validate_player_command(&raw)?.to_string()),
            Err(_) => None,
        };

        let quota_bytes = match env::var(ENV_VAR_SOULCARE_QUOTA) {
            Ok(raw) => match raw.trim().parse::<usize>() {
                Ok(value) if value > 0 => value,
                _ => {
                    return Err(AppError::Config(format!(
                        "{} must be a positive integer, got '{}'",
                        ENV_VAR_SOULCARE_QUOTA, raw
                    )))
                }
            },
            Err(_) => DEFAULT_QUOTA_BYTES,
        };

        Ok(Config {
            data_dir,
            audio_file,
            audio_player,
            quota_bytes,
        })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` with one of the following messages:
    /// - "Data directory path is empty"
    /// - "Data directory must be an absolute path"
    /// - "Audio player command is empty"
    /// - "Storage quota must be positive"
    pub fn validate(&self) -> AppResult<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        if !self.data_dir.is_absolute() {
            return Err(AppError::Config(
                "Data directory must be an absolute path".to_string(),
            ));
        }

        if let Some(player) = &self.audio_player {
            if player.is_empty() {
                return Err(AppError::Config("Audio player command is empty".to_string()));
            }
        }

        if self.quota_bytes == 0 {
            return Err(AppError::Config("Storage quota must be positive".to_string()));
        }

        Ok(())
    }

    /// Path of the key-value store file inside the data directory.
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE_NAME)
    }
}

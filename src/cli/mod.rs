use crate::constants::{
    APP_DESCRIPTION, APP_NAME, EXPORT_FILE_NAME, LOG_FORMAT_JSON, LOG_FORMAT_TEXT,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// A small wellbeing tracker: mood check-ins, journal notes and a breathing timer
#[derive(Parser, Debug)]
#[command(name = APP_NAME, about = APP_DESCRIPTION, version, long_about = None)]
pub struct CliArgs {
    /// Log output format
    #[arg(
        long,
        global = true,
        default_value = LOG_FORMAT_TEXT,
        value_parser = [LOG_FORMAT_TEXT, LOG_FORMAT_JSON]
    )]
    pub log_format: String,

    /// Print verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Records a mood check-in (presets: Happy, Calm, Okay, Sad, Anxious, Angry, Tired)
    Mood {
        /// Mood label
        label: String,
        /// Emoji for the mood; optional for presets
        #[arg(short, long)]
        emoji: Option<String>,
    },

    /// Saves a journal entry
    Journal {
        /// Entry text; words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Shows the most recent moods and journal entries
    List {
        /// Render as HTML instead of text
        #[arg(long)]
        html: bool,
    },

    /// Deletes a mood by id
    DeleteMood { id: i64 },

    /// Deletes a journal entry by id
    DeleteJournal { id: i64 },

    /// Exports all data as JSON
    Export {
        /// Output file
        #[arg(short, long, default_value = EXPORT_FILE_NAME)]
        output: PathBuf,
    },

    /// Replaces all data with a previous export
    Import {
        /// Export file to read
        path: PathBuf,
    },

    /// Clears all moods and journal entries
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Runs the breathing animation until Ctrl-C or the given time
    Meditate {
        /// Stop automatically after this many seconds
        #[arg(short, long)]
        seconds: Option<u64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_with_and_without_emoji() {
        let args = CliArgs::parse_from(["soulcare", "mood", "Calm"]);
        assert_eq!(
            args.command,
            Commands::Mood {
                label: "Calm".to_string(),
                emoji: None
            }
        );

        let args = CliArgs::parse_from(["soulcare", "mood", "Elated", "-e", "🤩"]);
        assert_eq!(
            args.command,
            Commands::Mood {
                label: "Elated".to_string(),
                emoji: Some("🤩".to_string())
            }
        );
    }

    #[test]
    fn test_journal_collects_words() {
        let args = CliArgs::parse_from(["soulcare", "journal", "slept", "well"]);
        assert_eq!(
            args.command,
            Commands::Journal {
                text: vec!["slept".to_string(), "well".to_string()]
            }
        );
    }

    #[test]
    fn test_journal_requires_text() {
        assert!(CliArgs::try_parse_from(["soulcare", "journal"]).is_err());
    }

    #[test]
    fn test_export_default_output() {
        let args = CliArgs::parse_from(["soulcare", "export"]);
        assert_eq!(
            args.command,
            Commands::Export {
                output: PathBuf::from("soulcare-data.json")
            }
        );
    }

    #[test]
    fn test_global_flags() {
        let args =
            CliArgs::parse_from(["soulcare", "list", "--html", "-v", "--log-format", "json"]);
        assert!(args.verbose);
        assert_eq!(args.log_format, "json");
        assert_eq!(args.command, Commands::List { html: true });

        assert!(CliArgs::try_parse_from(["soulcare", "--log-format", "xml", "list"]).is_err());
    }

    #[test]
    fn test_delete_and_clear() {
        let args = CliArgs::parse_from(["soulcare", "delete-mood", "1700000000000"]);
        assert_eq!(args.command, Commands::DeleteMood { id: 1_700_000_000_000 });

        let args = CliArgs::parse_from(["soulcare", "clear", "--yes"]);
        assert_eq!(args.command, Commands::Clear { yes: true });
    }
}

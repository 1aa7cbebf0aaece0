/*!
# SoulCare - A Small Wellbeing Tracker

This file contains the main application flow: it sets up logging, loads the
configuration, opens the on-disk store and runs one command.

## Usage

```
soulcare [OPTIONS] <COMMAND>

Commands:
  mood            Records a mood check-in
  journal         Saves a journal entry
  list            Shows the most recent moods and journal entries
  delete-mood     Deletes a mood by id
  delete-journal  Deletes a journal entry by id
  export          Exports all data as JSON
  import          Replaces all data with a previous export
  clear           Clears all moods and journal entries
  meditate        Runs the breathing animation until Ctrl-C or the given time

Options:
      --log-format <LOG_FORMAT>  Log output format [default: text] [possible values: text, json]
  -v, --verbose                  Print verbose output
```

## Configuration

- `SOULCARE_DIR`: data directory (defaults to "~/.local/share/soulcare")
- `SOULCARE_AUDIO` / `SOULCARE_PLAYER`: audio file and player for `meditate`
- `SOULCARE_QUOTA_BYTES`: storage quota (defaults to 5 MiB)
*/

use clap::Parser;
use soulcare::cli::{CliArgs, Commands};
use soulcare::config::Config;
use soulcare::constants::{APP_NAME, TRACING_ROOT_SPAN_NAME};
use soulcare::errors::AppResult;
use soulcare::logging;
use soulcare::meditation::{audio_player_for, wait_for_stop, BreathingSession, TerminalPulse};
use soulcare::prompt::{AssumeAnswer, Confirm, LinePrompt};
use soulcare::records::{resolve_mood, JournalSubmission};
use soulcare::storage::FileStore;
use soulcare::toast::TerminalNotifier;
use soulcare::tracker::Tracker;
use soulcare::view::{render_html, render_text, NoSurface};
use std::fs;
use std::io::Stderr;
use std::time::Duration;
use tracing::{debug, info, info_span};
use uuid::Uuid;

type CliTracker = Tracker<FileStore, TerminalNotifier<Stderr>, NoSurface>;

fn main() -> AppResult<()> {
    let args = CliArgs::parse();
    logging::init_tracing(&args.log_format, args.verbose)?;

    let correlation_id = Uuid::new_v4();
    let root_span = info_span!(
        TRACING_ROOT_SPAN_NAME,
        service = APP_NAME,
        correlation_id = %correlation_id
    );
    let _guard = root_span.enter();

    info!("Starting soulcare");
    debug!("CLI arguments: {:?}", args);

    let config = Config::load()?;
    config.validate()?;
    debug!("Configuration: {:?}", config);

    let store = FileStore::open(config.store_path(), config.quota_bytes)?;
    let mut tracker = Tracker::new(store, TerminalNotifier::stderr(), NoSurface);

    run(args.command, &config, &mut tracker)
}

fn run(command: Commands, config: &Config, tracker: &mut CliTracker) -> AppResult<()> {
    match command {
        Commands::Mood { label, emoji } => {
            let (label, emoji) = resolve_mood(&label, emoji.as_deref())?;
            let entry = tracker.add_mood(&label, &emoji)?;
            println!("Saved mood {} {} (id {})", entry.emoji, entry.label, entry.id);
        }
        Commands::Journal { text } => {
            tracker.set_journal_text(text.join(" "));
            if let JournalSubmission::Saved(entry) = tracker.save_journal()? {
                println!("Saved journal entry (id {})", entry.id);
            }
        }
        Commands::List { html } => {
            let view = tracker.refresh();
            if html {
                print!("{}", render_html(&view));
            } else {
                print!("{}", render_text(&view));
            }
        }
        Commands::DeleteMood { id } => {
            let removed = tracker.delete_mood(id)?;
            if removed > 0 {
                println!("Deleted mood {}", id);
            }
        }
        Commands::DeleteJournal { id } => {
            let removed = tracker.delete_journal(id)?;
            if removed > 0 {
                println!("Deleted journal entry {}", id);
            }
        }
        Commands::Export { output } => {
            let report = tracker.export_to_file(&output)?;
            println!(
                "Exported {} moods and {} journal entries to {} ({} bytes, blake3 {})",
                report.moods,
                report.journal,
                report.path.display(),
                report.bytes,
                report.checksum
            );
        }
        Commands::Import { path } => {
            let json = fs::read_to_string(&path)?;
            let bundle = tracker.import_data(&json)?;
            println!(
                "Imported {} moods and {} journal entries",
                bundle.moods.len(),
                bundle.journal.len()
            );
        }
        Commands::Clear { yes } => {
            let mut confirm: Box<dyn Confirm> = if yes {
                Box::new(AssumeAnswer(true))
            } else {
                Box::new(LinePrompt::stdio())
            };
            if !tracker.clear_all_data(confirm.as_mut())? {
                println!("Nothing was cleared");
            }
        }
        Commands::Meditate { seconds } => meditate(config, seconds)?,
    }
    Ok(())
}

fn meditate(config: &Config, seconds: Option<u64>) -> AppResult<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()?;

    let mut session = BreathingSession::new(
        runtime.handle().clone(),
        TerminalPulse::new(std::io::stderr()),
        audio_player_for(config),
    );

    eprintln!("Breathe with the circle. Press Ctrl-C to stop.");
    session.start();

    let reason = runtime.block_on(wait_for_stop(
        tokio::signal::ctrl_c(),
        seconds.map(Duration::from_secs),
    ));

    session.stop();
    eprintln!();
    info!("Meditation finished: {:?}", reason);
    Ok(())
}

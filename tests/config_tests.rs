use serial_test::serial;
use std::env;
use std::path::PathBuf;
use tempfile::tempdir;

use soulcare::config::Config;
use soulcare::errors::AppError;
use soulcare::storage::{FileStore, KeyValueStore};

const VARS: [&str; 5] = [
    "HOME",
    "SOULCARE_DIR",
    "SOULCARE_AUDIO",
    "SOULCARE_PLAYER",
    "SOULCARE_QUOTA_BYTES",
];

/// Runs `f` with the given variables set and every other config variable
/// removed, restoring the previous environment afterwards.
fn with_env<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
    let saved: Vec<(&str, Option<String>)> = VARS.iter().map(|v| (*v, env::var(v).ok())).collect();

    for var in VARS {
        env::remove_var(var);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    let result = f();

    for (key, value) in saved {
        match value {
            Some(v) => env::set_var(key, v),
            None => env::remove_var(key),
        }
    }
    result
}

#[test]
#[serial]
fn test_config_defaults_under_home() {
    let home = tempdir().unwrap();
    let home_str = home.path().to_string_lossy().to_string();

    let config = with_env(&[("HOME", home_str.as_str())], Config::load).unwrap();

    assert_eq!(
        config.data_dir,
        PathBuf::from(&home_str).join(".local/share/soulcare")
    );
    assert_eq!(config.quota_bytes, 5 * 1024 * 1024);
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_config_expands_tilde_paths() {
    let home = tempdir().unwrap();
    let home_str = home.path().to_string_lossy().to_string();

    let config = with_env(
        &[
            ("HOME", home_str.as_str()),
            ("SOULCARE_DIR", "~/care"),
            ("SOULCARE_AUDIO", "~/sounds/rain.mp3"),
            ("SOULCARE_PLAYER", "mpv"),
        ],
        Config::load,
    )
    .unwrap();

    assert_eq!(config.data_dir, home.path().join("care"));
    assert_eq!(config.audio_file, Some(home.path().join("sounds/rain.mp3")));
    assert_eq!(config.audio_player.as_deref(), Some("mpv"));
}

#[test]
#[serial]
fn test_config_rejects_unsafe_player() {
    let dir = tempdir().unwrap();
    let dir_str = dir.path().to_string_lossy().to_string();

    let result = with_env(
        &[("SOULCARE_DIR", dir_str.as_str()), ("SOULCARE_PLAYER", "mpv;rm -rf")],
        Config::load,
    );

    match result {
        Err(AppError::Config(msg)) => assert!(msg.contains("Audio player")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_config_quota_flows_into_store() {
    let dir = tempdir().unwrap();
    let dir_str = dir.path().to_string_lossy().to_string();

    let config = with_env(
        &[("SOULCARE_DIR", dir_str.as_str()), ("SOULCARE_QUOTA_BYTES", "64")],
        Config::load,
    )
    .unwrap();
    assert_eq!(config.quota_bytes, 64);

    let mut store = FileStore::open(config.store_path(), config.quota_bytes).unwrap();
    store.set("k", "small").unwrap();
    assert!(store.set("k", &"x".repeat(100)).is_err());
    assert_eq!(store.get("k").unwrap().as_deref(), Some("small"));
}

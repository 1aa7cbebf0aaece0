use chrono::Local;
use std::path::PathBuf;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;
use tempfile::tempdir;

use soulcare::records::RecordStore;
use soulcare::storage::FileStore;

const WRITERS: usize = 2;
const ENTRIES_PER_WRITER: usize = 100;

/// Adds `ENTRIES_PER_WRITER` moods through a store of its own on `path`.
fn spawn_writer(path: PathBuf, barrier: Arc<Barrier>, writer: usize) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let store = FileStore::open(&path, 10 * 1024 * 1024).unwrap();
        let mut records = RecordStore::new(store);
        barrier.wait();

        for i in 0..ENTRIES_PER_WRITER {
            records
                .add_mood(&format!("writer-{}-{}", writer, i), "🙂", Local::now())
                .unwrap();
        }
    })
}

/// Separate handles on one store file never lose each other's additions.
#[test]
fn test_concurrent_writers_keep_every_entry() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("soulcare-storage.json");
    let barrier = Arc::new(Barrier::new(WRITERS));

    let handles: Vec<_> = (0..WRITERS)
        .map(|writer| spawn_writer(path.clone(), Arc::clone(&barrier), writer))
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let records = RecordStore::new(FileStore::open(&path, 10 * 1024 * 1024).unwrap());
    let moods = records.moods();
    assert_eq!(moods.len(), WRITERS * ENTRIES_PER_WRITER);

    for writer in 0..WRITERS {
        let prefix = format!("writer-{}-", writer);
        let mine: Vec<&str> = moods
            .iter()
            .filter(|m| m.label.starts_with(&prefix))
            .map(|m| m.label.as_str())
            .collect();
        assert_eq!(mine.len(), ENTRIES_PER_WRITER);
        // Each writer's own entries stay newest first.
        assert_eq!(mine[0], format!("{}{}", prefix, ENTRIES_PER_WRITER - 1));
    }
}

/// Deleting through one handle while another adds keeps both changes.
#[test]
fn test_concurrent_add_and_delete() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("soulcare-storage.json");

    let mut seed = RecordStore::new(FileStore::open(&path, 1024 * 1024).unwrap());
    let mut ids = Vec::new();
    for i in 0..ENTRIES_PER_WRITER {
        let entry = seed.add_mood(&format!("old-{}", i), "😐", Local::now()).unwrap();
        ids.push(entry.id);
    }
    ids.sort_unstable();
    ids.dedup();
    // New entries must not share a millisecond id with the old ones.
    thread::sleep(Duration::from_millis(5));

    let barrier = Arc::new(Barrier::new(2));
    let adder = spawn_writer(path.clone(), Arc::clone(&barrier), 0);
    let deleter = {
        let path = path.clone();
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            let mut records = RecordStore::new(FileStore::open(&path, 1024 * 1024).unwrap());
            barrier.wait();
            for id in ids {
                records.delete_mood(id).unwrap();
            }
        })
    };
    adder.join().unwrap();
    deleter.join().unwrap();

    let moods = RecordStore::new(FileStore::open(&path, 1024 * 1024).unwrap()).moods();
    assert!(moods.iter().all(|m| !m.label.starts_with("old-")));
    assert_eq!(moods.len(), ENTRIES_PER_WRITER);
}

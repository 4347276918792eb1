//! Recording store persistence tests
//!
//! These tests verify the durable-list invariants over both the in-memory
//! fake backend and the real file-backed store.

use tapenote::desktop::FileStore;
use tapenote::testing::MemoryStore;
use tapenote::{KeyValueStore, RecordingEntry, RecordingStore, STORAGE_KEY};

fn entry(uri: &str, name: &str) -> RecordingEntry {
    RecordingEntry::new(uri, name, "audio/m4a")
}

#[test]
fn test_fresh_store_is_empty() {
    let store = RecordingStore::load(Box::new(MemoryStore::new()));
    assert!(store.is_empty(), "A fresh store should have no entries");
}

#[test]
fn test_append_survives_restart_at_tail() {
    let backend = MemoryStore::new();
    let mut store = RecordingStore::load(Box::new(backend.clone()));

    store
        .append(entry("file:///a.m4a", "recording-1.m4a"))
        .unwrap();
    store
        .append(entry("file:///b.m4a", "recording-2.m4a"))
        .unwrap();

    // Reload over the same blob, as a process restart would
    let reloaded = RecordingStore::load(Box::new(backend));

    assert_eq!(reloaded.len(), 2);
    let matches: Vec<_> = reloaded
        .entries()
        .iter()
        .filter(|e| e.uri == "file:///b.m4a")
        .collect();
    assert_eq!(matches.len(), 1, "The appended entry appears exactly once");
    assert_eq!(
        reloaded.entries().last().unwrap().uri,
        "file:///b.m4a",
        "The latest append should sit at the tail"
    );
}

#[test]
fn test_remove_is_idempotent() {
    let mut store = RecordingStore::load(Box::new(MemoryStore::new()));
    store
        .append(entry("file:///a.m4a", "recording-1.m4a"))
        .unwrap();

    store.remove("file:///a.m4a").unwrap();
    store.remove("file:///a.m4a").unwrap();
    store.remove("file:///never-there.m4a").unwrap();

    assert!(store.is_empty());
}

#[test]
fn test_append_then_remove_restores_previous_sequence() {
    let mut store = RecordingStore::load(Box::new(MemoryStore::new()));
    store
        .append(entry("file:///a.m4a", "recording-1.m4a"))
        .unwrap();
    store
        .append(entry("file:///b.m4a", "recording-2.m4a"))
        .unwrap();
    let before: Vec<_> = store.entries().to_vec();

    store
        .append(entry("file:///c.m4a", "recording-3.m4a"))
        .unwrap();
    store.remove("file:///c.m4a").unwrap();

    assert_eq!(
        store.entries(),
        before.as_slice(),
        "Append followed by remove of the same entry is an identity"
    );
}

#[test]
fn test_corrupt_blob_loads_as_empty_list() {
    let backend = MemoryStore::with_blob(STORAGE_KEY, "{\"definitely\": \"not a list\"");
    let store = RecordingStore::load(Box::new(backend));
    assert!(
        store.is_empty(),
        "A corrupted blob should fail soft to an empty list"
    );
}

#[test]
fn test_empty_blob_loads_as_empty_list() {
    let backend = MemoryStore::with_blob(STORAGE_KEY, "");
    let store = RecordingStore::load(Box::new(backend));
    assert!(store.is_empty());
}

#[test]
fn test_round_trip_for_any_length() {
    for n in 0..6 {
        let backend = MemoryStore::new();
        let mut store = RecordingStore::load(Box::new(backend.clone()));

        let entries: Vec<RecordingEntry> = (0..n)
            .map(|i| {
                entry(
                    &format!("file:///{}.m4a", i),
                    &format!("recording-{}.m4a", i),
                )
            })
            .collect();
        for e in &entries {
            store.append(e.clone()).unwrap();
        }

        let reloaded = RecordingStore::load(Box::new(backend));
        assert_eq!(
            reloaded.entries(),
            entries.as_slice(),
            "Round trip should preserve all {} entries in order",
            n
        );
    }
}

#[test]
fn test_file_store_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();

    {
        let backend = FileStore::with_dir(dir.path().to_path_buf()).unwrap();
        let mut store = RecordingStore::load(Box::new(backend));
        store
            .append(entry("file:///a.wav", "recording-1.wav"))
            .unwrap();
    }

    // A brand-new backend over the same directory sees the same list
    let backend = FileStore::with_dir(dir.path().to_path_buf()).unwrap();
    let store = RecordingStore::load(Box::new(backend));

    assert_eq!(store.len(), 1);
    assert_eq!(store.entries()[0].uri, "file:///a.wav");
}

#[test]
fn test_file_store_corrupt_file_fails_soft() {
    let dir = tempfile::tempdir().unwrap();

    let mut backend = FileStore::with_dir(dir.path().to_path_buf()).unwrap();
    backend.set_item(STORAGE_KEY, "garbage[[[").unwrap();

    let store = RecordingStore::load(Box::new(backend));
    assert!(store.is_empty());
}

#[test]
fn test_serialized_entry_shape() {
    let backend = MemoryStore::new();
    let mut store = RecordingStore::load(Box::new(backend.clone()));
    store
        .append(entry("file:///a.m4a", "recording-1.m4a"))
        .unwrap();

    let blob = backend.get_item(STORAGE_KEY).unwrap().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&blob).unwrap();

    assert_eq!(parsed[0]["uri"], "file:///a.m4a");
    assert_eq!(parsed[0]["name"], "recording-1.m4a");
    assert_eq!(
        parsed[0]["type"], "audio/m4a",
        "The mime type is persisted under the 'type' key"
    );
}

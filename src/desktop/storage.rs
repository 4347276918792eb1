//! File-backed key-value store.
//!
//! Each key maps to one JSON file under the local data directory. Values are
//! opaque strings; the recording store layers serialization on top.

use crate::platform::KeyValueStore;
use crate::Result;
use std::fs;
use std::path::PathBuf;

pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store blobs under the local data directory.
    pub fn new() -> Result<Self> {
        let dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tapenote");
        Self::with_dir(dir)
    }

    /// Store blobs under the given directory.
    pub fn with_dir(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_key_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::with_dir(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.get_item("recorded-uris").unwrap(), None);
    }

    #[test]
    fn test_set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::with_dir(dir.path().to_path_buf()).unwrap();

        store.set_item("recorded-uris", "[1,2,3]").unwrap();
        assert_eq!(
            store.get_item("recorded-uris").unwrap().as_deref(),
            Some("[1,2,3]")
        );
    }

    #[test]
    fn test_set_replaces_previous_blob() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::with_dir(dir.path().to_path_buf()).unwrap();

        store.set_item("recorded-uris", "first").unwrap();
        store.set_item("recorded-uris", "second").unwrap();
        assert_eq!(
            store.get_item("recorded-uris").unwrap().as_deref(),
            Some("second")
        );
    }

    #[test]
    fn test_keys_are_independent_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::with_dir(dir.path().to_path_buf()).unwrap();

        store.set_item("recorded-uris", "a").unwrap();
        store.set_item("settings", "b").unwrap();

        assert_eq!(store.get_item("recorded-uris").unwrap().as_deref(), Some("a"));
        assert_eq!(store.get_item("settings").unwrap().as_deref(), Some("b"));
    }
}

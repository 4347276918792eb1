//! Persisted recording list.
//!
//! An ordered sequence of recording metadata, durable across restarts via a
//! key-value blob store under a fixed key. The in-memory copy is the source
//! of truth for rendering; every mutation rewrites the full serialized list.

use crate::platform::KeyValueStore;
use crate::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Fixed key the serialized recording list is stored under.
pub const STORAGE_KEY: &str = "recorded-uris";

/// Metadata of one persisted recording.
///
/// The uri is the identity key and unique within the store; entries are never
/// mutated after creation, only appended or removed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingEntry {
    /// File uri of the recording
    pub uri: String,
    /// Display name, derived from the completion timestamp
    pub name: String,
    /// Mime type of the recorded file
    #[serde(rename = "type")]
    pub mime_type: String,
}

impl RecordingEntry {
    pub fn new(
        uri: impl Into<String>,
        name: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            name: name.into(),
            mime_type: mime_type.into(),
        }
    }
}

/// Ordered, durable list of recordings (insertion order = completion order).
pub struct RecordingStore {
    entries: Vec<RecordingEntry>,
    backend: Box<dyn KeyValueStore>,
}

impl RecordingStore {
    /// Load the persisted list from the backend.
    ///
    /// An absent or empty blob yields an empty list. A corrupted blob fails
    /// soft: it is discarded with a logged warning, never an error.
    pub fn load(backend: Box<dyn KeyValueStore>) -> Self {
        let entries = match backend.get_item(STORAGE_KEY) {
            Ok(Some(blob)) if !blob.trim().is_empty() => {
                match serde_json::from_str::<Vec<RecordingEntry>>(&blob) {
                    Ok(entries) => {
                        debug!("Loaded {} recording(s)", entries.len());
                        entries
                    }
                    Err(e) => {
                        warn!("Discarding unreadable recording list: {}", e);
                        Vec::new()
                    }
                }
            }
            Ok(_) => Vec::new(),
            Err(e) => {
                warn!("Failed to read recording list: {}", e);
                Vec::new()
            }
        };

        Self { entries, backend }
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[RecordingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if an entry with the given uri exists.
    pub fn contains(&self, uri: &str) -> bool {
        self.entries.iter().any(|entry| entry.uri == uri)
    }

    /// Append an entry at the tail and persist the full list.
    ///
    /// On a durable-write failure the in-memory list keeps the entry and the
    /// error is returned; the next successful mutation rewrites the full list
    /// and reconciles the miss.
    pub fn append(&mut self, entry: RecordingEntry) -> Result<()> {
        if self.contains(&entry.uri) {
            warn!("Duplicate recording uri ignored: {}", entry.uri);
            return Ok(());
        }

        self.entries.push(entry);
        self.persist()
    }

    /// Remove the entry with the given uri and persist the remainder.
    ///
    /// A no-op (including no durable write) when the uri is absent. Relative
    /// order of the remaining entries is preserved.
    pub fn remove(&mut self, uri: &str) -> Result<()> {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.uri != uri);

        if self.entries.len() == before {
            debug!("Remove ignored, uri not in store: {}", uri);
            return Ok(());
        }

        self.persist()
    }

    fn persist(&mut self) -> Result<()> {
        let blob = serde_json::to_string(&self.entries)?;
        if let Err(e) = self.backend.set_item(STORAGE_KEY, &blob) {
            warn!("Recording list not persisted: {}", e);
            return Err(e);
        }
        Ok(())
    }
}

//! Fake implementations of the platform capability traits.
//!
//! These fakes implement the traits from `crate::platform` to enable testing
//! the recording components without real audio devices or disk storage. Each
//! constructor sets up one scenario; shared probes expose what the component
//! under test did to the capability.

use crate::platform::{
    AudioMode, AudioOutput, KeyValueStore, PermissionClient, PermissionState, RecorderConfig,
    RecorderFactory, RecorderHandle, RecorderStatus, StatusObserver,
};
use crate::{Result, TapenoteError};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Fake permission client with a fixed answer.
pub struct FakePermission {
    answer: Option<PermissionState>,
    calls: Arc<AtomicUsize>,
}

impl FakePermission {
    pub fn granted() -> Self {
        Self::answering(Some(PermissionState::Granted))
    }

    pub fn denied() -> Self {
        Self::answering(Some(PermissionState::Denied))
    }

    pub fn undetermined() -> Self {
        Self::answering(Some(PermissionState::Undetermined))
    }

    /// The query itself errors (no prompt subsystem available).
    pub fn failing() -> Self {
        Self::answering(None)
    }

    fn answering(answer: Option<PermissionState>) -> Self {
        Self {
            answer,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Counter of prompt invocations, for at-most-once assertions.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl PermissionClient for FakePermission {
    fn request_permission(&self) -> Result<PermissionState> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.answer {
            Some(state) => Ok(state),
            None => Err(TapenoteError::PermissionError(
                "permission subsystem unavailable".into(),
            )),
        }
    }
}

#[derive(Default)]
struct RecorderState {
    handles_created: AtomicUsize,
    live_handles: AtomicUsize,
    max_live_handles: AtomicUsize,
    audio_mode_calls: AtomicUsize,
    fail_audio_mode: AtomicBool,
    fail_prepare: AtomicBool,
    fail_start: AtomicBool,
    fail_stop: AtomicBool,
    next_uri: Mutex<String>,
}

/// Read-only view of what a [`FakeRecorder`] has been asked to do.
#[derive(Clone)]
pub struct RecorderProbe {
    state: Arc<RecorderState>,
}

impl RecorderProbe {
    /// Total handles allocated so far.
    pub fn handles_created(&self) -> usize {
        self.state.handles_created.load(Ordering::SeqCst)
    }

    /// Handles currently capturing.
    pub fn live_handles(&self) -> usize {
        self.state.live_handles.load(Ordering::SeqCst)
    }

    /// Most handles ever capturing at the same time.
    pub fn max_live_handles(&self) -> usize {
        self.state.max_live_handles.load(Ordering::SeqCst)
    }

    /// Number of audio-mode calls made before recordings.
    pub fn audio_mode_calls(&self) -> usize {
        self.state.audio_mode_calls.load(Ordering::SeqCst)
    }
}

/// Fake recorder factory producing in-memory handles.
pub struct FakeRecorder {
    state: Arc<RecorderState>,
}

impl FakeRecorder {
    /// Handles stop successfully and report the given uri.
    pub fn returning_uri(uri: &str) -> Self {
        let recorder = Self {
            state: Arc::new(RecorderState::default()),
        };
        *recorder.state.next_uri.lock() = uri.to_string();
        recorder
    }

    /// `set_audio_mode` errors.
    pub fn failing_audio_mode() -> Self {
        let recorder = Self::returning_uri("file:///unused.m4a");
        recorder.state.fail_audio_mode.store(true, Ordering::SeqCst);
        recorder
    }

    /// `prepare` errors on every handle.
    pub fn failing_prepare() -> Self {
        let recorder = Self::returning_uri("file:///unused.m4a");
        recorder.state.fail_prepare.store(true, Ordering::SeqCst);
        recorder
    }

    /// `start` errors on every handle.
    pub fn failing_start() -> Self {
        let recorder = Self::returning_uri("file:///unused.m4a");
        recorder.state.fail_start.store(true, Ordering::SeqCst);
        recorder
    }

    /// `stop` errors on every handle.
    pub fn failing_stop() -> Self {
        let recorder = Self::returning_uri("file:///unused.m4a");
        recorder.state.fail_stop.store(true, Ordering::SeqCst);
        recorder
    }

    /// Probe into this recorder's observed usage.
    pub fn probe(&self) -> RecorderProbe {
        RecorderProbe {
            state: Arc::clone(&self.state),
        }
    }
}

impl RecorderFactory for FakeRecorder {
    fn set_audio_mode(&self, mode: AudioMode) -> Result<()> {
        self.state.audio_mode_calls.fetch_add(1, Ordering::SeqCst);
        if self.state.fail_audio_mode.load(Ordering::SeqCst) {
            return Err(TapenoteError::RecorderError("audio mode rejected".into()));
        }
        if !mode.allows_recording {
            return Err(TapenoteError::RecorderError(
                "audio mode does not allow recording".into(),
            ));
        }
        Ok(())
    }

    fn create_handle(&self) -> Result<Box<dyn RecorderHandle>> {
        self.state.handles_created.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeHandle {
            state: Arc::clone(&self.state),
            observer: None,
            prepared: false,
            capturing: false,
            uri: None,
        }))
    }
}

struct FakeHandle {
    state: Arc<RecorderState>,
    observer: Option<StatusObserver>,
    prepared: bool,
    capturing: bool,
    uri: Option<String>,
}

impl FakeHandle {
    fn notify(&self, status: RecorderStatus) {
        if let Some(observer) = &self.observer {
            observer(status);
        }
    }

    fn set_capturing(&mut self, capturing: bool) {
        if capturing == self.capturing {
            return;
        }
        self.capturing = capturing;
        if capturing {
            let live = self.state.live_handles.fetch_add(1, Ordering::SeqCst) + 1;
            self.state.max_live_handles.fetch_max(live, Ordering::SeqCst);
        } else {
            self.state.live_handles.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

impl RecorderHandle for FakeHandle {
    fn prepare(&mut self, _config: &RecorderConfig) -> Result<()> {
        if self.state.fail_prepare.load(Ordering::SeqCst) {
            return Err(TapenoteError::RecorderError("prepare failed".into()));
        }
        self.prepared = true;
        Ok(())
    }

    fn start(&mut self) -> Result<()> {
        if self.state.fail_start.load(Ordering::SeqCst) {
            return Err(TapenoteError::RecorderError("start failed".into()));
        }
        if !self.prepared {
            return Err(TapenoteError::RecorderError("handle not prepared".into()));
        }
        self.set_capturing(true);
        self.notify(RecorderStatus {
            can_record: true,
            is_recording: true,
            duration_ms: 0,
        });
        Ok(())
    }

    fn stop(&mut self) -> Result<String> {
        self.set_capturing(false);
        if self.state.fail_stop.load(Ordering::SeqCst) {
            return Err(TapenoteError::RecorderError("stop failed".into()));
        }
        let uri = self.state.next_uri.lock().clone();
        self.uri = Some(uri.clone());
        self.notify(RecorderStatus {
            can_record: false,
            is_recording: false,
            duration_ms: 0,
        });
        Ok(uri)
    }

    fn set_status_observer(&mut self, observer: StatusObserver) {
        self.observer = Some(observer);
    }

    fn uri(&self) -> Option<String> {
        self.uri.clone()
    }
}

impl Drop for FakeHandle {
    fn drop(&mut self) {
        self.set_capturing(false);
    }
}

/// Fake audio output that records played uris.
pub struct FakeOutput {
    played: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl FakeOutput {
    pub fn new() -> Self {
        Self {
            played: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    /// Every `load_and_play` errors.
    pub fn failing() -> Self {
        Self {
            played: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    /// Shared list of uris playback was requested for.
    pub fn played(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.played)
    }
}

impl Default for FakeOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioOutput for FakeOutput {
    fn load_and_play(&mut self, uri: &str) -> Result<()> {
        if self.fail {
            return Err(TapenoteError::PlaybackError(format!(
                "cannot load {}",
                uri
            )));
        }
        self.played.lock().push(uri.to_string());
        Ok(())
    }
}

/// In-memory key-value store.
///
/// Clones share the same map, which lets a test reload a fresh
/// `RecordingStore` over the same blob to simulate a process restart.
#[derive(Clone)]
pub struct MemoryStore {
    map: Arc<Mutex<HashMap<String, String>>>,
    writes: Arc<AtomicUsize>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            map: Arc::new(Mutex::new(HashMap::new())),
            writes: Arc::new(AtomicUsize::new(0)),
            fail_writes: false,
        }
    }

    /// Pre-seed a blob under the given key.
    pub fn with_blob(key: &str, blob: &str) -> Self {
        let store = Self::new();
        store.map.lock().insert(key.to_string(), blob.to_string());
        store
    }

    /// Every `set_item` errors; reads still work.
    pub fn failing_writes() -> Self {
        Self {
            map: Arc::new(Mutex::new(HashMap::new())),
            writes: Arc::new(AtomicUsize::new(0)),
            fail_writes: true,
        }
    }

    /// Counter of attempted durable writes.
    pub fn writes(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.writes)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.map.lock().get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(TapenoteError::StorageError(
                "durable write rejected".into(),
            ));
        }
        self.map.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

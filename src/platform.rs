//! Platform capability traits.
//!
//! These traits define the contracts between the recording components and the
//! host platform without depending on concrete implementations. They enable:
//! - Testability via fake implementations
//! - Flexibility to swap audio/storage backends
//! - Clear API boundaries around the recording logic

use crate::Result;

/// Result of the platform's microphone-permission query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PermissionState {
    /// The user has not answered the prompt yet
    #[default]
    Undetermined,
    /// Recording is allowed
    Granted,
    /// Recording is not allowed
    Denied,
}

impl PermissionState {
    /// Check if recording is allowed
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionState::Granted)
    }

    /// Check if recording was refused
    pub fn is_denied(&self) -> bool {
        matches!(self, PermissionState::Denied)
    }

    /// Check if the prompt has not resolved yet
    pub fn is_undetermined(&self) -> bool {
        matches!(self, PermissionState::Undetermined)
    }
}

impl std::fmt::Display for PermissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PermissionState::Undetermined => write!(f, "Undetermined"),
            PermissionState::Granted => write!(f, "Granted"),
            PermissionState::Denied => write!(f, "Denied"),
        }
    }
}

/// Microphone permission abstraction.
///
/// Implementors trigger the platform's permission prompt. Callers go through
/// [`crate::permission::PermissionGate`], which caches the answer and fails
/// closed on query errors.
pub trait PermissionClient {
    /// Ask the platform whether recording is allowed.
    ///
    /// May show a prompt to the user. Returns `Err` if the query itself
    /// cannot be made (missing subsystem, IPC failure).
    fn request_permission(&self) -> Result<PermissionState>;
}

/// Audio subsystem mode flags set before a recording starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AudioMode {
    /// Whether microphone capture is allowed
    pub allows_recording: bool,
    /// Whether playback continues while the device is in silent mode
    pub plays_in_silent_mode: bool,
}

impl AudioMode {
    /// Mode flags used while a recording is in progress.
    pub fn recording() -> Self {
        Self {
            allows_recording: true,
            plays_in_silent_mode: true,
        }
    }
}

/// Fixed codec/container configuration for a recording.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecorderConfig {
    /// Target sample rate in Hz
    pub sample_rate: u32,
    /// Target channel count
    pub channels: u16,
    /// Target encoder bit rate in bits per second
    pub bit_rate: u32,
    /// File extension used for produced recordings
    pub extension: String,
    /// Mime type recorded alongside produced entries
    pub mime_type: String,
}

impl RecorderConfig {
    /// High-quality AAC/m4a preset (44.1 kHz stereo at 128 kbps).
    pub fn high_quality() -> Self {
        Self {
            sample_rate: 44_100,
            channels: 2,
            bit_rate: 128_000,
            extension: "m4a".to_string(),
            mime_type: "audio/m4a".to_string(),
        }
    }

    /// Uncompressed PCM WAV preset used by the desktop backend.
    pub fn wav() -> Self {
        Self {
            sample_rate: 44_100,
            channels: 1,
            bit_rate: 705_600,
            extension: "wav".to_string(),
            mime_type: "audio/wav".to_string(),
        }
    }
}

/// Status report delivered by a recorder handle to its observer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecorderStatus {
    /// Whether the handle can (re)start capturing
    pub can_record: bool,
    /// Whether the handle is currently capturing
    pub is_recording: bool,
    /// Captured duration so far in milliseconds
    pub duration_ms: u64,
}

/// Callback invoked with recorder status updates.
///
/// Updates are delivered strictly after the `start()` call that registered
/// the observer, never before.
pub type StatusObserver = Box<dyn Fn(RecorderStatus)>;

/// One in-progress platform recording.
///
/// A handle is exclusively owned by a single [`crate::RecordingSession`] and
/// is discarded after `stop()`, successful or not.
pub trait RecorderHandle {
    /// Allocate capture resources for the given configuration.
    fn prepare(&mut self, config: &RecorderConfig) -> Result<()>;

    /// Begin (or resume) capturing audio.
    fn start(&mut self) -> Result<()>;

    /// Stop capturing, finalize the recording to a file and release the
    /// underlying resources. Returns the uri of the produced file.
    fn stop(&mut self) -> Result<String>;

    /// Register the observer that receives status updates.
    fn set_status_observer(&mut self, observer: StatusObserver);

    /// The uri of the finalized recording, if `stop()` has succeeded.
    fn uri(&self) -> Option<String>;
}

/// Recorder capability: audio mode control plus handle allocation.
pub trait RecorderFactory {
    /// Apply audio subsystem mode flags before recording.
    fn set_audio_mode(&self, mode: AudioMode) -> Result<()>;

    /// Allocate a fresh, unprepared recorder handle.
    fn create_handle(&self) -> Result<Box<dyn RecorderHandle>>;
}

/// Audio playback abstraction.
pub trait AudioOutput {
    /// Load the resource at `uri` and begin playing it.
    ///
    /// Returns once playback has started, not once it finishes. Starting a
    /// new playback replaces any playback already in progress.
    fn load_and_play(&mut self, uri: &str) -> Result<()>;
}

/// Durable key-value blob store.
///
/// Used to persist the recording list across process restarts under a fixed
/// key. Values are opaque strings to this layer.
pub trait KeyValueStore {
    /// Read the blob stored under `key`, `None` if absent.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous blob.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_state_helpers() {
        assert!(PermissionState::Granted.is_granted());
        assert!(PermissionState::Denied.is_denied());
        assert!(PermissionState::Undetermined.is_undetermined());
        assert!(!PermissionState::Denied.is_granted());
        assert_eq!(PermissionState::default(), PermissionState::Undetermined);
    }

    #[test]
    fn test_recording_audio_mode() {
        let mode = AudioMode::recording();
        assert!(mode.allows_recording);
        assert!(mode.plays_in_silent_mode);
    }

    #[test]
    fn test_high_quality_preset() {
        let config = RecorderConfig::high_quality();
        assert_eq!(config.sample_rate, 44_100);
        assert_eq!(config.channels, 2);
        assert_eq!(config.extension, "m4a");
        assert_eq!(config.mime_type, "audio/m4a");
    }

    #[test]
    fn test_wav_preset() {
        let config = RecorderConfig::wav();
        assert_eq!(config.extension, "wav");
        assert_eq!(config.mime_type, "audio/wav");
        assert_eq!(config.channels, 1);
    }
}

//! Tapenote - press-and-hold voice memo recorder
//!
//! This crate provides a small voice-memo application: hold the circular
//! control to record from the microphone, release to stop, and the finished
//! recording is appended to a persisted list with per-item playback and
//! delete. Platform capabilities (permission prompt, recorder, playback,
//! durable storage) are modeled as traits so the recording logic can be
//! exercised with fakes.

#[cfg(feature = "audio-io")]
pub mod desktop;
pub mod permission;
pub mod platform;
pub mod recording;
pub mod testing;
pub mod ui;

use thiserror::Error;

/// Tapenote application errors
#[derive(Error, Debug, Clone)]
pub enum TapenoteError {
    /// Microphone permission query failed
    #[error("Permission error: {0}")]
    PermissionError(String),

    /// Recorder prepare/start/stop failure
    #[error("Recorder error: {0}")]
    RecorderError(String),

    /// Audio device initialization or stream error
    #[error("Audio device error: {0}")]
    AudioDeviceError(String),

    /// Playback load or decode failure
    #[error("Playback error: {0}")]
    PlaybackError(String),

    /// Durable store read/write/serialization failure
    #[error("Storage error: {0}")]
    StorageError(String),

    /// File system I/O error
    #[error("IO error: {0}")]
    IOError(String),
}

impl From<std::io::Error> for TapenoteError {
    fn from(e: std::io::Error) -> Self {
        TapenoteError::IOError(e.to_string())
    }
}

impl From<serde_json::Error> for TapenoteError {
    fn from(e: serde_json::Error) -> Self {
        TapenoteError::StorageError(e.to_string())
    }
}

impl TapenoteError {
    /// Check if this error is recoverable
    ///
    /// Recoverable errors allow the application to continue running,
    /// while non-recoverable errors may require user intervention.
    pub fn is_recoverable(&self) -> bool {
        match self {
            // The permission answer is cached for the process lifetime
            TapenoteError::PermissionError(_) => false,
            // A failed recording attempt does not poison the next one
            TapenoteError::RecorderError(_) => true,
            // Hardware/device errors may require user intervention
            TapenoteError::AudioDeviceError(_) => false,
            // Playback failures are isolated to a single entry
            TapenoteError::PlaybackError(_) => true,
            // The in-memory list keeps working; durable state catches up
            TapenoteError::StorageError(_) => true,
            // IO errors may require user intervention
            TapenoteError::IOError(_) => false,
        }
    }

    /// Get a user-friendly description of the error
    ///
    /// Returns a message suitable for display in the UI.
    pub fn user_message(&self) -> String {
        match self {
            TapenoteError::PermissionError(_) => {
                "Microphone permission unavailable. Recording is disabled.".to_string()
            }
            TapenoteError::RecorderError(_) => {
                "Recording failed. Please try again.".to_string()
            }
            TapenoteError::AudioDeviceError(_) => {
                "Audio device error. Please check your microphone/speakers.".to_string()
            }
            TapenoteError::PlaybackError(_) => {
                "Could not play this recording.".to_string()
            }
            TapenoteError::StorageError(_) => {
                "Recording list could not be saved. It will retry on the next change.".to_string()
            }
            TapenoteError::IOError(_) => {
                "File system error occurred.".to_string()
            }
        }
    }
}

/// Result type alias for Tapenote operations
pub type Result<T> = std::result::Result<T, TapenoteError>;

// Re-export the capability types
pub use platform::{
    AudioMode, AudioOutput, KeyValueStore, PermissionClient, PermissionState, RecorderConfig,
    RecorderFactory, RecorderHandle, RecorderStatus,
};

// Re-export the recording components
pub use permission::PermissionGate;
pub use recording::{
    MemoController, PlaybackService, RecordingEntry, RecordingSession, RecordingStore,
    SessionStatus, STORAGE_KEY,
};

//! Playback service.
//!
//! Thin wrapper over the platform audio output that isolates failures: a
//! missing file, decode error or unsupported uri is logged and never touches
//! session or store state.

use crate::platform::AudioOutput;
use tracing::{debug, error};

/// Plays recordings by uri, swallowing playback failures.
pub struct PlaybackService {
    output: Box<dyn AudioOutput>,
}

impl PlaybackService {
    pub fn new(output: Box<dyn AudioOutput>) -> Self {
        Self { output }
    }

    /// Begin playing the recording at `uri`.
    ///
    /// Returns `true` once playback has started, `false` if it could not be
    /// started. Failures are logged here and do not propagate.
    pub fn play(&mut self, uri: &str) -> bool {
        match self.output.load_and_play(uri) {
            Ok(()) => {
                debug!("Playback started: {}", uri);
                true
            }
            Err(e) => {
                error!("Playback failed for {}: {}", uri, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeOutput;

    #[test]
    fn test_play_forwards_uri() {
        let output = FakeOutput::new();
        let played = output.played();
        let mut service = PlaybackService::new(Box::new(output));

        assert!(service.play("file:///a.m4a"));
        assert_eq!(played.lock().as_slice(), ["file:///a.m4a".to_string()]);
    }

    #[test]
    fn test_play_failure_is_swallowed() {
        let mut service = PlaybackService::new(Box::new(FakeOutput::failing()));
        assert!(!service.play("file:///missing.m4a"));
    }
}

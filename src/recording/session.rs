//! Recording session state machine.
//!
//! A session wraps at most one in-flight recording: it allocates a recorder
//! handle on start, observes its status updates, and finalizes the handle to
//! a file uri on stop. Errors inside `start()`/`stop()` are logged and
//! swallowed here; callers observe the `Failed` status and a missing result
//! uri instead of a propagated error.

use crate::platform::{AudioMode, RecorderConfig, RecorderFactory, RecorderHandle, RecorderStatus};
use crate::Result;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Lifecycle state of a recording session
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionStatus {
    /// No recording in progress
    #[default]
    Idle,
    /// Handle allocated, capture not started yet
    Preparing,
    /// Actively capturing audio
    Recording,
    /// Capture finished, result uri available
    Stopped,
    /// Start or stop failed; no result uri
    Failed,
}

impl SessionStatus {
    /// Check if the handle is still being prepared
    pub fn is_preparing(&self) -> bool {
        matches!(self, SessionStatus::Preparing)
    }

    /// Check if currently capturing
    pub fn is_recording(&self) -> bool {
        matches!(self, SessionStatus::Recording)
    }

    /// Check if the last recording finished successfully
    pub fn is_stopped(&self) -> bool {
        matches!(self, SessionStatus::Stopped)
    }

    /// Check if the last start/stop failed
    pub fn is_failed(&self) -> bool {
        matches!(self, SessionStatus::Failed)
    }

    /// Check if no recording is in progress
    pub fn is_idle(&self) -> bool {
        matches!(self, SessionStatus::Idle)
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStatus::Idle => write!(f, "Idle"),
            SessionStatus::Preparing => write!(f, "Preparing"),
            SessionStatus::Recording => write!(f, "Recording"),
            SessionStatus::Stopped => write!(f, "Stopped"),
            SessionStatus::Failed => write!(f, "Failed"),
        }
    }
}

/// At most one in-flight recording.
///
/// The handle is exclusively owned here; the single-`&mut` discipline of the
/// UI loop is what guarantees at most one active recording, no locks needed.
pub struct RecordingSession {
    factory: Box<dyn RecorderFactory>,
    config: RecorderConfig,
    handle: Option<Box<dyn RecorderHandle>>,
    status: SessionStatus,
    last_status: Arc<Mutex<Option<RecorderStatus>>>,
    result_uri: Option<String>,
}

impl RecordingSession {
    /// Create an idle session recording with the given fixed configuration.
    pub fn new(factory: Box<dyn RecorderFactory>, config: RecorderConfig) -> Self {
        Self {
            factory,
            config,
            handle: None,
            status: SessionStatus::Idle,
            last_status: Arc::new(Mutex::new(None)),
            result_uri: None,
        }
    }

    /// Current lifecycle state.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// The fixed codec/container configuration recordings are made with.
    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    /// Most recent status report from the recorder handle, if any.
    pub fn recorder_status(&self) -> Option<RecorderStatus> {
        *self.last_status.lock()
    }

    /// Uri of the finished recording after a successful stop.
    pub fn result_uri(&self) -> Option<&str> {
        self.result_uri.as_deref()
    }

    /// Take the result uri, leaving the session without one.
    pub fn take_result_uri(&mut self) -> Option<String> {
        self.result_uri.take()
    }

    /// Start or resume recording.
    ///
    /// If a recording is active and its handle reports `can_record`, it is
    /// resumed in place without allocating a second handle. A call that races
    /// an unfinished prepare is dropped as a no-op. Errors transition the
    /// session to `Failed` and are not propagated.
    pub fn start(&mut self) {
        if self.status.is_preparing() {
            debug!("Start ignored, a handle is still preparing");
            return;
        }

        if self.status.is_recording() {
            let can_record = self
                .recorder_status()
                .map_or(false, |status| status.can_record);
            if can_record {
                if let Some(handle) = self.handle.as_mut() {
                    match handle.start() {
                        Ok(()) => debug!("Resumed active recording in place"),
                        Err(e) => {
                            error!("Failed to resume recording: {}", e);
                            self.fail();
                        }
                    }
                    return;
                }
            }
        }

        if let Err(e) = self.try_start() {
            error!("Failed to start recording: {}", e);
            self.fail();
        }
    }

    /// Stop the active recording, if any, and finalize it to a file uri.
    ///
    /// A no-op when no handle exists. The handle is discarded whether or not
    /// the stop succeeds; errors transition to `Failed` and are not
    /// propagated.
    pub fn stop(&mut self) {
        let Some(mut handle) = self.handle.take() else {
            debug!("Stop ignored, no recording in progress");
            return;
        };

        match handle.stop() {
            Ok(uri) => {
                info!("Recorded uri: {}", uri);
                self.result_uri = Some(uri);
                self.status = SessionStatus::Stopped;
            }
            Err(e) => {
                error!("Failed to stop recording: {}", e);
                self.status = SessionStatus::Failed;
            }
        }
    }

    fn try_start(&mut self) -> Result<()> {
        self.factory.set_audio_mode(AudioMode::recording())?;

        // Release any previous handle before allocating; two live recorder
        // resources must never coexist
        self.handle = None;
        self.status = SessionStatus::Preparing;
        self.result_uri = None;
        *self.last_status.lock() = None;

        let mut handle = self.factory.create_handle()?;
        handle.prepare(&self.config)?;

        let cell = Arc::clone(&self.last_status);
        handle.set_status_observer(Box::new(move |status| {
            *cell.lock() = Some(status);
        }));

        handle.start()?;
        self.handle = Some(handle);
        self.status = SessionStatus::Recording;
        Ok(())
    }

    fn fail(&mut self) {
        // Dropping the handle releases the recorder resource
        self.handle = None;
        self.status = SessionStatus::Failed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeRecorder;

    fn session_with(recorder: FakeRecorder) -> RecordingSession {
        RecordingSession::new(Box::new(recorder), RecorderConfig::high_quality())
    }

    #[test]
    fn test_start_stop_produces_uri() {
        let recorder = FakeRecorder::returning_uri("file:///a.m4a");
        let mut session = session_with(recorder);

        assert!(session.status().is_idle());
        session.start();
        assert!(session.status().is_recording());

        session.stop();
        assert!(session.status().is_stopped());
        assert_eq!(session.result_uri(), Some("file:///a.m4a"));
    }

    #[test]
    fn test_stop_without_start_is_noop() {
        let mut session = session_with(FakeRecorder::returning_uri("file:///a.m4a"));
        session.stop();
        assert!(session.status().is_idle());
        assert!(session.result_uri().is_none());
    }

    #[test]
    fn test_double_start_resumes_without_second_handle() {
        let recorder = FakeRecorder::returning_uri("file:///a.m4a");
        let probe = recorder.probe();
        let mut session = session_with(recorder);

        session.start();
        session.start();

        assert!(session.status().is_recording());
        assert_eq!(probe.handles_created(), 1);
    }

    #[test]
    fn test_start_failure_transitions_to_failed() {
        let mut session = session_with(FakeRecorder::failing_start());
        session.start();
        assert!(session.status().is_failed());
        assert!(session.result_uri().is_none());
    }

    #[test]
    fn test_stop_failure_discards_handle() {
        let recorder = FakeRecorder::failing_stop();
        let probe = recorder.probe();
        let mut session = session_with(recorder);

        session.start();
        session.stop();

        assert!(session.status().is_failed());
        assert!(session.result_uri().is_none());
        assert_eq!(probe.live_handles(), 0);

        // A repeated stop has nothing left to act on
        session.stop();
        assert!(session.status().is_failed());
    }

    #[test]
    fn test_restart_after_stop_allocates_fresh_handle() {
        let recorder = FakeRecorder::returning_uri("file:///b.m4a");
        let probe = recorder.probe();
        let mut session = session_with(recorder);

        session.start();
        session.stop();
        session.start();

        assert!(session.status().is_recording());
        assert_eq!(probe.handles_created(), 2);
        // The new attempt cleared the previous result
        assert!(session.result_uri().is_none());
    }
}

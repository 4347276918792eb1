//! Memo controller.
//!
//! Single owner of the permission gate, recording session, persisted store
//! and playback service. The view layer calls into it for every gesture and
//! list action; it holds no UI state beyond the last user-facing error line.

use crate::permission::PermissionGate;
use crate::platform::PermissionState;
use crate::recording::playback::PlaybackService;
use crate::recording::session::{RecordingSession, SessionStatus};
use crate::recording::store::{RecordingEntry, RecordingStore};
use crate::TapenoteError;
use chrono::Utc;
use tracing::{debug, info, warn};

/// Coordinates record/stop/play/delete against the injected capabilities.
pub struct MemoController {
    permission: PermissionGate,
    session: RecordingSession,
    store: RecordingStore,
    playback: PlaybackService,
    last_error: Option<String>,
}

impl MemoController {
    /// Wire the components together and resolve the permission prompt once.
    pub fn new(
        mut permission: PermissionGate,
        session: RecordingSession,
        store: RecordingStore,
        playback: PlaybackService,
    ) -> Self {
        permission.request();

        Self {
            permission,
            session,
            store,
            playback,
            last_error: None,
        }
    }

    /// Cached permission state (resolved at construction).
    pub fn permission_state(&self) -> PermissionState {
        self.permission.state()
    }

    /// Current session lifecycle state.
    pub fn session_status(&self) -> SessionStatus {
        self.session.status()
    }

    /// Persisted entries, oldest first.
    pub fn entries(&self) -> &[RecordingEntry] {
        self.store.entries()
    }

    /// The most recently completed recording, if any.
    pub fn newest_entry(&self) -> Option<&RecordingEntry> {
        self.store.entries().last()
    }

    /// Last user-facing error line, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Press-begin gesture: start recording if permission is granted.
    pub fn press_begin(&mut self) {
        if !self.permission.is_granted() {
            debug!("Press ignored without microphone permission");
            return;
        }
        self.session.start();
        if self.session.status().is_failed() {
            self.last_error =
                Some(TapenoteError::RecorderError("start failed".into()).user_message());
        }
    }

    /// Press-end (or gesture cancellation): stop and persist the result.
    pub fn press_end(&mut self) {
        self.session.stop();

        match self.session.status() {
            SessionStatus::Stopped => {
                if let Some(uri) = self.session.take_result_uri() {
                    let entry = self.synthesize_entry(uri);
                    info!("Saving recording: {}", entry.name);
                    if let Err(e) = self.store.append(entry) {
                        // Entry stays visible in memory; durable copy catches
                        // up on the next successful write
                        self.last_error = Some(e.user_message());
                    }
                }
            }
            SessionStatus::Failed => {
                self.last_error =
                    Some(TapenoteError::RecorderError("stop failed".into()).user_message());
            }
            _ => {}
        }
    }

    /// Play one recording from the list.
    pub fn play(&mut self, uri: &str) {
        if !self.playback.play(uri) {
            self.last_error =
                Some(TapenoteError::PlaybackError(uri.to_string()).user_message());
        }
    }

    /// Delete one recording from the list.
    pub fn delete(&mut self, uri: &str) {
        if let Err(e) = self.store.remove(uri) {
            warn!("Delete did not persist: {}", e);
            self.last_error = Some(e.user_message());
        }
    }

    fn synthesize_entry(&self, uri: String) -> RecordingEntry {
        let config = self.session.config();
        let name = format!(
            "recording-{}.{}",
            Utc::now().timestamp_millis(),
            config.extension
        );
        RecordingEntry::new(uri, name, config.mime_type.clone())
    }
}

//! Controller scenario tests
//!
//! End-to-end scenarios over the controller with fake capabilities: the
//! press gestures, permission gating, entry synthesis and per-item actions.

use tapenote::testing::{FakeOutput, FakePermission, FakeRecorder, MemoryStore};
use tapenote::ui::control_visual;
use tapenote::{
    MemoController, PermissionGate, PermissionState, PlaybackService, RecorderConfig,
    RecordingSession, RecordingStore, SessionStatus,
};

fn controller(
    permission: FakePermission,
    recorder: FakeRecorder,
    backend: MemoryStore,
    output: FakeOutput,
) -> MemoController {
    MemoController::new(
        PermissionGate::new(Box::new(permission)),
        RecordingSession::new(Box::new(recorder), RecorderConfig::high_quality()),
        RecordingStore::load(Box::new(backend)),
        PlaybackService::new(Box::new(output)),
    )
}

#[test]
fn test_denied_permission_never_starts_the_session() {
    let recorder = FakeRecorder::returning_uri("file:///a.m4a");
    let probe = recorder.probe();
    let mut controller = controller(
        FakePermission::denied(),
        recorder,
        MemoryStore::new(),
        FakeOutput::new(),
    );

    controller.press_begin();
    controller.press_end();

    assert_eq!(controller.permission_state(), PermissionState::Denied);
    assert_eq!(
        probe.handles_created(),
        0,
        "A denied press must never reach the recorder"
    );
    assert!(controller.entries().is_empty());

    // The control shows the disabled color no matter the press state
    let unpressed = control_visual(false, false);
    let pressed = control_visual(false, true);
    assert_eq!(pressed.color, unpressed.color);
    assert_eq!(pressed.scale, 1.0);
}

#[test]
fn test_permission_query_error_reads_as_denied() {
    let recorder = FakeRecorder::returning_uri("file:///a.m4a");
    let probe = recorder.probe();
    let mut controller = controller(
        FakePermission::failing(),
        recorder,
        MemoryStore::new(),
        FakeOutput::new(),
    );

    controller.press_begin();

    assert_eq!(controller.permission_state(), PermissionState::Denied);
    assert_eq!(probe.handles_created(), 0);
}

#[test]
fn test_permission_prompt_fires_once_at_startup() {
    let permission = FakePermission::granted();
    let calls = permission.calls();
    let mut controller = controller(
        permission,
        FakeRecorder::returning_uri("file:///a.m4a"),
        MemoryStore::new(),
        FakeOutput::new(),
    );

    controller.press_begin();
    controller.press_end();
    controller.press_begin();
    controller.press_end();

    assert_eq!(
        calls.load(std::sync::atomic::Ordering::SeqCst),
        1,
        "The platform prompt should fire exactly once per process"
    );
}

#[test]
fn test_successful_recording_appends_synthesized_entry() {
    let mut controller = controller(
        FakePermission::granted(),
        FakeRecorder::returning_uri("file:///a.m4a"),
        MemoryStore::new(),
        FakeOutput::new(),
    );

    controller.press_begin();
    controller.press_end();

    assert_eq!(controller.entries().len(), 1);
    let entry = &controller.entries()[0];
    assert_eq!(entry.uri, "file:///a.m4a");
    assert!(
        entry.name.starts_with("recording-") && entry.name.ends_with(".m4a"),
        "Entry name should be timestamp-derived, got {}",
        entry.name
    );
    assert_eq!(entry.mime_type, "audio/m4a");
}

#[test]
fn test_release_without_press_is_noop() {
    let backend = MemoryStore::new();
    let writes = backend.writes();
    let mut controller = controller(
        FakePermission::granted(),
        FakeRecorder::returning_uri("file:///a.m4a"),
        backend,
        FakeOutput::new(),
    );

    controller.press_end();

    assert!(controller.entries().is_empty());
    assert!(controller.last_error().is_none());
    assert_eq!(
        writes.load(std::sync::atomic::Ordering::SeqCst),
        0,
        "A stop without a recording must not touch the store"
    );
    assert_eq!(controller.session_status(), SessionStatus::Idle);
}

#[test]
fn test_recording_survives_restart() {
    let backend = MemoryStore::new();
    {
        let mut controller = controller(
            FakePermission::granted(),
            FakeRecorder::returning_uri("file:///a.m4a"),
            backend.clone(),
            FakeOutput::new(),
        );
        controller.press_begin();
        controller.press_end();
    }

    // A fresh controller over the same durable blob sees the entry
    let controller = controller(
        FakePermission::granted(),
        FakeRecorder::returning_uri("file:///b.m4a"),
        backend,
        FakeOutput::new(),
    );

    assert_eq!(controller.entries().len(), 1);
    assert_eq!(controller.entries()[0].uri, "file:///a.m4a");
}

#[test]
fn test_failed_stop_appends_nothing() {
    let mut controller = controller(
        FakePermission::granted(),
        FakeRecorder::failing_stop(),
        MemoryStore::new(),
        FakeOutput::new(),
    );

    controller.press_begin();
    controller.press_end();

    assert!(controller.entries().is_empty());
    assert_eq!(controller.session_status(), SessionStatus::Failed);
    assert!(
        controller.last_error().is_some(),
        "A failed recording should surface a user-facing error line"
    );
}

#[test]
fn test_play_routes_to_audio_output() {
    let output = FakeOutput::new();
    let played = output.played();
    let mut controller = controller(
        FakePermission::granted(),
        FakeRecorder::returning_uri("file:///a.m4a"),
        MemoryStore::new(),
        output,
    );

    controller.press_begin();
    controller.press_end();
    controller.play("file:///a.m4a");

    assert_eq!(played.lock().as_slice(), ["file:///a.m4a".to_string()]);
}

#[test]
fn test_playback_failure_is_isolated() {
    let mut controller = controller(
        FakePermission::granted(),
        FakeRecorder::returning_uri("file:///a.m4a"),
        MemoryStore::new(),
        FakeOutput::failing(),
    );

    controller.press_begin();
    controller.press_end();
    controller.play("file:///a.m4a");

    assert!(controller.last_error().is_some());
    assert_eq!(
        controller.entries().len(),
        1,
        "A playback failure must not touch the store"
    );
    assert_eq!(controller.session_status(), SessionStatus::Stopped);
}

#[test]
fn test_delete_removes_entry_and_persists() {
    let backend = MemoryStore::new();
    let mut controller = controller(
        FakePermission::granted(),
        FakeRecorder::returning_uri("file:///a.m4a"),
        backend.clone(),
        FakeOutput::new(),
    );

    controller.press_begin();
    controller.press_end();
    controller.delete("file:///a.m4a");

    assert!(controller.entries().is_empty());

    // The removal is durable
    let reloaded = controller_over(backend);
    assert!(reloaded.entries().is_empty());
}

#[test]
fn test_delete_of_absent_uri_is_noop() {
    let mut controller = controller(
        FakePermission::granted(),
        FakeRecorder::returning_uri("file:///a.m4a"),
        MemoryStore::new(),
        FakeOutput::new(),
    );

    controller.press_begin();
    controller.press_end();
    controller.delete("file:///other.m4a");

    assert_eq!(controller.entries().len(), 1);
    assert!(controller.last_error().is_none());
}

#[test]
fn test_store_write_failure_keeps_entry_visible() {
    let mut controller = controller(
        FakePermission::granted(),
        FakeRecorder::returning_uri("file:///a.m4a"),
        MemoryStore::failing_writes(),
        FakeOutput::new(),
    );

    controller.press_begin();
    controller.press_end();

    assert_eq!(
        controller.entries().len(),
        1,
        "The in-memory list stays the source of truth for rendering"
    );
    assert!(controller.last_error().is_some());
}

#[test]
fn test_rapid_presses_keep_single_recording() {
    let recorder = FakeRecorder::returning_uri("file:///a.m4a");
    let probe = recorder.probe();
    let mut controller = controller(
        FakePermission::granted(),
        recorder,
        MemoryStore::new(),
        FakeOutput::new(),
    );

    controller.press_begin();
    controller.press_begin();
    controller.press_begin();
    controller.press_end();

    assert!(probe.max_live_handles() <= 1);
    assert_eq!(controller.entries().len(), 1);
}

fn controller_over(backend: MemoryStore) -> MemoController {
    controller(
        FakePermission::granted(),
        FakeRecorder::returning_uri("file:///unused.m4a"),
        backend,
        FakeOutput::new(),
    )
}

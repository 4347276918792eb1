//! Recording components: session state machine, persisted store, playback
//! and the controller that ties them together.

pub mod controller;
pub mod playback;
pub mod session;
pub mod store;

pub use controller::MemoController;
pub use playback::PlaybackService;
pub use session::{RecordingSession, SessionStatus};
pub use store::{RecordingEntry, RecordingStore, STORAGE_KEY};

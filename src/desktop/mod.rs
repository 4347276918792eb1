//! Desktop implementations of the platform capabilities.
//!
//! Microphone capture and playback go through cpal, recordings are finalized
//! as PCM WAV files via hound, and the durable blob store is a JSON file per
//! key under the local data directory.

pub mod permission;
pub mod playback;
pub mod recorder;
pub mod storage;

pub use permission::DesktopPermission;
pub use playback::CpalPlayer;
pub use recorder::CpalRecorder;
pub use storage::FileStore;

//! Test support: fake capability implementations.

pub mod fakes;

pub use fakes::{FakeOutput, FakePermission, FakeRecorder, MemoryStore, RecorderProbe};

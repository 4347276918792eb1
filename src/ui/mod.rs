//! UI components and application module
//!
//! This module provides the egui/eframe-based user interface for Tapenote.

mod app;
pub mod components;
mod state;
mod theme;

pub use app::TapenoteApp;
pub use components::{Button, ButtonColor, ButtonSize, RecordControl, RecordingList};
pub use state::{control_visual, ControlVisual};
pub use theme::Theme;

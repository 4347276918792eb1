//! Main application struct and eframe integration
//!
//! This module contains the main TapenoteApp that implements eframe::App.

use crate::recording::MemoController;
use crate::ui::components::{RecordControl, RecordingList};
use crate::ui::theme::Theme;
use egui::{CentralPanel, RichText, TopBottomPanel};
use tracing::info;

/// Main Tapenote application
pub struct TapenoteApp {
    /// Controller owning gate, session, store and playback
    controller: MemoController,
    /// Visual theme
    theme: Theme,
    /// Whether the record control is currently held down
    pressed: bool,
    /// Whether the app has been initialized
    initialized: bool,
}

impl TapenoteApp {
    /// Create a new Tapenote application
    pub fn new(cc: &eframe::CreationContext<'_>, controller: MemoController) -> Self {
        let theme = Theme::dark();
        theme.apply(&cc.egui_ctx);

        Self {
            controller,
            theme,
            pressed: false,
            initialized: false,
        }
    }

    /// Initialize on first frame
    fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        info!(
            "Tapenote UI initialized ({} recording(s), permission {})",
            self.controller.entries().len(),
            self.controller.permission_state()
        );
    }

    /// Show the top header bar
    fn show_header(&mut self, ctx: &egui::Context) {
        TopBottomPanel::top("header")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_secondary)
                    .inner_margin(12.0),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("Tapenote")
                            .size(20.0)
                            .strong()
                            .color(self.theme.text_primary),
                    );
                    ui.label(
                        RichText::new("Voice Memos")
                            .size(14.0)
                            .color(self.theme.text_muted),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if let Some(entry) = self.controller.newest_entry() {
                            let uri = entry.uri.clone();
                            if ui.button("Copy path").on_hover_text(&uri).clicked() {
                                ui.ctx().copy_text(uri);
                            }
                        }
                    });
                });

                if let Some(error) = self.controller.last_error().map(str::to_string) {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(error).size(12.0).color(self.theme.error));
                        if ui.small_button("Dismiss").clicked() {
                            self.controller.clear_error();
                        }
                    });
                }
            });
    }

    /// Show the central record control
    fn show_control(&mut self, ctx: &egui::Context) {
        CentralPanel::default()
            .frame(egui::Frame::none().fill(self.theme.bg_primary))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(self.theme.spacing_lg);

                    RecordControl::new(&mut self.controller, &mut self.pressed, &self.theme)
                        .show(ui);

                    let status_text = if !self.controller.permission_state().is_granted() {
                        "Microphone unavailable"
                    } else if self.pressed {
                        "Recording..."
                    } else {
                        "Hold to record"
                    };
                    ui.label(
                        RichText::new(status_text)
                            .size(12.0)
                            .color(self.theme.text_muted),
                    );

                    ui.add_space(self.theme.spacing);
                    ui.separator();

                    RecordingList::new(&mut self.controller, &self.theme).show(ui);
                });
            });
    }
}

impl eframe::App for TapenoteApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.initialize();

        self.show_header(ctx);
        self.show_control(ctx);

        // Keep animating while a recording is active
        if self.controller.session_status().is_recording() {
            ctx.request_repaint();
        }
    }
}

//! Recording list component
//!
//! Displays the persisted recordings with per-item play and delete actions.

use crate::recording::MemoController;
use crate::ui::components::{Button, ButtonColor, ButtonSize};
use crate::ui::theme::Theme;
use egui::RichText;

enum ListAction {
    Play(String),
    Delete(String),
}

/// Recording list component
pub struct RecordingList<'a> {
    controller: &'a mut MemoController,
    theme: &'a Theme,
}

impl<'a> RecordingList<'a> {
    pub fn new(controller: &'a mut MemoController, theme: &'a Theme) -> Self {
        Self { controller, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let entries = self.controller.entries().to_vec();

        if entries.is_empty() {
            self.show_empty_state(ui);
            return;
        }

        let mut action = None;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.add_space(self.theme.spacing_sm);

                for entry in &entries {
                    egui::Frame::none()
                        .fill(self.theme.bg_secondary)
                        .rounding(self.theme.card_rounding)
                        .inner_margin(self.theme.spacing_sm)
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.vertical(|ui| {
                                    ui.label(
                                        RichText::new(&entry.name)
                                            .strong()
                                            .color(self.theme.text_primary),
                                    );
                                    ui.label(
                                        RichText::new(&entry.mime_type)
                                            .size(11.0)
                                            .color(self.theme.text_muted),
                                    );
                                });

                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        if Button::new("Delete")
                                            .size(ButtonSize::Small)
                                            .color(ButtonColor::Secondary)
                                            .show(ui)
                                            .clicked()
                                        {
                                            action = Some(ListAction::Delete(entry.uri.clone()));
                                        }

                                        if Button::new("Play")
                                            .size(ButtonSize::Small)
                                            .color(ButtonColor::Primary)
                                            .show(ui)
                                            .clicked()
                                        {
                                            action = Some(ListAction::Play(entry.uri.clone()));
                                        }
                                    },
                                );
                            });
                        });

                    ui.add_space(self.theme.spacing_sm);
                }
            });

        match action {
            Some(ListAction::Play(uri)) => self.controller.play(&uri),
            Some(ListAction::Delete(uri)) => self.controller.delete(&uri),
            None => {}
        }
    }

    fn show_empty_state(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(self.theme.spacing_lg);
            ui.label(
                RichText::new("No recordings yet")
                    .size(16.0)
                    .color(self.theme.text_secondary),
            );
            ui.label(
                RichText::new("Hold the circle to record your first memo.")
                    .size(12.0)
                    .color(self.theme.text_muted),
            );
            ui.add_space(self.theme.spacing_lg);
        });
    }
}

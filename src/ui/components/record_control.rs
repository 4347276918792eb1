//! Record control component
//!
//! The press-and-hold surface: holding the pointer down on the circle starts
//! a recording, releasing it (or losing the gesture) stops and persists it.

use crate::recording::MemoController;
use crate::ui::state::control_visual;
use crate::ui::theme::Theme;
use egui::{Sense, Vec2};

/// Base radius of the circular control in points
const BASE_RADIUS: f32 = 55.0;

/// Press-and-hold recording control
pub struct RecordControl<'a> {
    controller: &'a mut MemoController,
    pressed: &'a mut bool,
    theme: &'a Theme,
}

impl<'a> RecordControl<'a> {
    pub fn new(controller: &'a mut MemoController, pressed: &'a mut bool, theme: &'a Theme) -> Self {
        Self {
            controller,
            pressed,
            theme,
        }
    }

    /// Show the control and return the response
    pub fn show(self, ui: &mut egui::Ui) -> egui::Response {
        let size = Vec2::splat(BASE_RADIUS * 2.0 + 40.0);
        let (rect, response) = ui.allocate_exact_size(size, Sense::drag());

        // Press/release edges drive the session; a cancelled gesture reads
        // as a release and still stops the recording
        let is_down = response.is_pointer_button_down_on();
        if is_down && !*self.pressed {
            *self.pressed = true;
            self.controller.press_begin();
        } else if !is_down && *self.pressed {
            *self.pressed = false;
            self.controller.press_end();
        }

        let granted = self.controller.permission_state().is_granted();
        let visual = control_visual(granted, *self.pressed);

        let scale = ui
            .ctx()
            .animate_value_with_time(response.id.with("scale"), visual.scale, 0.15);

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            painter.circle_filled(rect.center(), BASE_RADIUS * scale, visual.color);

            if self.controller.session_status().is_recording() {
                self.draw_pulsing_ring(ui, rect.center(), scale);
            }
        }

        let tooltip = if !granted {
            "Microphone permission denied"
        } else if *self.pressed {
            "Release to stop"
        } else {
            "Hold to record"
        };
        response.on_hover_text(tooltip)
    }

    /// Draw pulsing ring animation while recording
    fn draw_pulsing_ring(&self, ui: &egui::Ui, center: egui::Pos2, scale: f32) {
        let t = ui.ctx().input(|i| i.time);
        let pulse = ((t * 3.0).sin() * 0.5 + 0.5) as f32;

        let radius = BASE_RADIUS * scale + 4.0 + pulse * 8.0;
        let alpha = (1.0 - pulse) * 0.6;

        ui.painter().circle_stroke(
            center,
            radius,
            egui::Stroke::new(
                2.0 + pulse * 2.0,
                self.theme.recording.gamma_multiply(alpha),
            ),
        );

        ui.ctx().request_repaint();
    }
}

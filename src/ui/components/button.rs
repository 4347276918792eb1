//! Shared button component
//!
//! A generic button with size and color roles, disabled and loading states.

use egui::{Color32, RichText, Rounding, Vec2};

/// Button size role
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ButtonSize {
    fn height(&self) -> f32 {
        match self {
            ButtonSize::Small => 34.0,
            ButtonSize::Medium => 40.0,
            ButtonSize::Large => 46.0,
        }
    }

    fn horizontal_padding(&self) -> f32 {
        match self {
            ButtonSize::Small => 12.0,
            ButtonSize::Medium => 16.0,
            ButtonSize::Large => 20.0,
        }
    }
}

/// Button color role
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonColor {
    #[default]
    Primary,
    Secondary,
    Default,
}

impl ButtonColor {
    fn fill(&self) -> Color32 {
        match self {
            ButtonColor::Primary => Color32::from_rgb(0x00, 0x7B, 0xFF),
            ButtonColor::Secondary => Color32::from_rgb(0x6C, 0x75, 0x7D),
            ButtonColor::Default => Color32::from_rgb(0xE9, 0xEC, 0xEF),
        }
    }

    fn text(&self) -> Color32 {
        match self {
            ButtonColor::Primary | ButtonColor::Secondary => Color32::WHITE,
            ButtonColor::Default => Color32::from_rgb(0x21, 0x25, 0x29),
        }
    }
}

/// Generic button widget
pub struct Button<'a> {
    label: &'a str,
    size: ButtonSize,
    color: ButtonColor,
    disabled: bool,
    loading: bool,
    min_width: Option<f32>,
}

impl<'a> Button<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            size: ButtonSize::default(),
            color: ButtonColor::default(),
            disabled: false,
            loading: false,
            min_width: None,
        }
    }

    pub fn size(mut self, size: ButtonSize) -> Self {
        self.size = size;
        self
    }

    pub fn color(mut self, color: ButtonColor) -> Self {
        self.color = color;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = Some(width);
        self
    }

    /// Show the button; the response's `clicked()` is never true while
    /// disabled or loading.
    pub fn show(self, ui: &mut egui::Ui) -> egui::Response {
        let fill = if self.disabled {
            self.color.fill().gamma_multiply(0.5)
        } else if self.loading {
            self.color.fill().gamma_multiply(0.8)
        } else {
            self.color.fill()
        };

        let text = RichText::new(self.label)
            .size(16.0)
            .strong()
            .color(self.color.text());

        let min_size = Vec2::new(
            self.min_width
                .unwrap_or(self.size.horizontal_padding() * 2.0 + 24.0),
            self.size.height(),
        );

        let button = egui::Button::new(text)
            .min_size(min_size)
            .rounding(Rounding::same(10.0))
            .fill(fill);

        let enabled = !self.disabled && !self.loading;
        let response = ui.add_enabled(enabled, button);

        if self.loading {
            // Overlay a spinner on the loading button
            let spinner_rect = egui::Rect::from_center_size(
                response.rect.left_center() + Vec2::new(14.0, 0.0),
                Vec2::splat(14.0),
            );
            egui::Spinner::new()
                .paint_at(ui, spinner_rect);
        }

        response
    }
}

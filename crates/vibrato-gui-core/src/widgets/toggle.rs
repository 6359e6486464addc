//! Two-state switch widget.

use egui::{Color32, Response, Sense, Stroke, Ui, Widget, pos2, vec2};

/// Round indicator plus label; click flips the state.
pub struct Switch<'a> {
    on: &'a mut bool,
    label: &'a str,
    size: f32,
    ring: Color32,
    fill: Color32,
}

impl<'a> Switch<'a> {
    /// Create a new switch.
    pub fn new(on: &'a mut bool, label: &'a str) -> Self {
        Self {
            on,
            label,
            size: 18.0,
            ring: Color32::from_rgb(60, 60, 70),
            fill: Color32::from_rgb(230, 120, 255),
        }
    }

    /// Set the indicator size.
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Set ring and fill colours.
    pub fn colors(mut self, ring: Color32, fill: Color32) -> Self {
        self.ring = ring;
        self.fill = fill;
        self
    }
}

impl Widget for Switch<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let font = egui::FontId::proportional(11.0);
        let text_width = ui.fonts(|f| {
            f.layout_no_wrap(self.label.to_owned(), font.clone(), Color32::WHITE)
                .size()
                .x
        });
        let size = vec2(self.size + 6.0 + text_width, self.size + 4.0);
        let (rect, mut response) = ui.allocate_exact_size(size, Sense::click());

        if response.clicked() {
            *self.on = !*self.on;
            response.mark_changed();
        }

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let center = pos2(rect.left() + self.size / 2.0 + 1.0, rect.center().y);
            let radius = self.size / 2.0 - 1.0;

            painter.circle_stroke(center, radius, Stroke::new(1.5, self.ring));
            if *self.on {
                painter.circle_filled(center, radius - 3.0, self.fill);
            }
            if response.hovered() {
                painter.circle_stroke(center, radius + 2.0, Stroke::new(1.0, self.fill.gamma_multiply(0.5)));
            }

            let text_color = if *self.on {
                Color32::from_rgb(200, 200, 210)
            } else {
                Color32::from_rgb(120, 120, 130)
            };
            painter.text(
                pos2(rect.left() + self.size + 6.0, rect.center().y),
                egui::Align2::LEFT_CENTER,
                self.label,
                font,
                text_color,
            );
        }

        response
    }
}

//! Rotary knob control widget.
//!
//! - Vertical drag to adjust, Shift for fine control
//! - Double-click to reset
//! - Label and formatted value below the dial

use egui::{Color32, Pos2, Response, Sense, Shape, Stroke, Ui, Widget, pos2, vec2};
use std::f32::consts::PI;

/// Start of the 270 degree sweep (bottom-left).
const START_ANGLE: f32 = PI * 0.75;
/// End of the sweep (bottom-right).
const END_ANGLE: f32 = PI * 2.25;

/// Rotary knob over `value` in `[min, max]`.
pub struct Knob<'a> {
    value: &'a mut f32,
    min: f32,
    max: f32,
    default: f32,
    label: &'a str,
    format_value: Option<Box<dyn Fn(f32) -> String + 'a>>,
    diameter: f32,
    sensitivity: f32,
    track: Color32,
    fill: Color32,
}

impl<'a> Knob<'a> {
    /// Create a new knob.
    pub fn new(value: &'a mut f32, min: f32, max: f32, label: &'a str) -> Self {
        Self {
            value,
            min,
            max,
            default: (min + max) / 2.0,
            label,
            format_value: None,
            diameter: 44.0,
            sensitivity: 0.005,
            track: Color32::from_rgb(50, 50, 60),
            fill: Color32::from_rgb(100, 200, 255),
        }
    }

    /// Set the default (reset) value.
    pub fn default(mut self, default: f32) -> Self {
        self.default = default;
        self
    }

    /// Set a custom value formatter.
    pub fn format(mut self, formatter: impl Fn(f32) -> String + 'a) -> Self {
        self.format_value = Some(Box::new(formatter));
        self
    }

    /// Set knob diameter in points.
    pub fn diameter(mut self, diameter: f32) -> Self {
        self.diameter = diameter;
        self
    }

    /// Set sensitivity (fraction of the range per point dragged).
    pub fn sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Set track and value-arc colours.
    pub fn colors(mut self, track: Color32, fill: Color32) -> Self {
        self.track = track;
        self.fill = fill;
        self
    }

    fn normalized(&self) -> f32 {
        let range = self.max - self.min;
        if range.abs() < f32::EPSILON {
            0.0
        } else {
            ((*self.value - self.min) / range).clamp(0.0, 1.0)
        }
    }
}

impl Widget for Knob<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let size = vec2(self.diameter.max(48.0), self.diameter + 30.0);
        let (rect, mut response) = ui.allocate_exact_size(size, Sense::click_and_drag());

        let center = pos2(rect.center().x, rect.top() + self.diameter / 2.0);
        let radius = self.diameter / 2.0 - 3.0;

        let mut changed = false;

        if response.double_clicked() {
            *self.value = self.default;
            changed = true;
        } else if response.dragged() {
            let fine = ui.input(|i| i.modifiers.shift);
            let sensitivity = if fine { self.sensitivity * 0.1 } else { self.sensitivity };
            let delta = -response.drag_delta().y * sensitivity * (self.max - self.min);
            if delta != 0.0 {
                *self.value = (*self.value + delta).clamp(self.min, self.max);
                changed = true;
            }
        }

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let active = response.dragged() || response.hovered();
            let fill = if active { self.fill } else { self.fill.gamma_multiply(0.8) };
            let value_angle = START_ANGLE + self.normalized() * (END_ANGLE - START_ANGLE);

            painter.add(arc(center, radius, START_ANGLE, END_ANGLE, Stroke::new(4.0, self.track)));
            if self.normalized() > 0.001 {
                painter.add(arc(center, radius, START_ANGLE, value_angle, Stroke::new(4.0, fill)));
            }

            let pointer = pos2(
                center.x + value_angle.cos() * (radius - 6.0),
                center.y + value_angle.sin() * (radius - 6.0),
            );
            painter.line_segment([center, pointer], Stroke::new(2.0, fill));

            painter.text(
                pos2(rect.center().x, center.y + radius + 5.0),
                egui::Align2::CENTER_TOP,
                self.label,
                egui::FontId::proportional(11.0),
                Color32::from_rgb(180, 180, 190),
            );

            let value_text = self
                .format_value
                .as_ref()
                .map_or_else(|| format!("{:.2}", *self.value), |f| f(*self.value));
            painter.text(
                pos2(rect.center().x, center.y + radius + 17.0),
                egui::Align2::CENTER_TOP,
                value_text,
                egui::FontId::proportional(10.0),
                Color32::from_rgb(150, 150, 160),
            );
        }

        if changed {
            response.mark_changed();
        }

        response
    }
}

/// Polyline approximation of a circular arc.
fn arc(center: Pos2, radius: f32, start: f32, end: f32, stroke: Stroke) -> Shape {
    const SEGMENTS: usize = 32;
    let points = (0..=SEGMENTS)
        .map(|i| {
            let angle = start + (end - start) * i as f32 / SEGMENTS as f32;
            pos2(center.x + angle.cos() * radius, center.y + angle.sin() * radius)
        })
        .collect();
    Shape::line(points, stroke)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_value_is_midpoint_unless_set() {
        let mut value = 0.5;
        let knob = Knob::new(&mut value, 0.0, 2.0, "Test");
        assert_eq!(knob.default, 1.0);
        let knob = knob.default(0.25);
        assert_eq!(knob.default, 0.25);
    }

    #[test]
    fn normalized_position_clamps() {
        let mut value = 5.0;
        assert_eq!(Knob::new(&mut value, 0.0, 1.0, "T").normalized(), 1.0);
        let mut value = 0.5;
        assert_eq!(Knob::new(&mut value, 0.5, 0.5, "T").normalized(), 0.0);
    }
}

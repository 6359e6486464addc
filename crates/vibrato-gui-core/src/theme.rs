//! Visual styling for the modulation panel.
//!
//! A [`Theme`] is passed by reference into every `ui` call; nothing reads
//! colours from global state.

use egui::{Color32, CornerRadius, Stroke, Style, Visuals};

/// Theme colours and line thickness.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Main window background colour.
    pub background: Color32,
    /// Panel/card background colour.
    pub panel_bg: Color32,
    /// Outline of controls and idle slot borders.
    pub hover: Color32,
    /// Modulation accent: wavetable bars, slot title, fully-mixed borders.
    pub modulation: Color32,
    /// Interactive accent: knob arcs, envelope preview.
    pub interact: Color32,
    /// Overlay fill behind popups (selector, browser).
    pub darken: Color32,
    /// Primary text colour.
    pub text_primary: Color32,
    /// Secondary/muted text colour.
    pub text_secondary: Color32,
    /// Knob background track colour.
    pub knob_track: Color32,
    /// Base stroke width in points.
    pub thickness: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color32::from_rgb(18, 20, 24),
            panel_bg: Color32::from_rgb(30, 32, 38),
            hover: Color32::from_rgb(110, 115, 125),
            modulation: Color32::from_rgb(230, 120, 255),
            interact: Color32::from_rgb(100, 200, 255),
            darken: Color32::from_rgba_unmultiplied(0, 0, 0, 200),
            text_primary: Color32::from_rgb(230, 230, 235),
            text_secondary: Color32::from_rgb(150, 150, 160),
            knob_track: Color32::from_rgb(50, 50, 60),
            thickness: 2.0,
        }
    }
}

impl Theme {
    /// Apply the theme to an egui context.
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = Style::default();
        let mut visuals = Visuals::dark();

        visuals.window_fill = self.panel_bg;
        visuals.panel_fill = self.background;
        visuals.extreme_bg_color = self.background;

        visuals.widgets.noninteractive.bg_fill = self.panel_bg;
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text_secondary);
        visuals.widgets.noninteractive.corner_radius = CornerRadius::same(4);

        visuals.widgets.inactive.bg_fill = self.panel_bg;
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, self.text_primary);
        visuals.widgets.inactive.corner_radius = CornerRadius::same(4);

        visuals.widgets.hovered.bg_fill = self.panel_bg;
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.5, self.interact);
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, self.hover);
        visuals.widgets.hovered.corner_radius = CornerRadius::same(4);

        visuals.widgets.active.fg_stroke = Stroke::new(2.0, self.interact);
        visuals.widgets.active.corner_radius = CornerRadius::same(4);

        visuals.selection.bg_fill = self.modulation.gamma_multiply(0.3);
        visuals.selection.stroke = Stroke::new(1.0, self.modulation);

        visuals.override_text_color = Some(self.text_primary);

        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(6.0, 4.0);
        style.spacing.button_padding = egui::vec2(6.0, 3.0);

        ctx.set_style(style);
    }

    /// Slot border colour for a modulation depth in `[0, 1]`.
    pub fn border_color(&self, depth: f32) -> Color32 {
        lerp_color(self.hover, self.modulation, depth)
    }
}

/// Per-channel linear blend from `a` (t = 0) to `b` (t = 1).
pub fn lerp_color(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let mix = |x: u8, y: u8| -> u8 {
        let v = f32::from(x) + (f32::from(y) - f32::from(x)) * t;
        v.round().clamp(0.0, 255.0) as u8
    };
    Color32::from_rgba_premultiplied(
        mix(a.r(), b.r()),
        mix(a.g(), b.g()),
        mix(a.b(), b.b()),
        mix(a.a(), b.a()),
    )
}

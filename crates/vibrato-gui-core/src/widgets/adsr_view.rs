//! Envelope preview for the AudioRate modulator.

use crate::Theme;
use egui::{Painter, Pos2, Rect, Shape, Stroke, pos2};

/// Normalized envelope values, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AdsrValues {
    /// Attack time.
    pub attack: f32,
    /// Decay time.
    pub decay: f32,
    /// Sustain level.
    pub sustain: f32,
    /// Release time.
    pub release: f32,
}

/// Closed outline of the envelope inside `rect`.
///
/// Starts at the bottom-left. Attack rises to the top at
/// `a / (a + d + r)` of the width, decay falls to the sustain level over the
/// next `d / (a + d + r)`, release returns to the bottom-right. With all times
/// zero the outline is a flat sustain line across the full width.
pub fn adsr_path(v: AdsrValues, rect: Rect) -> Vec<Pos2> {
    let sustain_y = rect.bottom() - rect.height() * v.sustain;
    let total = v.attack + v.decay + v.release;

    let mut path = Vec::with_capacity(5);
    path.push(rect.left_bottom());
    if total > 0.0 {
        let attack_x = rect.left() + rect.width() * (v.attack / total);
        let decay_x = attack_x + rect.width() * (v.decay / total);
        path.push(pos2(attack_x, rect.top()));
        path.push(pos2(decay_x, sustain_y));
    } else {
        path.push(pos2(rect.left(), sustain_y));
        path.push(pos2(rect.right(), sustain_y));
    }
    path.push(rect.right_bottom());
    path
}

/// Cached envelope outline, rebuilt only when values or bounds change.
#[derive(Debug, Clone)]
pub struct AdsrView {
    values: Option<AdsrValues>,
    rect: Rect,
    path: Vec<Pos2>,
}

impl Default for AdsrView {
    fn default() -> Self {
        Self {
            values: None,
            rect: Rect::NOTHING,
            path: Vec::new(),
        }
    }
}

impl AdsrView {
    /// Empty preview.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current values. Returns `true` if the outline was rebuilt.
    pub fn update(&mut self, values: AdsrValues, forced: bool) -> bool {
        if !forced && self.values == Some(values) {
            return false;
        }
        self.values = Some(values);
        self.rebuild();
        true
    }

    /// Move the preview to new bounds, rebuilding if they differ.
    pub fn set_rect(&mut self, rect: Rect) -> bool {
        if self.rect == rect {
            return false;
        }
        self.rect = rect;
        self.rebuild();
        true
    }

    /// Last values fed in.
    pub fn values(&self) -> Option<AdsrValues> {
        self.values
    }

    /// Current outline points.
    pub fn path(&self) -> &[Pos2] {
        &self.path
    }

    /// Stroke the outline.
    pub fn paint(&self, painter: &Painter, theme: &Theme) {
        if self.path.len() > 1 {
            painter.add(Shape::closed_line(
                self.path.clone(),
                Stroke::new(theme.thickness, theme.interact),
            ));
        }
    }

    fn rebuild(&mut self) {
        self.path = match self.values {
            Some(v) if self.rect.is_positive() => adsr_path(v, self.rect),
            _ => Vec::new(),
        };
    }
}

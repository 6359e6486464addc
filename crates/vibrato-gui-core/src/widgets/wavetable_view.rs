//! LFO wavetable preview.
//!
//! Draws [`NUM_WAVE_CYCLES`] cycles of the wavetable at the current table
//! position as [`NUM_BARS`] vertical bars around the mid line, faded towards
//! both edges by a `sin(pi x)^4` window.

use crate::Theme;
use crate::theme::lerp_color;
use egui::{Color32, Painter, Rect, pos2};
use std::f32::consts::PI;
use vibrato_core::LfoTables;

/// Number of bars across the width (2^7 + 1).
pub const NUM_BARS: usize = (1 << 7) + 1;

/// Waveform cycles shown across the width.
pub const NUM_WAVE_CYCLES: usize = 3;

/// One bar of the preview.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    /// Area to fill.
    pub rect: Rect,
    /// Opacity weight in `[0, 1]` from the edge window.
    pub weight: f32,
}

/// Edge-fade window at horizontal position `x` in `[0, 1]`.
pub fn bar_window(x: f32) -> f32 {
    let w = (x * PI).sin();
    let w = w * w;
    w * w
}

/// Wavetable preview state: the table position last drawn.
#[derive(Debug, Clone, Default)]
pub struct WavetableView {
    phase: f32,
}

impl WavetableView {
    /// Preview at table position zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table position currently shown.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Move to table position `phase`. Returns `true` if a repaint is needed.
    pub fn update(&mut self, phase: f32) -> bool {
        if phase.is_nan() || self.phase == phase {
            return false;
        }
        self.phase = phase;
        true
    }

    /// Bar geometry for `tables` inside `rect`.
    pub fn bars(&self, tables: &LfoTables, rect: Rect) -> Vec<Bar> {
        let radius = rect.height() * 0.5;
        let mid_y = rect.top() + radius;
        let bar_width = rect.width() / NUM_BARS as f32;

        (0..NUM_BARS)
            .map(|i| {
                let x = i as f32 / NUM_BARS as f32;
                let cycle_phase = (x * NUM_WAVE_CYCLES as f32).fract();
                let sample = -tables.sample(self.phase, cycle_phase);

                let left = rect.left() + x * rect.width();
                let end_y = mid_y + sample * radius;
                let (top, bottom) = if end_y < mid_y { (end_y, mid_y) } else { (mid_y, end_y) };
                Bar {
                    rect: Rect::from_min_max(pos2(left, top), pos2(left + bar_width, bottom)),
                    weight: bar_window(x),
                }
            })
            .collect()
    }

    /// Paint the preview.
    pub fn paint(&self, painter: &Painter, rect: Rect, tables: &LfoTables, theme: &Theme) {
        let rect = rect.shrink(theme.thickness);
        for bar in self.bars(tables, rect) {
            let color = lerp_color(Color32::TRANSPARENT, theme.modulation, bar.weight);
            painter.rect_filled(bar.rect, 0.0, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;
    use vibrato_core::WavetablePreset;

    fn area() -> Rect {
        Rect::from_min_size(pos2(10.0, 20.0), vec2(258.0, 100.0))
    }

    #[test]
    fn repaint_only_on_phase_change() {
        let mut view = WavetableView::new();
        assert!(!view.update(0.0));
        assert!(view.update(0.3));
        assert!(!view.update(0.3));
        assert!(view.update(0.31));
        assert!(!view.update(f32::NAN));
        assert_eq!(view.phase(), 0.31);
    }

    #[test]
    fn bar_count_and_window() {
        let tables = LfoTables::new(WavetablePreset::Sinc);
        let bars = WavetableView::new().bars(&tables, area());
        assert_eq!(bars.len(), NUM_BARS);
        assert_eq!(bars[0].weight, 0.0);
        assert!(bars[NUM_BARS / 2].weight > 0.99);
        assert!(bars.iter().all(|b| (0.0..=1.0).contains(&b.weight)));
    }

    #[test]
    fn bars_stay_inside_area() {
        let tables = LfoTables::new(WavetablePreset::Weierstrass);
        let rect = area();
        let mut view = WavetableView::new();
        view.update(0.7);
        for bar in view.bars(&tables, rect) {
            assert!(bar.rect.top() >= rect.top() - 1e-3, "{:?}", bar.rect);
            assert!(bar.rect.bottom() <= rect.bottom() + 1e-3, "{:?}", bar.rect);
            assert!(bar.rect.height() >= 0.0);
        }
    }

    #[test]
    fn bars_tile_the_width() {
        let tables = LfoTables::default();
        let rect = area();
        let bars = WavetableView::new().bars(&tables, rect);
        assert_eq!(bars[0].rect.left(), rect.left());
        let last = bars[NUM_BARS - 1].rect;
        assert!((last.right() - rect.right()).abs() < 1e-3);
    }
}

//! Perlin noise modulator panel.

use super::{impl_modulator_panel, knob_row};
use crate::{SlotContext, SlotIndex, Theme};
use egui::Ui;
use vibrato_core::{ModParam, ModType};

/// Freq, Oct, Width.
pub const PERLIN_PARAMS: [ModParam; 3] = [
    ModParam::PerlinFreq,
    ModParam::PerlinOctaves,
    ModParam::PerlinWidth,
];

/// Controls for the Perlin noise modulator.
pub struct PerlinPanel {
    slot: SlotIndex,
    visible: bool,
}

impl PerlinPanel {
    /// Hidden panel for `slot`.
    pub fn new(slot: SlotIndex) -> Self {
        Self { slot, visible: false }
    }

    /// Render the noise controls.
    pub fn ui(&mut self, ui: &mut Ui, ctx: &SlotContext<'_>, theme: &Theme) {
        knob_row(ui, ctx, self.slot, theme, &PERLIN_PARAMS);
    }
}

impl_modulator_panel!(PerlinPanel, ModType::Perlin, PERLIN_PARAMS);

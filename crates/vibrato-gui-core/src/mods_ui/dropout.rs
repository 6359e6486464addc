//! Tape dropout modulator panel.

use super::{impl_modulator_panel, knob_row};
use crate::{SlotContext, SlotIndex, Theme};
use egui::Ui;
use vibrato_core::{ModParam, ModType};

/// Decay, Spin, Chance, Smooth, Width.
pub const DROPOUT_PARAMS: [ModParam; 5] = [
    ModParam::DropoutDecay,
    ModParam::DropoutSpin,
    ModParam::DropoutChance,
    ModParam::DropoutSmooth,
    ModParam::DropoutWidth,
];

/// Controls for the dropout modulator.
pub struct DropoutPanel {
    slot: SlotIndex,
    visible: bool,
}

impl DropoutPanel {
    /// Hidden panel for `slot`.
    pub fn new(slot: SlotIndex) -> Self {
        Self { slot, visible: false }
    }

    /// Render the dropout controls.
    pub fn ui(&mut self, ui: &mut Ui, ctx: &SlotContext<'_>, theme: &Theme) {
        knob_row(ui, ctx, self.slot, theme, &DROPOUT_PARAMS);
    }
}

impl_modulator_panel!(DropoutPanel, ModType::Dropout, DROPOUT_PARAMS);

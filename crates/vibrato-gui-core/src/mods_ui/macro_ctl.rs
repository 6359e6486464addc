//! Macro modulator panel: one knob driving the vibrato delay directly.

use super::{impl_modulator_panel, knob_row};
use crate::{SlotContext, SlotIndex, Theme};
use egui::Ui;
use vibrato_core::{ModParam, ModType};

/// The single macro knob.
pub const MACRO_PARAMS: [ModParam; 1] = [ModParam::Macro];

/// Controls for the macro modulator.
pub struct MacroPanel {
    slot: SlotIndex,
    visible: bool,
}

impl MacroPanel {
    /// Hidden panel for `slot`.
    pub fn new(slot: SlotIndex) -> Self {
        Self { slot, visible: false }
    }

    /// Render the macro knob.
    pub fn ui(&mut self, ui: &mut Ui, ctx: &SlotContext<'_>, theme: &Theme) {
        knob_row(ui, ctx, self.slot, theme, &MACRO_PARAMS);
    }
}

impl_modulator_panel!(MacroPanel, ModType::Macro, MACRO_PARAMS);

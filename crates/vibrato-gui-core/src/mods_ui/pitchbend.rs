//! Pitch-bend modulator panel.

use super::{ModulatorPanel, knob_row};
use crate::{Randomizer, SlotContext, SlotIndex, SlotMessage, Theme};
use egui::Ui;
use vibrato_core::{ModParam, ModType};

/// Smoothing time of the pitch-bend input.
pub const PITCHBEND_PARAMS: [ModParam; 1] = [ModParam::PitchbendSmooth];

/// Controls for the pitch-bend modulator.
///
/// The smoothing time is a setup value, not a sound parameter, so activation
/// leaves it out of the randomizer.
pub struct PitchbendPanel {
    slot: SlotIndex,
    visible: bool,
}

impl PitchbendPanel {
    /// Hidden panel for `slot`.
    pub fn new(slot: SlotIndex) -> Self {
        Self { slot, visible: false }
    }
}

impl ModulatorPanel for PitchbendPanel {
    fn mod_type(&self) -> ModType {
        ModType::Pitchwheel
    }

    fn slot(&self) -> SlotIndex {
        self.slot
    }

    fn params(&self) -> &'static [ModParam] {
        &PITCHBEND_PARAMS
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn activate(&mut self, _randomizer: &mut Randomizer) {
        self.visible = true;
    }

    fn ui(&mut self, ui: &mut Ui, ctx: &SlotContext<'_>, theme: &Theme, _out: &mut Vec<SlotMessage>) {
        knob_row(ui, ctx, self.slot, theme, &PITCHBEND_PARAMS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_skips_randomizer() {
        let mut panel = PitchbendPanel::new(SlotIndex(0));
        let mut randomizer = Randomizer::new();
        panel.activate(&mut randomizer);
        assert!(panel.is_visible());
        assert!(randomizer.is_empty());
    }
}

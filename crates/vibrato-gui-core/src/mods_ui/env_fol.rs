//! Envelope follower modulator panel.

use super::{impl_modulator_panel, knob_row};
use crate::{SlotContext, SlotIndex, Theme};
use egui::Ui;
use vibrato_core::{ModParam, ModType};

/// Attack, Release, Gain, Width.
pub const ENV_FOL_PARAMS: [ModParam; 4] = [
    ModParam::EnvFolAttack,
    ModParam::EnvFolRelease,
    ModParam::EnvFolGain,
    ModParam::EnvFolWidth,
];

/// Controls for the envelope follower.
pub struct EnvFolPanel {
    slot: SlotIndex,
    visible: bool,
}

impl EnvFolPanel {
    /// Hidden panel for `slot`.
    pub fn new(slot: SlotIndex) -> Self {
        Self { slot, visible: false }
    }

    /// Render the follower controls.
    pub fn ui(&mut self, ui: &mut Ui, ctx: &SlotContext<'_>, theme: &Theme) {
        knob_row(ui, ctx, self.slot, theme, &ENV_FOL_PARAMS);
    }
}

impl_modulator_panel!(EnvFolPanel, ModType::EnvFol, ENV_FOL_PARAMS);

//! Modulator sub-panels, one per [`ModType`].
//!
//! Every slot owns all seven panels; at most one is visible. Panels read and
//! write parameters only through the [`ParamBridge`](crate::ParamBridge) in
//! the [`SlotContext`], never touching engine state directly.

/// Implement [`ModulatorPanel`] for a plain panel struct with `slot` and
/// `visible` fields and an inherent `ui` method.
macro_rules! impl_modulator_panel {
    ($panel:ty, $mod_type:expr, $params:expr) => {
        impl $crate::mods_ui::ModulatorPanel for $panel {
            fn mod_type(&self) -> vibrato_core::ModType {
                $mod_type
            }
            fn slot(&self) -> $crate::SlotIndex {
                self.slot
            }
            fn params(&self) -> &'static [vibrato_core::ModParam] {
                &$params
            }
            fn is_visible(&self) -> bool {
                self.visible
            }
            fn set_visible(&mut self, visible: bool) {
                self.visible = visible;
            }
            fn ui(
                &mut self,
                ui: &mut egui::Ui,
                ctx: &$crate::SlotContext<'_>,
                theme: &$crate::Theme,
                _out: &mut Vec<$crate::SlotMessage>,
            ) {
                <$panel>::ui(self, ui, ctx, theme);
            }
        }
    };
}
pub(crate) use impl_modulator_panel;

mod audio_rate;
mod dropout;
mod env_fol;
mod lfo;
mod macro_ctl;
mod perlin;
mod pitchbend;
mod selector;

pub use audio_rate::{AUDIO_RATE_PARAMS, AudioRatePanel};
pub use dropout::{DROPOUT_PARAMS, DropoutPanel};
pub use env_fol::{ENV_FOL_PARAMS, EnvFolPanel};
pub use lfo::{LFO_PARAMS, LfoControls, LfoPanel};
pub use macro_ctl::{MACRO_PARAMS, MacroPanel};
pub use perlin::{PERLIN_PARAMS, PerlinPanel};
pub use pitchbend::{PITCHBEND_PARAMS, PitchbendPanel};
pub use selector::Selector;

use crate::widgets::bridged_knob;
use crate::{Randomizer, SharedTables, SlotContext, SlotIndex, SlotMessage, SlotTiming, Theme};
use egui::Ui;
use std::time::{Duration, Instant};
use vibrato_core::{ModParam, ModType};

/// Behaviour shared by the seven sub-panels.
pub trait ModulatorPanel {
    /// Modulator this panel controls.
    fn mod_type(&self) -> ModType;

    /// Slot the panel belongs to.
    fn slot(&self) -> SlotIndex;

    /// Parameters shown by this panel, in display order.
    fn params(&self) -> &'static [ModParam];

    /// Whether the panel is currently shown.
    fn is_visible(&self) -> bool;

    /// Show or hide the panel.
    fn set_visible(&mut self, visible: bool);

    /// Register this panel's parameters with `randomizer` and show it.
    fn activate(&mut self, randomizer: &mut Randomizer) {
        let slot = self.slot();
        for &p in self.params() {
            randomizer.add_param(slot, p);
        }
        self.set_visible(true);
    }

    /// Periodic work. Returns `true` if the panel needs a repaint.
    fn tick(&mut self, _ctx: &SlotContext<'_>) -> bool {
        false
    }

    /// Time until the panel's next tick is due, if it ticks at all.
    fn time_until_tick(&self, _now: Instant) -> Option<Duration> {
        None
    }

    /// Render the panel. Interactions that change slot state are pushed to `out`.
    fn ui(&mut self, ui: &mut Ui, ctx: &SlotContext<'_>, theme: &Theme, out: &mut Vec<SlotMessage>);
}

/// Knobs for `params` laid out left to right.
pub(crate) fn knob_row(ui: &mut Ui, ctx: &SlotContext<'_>, slot: SlotIndex, theme: &Theme, params: &[ModParam]) {
    ui.horizontal(|ui| {
        for &p in params {
            bridged_knob(ui, ctx.bridge, slot, p.into(), theme);
        }
    });
}

/// A sub-panel of any kind.
pub enum ModPanel {
    /// Perlin noise controls.
    Perlin(PerlinPanel),
    /// MIDI oscillator controls with envelope preview.
    AudioRate(AudioRatePanel),
    /// Tape dropout controls.
    Dropout(DropoutPanel),
    /// Envelope follower controls.
    EnvFol(EnvFolPanel),
    /// Manual macro control.
    Macro(MacroPanel),
    /// Pitch-bend smoothing control.
    Pitchbend(PitchbendPanel),
    /// Wavetable LFO controls.
    Lfo(LfoPanel),
}

macro_rules! dispatch {
    ($self:expr, $p:ident => $body:expr) => {
        match $self {
            ModPanel::Perlin($p) => $body,
            ModPanel::AudioRate($p) => $body,
            ModPanel::Dropout($p) => $body,
            ModPanel::EnvFol($p) => $body,
            ModPanel::Macro($p) => $body,
            ModPanel::Pitchbend($p) => $body,
            ModPanel::Lfo($p) => $body,
        }
    };
}

impl ModPanel {
    /// One panel per selectable modulator, in [`ModType::ALL`] order.
    pub fn build_all(slot: SlotIndex, tables: &SharedTables, timing: &SlotTiming) -> [ModPanel; 7] {
        [
            ModPanel::Perlin(PerlinPanel::new(slot)),
            ModPanel::AudioRate(AudioRatePanel::new(slot, timing.adsr_poll_hz)),
            ModPanel::Dropout(DropoutPanel::new(slot)),
            ModPanel::EnvFol(EnvFolPanel::new(slot)),
            ModPanel::Macro(MacroPanel::new(slot)),
            ModPanel::Pitchbend(PitchbendPanel::new(slot)),
            ModPanel::Lfo(LfoPanel::new(slot, tables.clone(), timing.lfo_poll_hz)),
        ]
    }

    /// The LFO panel, if this is one.
    pub fn as_lfo_mut(&mut self) -> Option<&mut LfoPanel> {
        match self {
            ModPanel::Lfo(p) => Some(p),
            _ => None,
        }
    }

    /// The LFO panel, if this is one.
    pub fn as_lfo(&self) -> Option<&LfoPanel> {
        match self {
            ModPanel::Lfo(p) => Some(p),
            _ => None,
        }
    }

    /// The AudioRate panel, if this is one.
    pub fn as_audio_rate_mut(&mut self) -> Option<&mut AudioRatePanel> {
        match self {
            ModPanel::AudioRate(p) => Some(p),
            _ => None,
        }
    }
}

impl ModulatorPanel for ModPanel {
    fn mod_type(&self) -> ModType {
        dispatch!(self, p => p.mod_type())
    }

    fn slot(&self) -> SlotIndex {
        dispatch!(self, p => p.slot())
    }

    fn params(&self) -> &'static [ModParam] {
        dispatch!(self, p => p.params())
    }

    fn is_visible(&self) -> bool {
        dispatch!(self, p => p.is_visible())
    }

    fn set_visible(&mut self, visible: bool) {
        dispatch!(self, p => p.set_visible(visible))
    }

    fn activate(&mut self, randomizer: &mut Randomizer) {
        dispatch!(self, p => p.activate(randomizer))
    }

    fn tick(&mut self, ctx: &SlotContext<'_>) -> bool {
        dispatch!(self, p => p.tick(ctx))
    }

    fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        dispatch!(self, p => p.time_until_tick(now))
    }

    fn ui(&mut self, ui: &mut Ui, ctx: &SlotContext<'_>, theme: &Theme, out: &mut Vec<SlotMessage>) {
        dispatch!(self, p => ModulatorPanel::ui(p, ui, ctx, theme, out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared_tables;
    use vibrato_core::WavetablePreset;

    #[test]
    fn panels_follow_mod_type_order() {
        let tables = shared_tables(WavetablePreset::Sinc);
        let panels = ModPanel::build_all(SlotIndex(0), &tables, &SlotTiming::default());
        for (panel, t) in panels.iter().zip(ModType::ALL) {
            assert_eq!(panel.mod_type(), t);
            assert!(!panel.is_visible());
        }
    }

    #[test]
    fn param_lists_match_catalogue() {
        let tables = shared_tables(WavetablePreset::Sinc);
        for panel in ModPanel::build_all(SlotIndex(1), &tables, &SlotTiming::default()) {
            let expected: Vec<ModParam> = ModParam::for_mod_type(panel.mod_type()).collect();
            assert_eq!(panel.params(), expected.as_slice(), "{}", panel.mod_type());
            assert_eq!(panel.slot(), SlotIndex(1));
        }
    }

    #[test]
    fn activation_registers_params_and_shows() {
        let tables = shared_tables(WavetablePreset::Sinc);
        let mut panels = ModPanel::build_all(SlotIndex(0), &tables, &SlotTiming::default());
        let mut randomizer = Randomizer::new();
        panels[2].activate(&mut randomizer);
        assert!(panels[2].is_visible());
        assert_eq!(randomizer.params().len(), DROPOUT_PARAMS.len());
        assert_eq!(randomizer.action_count(), 0);
    }
}

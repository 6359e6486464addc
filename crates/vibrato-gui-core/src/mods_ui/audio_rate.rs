//! AudioRate modulator panel: MIDI-controlled oscillator with envelope.

use super::{ModulatorPanel, knob_row};
use crate::widgets::{AdsrValues, AdsrView};
use crate::{SlotContext, SlotIndex, SlotMessage, Theme, Ticker};
use egui::{Sense, Ui, vec2};
use std::time::{Duration, Instant};
use vibrato_core::{ModParam, ModType};

/// Oct, Semi, Fine, Width, RetuneSpeed, Atk, Dcy, Sus, Rls.
pub const AUDIO_RATE_PARAMS: [ModParam; 9] = [
    ModParam::AudioRateOct,
    ModParam::AudioRateSemi,
    ModParam::AudioRateFine,
    ModParam::AudioRateWidth,
    ModParam::AudioRateRetuneSpeed,
    ModParam::AudioRateAtk,
    ModParam::AudioRateDcy,
    ModParam::AudioRateSus,
    ModParam::AudioRateRls,
];

const ENVELOPE: [ModParam; 4] = [
    ModParam::AudioRateAtk,
    ModParam::AudioRateDcy,
    ModParam::AudioRateSus,
    ModParam::AudioRateRls,
];

/// Controls for the AudioRate modulator, with a live envelope preview.
pub struct AudioRatePanel {
    slot: SlotIndex,
    visible: bool,
    adsr: AdsrView,
    ticker: Ticker,
}

impl AudioRatePanel {
    /// Hidden panel for `slot`, refreshing its envelope preview at `adsr_hz`.
    pub fn new(slot: SlotIndex, adsr_hz: f32) -> Self {
        Self {
            slot,
            visible: false,
            adsr: AdsrView::new(),
            ticker: Ticker::from_hz(adsr_hz),
        }
    }

    /// The envelope preview.
    pub fn adsr(&self) -> &AdsrView {
        &self.adsr
    }

    /// Re-read the envelope values; rebuild the preview if they changed or
    /// `forced` is set. Returns `true` if the preview was rebuilt.
    pub fn refresh(&mut self, ctx: &SlotContext<'_>, forced: bool) -> bool {
        let [attack, decay, sustain, release] =
            ENVELOPE.map(|p| ctx.bridge.get_normalized(self.slot, p.into()));
        self.adsr.update(
            AdsrValues {
                attack,
                decay,
                sustain,
                release,
            },
            forced,
        )
    }
}

impl ModulatorPanel for AudioRatePanel {
    fn mod_type(&self) -> ModType {
        ModType::AudioRate
    }

    fn slot(&self) -> SlotIndex {
        self.slot
    }

    fn params(&self) -> &'static [ModParam] {
        &AUDIO_RATE_PARAMS
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn tick(&mut self, ctx: &SlotContext<'_>) -> bool {
        self.ticker.poll(ctx.now) && self.refresh(ctx, false)
    }

    fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        Some(self.ticker.time_until_due(now))
    }

    fn ui(&mut self, ui: &mut Ui, ctx: &SlotContext<'_>, theme: &Theme, _out: &mut Vec<SlotMessage>) {
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                let (rect, _) = ui.allocate_exact_size(vec2(4.0 * 48.0, 48.0), Sense::hover());
                self.adsr.set_rect(rect.shrink(theme.thickness));
                self.adsr.paint(ui.painter(), theme);
                knob_row(ui, ctx, self.slot, theme, &ENVELOPE);
            });
            ui.vertical(|ui| {
                knob_row(ui, ctx, self.slot, theme, &AUDIO_RATE_PARAMS[..3]);
                knob_row(ui, ctx, self.slot, theme, &AUDIO_RATE_PARAMS[3..5]);
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AtomicModEngine, AtomicParamBridge, ParamBridge};

    #[test]
    fn preview_tracks_bridge_values() {
        let bridge = AtomicParamBridge::default();
        let engine = AtomicModEngine::default();
        let start = Instant::now();
        let ctx = SlotContext { bridge: &bridge, engine: &engine, now: start };
        let mut panel = AudioRatePanel::new(SlotIndex(0), 24.0);

        assert!(panel.tick(&ctx), "first tick builds the preview");
        assert!(!panel.tick(&ctx), "not due again yet");

        let later = SlotContext { now: start + Duration::from_millis(50), ..ctx };
        assert!(!panel.tick(&later), "values unchanged");

        bridge.set(SlotIndex(0), ModParam::AudioRateSus.into(), 20.0);
        let later = SlotContext { now: start + Duration::from_millis(100), ..ctx };
        assert!(panel.tick(&later));
        let values = panel.adsr().values().unwrap();
        assert!((values.sustain - 0.2).abs() < 1e-6);
    }
}

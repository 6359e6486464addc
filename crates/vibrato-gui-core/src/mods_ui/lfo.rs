//! Wavetable LFO panel.
//!
//! Besides its knobs the panel owns the wavetable preview and a preset
//! browser. A 4 Hz poll keeps the preview on the current waveform position
//! and the rate controls in step with the sync switch. Without a host
//! playhead tempo sync is impossible, so the switch is hidden and forced off.

use super::ModulatorPanel;
use crate::widgets::{WavetableView, bridged_knob, bridged_switch};
use crate::{ParamIndex, Randomizer, SharedTables, SlotContext, SlotIndex, SlotMessage, Theme, Ticker};
use egui::{Sense, Ui, vec2};
use rand::Rng;
use std::time::{Duration, Instant};
use vibrato_core::{ModParam, ModType, WavetablePreset};

/// FreeSync, RateFree, RateSync, Waveform, Phase, Width.
pub const LFO_PARAMS: [ModParam; 6] = [
    ModParam::LfoFreeSync,
    ModParam::LfoRateFree,
    ModParam::LfoRateSync,
    ModParam::LfoWaveform,
    ModParam::LfoPhase,
    ModParam::LfoWidth,
];

/// Normalized sync values at or above this count as synced.
const SYNC_THRESHOLD: f32 = 0.5;

/// Visibility of the controls that depend on tempo sync.
///
/// Waveform and width are always shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LfoControls {
    /// The free/sync switch.
    pub sync_switch: bool,
    /// Free-running rate in Hz.
    pub rate_free: bool,
    /// Tempo-synced rate in beats.
    pub rate_sync: bool,
    /// Phase offset, only meaningful when synced.
    pub phase: bool,
}

impl LfoControls {
    const HIDDEN: Self = Self {
        sync_switch: false,
        rate_free: false,
        rate_sync: false,
        phase: false,
    };

    const NO_PLAYHEAD: Self = Self {
        sync_switch: false,
        rate_free: true,
        rate_sync: false,
        phase: false,
    };

    fn with_playhead(synced: bool) -> Self {
        Self {
            sync_switch: true,
            rate_free: !synced,
            rate_sync: synced,
            phase: synced,
        }
    }
}

/// Controls for the wavetable LFO.
pub struct LfoPanel {
    slot: SlotIndex,
    visible: bool,
    tables: SharedTables,
    view: WavetableView,
    shown_preset: WavetablePreset,
    browser_open: bool,
    ticker: Ticker,
    /// Sync state the controls were last laid out for.
    synced: Option<bool>,
    controls: LfoControls,
}

impl LfoPanel {
    /// Hidden panel for `slot` drawing from `tables`, polling at `poll_hz`.
    pub fn new(slot: SlotIndex, tables: SharedTables, poll_hz: f32) -> Self {
        let shown_preset = tables.read().preset();
        Self {
            slot,
            visible: false,
            tables,
            view: WavetableView::new(),
            shown_preset,
            browser_open: false,
            ticker: Ticker::from_hz(poll_hz),
            synced: None,
            controls: LfoControls::HIDDEN,
        }
    }

    /// Current visibility of the sync-dependent controls.
    pub fn controls(&self) -> LfoControls {
        self.controls
    }

    /// Whether the wavetable browser is open.
    pub fn is_browser_open(&self) -> bool {
        self.browser_open
    }

    /// The wavetable preview.
    pub fn view(&self) -> &WavetableView {
        &self.view
    }

    /// Open or close the wavetable browser.
    pub fn toggle_browser(&mut self) {
        self.browser_open = !self.browser_open;
    }

    /// Close the browser. Returns `true` if it was open.
    pub fn close_browser(&mut self) -> bool {
        std::mem::replace(&mut self.browser_open, false)
    }

    /// Regenerate the shared tables from `preset` and close the browser.
    pub fn choose_preset(&mut self, preset: WavetablePreset) {
        self.tables.write().generate(preset);
        self.shown_preset = preset;
        self.browser_open = false;
        tracing::debug!(slot = %self.slot, %preset, "wavetable regenerated");
    }

    /// Parameters of this panel a global randomizer may include even when
    /// the LFO is not the active modulator.
    pub fn randomizable_extras(&self) -> [(SlotIndex, ParamIndex); 1] {
        [(self.slot, ModParam::LfoFreeSync.into())]
    }

    fn poll_sync(&mut self, ctx: &SlotContext<'_>) -> bool {
        let sync = ModParam::LfoFreeSync.into();
        let before = self.controls;

        if ctx.engine.has_playhead() {
            let synced = ctx.bridge.get_normalized(self.slot, sync) >= SYNC_THRESHOLD;
            if self.synced != Some(synced) {
                self.synced = Some(synced);
                self.controls = LfoControls::with_playhead(synced);
            }
        } else {
            self.controls = LfoControls::NO_PLAYHEAD;
            // Re-evaluate from scratch once a playhead shows up again.
            self.synced = None;
            if ctx.bridge.get_normalized(self.slot, sync) > SYNC_THRESHOLD {
                tracing::debug!(slot = %self.slot, "no playhead, forcing free-running LFO");
                ctx.bridge.set_with_gesture(self.slot, sync, 0.0);
            }
        }

        self.controls != before
    }

    fn browser_ui(&self, ui: &mut Ui, theme: &Theme, out: &mut Vec<SlotMessage>) {
        egui::Frame::new()
            .fill(theme.darken)
            .corner_radius(theme.thickness)
            .inner_margin(theme.thickness * 2.0)
            .show(ui, |ui| {
                for preset in WavetablePreset::ALL {
                    let button = ui
                        .selectable_label(preset == self.shown_preset, preset.name())
                        .on_hover_text(preset.description());
                    if button.clicked() {
                        out.push(SlotMessage::ChooseWavetable(preset));
                    }
                }
            });
    }
}

impl ModulatorPanel for LfoPanel {
    fn mod_type(&self) -> ModType {
        ModType::Lfo
    }

    fn slot(&self) -> SlotIndex {
        self.slot
    }

    fn params(&self) -> &'static [ModParam] {
        &LFO_PARAMS
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn activate(&mut self, randomizer: &mut Randomizer) {
        for p in LFO_PARAMS {
            randomizer.add_param(self.slot, p);
        }
        let tables = self.tables.clone();
        randomizer.add_action(move |rng| {
            let preset = WavetablePreset::ALL[rng.gen_range(0..WavetablePreset::ALL.len())];
            tables.write().generate(preset);
        });
        self.visible = true;
    }

    fn tick(&mut self, ctx: &SlotContext<'_>) -> bool {
        if !self.ticker.poll(ctx.now) {
            return false;
        }

        let waveform = ctx.bridge.get_normalized(self.slot, ModParam::LfoWaveform.into());
        let mut repaint = self.view.update(waveform);

        // The randomizer regenerates the tables behind the panel's back.
        let preset = self.tables.read().preset();
        if preset != self.shown_preset {
            self.shown_preset = preset;
            repaint = true;
        }

        self.poll_sync(ctx) || repaint
    }

    fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        Some(self.ticker.time_until_due(now))
    }

    fn ui(&mut self, ui: &mut Ui, ctx: &SlotContext<'_>, theme: &Theme, out: &mut Vec<SlotMessage>) {
        let slot = self.slot;
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                if self.controls.rate_free {
                    bridged_knob(ui, ctx.bridge, slot, ModParam::LfoRateFree.into(), theme);
                }
                if self.controls.rate_sync {
                    bridged_knob(ui, ctx.bridge, slot, ModParam::LfoRateSync.into(), theme);
                }
                if self.controls.sync_switch {
                    bridged_switch(ui, ctx.bridge, slot, ModParam::LfoFreeSync.into(), theme);
                }
            });
            ui.vertical(|ui| {
                bridged_knob(ui, ctx.bridge, slot, ModParam::LfoWaveform.into(), theme);
                if ui
                    .button("browse")
                    .on_hover_text("Click here to explore the wavetable browser.")
                    .clicked()
                {
                    out.push(SlotMessage::ToggleBrowser);
                }
            });
            bridged_knob(ui, ctx.bridge, slot, ModParam::LfoWidth.into(), theme);
            if self.controls.phase {
                bridged_knob(ui, ctx.bridge, slot, ModParam::LfoPhase.into(), theme);
            }

            if self.browser_open {
                self.browser_ui(ui, theme, out);
            } else {
                let (rect, response) = ui.allocate_exact_size(vec2(140.0, 70.0), Sense::hover());
                self.view.paint(ui.painter(), rect, &self.tables.read(), theme);
                response.on_hover_text("Here you can admire this LFO's current waveform.");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AtomicModEngine, AtomicParamBridge, ParamBridge, shared_tables};

    struct Fixture {
        bridge: AtomicParamBridge,
        engine: AtomicModEngine,
        panel: LfoPanel,
        now: Instant,
    }

    impl Fixture {
        fn new(playhead: bool) -> Self {
            Self {
                bridge: AtomicParamBridge::default(),
                engine: AtomicModEngine::new(playhead),
                panel: LfoPanel::new(SlotIndex(0), shared_tables(WavetablePreset::Sinc), 4.0),
                now: Instant::now(),
            }
        }

        /// Advance past the next poll and tick.
        fn tick(&mut self) -> bool {
            self.now += Duration::from_millis(260);
            let ctx = SlotContext { bridge: &self.bridge, engine: &self.engine, now: self.now };
            self.panel.tick(&ctx)
        }

        fn set_sync(&self, v: f32) {
            self.bridge.set(SlotIndex(0), ModParam::LfoFreeSync.into(), v);
        }

        fn sync(&self) -> f32 {
            self.bridge.get(SlotIndex(0), ModParam::LfoFreeSync.into())
        }
    }

    #[test]
    fn free_running_with_playhead() {
        let mut f = Fixture::new(true);
        f.tick();
        assert_eq!(f.panel.controls(), LfoControls::with_playhead(false));
        assert!(f.panel.controls().rate_free);
        assert!(!f.panel.controls().phase);
    }

    #[test]
    fn synced_with_playhead_shows_beats_and_phase() {
        let mut f = Fixture::new(true);
        f.set_sync(1.0);
        assert!(f.tick());
        let c = f.panel.controls();
        assert!(c.sync_switch && c.rate_sync && c.phase);
        assert!(!c.rate_free);
    }

    #[test]
    fn relayout_only_when_sync_flips() {
        let mut f = Fixture::new(true);
        assert!(f.tick());
        assert!(!f.tick(), "same state, no repaint");
        f.set_sync(1.0);
        assert!(f.tick());
        assert!(!f.tick());
    }

    #[test]
    fn no_playhead_hides_sync_and_forces_it_off() {
        let mut f = Fixture::new(false);
        f.set_sync(1.0);
        f.tick();
        assert_eq!(f.panel.controls(), LfoControls::NO_PLAYHEAD);
        assert_eq!(f.sync(), 0.0);
        let sync = ModParam::LfoFreeSync.into();
        assert_eq!(f.bridge.gesture_count(SlotIndex(0), sync), 1);

        f.tick();
        assert_eq!(f.bridge.gesture_count(SlotIndex(0), sync), 1, "already off, no write");
    }

    #[test]
    fn playhead_returning_restores_layout() {
        let mut f = Fixture::new(false);
        f.tick();
        f.engine.set_playhead(true);
        f.set_sync(1.0);
        assert!(f.tick());
        assert!(f.panel.controls().rate_sync);
    }

    #[test]
    fn waveform_moves_repaint_preview() {
        let mut f = Fixture::new(true);
        f.tick();
        f.bridge.set(SlotIndex(0), ModParam::LfoWaveform.into(), 0.4);
        assert!(f.tick());
        assert_eq!(f.panel.view().phase(), 0.4);
    }

    #[test]
    fn choosing_preset_regenerates_and_closes_browser() {
        let mut f = Fixture::new(true);
        f.panel.toggle_browser();
        assert!(f.panel.is_browser_open());
        f.panel.choose_preset(WavetablePreset::Triangles);
        assert!(!f.panel.is_browser_open());
        assert_eq!(f.panel.tables.read().preset(), WavetablePreset::Triangles);
    }

    #[test]
    fn activation_adds_preset_action() {
        let mut f = Fixture::new(true);
        let mut randomizer = Randomizer::new();
        f.panel.activate(&mut randomizer);
        assert_eq!(randomizer.params().len(), LFO_PARAMS.len());
        assert_eq!(randomizer.action_count(), 1);
        assert_eq!(
            f.panel.randomizable_extras(),
            [(SlotIndex(0), ParamIndex(ModParam::LfoFreeSync.index()))]
        );
    }
}

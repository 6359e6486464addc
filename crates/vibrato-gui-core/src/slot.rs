//! Modulator slot panel.
//!
//! A [`ModSlot`] is the state machine behind one modulation slot: it owns the
//! seven sub-panels, the transient selector and the randomizer, and keeps the
//! visible sub-panel in step with the engine. Everything that changes slot
//! state arrives as a [`SlotMessage`] through [`ModSlot::update`]; everything
//! the host must act on leaves as a [`SlotEvent`]. Rendering produces
//! messages but never mutates slot state directly.
//!
//! ```text
//! engine ──mod_type()──┐            ┌──► ModTypeChanged ──► engine
//!                      ▼            │
//! Tick / Notify ──► ModSlot::update ├──► Broadcast ──► NotificationBus
//! ui() messages ──►                 └──► RepaintRequested ──► egui
//! ```

use crate::mods_ui::{LfoPanel, ModPanel, ModulatorPanel, Selector};
use crate::{
    ModEngine, Notification, ParamBridge, ParamIndex, Randomizer, SharedTables, SlotIndex, Theme, Ticker,
};
use egui::{RichText, Stroke, Ui};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::{Duration, Instant};
use vibrato_core::{ModType, WavetablePreset};

/// Poll rates and delays of a slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotTiming {
    /// Engine type and depth poll, Hz.
    pub slot_poll_hz: f32,
    /// LFO preview and sync poll, Hz.
    pub lfo_poll_hz: f32,
    /// AudioRate envelope preview poll, Hz.
    pub adsr_poll_hz: f32,
    /// Delay between a patch load and re-reading the engine.
    pub resync_delay: Duration,
}

impl Default for SlotTiming {
    fn default() -> Self {
        Self {
            slot_poll_hz: 8.0,
            lfo_poll_hz: 4.0,
            adsr_poll_hz: 24.0,
            resync_delay: Duration::from_millis(100),
        }
    }
}

/// What a slot sees of the outside world during one update or frame.
#[derive(Clone, Copy)]
pub struct SlotContext<'a> {
    /// Parameter access.
    pub bridge: &'a dyn ParamBridge,
    /// Engine state.
    pub engine: &'a dyn ModEngine,
    /// Clock used for every poll.
    pub now: Instant,
}

/// Input to [`ModSlot::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlotMessage {
    /// Run due periodic work.
    Tick,
    /// A modulator was picked in the selector.
    Select(ModType),
    /// The selector button was pressed.
    ToggleSelector,
    /// An editor-wide notification arrived.
    Notify(Notification),
    /// The randomize button was pressed.
    Randomize,
    /// The LFO browse button was pressed.
    ToggleBrowser,
    /// A wavetable preset was picked in the LFO browser.
    ChooseWavetable(WavetablePreset),
    /// The slot's bounds changed.
    Resized,
}

/// Output of [`ModSlot::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlotEvent {
    /// The slot switched modulator; the engine should adopt it.
    ModTypeChanged(ModType),
    /// Publish to every other panel.
    Broadcast(Notification),
    /// Something visible changed.
    RepaintRequested,
    /// Every sub-panel was hidden.
    PanelsHidden,
    /// The sub-panel of this modulator became visible.
    PanelShown(ModType),
}

/// One modulation slot of the editor.
pub struct ModSlot {
    slot: SlotIndex,
    mod_type: ModType,
    depth: f32,
    panels: [ModPanel; 7],
    selector: Option<Selector>,
    randomizer: Randomizer,
    rng: StdRng,
    poll: Ticker,
    resync_delay: Duration,
    pending_resync: Option<Instant>,
}

impl ModSlot {
    /// Slot with no modulator selected. The first tick adopts the engine's.
    pub fn new(slot: impl Into<SlotIndex>, tables: SharedTables, timing: &SlotTiming) -> Self {
        let slot = slot.into();
        Self {
            slot,
            mod_type: ModType::None,
            depth: 0.0,
            panels: ModPanel::build_all(slot, &tables, timing),
            selector: None,
            randomizer: Randomizer::new(),
            rng: StdRng::from_entropy(),
            poll: Ticker::from_hz(timing.slot_poll_hz),
            resync_delay: timing.resync_delay,
            pending_resync: None,
        }
    }

    /// Use a deterministic random source.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Apply one message and report what the host must do.
    pub fn update(&mut self, message: SlotMessage, ctx: &SlotContext<'_>) -> Vec<SlotEvent> {
        let mut events = Vec::new();
        match message {
            SlotMessage::Tick => self.tick(ctx, &mut events),
            SlotMessage::Select(t) => {
                self.selector = None;
                events.extend(self.set_mod_type(t));
                events.push(SlotEvent::RepaintRequested);
            }
            SlotMessage::ToggleSelector => {
                if self.selector.take().is_none() {
                    self.selector = Some(Selector::new());
                    events.push(SlotEvent::Broadcast(Notification::KillPopups));
                }
                events.push(SlotEvent::RepaintRequested);
            }
            SlotMessage::Notify(Notification::PatchUpdated) => {
                let deadline = ctx.now + self.resync_delay;
                tracing::debug!(slot = %self.slot, delay = ?self.resync_delay, "patch updated, re-sync scheduled");
                self.pending_resync = Some(deadline);
            }
            SlotMessage::Notify(Notification::KillPopups) => {
                let closed_selector = self.selector.take().is_some();
                let closed_browser = self.lfo_mut().is_some_and(LfoPanel::close_browser);
                if closed_selector || closed_browser {
                    events.push(SlotEvent::RepaintRequested);
                }
            }
            SlotMessage::Randomize => {
                self.randomize_all(ctx.bridge);
                events.push(SlotEvent::RepaintRequested);
            }
            SlotMessage::ToggleBrowser => {
                if let Some(lfo) = self.lfo_mut() {
                    lfo.toggle_browser();
                    events.push(SlotEvent::RepaintRequested);
                }
            }
            SlotMessage::ChooseWavetable(preset) => {
                if let Some(lfo) = self.lfo_mut() {
                    lfo.choose_preset(preset);
                    events.push(SlotEvent::RepaintRequested);
                }
            }
            SlotMessage::Resized => {
                if let Some(p) = self.panels.iter_mut().find_map(ModPanel::as_audio_rate_mut) {
                    p.refresh(ctx, true);
                }
                events.push(SlotEvent::RepaintRequested);
            }
        }
        dedup_repaints(&mut events);
        events
    }

    fn tick(&mut self, ctx: &SlotContext<'_>, events: &mut Vec<SlotEvent>) {
        if let Some(deadline) = self.pending_resync
            && ctx.now >= deadline
        {
            self.pending_resync = None;
            let engine_type = ctx.engine.mod_type(self.slot.0);
            tracing::debug!(slot = %self.slot, mod_type = %engine_type, "deferred re-sync");
            events.extend(self.set_mod_type(engine_type));
            self.poll.reset();
        }

        if self.poll.poll(ctx.now) {
            if self.pending_resync.is_none() {
                events.extend(self.set_mod_type(ctx.engine.mod_type(self.slot.0)));
            }
            if self.sync_depth(ctx.bridge.mix()) {
                events.push(SlotEvent::RepaintRequested);
            }
        }

        for panel in &mut self.panels {
            if panel.tick(ctx) && panel.is_visible() {
                events.push(SlotEvent::RepaintRequested);
            }
        }
    }

    /// Switch to `mod_type`.
    ///
    /// Does nothing if it is already active. Otherwise every sub-panel is
    /// hidden and the randomizer cleared before the new sub-panel registers
    /// its parameters and is shown.
    pub fn set_mod_type(&mut self, mod_type: ModType) -> Vec<SlotEvent> {
        if mod_type == self.mod_type {
            return Vec::new();
        }

        let mut events = Vec::with_capacity(4);
        for panel in &mut self.panels {
            panel.set_visible(false);
        }
        self.randomizer.clear();
        events.push(SlotEvent::PanelsHidden);

        if let Some(i) = mod_type.index() {
            self.panels[i].activate(&mut self.randomizer);
            events.push(SlotEvent::PanelShown(mod_type));
        }

        tracing::debug!(slot = %self.slot, from = %self.mod_type, to = %mod_type, "modulator switched");
        self.mod_type = mod_type;
        self.selector = None;
        events.push(SlotEvent::ModTypeChanged(mod_type));
        events.push(SlotEvent::RepaintRequested);
        events
    }

    /// Randomize every registered parameter and run registered actions.
    pub fn randomize_all(&mut self, bridge: &dyn ParamBridge) {
        self.randomizer.randomize_all(bridge, &mut self.rng);
    }

    /// Mirror the mods-mix parameter into this slot's depth.
    ///
    /// Slot 0 runs at `1 - mix`, every other slot at `mix`. Returns `true` if
    /// the depth changed.
    pub fn sync_depth(&mut self, mix: f32) -> bool {
        let mix = mix.clamp(0.0, 1.0);
        let depth = if self.slot.0 == 0 { 1.0 - mix } else { mix };
        if depth == self.depth {
            return false;
        }
        self.depth = depth;
        true
    }

    /// Slot index.
    pub fn slot(&self) -> SlotIndex {
        self.slot
    }

    /// Active modulator.
    pub fn mod_type(&self) -> ModType {
        self.mod_type
    }

    /// Header title.
    pub fn title(&self) -> &'static str {
        self.mod_type.title()
    }

    /// Header input hint, if the modulator takes external input.
    pub fn input_hint(&self) -> Option<&'static str> {
        self.mod_type.input_hint()
    }

    /// Mirrored modulation depth in `[0, 1]`.
    pub fn depth(&self) -> f32 {
        self.depth
    }

    /// Modulators whose sub-panel is currently visible.
    pub fn visible_panels(&self) -> Vec<ModType> {
        self.panels
            .iter()
            .filter(|p| p.is_visible())
            .map(ModulatorPanel::mod_type)
            .collect()
    }

    /// Number of visible sub-panels.
    pub fn visible_count(&self) -> usize {
        self.panels.iter().filter(|p| p.is_visible()).count()
    }

    /// Whether the selector is open.
    pub fn selector_open(&self) -> bool {
        self.selector.is_some()
    }

    /// Deadline of a scheduled re-sync.
    pub fn pending_resync(&self) -> Option<Instant> {
        self.pending_resync
    }

    /// The randomizer with the active sub-panel's registrations.
    pub fn randomizer(&self) -> &Randomizer {
        &self.randomizer
    }

    /// Parameters a global randomizer may include beyond the active panel's.
    pub fn randomizable_extras(&self) -> Vec<(SlotIndex, ParamIndex)> {
        self.lfo().map(|l| l.randomizable_extras().to_vec()).unwrap_or_default()
    }

    /// The LFO sub-panel.
    pub fn lfo(&self) -> Option<&LfoPanel> {
        self.panels.iter().find_map(ModPanel::as_lfo)
    }

    /// The LFO sub-panel.
    pub fn lfo_mut(&mut self) -> Option<&mut LfoPanel> {
        self.panels.iter_mut().find_map(ModPanel::as_lfo_mut)
    }

    /// Time until any periodic work of this slot is due.
    pub fn next_repaint_in(&self, now: Instant) -> Duration {
        let mut next = self.poll.time_until_due(now);
        if let Some(deadline) = self.pending_resync {
            next = next.min(deadline.saturating_duration_since(now));
        }
        self.panels
            .iter()
            .filter(|p| p.is_visible())
            .filter_map(|p| p.time_until_tick(now))
            .fold(next, Duration::min)
    }

    /// Render the slot. Returns the messages produced by interaction.
    pub fn ui(&mut self, ui: &mut Ui, ctx: &SlotContext<'_>, theme: &Theme) -> Vec<SlotMessage> {
        let mut out = Vec::new();
        egui::Frame::new()
            .fill(theme.panel_bg)
            .stroke(Stroke::new(theme.thickness, theme.border_color(self.depth)))
            .corner_radius(theme.thickness * 2.0)
            .inner_margin(theme.thickness * 3.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(format!("Mod {}", self.slot.0 + 1)).color(theme.text_secondary));
                    ui.label(RichText::new(self.title()).strong().color(theme.modulation));
                    if let Some(hint) = self.input_hint() {
                        ui.label(RichText::new(hint).small().color(theme.hover));
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let arrow = if self.selector.is_some() { ">>" } else { "<<" };
                        if ui
                            .button(arrow)
                            .on_hover_text("Click here to choose a modulator for this slot.")
                            .clicked()
                        {
                            out.push(SlotMessage::ToggleSelector);
                        }
                        if ui
                            .button("randomize")
                            .on_hover_text("Randomize this modulator's parameters.")
                            .clicked()
                        {
                            out.push(SlotMessage::Randomize);
                        }
                    });
                });
                ui.separator();

                if let Some(selector) = &self.selector {
                    if let Some(t) = selector.ui(ui, theme) {
                        out.push(SlotMessage::Select(t));
                    }
                } else {
                    for panel in self.panels.iter_mut().filter(|p| p.is_visible()) {
                        panel.ui(ui, ctx, theme, &mut out);
                    }
                }
            });
        out
    }
}

/// Keep only the first [`SlotEvent::RepaintRequested`].
fn dedup_repaints(events: &mut Vec<SlotEvent>) {
    let mut seen = false;
    events.retain(|e| {
        if *e != SlotEvent::RepaintRequested {
            return true;
        }
        !std::mem::replace(&mut seen, true)
    });
}

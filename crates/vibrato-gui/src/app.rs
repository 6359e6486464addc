//! Main application state and UI layout.

use crate::host::PluginHost;
use egui::{CentralPanel, Context, RichText, TopBottomPanel, Vec2};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use vibrato_config::{ConfigError, ModPatch, PanelConfig, ensure_user_patches_dir, patch_name_from_path};
use vibrato_core::{NUM_SLOTS, mods_mix_descriptor};
use vibrato_gui_core::widgets::Knob;
use vibrato_gui_core::{
    ModEngine, ModSlot, Notification, NotificationBus, ParamBridge, Randomizer, SlotContext, SlotEvent,
    SlotMessage, SlotTiming, Subscription, Theme, shared_tables,
};

/// Upper bound between frames while idle.
const IDLE_REPAINT: Duration = Duration::from_millis(250);

/// Slot timing from the panel configuration.
pub fn slot_timing(config: &PanelConfig) -> SlotTiming {
    SlotTiming {
        slot_poll_hz: config.timing.slot_poll_hz,
        lfo_poll_hz: config.timing.lfo_poll_hz,
        adsr_poll_hz: config.timing.adsr_poll_hz,
        resync_delay: config.timing.resync_delay(),
    }
}

/// A slot panel with its notification inbox and last laid-out size.
struct SlotView {
    slot: ModSlot,
    inbox: Subscription,
    size: Option<Vec2>,
}

/// Main application state.
pub struct VibratoApp {
    host: PluginHost,
    bus: NotificationBus,
    slots: Vec<SlotView>,
    theme: Theme,
    patch_name: Option<String>,
    status: Option<String>,
}

impl VibratoApp {
    /// Build the editor. A failing startup patch is logged and reported in
    /// the status line, never fatal.
    pub fn new(cc: &eframe::CreationContext<'_>, config: &PanelConfig, patch: Option<&Path>, has_playhead: bool) -> Self {
        let mut app = Self::headless(config, has_playhead);
        app.theme.apply(&cc.egui_ctx);

        if let Some(path) = patch {
            app.load_patch_reporting(path);
        }
        app
    }

    /// Editor state without a window.
    pub fn headless(config: &PanelConfig, has_playhead: bool) -> Self {
        let preset = config.wavetable.preset().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to the default wavetable");
            Default::default()
        });
        let tables = shared_tables(preset);
        let timing = slot_timing(config);
        let bus = NotificationBus::new();

        let slots = (0..NUM_SLOTS)
            .map(|i| SlotView {
                slot: ModSlot::new(i, tables.clone(), &timing),
                inbox: bus.subscribe(),
                size: None,
            })
            .collect();

        Self {
            host: PluginHost::new(has_playhead),
            bus,
            slots,
            theme: Theme::default(),
            patch_name: None,
            status: None,
        }
    }

    /// The demo engine.
    pub fn host(&self) -> &PluginHost {
        &self.host
    }

    /// The slot panels.
    pub fn slots(&self) -> impl Iterator<Item = &ModSlot> {
        self.slots.iter().map(|v| &v.slot)
    }

    /// Load a patch into the engine and tell every slot to re-sync.
    pub fn load_patch(&mut self, path: &Path) -> Result<usize, ConfigError> {
        let patch = ModPatch::load(path)?;
        let applied = patch.apply(&self.host)?;
        self.bus.publish(Notification::PatchUpdated);
        tracing::info!(name = %patch.name, applied, "patch applied");
        self.patch_name = Some(patch.name);
        Ok(applied)
    }

    /// Save the current engine state as a patch.
    pub fn save_patch(&mut self, path: &Path) -> Result<(), ConfigError> {
        let name = patch_name_from_path(path).unwrap_or_else(|| "Untitled".to_owned());
        ModPatch::capture(name.clone(), &self.host).save(path)?;
        tracing::info!(path = %path.display(), "patch saved");
        self.patch_name = Some(name);
        Ok(())
    }

    fn load_patch_reporting(&mut self, path: &Path) {
        match self.load_patch(path) {
            Ok(_) => self.status = None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not load patch");
                self.status = Some(e.to_string());
            }
        }
    }

    /// Randomize every slot, including parameters outside the active panels
    /// that are safe to shuffle.
    pub fn randomize_everything(&mut self, now: Instant) {
        let mut extras = Randomizer::new();
        for view in &self.slots {
            for (slot, param) in view.slot.randomizable_extras() {
                extras.add_param(slot, param);
            }
        }
        extras.randomize_all(self.host.bridge(), &mut rand::thread_rng());

        for i in 0..self.slots.len() {
            self.dispatch(i, SlotMessage::Randomize, now, None);
        }
    }

    /// Feed one message to slot `index` and act on its events.
    fn dispatch(&mut self, index: usize, message: SlotMessage, now: Instant, egui_ctx: Option<&Context>) {
        let Self { host, bus, slots, .. } = self;
        let Some(view) = slots.get_mut(index) else {
            return;
        };
        let ctx = SlotContext {
            bridge: host.bridge(),
            engine: host.engine(),
            now,
        };
        for event in view.slot.update(message, &ctx) {
            match event {
                SlotEvent::Broadcast(n) => {
                    bus.publish_from(view.inbox.id(), n);
                }
                SlotEvent::RepaintRequested => {
                    if let Some(c) = egui_ctx {
                        c.request_repaint();
                    }
                }
                other => {
                    host.apply_event(view.slot.slot(), &other);
                }
            }
        }
    }

    /// Deliver pending notifications, then run due periodic work.
    pub fn pump(&mut self, now: Instant, egui_ctx: Option<&Context>) {
        for i in 0..self.slots.len() {
            let pending: Vec<Notification> = self.slots[i].inbox.drain().collect();
            for n in pending {
                self.dispatch(i, SlotMessage::Notify(n), now, egui_ctx);
            }
            self.dispatch(i, SlotMessage::Tick, now, egui_ctx);
        }
    }

    fn next_repaint_in(&self, now: Instant) -> Duration {
        self.slots
            .iter()
            .map(|v| v.slot.next_repaint_in(now))
            .fold(IDLE_REPAINT, Duration::min)
    }

    fn render_header(&mut self, ui: &mut egui::Ui, now: Instant) {
        ui.horizontal(|ui| {
            ui.heading(RichText::new("VIBRATO").color(self.theme.modulation).strong());
            if let Some(name) = &self.patch_name {
                ui.label(RichText::new(name).color(self.theme.text_secondary));
            }

            ui.add_space(12.0);
            if ui.button("Load patch").clicked() {
                let dir = ensure_user_patches_dir().ok();
                let mut dialog = rfd::FileDialog::new().add_filter("Patch", &["toml"]);
                if let Some(dir) = dir {
                    dialog = dialog.set_directory(dir);
                }
                if let Some(path) = dialog.pick_file() {
                    self.load_patch_reporting(&path);
                }
            }
            if ui.button("Save patch").clicked()
                && let Some(path) = save_dialog()
                && let Err(e) = self.save_patch(&path)
            {
                tracing::warn!(error = %e, "could not save patch");
                self.status = Some(e.to_string());
            }
            if ui.button("Randomize all").clicked() {
                self.randomize_everything(now);
            }

            let mut playhead = self.host.engine().has_playhead();
            if ui.checkbox(&mut playhead, "Host playhead").changed() {
                tracing::info!(playhead, "host playhead toggled");
                self.host.engine().set_playhead(playhead);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                self.render_mix(ui);
                if let Some(status) = &self.status {
                    ui.label(RichText::new(status).small().color(self.theme.hover));
                }
            });
        });
    }

    fn render_mix(&mut self, ui: &mut egui::Ui) {
        let desc = mods_mix_descriptor();
        let bridge = self.host.bridge();
        let mut mix = bridge.mix();
        let response = ui
            .add(
                Knob::new(&mut mix, 0.0, 1.0, desc.short_name)
                    .default(desc.normalize(desc.default))
                    .colors(self.theme.knob_track, self.theme.interact)
                    .format(|v| format!("{:.0}%", desc.denormalize(v))),
            )
            .on_hover_text("Crossfade between the two modulation slots.");
        if response.changed() {
            bridge.set_mix(mix);
        }
    }
}

fn save_dialog() -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new()
        .add_filter("Patch", &["toml"])
        .set_file_name("patch.toml");
    if let Ok(dir) = ensure_user_patches_dir() {
        dialog = dialog.set_directory(dir);
    }
    dialog.save_file()
}

impl eframe::App for VibratoApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.pump(now, Some(ctx));

        TopBottomPanel::top("header").show(ctx, |ui| self.render_header(ui, now));

        let mut outbox: Vec<(usize, SlotMessage)> = Vec::new();
        CentralPanel::default().show(ctx, |ui| {
            ui.columns(self.slots.len(), |columns| {
                for (i, (ui, view)) in columns.iter_mut().zip(&mut self.slots).enumerate() {
                    let size = ui.available_size();
                    if view.size != Some(size) {
                        view.size = Some(size);
                        outbox.push((i, SlotMessage::Resized));
                    }
                    let slot_ctx = SlotContext {
                        bridge: self.host.bridge(),
                        engine: self.host.engine(),
                        now,
                    };
                    for message in view.slot.ui(ui, &slot_ctx, &self.theme) {
                        outbox.push((i, message));
                    }
                }
            });
        });

        for (i, message) in outbox {
            self.dispatch(i, message, now, Some(ctx));
        }

        ctx.request_repaint_after(self.next_repaint_in(now));
    }
}

//! Demo engine state for the standalone host.
//!
//! Stands in for the plugin: parameters live in an [`AtomicParamBridge`],
//! the modulator type of each slot in an [`AtomicModEngine`]. Patch files
//! read from and write to both through [`PatchSource`] / [`PatchTarget`].

use std::sync::Arc;
use vibrato_config::{PatchSource, PatchTarget};
use vibrato_core::{ModParam, ModType};
use vibrato_gui_core::{AtomicModEngine, AtomicParamBridge, ModEngine, ParamBridge, SlotEvent, SlotIndex};

/// Parameter store plus engine state of one plugin instance.
#[derive(Clone)]
pub struct PluginHost {
    bridge: Arc<AtomicParamBridge>,
    engine: Arc<AtomicModEngine>,
}

impl PluginHost {
    /// Fresh instance with every parameter at its default and no modulators.
    pub fn new(has_playhead: bool) -> Self {
        Self {
            bridge: Arc::new(AtomicParamBridge::default()),
            engine: Arc::new(AtomicModEngine::new(has_playhead)),
        }
    }

    /// Parameter store.
    pub fn bridge(&self) -> &AtomicParamBridge {
        &self.bridge
    }

    /// Engine state.
    pub fn engine(&self) -> &AtomicModEngine {
        &self.engine
    }

    /// Adopt what a slot reports. Only [`SlotEvent::ModTypeChanged`] touches
    /// the engine; returns `true` if it did.
    pub fn apply_event(&self, slot: SlotIndex, event: &SlotEvent) -> bool {
        match *event {
            SlotEvent::ModTypeChanged(t) => {
                self.engine.set_mod_type(slot.0, t);
                true
            }
            _ => false,
        }
    }
}

impl PatchTarget for PluginHost {
    fn set_mod_type(&self, slot: usize, mod_type: ModType) {
        self.engine.set_mod_type(slot, mod_type);
    }

    fn set_normalized(&self, slot: usize, param: ModParam, value: f32) {
        let (slot, param) = (SlotIndex(slot), param.into());
        self.bridge.begin_set(slot, param);
        self.bridge.set_normalized(slot, param, value);
        self.bridge.end_set(slot, param);
    }

    fn set_mix_normalized(&self, value: f32) {
        self.bridge.set_mix(value);
    }
}

impl PatchSource for PluginHost {
    fn mod_type(&self, slot: usize) -> ModType {
        ModEngine::mod_type(&*self.engine, slot)
    }

    fn normalized(&self, slot: usize, param: ModParam) -> f32 {
        self.bridge.get_normalized(SlotIndex(slot), param.into())
    }

    fn mix_normalized(&self) -> f32 {
        self.bridge.mix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vibrato_config::{ModPatch, SlotPatch};

    #[test]
    fn patch_round_trip_through_host() {
        let host = PluginHost::new(true);
        let patch = ModPatch::new("Wobble")
            .with_mix(0.25)
            .with_slot(SlotPatch::new(ModType::Lfo).with_param(ModParam::LfoWidth, 0.8))
            .with_slot(SlotPatch::new(ModType::Dropout));

        let applied = patch.apply(&host).unwrap();
        assert_eq!(applied, 2);
        assert_eq!(ModEngine::mod_type(host.engine(), 0), ModType::Lfo);
        assert_eq!(ModEngine::mod_type(host.engine(), 1), ModType::Dropout);
        assert!((host.normalized(0, ModParam::LfoWidth) - 0.8).abs() < 1e-6);
        assert_eq!(host.mix_normalized(), 0.25);
        assert_eq!(host.bridge().open_gestures(), 0);

        let captured = ModPatch::capture("Wobble", &host);
        assert_eq!(captured.slots[0].mod_type, "lfo");
        assert_eq!(captured.mix, Some(0.25));
    }

    #[test]
    fn only_type_changes_reach_the_engine() {
        let host = PluginHost::new(false);
        assert!(host.apply_event(SlotIndex(1), &SlotEvent::ModTypeChanged(ModType::Macro)));
        assert!(!host.apply_event(SlotIndex(1), &SlotEvent::RepaintRequested));
        assert_eq!(ModEngine::mod_type(host.engine(), 1), ModType::Macro);
        assert!(!host.engine().has_playhead());
    }
}

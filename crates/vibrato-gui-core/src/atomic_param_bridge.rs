//! [`ParamBridge`] implementation backed by atomic floats.
//!
//! [`AtomicParamBridge`] stores every slot's parameters in lock-free atomics
//! indexed by [`ModParam`]. The GUI thread writes, the modulation engine reads.
//! Gestures are counted rather than forwarded, which is all a standalone host
//! needs and what tests assert against.

use crate::{ParamBridge, ParamIndex, SlotIndex};
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use vibrato_core::{ModParam, NUM_SLOTS, ParamDescriptor, mods_mix_descriptor};

/// Per-slot parameter storage.
struct SlotState {
    /// Plain values as `f32` bits, one per [`ModParam`].
    values: Vec<AtomicU32>,
    /// Completed gestures per parameter.
    gestures: Vec<AtomicU32>,
}

impl SlotState {
    fn new(descriptors: &[ParamDescriptor]) -> Self {
        Self {
            values: descriptors
                .iter()
                .map(|d| AtomicU32::new(d.default.to_bits()))
                .collect(),
            gestures: descriptors.iter().map(|_| AtomicU32::new(0)).collect(),
        }
    }
}

/// Thread-safe parameter store for all modulation slots.
///
/// Values are stored in plain units (Hz, ms, 0–100 for percent) and clamped
/// on write. The mods-mix parameter is stored normalized.
pub struct AtomicParamBridge {
    slots: Vec<SlotState>,
    descriptors: Vec<ParamDescriptor>,
    mix: AtomicU32,
    open_gestures: AtomicUsize,
}

impl AtomicParamBridge {
    /// Bridge with `slot_count` slots, every parameter at its default.
    pub fn new(slot_count: usize) -> Self {
        let descriptors: Vec<ParamDescriptor> =
            ModParam::ALL.iter().map(|p| p.descriptor()).collect();
        let slots = (0..slot_count).map(|_| SlotState::new(&descriptors)).collect();
        let mix_default = mods_mix_descriptor();
        Self {
            slots,
            descriptors,
            mix: AtomicU32::new(mix_default.normalize(mix_default.default).to_bits()),
            open_gestures: AtomicUsize::new(0),
        }
    }

    /// Reset every parameter of every slot to its default.
    pub fn reset_to_defaults(&self) {
        for slot in &self.slots {
            for (value, desc) in slot.values.iter().zip(&self.descriptors) {
                value.store(desc.default.to_bits(), Ordering::Release);
            }
        }
    }

    /// Number of gestures opened and not yet closed.
    pub fn open_gestures(&self) -> usize {
        self.open_gestures.load(Ordering::Acquire)
    }

    /// Number of completed gestures on one parameter.
    pub fn gesture_count(&self, slot: SlotIndex, param: ParamIndex) -> u32 {
        self.slots
            .get(slot.0)
            .and_then(|s| s.gestures.get(param.0))
            .map_or(0, |g| g.load(Ordering::Acquire))
    }
}

impl Default for AtomicParamBridge {
    fn default() -> Self {
        Self::new(NUM_SLOTS)
    }
}

impl ParamBridge for AtomicParamBridge {
    fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn param_count(&self, slot: SlotIndex) -> usize {
        if slot.0 < self.slots.len() {
            self.descriptors.len()
        } else {
            0
        }
    }

    fn param_descriptor(&self, slot: SlotIndex, param: ParamIndex) -> Option<ParamDescriptor> {
        if slot.0 < self.slots.len() {
            self.descriptors.get(param.0).cloned()
        } else {
            None
        }
    }

    fn get(&self, slot: SlotIndex, param: ParamIndex) -> f32 {
        self.slots
            .get(slot.0)
            .and_then(|s| s.values.get(param.0))
            .map(|v| f32::from_bits(v.load(Ordering::Acquire)))
            .unwrap_or(0.0)
    }

    fn set(&self, slot: SlotIndex, param: ParamIndex, value: f32) {
        if let Some(s) = self.slots.get(slot.0)
            && let Some((atomic, desc)) = s.values.get(param.0).zip(self.descriptors.get(param.0))
        {
            let clamped = if value.is_nan() { desc.default } else { desc.clamp(value) };
            atomic.store(clamped.to_bits(), Ordering::Release);
        }
    }

    fn begin_set(&self, slot: SlotIndex, param: ParamIndex) {
        if slot.0 < self.slots.len() && param.0 < self.descriptors.len() {
            self.open_gestures.fetch_add(1, Ordering::AcqRel);
            tracing::trace!(%slot, %param, "gesture begin");
        }
    }

    fn end_set(&self, slot: SlotIndex, param: ParamIndex) {
        if let Some(g) = self.slots.get(slot.0).and_then(|s| s.gestures.get(param.0)) {
            // Unbalanced end_set calls must not wrap the counter.
            let _ = self
                .open_gestures
                .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1));
            g.fetch_add(1, Ordering::AcqRel);
            tracing::trace!(%slot, %param, "gesture end");
        }
    }

    fn mix(&self) -> f32 {
        f32::from_bits(self.mix.load(Ordering::Acquire))
    }

    fn set_mix(&self, normalized: f32) {
        let v = if normalized.is_nan() { 0.5 } else { normalized.clamp(0.0, 1.0) };
        self.mix.store(v.to_bits(), Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(p: ModParam) -> ParamIndex {
        p.into()
    }

    #[test]
    fn starts_at_defaults() {
        let bridge = AtomicParamBridge::default();
        assert_eq!(bridge.slot_count(), NUM_SLOTS);
        assert_eq!(bridge.param_count(SlotIndex(0)), ModParam::COUNT);
        for p in ModParam::ALL {
            assert_eq!(bridge.get(SlotIndex(1), idx(p)), p.descriptor().default);
        }
        assert_eq!(bridge.mix(), 0.5);
    }

    #[test]
    fn set_clamps_to_range() {
        let bridge = AtomicParamBridge::default();
        let slot = SlotIndex(0);
        bridge.set(slot, idx(ModParam::DropoutChance), 40.0);
        assert_eq!(bridge.get(slot, idx(ModParam::DropoutChance)), 40.0);

        bridge.set(slot, idx(ModParam::DropoutChance), 999.0);
        assert_eq!(bridge.get(slot, idx(ModParam::DropoutChance)), 100.0);
    }

    #[test]
    fn slots_are_independent() {
        let bridge = AtomicParamBridge::default();
        bridge.set(SlotIndex(0), idx(ModParam::Macro), 80.0);
        assert_eq!(bridge.get(SlotIndex(1), idx(ModParam::Macro)), 0.0);
    }

    #[test]
    fn normalized_helpers_follow_scale() {
        let bridge = AtomicParamBridge::default();
        let slot = SlotIndex(0);
        let p = idx(ModParam::PerlinFreq);
        bridge.set_normalized(slot, p, 1.0);
        assert_eq!(bridge.get(slot, p), 40.0);
        assert!((bridge.get_normalized(slot, p) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn gestures_are_counted_and_balanced() {
        let bridge = AtomicParamBridge::default();
        let slot = SlotIndex(1);
        let p = idx(ModParam::LfoFreeSync);

        bridge.begin_set(slot, p);
        assert_eq!(bridge.open_gestures(), 1);
        bridge.set(slot, p, 1.0);
        bridge.end_set(slot, p);

        assert_eq!(bridge.open_gestures(), 0);
        assert_eq!(bridge.gesture_count(slot, p), 1);

        bridge.set_with_gesture(slot, p, 0.0);
        assert_eq!(bridge.gesture_count(slot, p), 2);
        assert_eq!(bridge.get(slot, p), 0.0);
    }

    #[test]
    fn out_of_range_safe() {
        let bridge = AtomicParamBridge::default();
        assert_eq!(bridge.get(SlotIndex(99), ParamIndex(0)), 0.0);
        assert_eq!(bridge.param_count(SlotIndex(99)), 0);
        assert!(bridge.param_descriptor(SlotIndex(0), ParamIndex(999)).is_none());

        bridge.set(SlotIndex(99), ParamIndex(0), 1.0);
        bridge.begin_set(SlotIndex(99), ParamIndex(0));
        bridge.end_set(SlotIndex(0), ParamIndex(999));
        assert_eq!(bridge.open_gestures(), 0);
    }

    #[test]
    fn mix_is_clamped() {
        let bridge = AtomicParamBridge::default();
        bridge.set_mix(1.7);
        assert_eq!(bridge.mix(), 1.0);
        bridge.set_mix(f32::NAN);
        assert_eq!(bridge.mix(), 0.5);
    }
}

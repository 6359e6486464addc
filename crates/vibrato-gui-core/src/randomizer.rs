//! Parameter randomizer.
//!
//! A [`Randomizer`] holds a list of registered parameters plus arbitrary
//! custom actions. [`Randomizer::randomize_all`] gives every registered
//! parameter a fresh uniform value (snapped for stepped parameters) through
//! a gesture-bounded write, then runs the actions.

use crate::{ParamBridge, ParamIndex, SlotIndex};
use rand::{Rng, RngCore};

/// A custom randomization step, e.g. picking a wavetable preset.
pub type RandomAction = Box<dyn FnMut(&mut dyn RngCore)>;

/// Registered parameters and actions to randomize together.
#[derive(Default)]
pub struct Randomizer {
    params: Vec<(SlotIndex, ParamIndex)>,
    actions: Vec<RandomAction>,
}

impl Randomizer {
    /// Empty randomizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a parameter. Registering twice has no extra effect.
    pub fn add_param(&mut self, slot: SlotIndex, param: impl Into<ParamIndex>) {
        let entry = (slot, param.into());
        if !self.params.contains(&entry) {
            self.params.push(entry);
        }
    }

    /// Register a custom action.
    pub fn add_action(&mut self, action: impl FnMut(&mut dyn RngCore) + 'static) {
        self.actions.push(Box::new(action));
    }

    /// Forget every parameter and action.
    pub fn clear(&mut self) {
        self.params.clear();
        self.actions.clear();
    }

    /// Registered parameters, in registration order.
    pub fn params(&self) -> &[(SlotIndex, ParamIndex)] {
        &self.params
    }

    /// Number of registered actions.
    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty() && self.actions.is_empty()
    }

    /// Randomize every registered parameter, then run the actions.
    pub fn randomize_all(&mut self, bridge: &dyn ParamBridge, rng: &mut dyn RngCore) {
        for &(slot, param) in &self.params {
            let Some(desc) = bridge.param_descriptor(slot, param) else {
                continue;
            };
            let value = desc.snap(desc.denormalize(rng.r#gen::<f32>()));
            bridge.set_with_gesture(slot, param, value);
        }
        for action in &mut self.actions {
            action(&mut *rng);
        }
        tracing::debug!(
            params = self.params.len(),
            actions = self.actions.len(),
            "randomized"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AtomicParamBridge;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::cell::Cell;
    use std::rc::Rc;
    use vibrato_core::ModParam;

    #[test]
    fn duplicate_registration_ignored() {
        let mut r = Randomizer::new();
        r.add_param(SlotIndex(0), ModParam::Macro);
        r.add_param(SlotIndex(0), ModParam::Macro);
        r.add_param(SlotIndex(1), ModParam::Macro);
        assert_eq!(r.params().len(), 2);
    }

    #[test]
    fn writes_in_range_with_gestures() {
        let bridge = AtomicParamBridge::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut r = Randomizer::new();
        let slot = SlotIndex(0);
        for p in [ModParam::PerlinFreq, ModParam::PerlinOctaves, ModParam::AudioRateSemi] {
            r.add_param(slot, p);
        }

        r.randomize_all(&bridge, &mut rng);

        for p in [ModParam::PerlinFreq, ModParam::PerlinOctaves, ModParam::AudioRateSemi] {
            let desc = p.descriptor();
            let v = bridge.get(slot, p.into());
            assert!(v >= desc.min && v <= desc.max, "{p:?} = {v}");
            assert_eq!(bridge.gesture_count(slot, p.into()), 1);
        }
        assert_eq!(bridge.open_gestures(), 0);

        let oct = bridge.get(slot, ModParam::PerlinOctaves.into());
        assert_eq!(oct, oct.round(), "stepped params land on whole steps");
    }

    #[test]
    fn actions_run_and_clear_forgets_them() {
        let bridge = AtomicParamBridge::default();
        let mut rng = StdRng::seed_from_u64(1);
        let ran = Rc::new(Cell::new(0));
        let mut r = Randomizer::new();
        let counter = Rc::clone(&ran);
        r.add_action(move |_| counter.set(counter.get() + 1));

        r.randomize_all(&bridge, &mut rng);
        assert_eq!(ran.get(), 1);

        r.clear();
        assert!(r.is_empty());
        r.randomize_all(&bridge, &mut rng);
        assert_eq!(ran.get(), 1);
    }
}

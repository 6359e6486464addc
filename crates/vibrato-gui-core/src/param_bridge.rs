//! Parameter bridge trait for decoupled GUI-to-engine parameter communication.
//!
//! [`ParamBridge`] abstracts over the parameter storage mechanism so the same
//! modulation panels work in the standalone host (backed by atomic floats)
//! and inside a plugin wrapper (backed by host parameters).
//!
//! # Architecture
//!
//! The bridge models the plugin's modulation slots. Each slot exposes the full
//! [`ModParam`] catalogue by index, whether or not the matching modulator is
//! active. The shared mods-mix parameter sits outside the slots.
//!
//! ```text
//! slot panels ──► begin_set / set / end_set (slot, param)
//!                         │
//!                    ┌────┴────┐
//!                    │ Atomic  │  (standalone)
//!                    │  Host   │  (plugin)
//!                    └────┬────┘
//!                         │
//! modulation engine ◄── get(slot, param)
//! ```

use core::fmt;
use vibrato_core::{ModParam, ParamDescriptor};

/// Type-safe index of a modulation slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SlotIndex(pub usize);

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for SlotIndex {
    fn from(v: usize) -> Self {
        Self(v)
    }
}

/// Type-safe index into a slot's parameter array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamIndex(pub usize);

impl fmt::Display for ParamIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for ParamIndex {
    fn from(v: usize) -> Self {
        Self(v)
    }
}

impl From<ModParam> for ParamIndex {
    fn from(p: ModParam) -> Self {
        Self(p.index())
    }
}

/// Trait for bridging parameter values between the GUI and the engine.
///
/// Implementations must be thread-safe: `get` and `set` may be called from
/// different threads simultaneously. Values crossing `get`/`set` are plain
/// (Hz, ms, %); the `_normalized` helpers map through the descriptor's scale.
///
/// Every user-initiated write is wrapped in `begin_set` / `end_set` so plugin
/// hosts can group it into one automation gesture.
pub trait ParamBridge: Send + Sync {
    /// Number of modulation slots.
    fn slot_count(&self) -> usize;

    /// Number of parameters in the given slot.
    ///
    /// Returns `0` if the slot index is out of range.
    fn param_count(&self, slot: SlotIndex) -> usize;

    /// Parameter descriptor for display and validation.
    ///
    /// Returns `None` if slot or param index is out of range.
    fn param_descriptor(&self, slot: SlotIndex, param: ParamIndex) -> Option<ParamDescriptor>;

    /// Read the current plain value of a parameter.
    ///
    /// Returns `0.0` if indices are out of range.
    fn get(&self, slot: SlotIndex, param: ParamIndex) -> f32;

    /// Write a new plain value.
    ///
    /// Out-of-range indices are silently ignored. Values are clamped to the
    /// parameter's range by the implementation.
    fn set(&self, slot: SlotIndex, param: ParamIndex, value: f32);

    /// Open an automation gesture for a parameter.
    fn begin_set(&self, slot: SlotIndex, param: ParamIndex);

    /// Close the automation gesture opened by [`begin_set`](Self::begin_set).
    fn end_set(&self, slot: SlotIndex, param: ParamIndex);

    /// Normalized value of the shared mods-mix parameter.
    fn mix(&self) -> f32;

    /// Write the shared mods-mix parameter (normalized).
    fn set_mix(&self, normalized: f32);

    /// Read a parameter in normalized `[0, 1]` space.
    fn get_normalized(&self, slot: SlotIndex, param: ParamIndex) -> f32 {
        self.param_descriptor(slot, param)
            .map_or(0.0, |d| d.normalize(self.get(slot, param)).clamp(0.0, 1.0))
    }

    /// Write a parameter from normalized `[0, 1]` space.
    fn set_normalized(&self, slot: SlotIndex, param: ParamIndex, normalized: f32) {
        if let Some(d) = self.param_descriptor(slot, param) {
            self.set(slot, param, d.denormalize(normalized.clamp(0.0, 1.0)));
        }
    }

    /// A complete `begin_set -> set -> end_set` sequence.
    fn set_with_gesture(&self, slot: SlotIndex, param: ParamIndex, value: f32) {
        self.begin_set(slot, param);
        self.set(slot, param, value);
        self.end_set(slot, param);
    }
}

//! Read-only view of the modulation engine, and the shared wavetable store.

use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use vibrato_core::{LfoTables, ModType, NUM_SLOTS, WavetablePreset};

/// Wavetable store shared between the LFO engine and the preview.
pub type SharedTables = Arc<RwLock<LfoTables>>;

/// Allocate a [`SharedTables`] filled from `preset`.
pub fn shared_tables(preset: WavetablePreset) -> SharedTables {
    Arc::new(RwLock::new(LfoTables::new(preset)))
}

/// What the panel reads from the engine.
///
/// The engine owns the authoritative modulator type of each slot. The panel
/// only ever reads it; writes go out as
/// [`SlotEvent::ModTypeChanged`](crate::SlotEvent::ModTypeChanged).
pub trait ModEngine: Send + Sync {
    /// Current modulator of `slot`. Unknown engine values read as [`ModType::None`].
    fn mod_type(&self, slot: usize) -> ModType;

    /// Whether the host provides a transport playhead (tempo sync possible).
    fn has_playhead(&self) -> bool;
}

/// Lock-free [`ModEngine`] state for standalone hosting.
///
/// Stores the raw engine index per slot, so out-of-range values written by a
/// misbehaving engine surface exactly as they would in a plugin.
pub struct AtomicModEngine {
    types: [AtomicUsize; NUM_SLOTS],
    playhead: AtomicBool,
}

impl AtomicModEngine {
    /// Engine with every slot at [`ModType::None`].
    pub fn new(has_playhead: bool) -> Self {
        Self {
            types: std::array::from_fn(|_| AtomicUsize::new(usize::MAX)),
            playhead: AtomicBool::new(has_playhead),
        }
    }

    /// Adopt a modulator for `slot`. Out-of-range slots are ignored.
    pub fn set_mod_type(&self, slot: usize, mod_type: ModType) {
        self.set_raw_index(slot, mod_type.index().unwrap_or(usize::MAX));
    }

    /// Store a raw engine index for `slot`.
    pub fn set_raw_index(&self, slot: usize, index: usize) {
        if let Some(t) = self.types.get(slot) {
            t.store(index, Ordering::Release);
        }
    }

    /// Attach or detach the host playhead.
    pub fn set_playhead(&self, present: bool) {
        self.playhead.store(present, Ordering::Release);
    }
}

impl Default for AtomicModEngine {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ModEngine for AtomicModEngine {
    fn mod_type(&self, slot: usize) -> ModType {
        self.types
            .get(slot)
            .map_or(ModType::None, |t| ModType::from_index(t.load(Ordering::Acquire)))
    }

    fn has_playhead(&self) -> bool {
        self.playhead.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let engine = AtomicModEngine::new(false);
        assert_eq!(engine.mod_type(0), ModType::None);
        assert!(!engine.has_playhead());
    }

    #[test]
    fn adopts_types_per_slot() {
        let engine = AtomicModEngine::default();
        engine.set_mod_type(1, ModType::Lfo);
        assert_eq!(engine.mod_type(0), ModType::None);
        assert_eq!(engine.mod_type(1), ModType::Lfo);
    }

    #[test]
    fn unknown_index_reads_as_none() {
        let engine = AtomicModEngine::default();
        engine.set_raw_index(0, 42);
        assert_eq!(engine.mod_type(0), ModType::None);
        assert_eq!(engine.mod_type(7), ModType::None);
    }

    #[test]
    fn shared_tables_start_from_preset() {
        let tables = shared_tables(WavetablePreset::Triangles);
        assert_eq!(tables.read().preset(), WavetablePreset::Triangles);
    }
}

//! File-level tests for vibrato-config.

use std::sync::Mutex;
use vibrato_config::{ConfigError, ModPatch, PanelConfig, PatchSource, PatchTarget, SlotPatch};
use vibrato_core::{ModParam, ModType, NUM_SLOTS};
use tempfile::TempDir;

/// Minimal parameter store standing in for a plugin host.
struct Store {
    types: Mutex<[ModType; NUM_SLOTS]>,
    values: Mutex<Vec<f32>>,
    mix: Mutex<f32>,
}

impl Store {
    fn new() -> Self {
        Self {
            types: Mutex::new([ModType::None; NUM_SLOTS]),
            values: Mutex::new(vec![0.0; NUM_SLOTS * ModParam::COUNT]),
            mix: Mutex::new(0.5),
        }
    }
}

impl PatchTarget for Store {
    fn set_mod_type(&self, slot: usize, mod_type: ModType) {
        self.types.lock().unwrap()[slot] = mod_type;
    }
    fn set_normalized(&self, slot: usize, param: ModParam, value: f32) {
        self.values.lock().unwrap()[slot * ModParam::COUNT + param.index()] = value;
    }
    fn set_mix_normalized(&self, value: f32) {
        *self.mix.lock().unwrap() = value;
    }
}

impl PatchSource for Store {
    fn mod_type(&self, slot: usize) -> ModType {
        self.types.lock().unwrap()[slot]
    }
    fn normalized(&self, slot: usize, param: ModParam) -> f32 {
        self.values.lock().unwrap()[slot * ModParam::COUNT + param.index()]
    }
    fn mix_normalized(&self) -> f32 {
        *self.mix.lock().unwrap()
    }
}

#[test]
fn patch_save_load_apply() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("chorusy.toml");

    let patch = ModPatch::new("Chorusy")
        .with_mix(0.8)
        .with_slot(SlotPatch::new(ModType::Dropout).with_param(ModParam::DropoutChance, 0.9))
        .with_slot(SlotPatch::new(ModType::Lfo).with_param(ModParam::LfoFreeSync, 1.0));
    patch.save(&path).unwrap();

    let loaded = ModPatch::load(&path).unwrap();
    assert_eq!(loaded, patch);

    let store = Store::new();
    assert_eq!(loaded.apply(&store).unwrap(), 3);
    assert_eq!(store.mod_type(0), ModType::Dropout);
    assert_eq!(store.mod_type(1), ModType::Lfo);
    assert_eq!(store.normalized(0, ModParam::DropoutChance), 0.9);
    assert_eq!(store.mix_normalized(), 0.8);
}

#[test]
fn capture_then_apply_restores_state() {
    let source = Store::new();
    source.set_mod_type(0, ModType::AudioRate);
    source.set_mod_type(1, ModType::EnvFol);
    source.set_normalized(0, ModParam::AudioRateSus, 0.3);
    source.set_normalized(1, ModParam::EnvFolGain, 0.7);
    source.set_mix_normalized(0.1);

    let patch = ModPatch::capture("snapshot", &source);
    assert_eq!(patch.slots.len(), NUM_SLOTS);

    let restored = Store::new();
    let applied = patch.apply(&restored).unwrap();
    assert_eq!(applied, NUM_SLOTS * ModParam::COUNT + 1);
    assert_eq!(restored.mod_type(0), ModType::AudioRate);
    assert_eq!(restored.normalized(0, ModParam::AudioRateSus), 0.3);
    assert_eq!(restored.normalized(1, ModParam::EnvFolGain), 0.7);
    assert_eq!(restored.mix_normalized(), 0.1);
}

#[test]
fn load_missing_file_reports_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing.toml");
    let err = ModPatch::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
    assert!(err.to_string().contains("missing.toml"));
}

#[test]
fn panel_config_save_and_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("panel.toml");

    let mut config = PanelConfig::default();
    config.timing.slot_poll_hz = 15.0;
    config.wavetable.default_preset = "triangles".to_string();
    config.save(&path).unwrap();

    assert_eq!(PanelConfig::load(&path).unwrap(), config);
}

#[test]
fn panel_config_rejects_negative_rate_on_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("panel.toml");
    std::fs::write(&path, "[timing]\nadsr_poll_hz = -1.0\n").unwrap();
    assert!(matches!(
        PanelConfig::load(&path),
        Err(ConfigError::InvalidValue { .. })
    ));
}

//! Panel timing and wavetable configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use vibrato_core::WavetablePreset;

use crate::error::ConfigError;

/// Top-level panel configuration file.
///
/// Every field has a default, so an empty file (or no file at all) yields the
/// stock behaviour.
///
/// ```toml
/// [timing]
/// slot_poll_hz = 8.0
/// lfo_poll_hz = 4.0
/// adsr_poll_hz = 24.0
/// patch_resync_delay_ms = 100
///
/// [wavetable]
/// default_preset = "sinc"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PanelConfig {
    /// Polling rates and the deferred re-sync delay.
    pub timing: TimingConfig,
    /// Wavetable store setup.
    pub wavetable: WavetableConfig,
}

/// Polling rates for the slot, LFO and ADSR ticks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    /// How often a slot re-reads the engine's modulator type.
    pub slot_poll_hz: f32,
    /// How often the LFO panel refreshes its preview and sync controls.
    pub lfo_poll_hz: f32,
    /// How often the AudioRate envelope preview is refreshed.
    pub adsr_poll_hz: f32,
    /// Delay between a patch load and the slot re-reading the engine.
    pub patch_resync_delay_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            slot_poll_hz: 8.0,
            lfo_poll_hz: 4.0,
            adsr_poll_hz: 24.0,
            patch_resync_delay_ms: 100,
        }
    }
}

impl TimingConfig {
    /// The re-sync delay as a [`Duration`].
    pub fn resync_delay(&self) -> Duration {
        Duration::from_millis(self.patch_resync_delay_ms)
    }
}

/// Wavetable store setup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WavetableConfig {
    /// Preset generated at startup, by identifier (`"sinc"`, `"triangles"`, `"weierstrass"`).
    pub default_preset: String,
}

impl Default for WavetableConfig {
    fn default() -> Self {
        Self {
            default_preset: WavetablePreset::default().as_str().to_string(),
        }
    }
}

impl WavetableConfig {
    /// Resolve the configured preset.
    pub fn preset(&self) -> Result<WavetablePreset, ConfigError> {
        self.default_preset
            .parse()
            .map_err(|_| ConfigError::UnknownPreset(self.default_preset.clone()))
    }
}

impl PanelConfig {
    /// Load and validate a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let config = Self::from_toml(&content)?;
        tracing::info!(path = %path.display(), "loaded panel config");
        Ok(config)
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: PanelConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration, creating the parent directory if needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check that every rate is positive and finite and the preset is known.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rates = [
            ("timing.slot_poll_hz", self.timing.slot_poll_hz),
            ("timing.lfo_poll_hz", self.timing.lfo_poll_hz),
            ("timing.adsr_poll_hz", self.timing.adsr_poll_hz),
        ];
        for (field, hz) in rates {
            if !hz.is_finite() || hz <= 0.0 {
                return Err(ConfigError::invalid_value(
                    field,
                    hz,
                    "polling rate must be positive",
                ));
            }
        }
        self.wavetable.preset()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = PanelConfig::from_toml("").unwrap();
        assert_eq!(config, PanelConfig::default());
        assert_eq!(config.timing.slot_poll_hz, 8.0);
        assert_eq!(config.timing.lfo_poll_hz, 4.0);
        assert_eq!(config.timing.adsr_poll_hz, 24.0);
        assert_eq!(config.timing.resync_delay(), Duration::from_millis(100));
        assert_eq!(config.wavetable.preset().unwrap(), WavetablePreset::Sinc);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = PanelConfig::from_toml("[timing]\nlfo_poll_hz = 10.0\n").unwrap();
        assert_eq!(config.timing.lfo_poll_hz, 10.0);
        assert_eq!(config.timing.slot_poll_hz, 8.0);
    }

    #[test]
    fn zero_rate_rejected() {
        let err = PanelConfig::from_toml("[timing]\nslot_poll_hz = 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "timing.slot_poll_hz"));
    }

    #[test]
    fn unknown_preset_rejected() {
        let err = PanelConfig::from_toml("[wavetable]\ndefault_preset = \"sawtooth\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownPreset(ref p) if p == "sawtooth"));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = PanelConfig::from_toml("[timing\n").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn to_toml_round_trip() {
        let mut config = PanelConfig::default();
        config.wavetable.default_preset = "weierstrass".to_string();
        config.timing.patch_resync_delay_ms = 250;
        let parsed = PanelConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }
}

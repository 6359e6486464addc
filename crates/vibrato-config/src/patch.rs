//! Modulation patch files: both slots' modulator choice and parameter values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use vibrato_core::{ModParam, ModType, NUM_SLOTS};

use crate::error::ConfigError;

/// Something a patch can be written into.
///
/// Values are normalized to `[0, 1]`. Implementations are expected to record
/// the writes as host automation gestures where that matters.
pub trait PatchTarget {
    /// Request the modulator type of `slot`.
    fn set_mod_type(&self, slot: usize, mod_type: ModType);
    /// Set a slot parameter.
    fn set_normalized(&self, slot: usize, param: ModParam, value: f32);
    /// Set the shared mods-mix parameter.
    fn set_mix_normalized(&self, value: f32);
}

/// Something a patch can be captured from.
pub trait PatchSource {
    /// Current modulator type of `slot`.
    fn mod_type(&self, slot: usize) -> ModType;
    /// Current value of a slot parameter.
    fn normalized(&self, slot: usize, param: ModParam) -> f32;
    /// Current mods-mix value.
    fn mix_normalized(&self) -> f32;
}

/// A saved modulation setup.
///
/// ```toml
/// name = "Seasick"
/// mix = 0.25
///
/// [[slots]]
/// mod_type = "lfo"
/// [slots.params]
/// lfo_rate_free = 0.3
/// lfo_width = 0.6
///
/// [[slots]]
/// mod_type = "perlin"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModPatch {
    /// Name of the patch.
    pub name: String,

    /// Optional description of the patch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Normalized mods-mix value; left untouched when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mix: Option<f32>,

    /// Per-slot settings, slot 0 first.
    #[serde(default)]
    pub slots: Vec<SlotPatch>,
}

/// One slot of a [`ModPatch`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SlotPatch {
    /// Modulator identifier, as produced by [`ModType::as_str`].
    pub mod_type: String,

    /// Parameter string id to normalized value.
    #[serde(default)]
    pub params: BTreeMap<String, f32>,
}

impl SlotPatch {
    /// Slot patch for the given modulator with no parameter values.
    pub fn new(mod_type: ModType) -> Self {
        Self {
            mod_type: mod_type.as_str().to_string(),
            params: BTreeMap::new(),
        }
    }

    /// Add a parameter value.
    pub fn with_param(mut self, param: ModParam, value: f32) -> Self {
        self.params.insert(param.string_id().to_string(), value);
        self
    }
}

/// A patch entry after validation.
struct Resolved {
    mod_type: ModType,
    params: Vec<(ModParam, f32)>,
}

impl ModPatch {
    /// Create an empty patch.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            mix: None,
            slots: Vec::new(),
        }
    }

    /// Set the mods-mix value.
    pub fn with_mix(mut self, mix: f32) -> Self {
        self.mix = Some(mix);
        self
    }

    /// Append a slot.
    pub fn with_slot(mut self, slot: SlotPatch) -> Self {
        self.slots.push(slot);
        self
    }

    /// Snapshot every slot's type and parameters from `source`.
    pub fn capture(name: impl Into<String>, source: &impl PatchSource) -> Self {
        let slots = (0..NUM_SLOTS)
            .map(|slot| {
                let mut patch = SlotPatch::new(source.mod_type(slot));
                for param in ModParam::ALL {
                    patch = patch.with_param(param, source.normalized(slot, param));
                }
                patch
            })
            .collect();
        Self {
            name: name.into(),
            description: None,
            mix: Some(source.mix_normalized()),
            slots,
        }
    }

    /// Load a patch from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let patch = Self::from_toml(&content)?;
        tracing::info!(path = %path.display(), name = %patch.name, "loaded patch");
        Ok(patch)
    }

    /// Parse a patch from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the patch, creating the parent directory if needed.
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

    /// Convert the patch to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every entry without applying anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolve().map(|_| ())
    }

    /// Write the patch into `target`.
    ///
    /// The whole patch is validated first, so an error leaves the target
    /// untouched. Returns the number of parameter values written, the mix
    /// included.
    pub fn apply(&self, target: &impl PatchTarget) -> Result<usize, ConfigError> {
        let (mix, slots) = self.resolve()?;
        let mut applied = 0;

        if let Some(mix) = mix {
            target.set_mix_normalized(mix);
            applied += 1;
        }

        for (slot, resolved) in slots.into_iter().enumerate() {
            for (param, value) in resolved.params {
                target.set_normalized(slot, param, value);
                applied += 1;
            }
            target.set_mod_type(slot, resolved.mod_type);
        }

        tracing::debug!(name = %self.name, applied, "applied patch");
        Ok(applied)
    }

    fn resolve(&self) -> Result<(Option<f32>, Vec<Resolved>), ConfigError> {
        if self.slots.len() > NUM_SLOTS {
            return Err(ConfigError::TooManySlots {
                found: self.slots.len(),
                max: NUM_SLOTS,
            });
        }

        let mix = self.mix.map(|m| check_normalized("mix", m)).transpose()?;

        let slots = self
            .slots
            .iter()
            .map(|slot| {
                let mod_type: ModType = slot
                    .mod_type
                    .parse()
                    .map_err(|_| ConfigError::UnknownModType(slot.mod_type.clone()))?;
                let params = slot
                    .params
                    .iter()
                    .map(|(id, &value)| {
                        let param = ModParam::from_string_id(id)
                            .ok_or_else(|| ConfigError::UnknownParam(id.clone()))?;
                        Ok((param, check_normalized(id, value)?))
                    })
                    .collect::<Result<Vec<_>, ConfigError>>()?;
                Ok(Resolved { mod_type, params })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok((mix, slots))
    }
}

impl Default for ModPatch {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

fn check_normalized(field: &str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::invalid_value(
            field,
            value,
            "normalized values lie in [0, 1]",
        ))
    }
}

//! Configuration and patch management for the vibrato modulation panel.
//!
//! - **Panel config**: polling rates, the patch re-sync delay and the startup
//!   wavetable preset, read from TOML with defaults for everything.
//! - **Patches**: both slots' modulator type and normalized parameter values,
//!   validated as a whole before anything is written.
//! - **Paths**: platform-specific config and patch directories.
//!
//! # Example
//!
//! ```rust,no_run
//! use vibrato_config::{ModPatch, PanelConfig, SlotPatch, user_patches_dir};
//! use vibrato_core::{ModParam, ModType};
//!
//! let config = PanelConfig::load("panel.toml").unwrap_or_default();
//! assert!(config.timing.slot_poll_hz > 0.0);
//!
//! let patch = ModPatch::new("Slow wobble")
//!     .with_mix(0.5)
//!     .with_slot(SlotPatch::new(ModType::Lfo).with_param(ModParam::LfoRateFree, 0.2));
//! patch.save(user_patches_dir().join("slow_wobble.toml")).unwrap();
//! ```

mod error;
mod panel_config;
mod patch;

/// Platform-specific paths for configuration and patches.
pub mod paths;

pub use error::ConfigError;
pub use panel_config::{PanelConfig, TimingConfig, WavetableConfig};
pub use patch::{ModPatch, PatchSource, PatchTarget, SlotPatch};
pub use paths::{
    default_config_path, ensure_user_patches_dir, find_patch, list_user_patches,
    patch_name_from_path, user_config_dir, user_patches_dir,
};

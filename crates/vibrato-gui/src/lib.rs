//! Vibrato GUI - standalone host for the modulation panel.
//!
//! Runs both modulation slots against a demo engine so the panel can be
//! exercised without a plugin host: patches load and save as TOML, the host
//! playhead can be toggled to test tempo sync handling.

pub mod app;
pub mod host;

pub use app::{VibratoApp, slot_timing};
pub use host::PluginHost;

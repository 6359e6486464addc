//! Vibrato Core - data model of the modulation panel
//!
//! Everything the modulation panel needs to know about the modulation engine
//! without depending on it: which modulators exist, which parameters each one
//! exposes, how those parameters are ranged and scaled, and the LFO wavetable
//! store that both the engine and the waveform preview read.
//!
//! # Modules
//!
//! - [`mod_type`] - [`ModType`], the seven modulator kinds plus `None`
//! - [`mod_params`] - [`ModParam`], the per-slot parameter catalogue
//! - [`param_info`] - [`ParamDescriptor`] and its unit/scale/flag types
//! - [`wavetable`] - [`LfoTables`] and the [`WavetablePreset`] generators
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (with `alloc` for the wavetable buffer).
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! vibrato-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod mod_params;
pub mod mod_type;
pub mod param_info;
pub mod wavetable;

pub use mod_params::{ModParam, NUM_SLOTS, SLOT_ID_STRIDE, mods_mix_descriptor};
pub use mod_type::{ModType, UnknownModType};
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamScale, ParamUnit};
pub use wavetable::{LfoTables, NUM_TABLES, TABLE_SIZE, UnknownPreset, WavetablePreset};

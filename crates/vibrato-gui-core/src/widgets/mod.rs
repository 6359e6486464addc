//! Widgets for the modulation panel.
//!
//! - [`Knob`] - rotary control with drag, fine control and double-click reset
//! - [`bridged_knob`] - knob bound to a [`ParamBridge`](crate::ParamBridge) parameter with gestures
//! - [`bridged_switch`] - two-state switch bound to a bridge parameter
//! - [`Switch`] - round on/off indicator with label
//! - [`WavetableView`] - windowed bar preview of the LFO wavetable
//! - [`AdsrView`] - AudioRate envelope outline

mod adsr_view;
mod bridged_knob;
mod knob;
mod toggle;
mod wavetable_view;

pub use adsr_view::{AdsrValues, AdsrView, adsr_path};
pub use bridged_knob::{bridged_knob, bridged_switch, format_value, gesture_wrap};
pub use knob::Knob;
pub use toggle::Switch;
pub use wavetable_view::{Bar, NUM_BARS, NUM_WAVE_CYCLES, WavetableView, bar_window};

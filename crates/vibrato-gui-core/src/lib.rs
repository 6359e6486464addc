//! Modulation panel of the vibrato editor.
//!
//! This crate holds everything between the parameter store and the pixels:
//! the [`ModSlot`] state machine, the seven modulator sub-panels, the
//! randomizer, the notification bus and the egui widgets they draw with.
//! It is shared by the standalone host (`vibrato-gui`) and any plugin
//! wrapper; both only need to provide a [`ParamBridge`] and a [`ModEngine`].
//!
//! # Modules
//!
//! - [`param_bridge`]: parameter access trait with gesture protocol
//! - [`engine`]: read-only engine view and the shared wavetable store
//! - [`slot`]: the per-slot state machine and its messages and events
//! - [`mods_ui`]: one sub-panel per modulator plus the selector
//! - [`notify`]: editor-wide notifications
//! - [`widgets`]: knobs, switches and the envelope and wavetable previews

pub mod atomic_param_bridge;
pub mod engine;
pub mod mods_ui;
pub mod notify;
pub mod param_bridge;
pub mod randomizer;
pub mod slot;
pub mod theme;
pub mod ticker;
pub mod widgets;

pub use atomic_param_bridge::AtomicParamBridge;
pub use engine::{AtomicModEngine, ModEngine, SharedTables, shared_tables};
pub use mods_ui::{ModPanel, ModulatorPanel};
pub use notify::{Notification, NotificationBus, SubscriberId, Subscription};
pub use param_bridge::{ParamBridge, ParamIndex, SlotIndex};
pub use randomizer::{RandomAction, Randomizer};
pub use slot::{ModSlot, SlotContext, SlotEvent, SlotMessage, SlotTiming};
pub use theme::Theme;
pub use ticker::Ticker;

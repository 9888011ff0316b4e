//! Engine module - drives a game session on top of `core`
//!
//! `core` decides what is legal; this crate wires it to persistence and to
//! whoever wants to hear about it (sound, visuals, logs).

pub mod session;
pub mod sink;

pub use tui_blocks_core as core;
pub use tui_blocks_store as store;
pub use tui_blocks_types as types;

pub use session::Session;
pub use sink::{EventLog, EventSink, NullSink};

//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`InputAction`]s and provides a cursor
//! handler that turns them into session commands.

pub mod handler;
pub mod map;

pub use tui_blocks_types as types;

pub use handler::{CursorHandler, InputContext, Intent};
pub use map::{handle_key_event, should_quit, InputAction};

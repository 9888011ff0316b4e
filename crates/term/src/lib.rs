//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It avoids
//! ratatui widgets/layout and instead renders into a simple framebuffer that
//! is flushed to a terminal backend.
//!
//! - [`theme`] resolves a [`ThemeName`](types::ThemeName) to concrete colors
//! - [`game_view`] draws a snapshot plus cursor state, with no I/O
//! - [`renderer`] diffs frames and writes them through crossterm

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod theme;

pub use tui_blocks_core as core;
pub use tui_blocks_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, HudView, Layout, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use theme::Palette;

//! TUI Blocks (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof so the binary, benches and
//! integration tests can say `tui_blocks::{core,engine,input,store,term,types}`.

pub use tui_blocks_core as core;
pub use tui_blocks_engine as engine;
pub use tui_blocks_input as input;
pub use tui_blocks_store as store;
pub use tui_blocks_term as term;
pub use tui_blocks_types as types;

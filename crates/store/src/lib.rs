//! Persistence for player preferences and high scores
//!
//! Everything is stored as strings under a handful of well-known keys:
//!
//! | Key | Value |
//! |-----|-------|
//! | `settings` | JSON `{ "sfxEnabled", "musicEnabled", "difficulty" }` |
//! | `theme` | `holographic`, `wood` or `futuristic` |
//! | `highScore_<difficulty>` | decimal best score for that difficulty |
//!
//! Reads never fail the caller: unreadable values fall back to defaults and
//! are logged at `warn`.

pub mod error;
pub mod kv;
pub mod prefs;

pub use tui_blocks_types as types;

pub use error::StoreError;
pub use kv::{FileStore, KeyValueStore, MemoryStore, DATA_DIR_NAME};
pub use prefs::{high_score_key, Preferences, Settings, SETTINGS_KEY, THEME_KEY};

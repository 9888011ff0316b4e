//! Player preferences: settings, theme and per-difficulty high scores

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::StoreError;
use crate::kv::KeyValueStore;
use crate::types::{Difficulty, ThemeName};

pub const SETTINGS_KEY: &str = "settings";
pub const THEME_KEY: &str = "theme";

/// Storage key for the best score of one difficulty
pub fn high_score_key(difficulty: Difficulty) -> String {
    format!("highScore_{}", difficulty.as_str())
}

/// Persisted settings record
///
/// Missing fields fall back to their defaults, so older or partial records
/// still load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub sfx_enabled: bool,
    pub music_enabled: bool,
    pub difficulty: Difficulty,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sfx_enabled: true,
            music_enabled: true,
            difficulty: Difficulty::Medium,
        }
    }
}

/// Typed access to the preference keys of a [`KeyValueStore`]
#[derive(Debug, Clone)]
pub struct Preferences<S> {
    store: S,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load settings, falling back to defaults on a missing or unreadable record
    pub fn settings(&self) -> Settings {
        match self.store.get(SETTINGS_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!(error = %err, "settings record unreadable, using defaults");
                Settings::default()
            }),
            Ok(None) => Settings::default(),
            Err(err) => {
                warn!(error = %err, "failed to read settings, using defaults");
                Settings::default()
            }
        }
    }

    pub fn save_settings(&mut self, settings: &Settings) -> Result<(), StoreError> {
        let json = serde_json::to_string(settings)?;
        self.store.set(SETTINGS_KEY, &json)
    }

    /// Get theme name (defaults to holographic)
    pub fn theme(&self) -> ThemeName {
        match self.store.get(THEME_KEY) {
            Ok(Some(raw)) => ThemeName::from_str(raw.trim()).unwrap_or_default(),
            Ok(None) => ThemeName::default(),
            Err(err) => {
                warn!(error = %err, "failed to read theme, using default");
                ThemeName::default()
            }
        }
    }

    pub fn set_theme(&mut self, theme: ThemeName) -> Result<(), StoreError> {
        self.store.set(THEME_KEY, theme.as_str())
    }

    /// Best score recorded for `difficulty` (0 when none)
    pub fn high_score(&self, difficulty: Difficulty) -> u32 {
        let key = high_score_key(difficulty);
        match self.store.get(&key) {
            Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(key = %key, value = %raw, "high score unreadable, treating as 0");
                0
            }),
            Ok(None) => 0,
            Err(err) => {
                warn!(key = %key, error = %err, "failed to read high score");
                0
            }
        }
    }

    pub fn set_high_score(&mut self, difficulty: Difficulty, score: u32) -> Result<(), StoreError> {
        self.store.set(&high_score_key(difficulty), &score.to_string())
    }
}

//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no behavior beyond parsing and lookup, making
//! them usable in any context (core rules, persistence, terminal rendering).
//!
//! # Board Dimensions
//!
//! The board is a fixed square grid:
//!
//! - **Size**: 10 rows by 10 columns (indexed 0-9)
//! - **Trio**: at most 3 pieces are offered at a time
//!
//! # Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `PER_CELL` | 1 | Points per occupied cell of a placed piece |
//! | `LINE_BASE` | 100 | Multiplied by the square of the lines cleared |
//! | `COMBO_BONUS` | 50 | Per extra line beyond the first in one placement |
//!
//! # Timing Profiles
//!
//! Transient animation durations depend on difficulty (milliseconds):
//!
//! | Difficulty | Line clear | Area clear | Single clear | Place pop |
//! |------------|------------|------------|--------------|-----------|
//! | easy | 600 | 500 | 450 | 250 |
//! | medium | 500 | 400 | 350 | 200 |
//! | hard | 350 | 300 | 250 | 150 |
//!
//! # Examples
//!
//! ```
//! use tui_blocks_types::{Difficulty, PowerUpKind, GRID_SIZE};
//!
//! // Parse from string (case-insensitive)
//! let difficulty = Difficulty::from_str("HARD").unwrap();
//! assert_eq!(difficulty, Difficulty::Hard);
//! assert_eq!(difficulty.timings().line_clear_ms, 350);
//!
//! // The area clear power-up also answers to its old name
//! assert_eq!(PowerUpKind::from_str("boom"), Some(PowerUpKind::AreaClear));
//!
//! assert_eq!(GRID_SIZE, 10);
//! ```

use serde::{Deserialize, Serialize};

/// Board side length in cells (10x10)
pub const GRID_SIZE: u8 = 10;

/// Total number of cells on the board
pub const GRID_CELLS: usize = (GRID_SIZE as usize) * (GRID_SIZE as usize);

/// Maximum number of pieces offered at once
pub const TRIO_SIZE: usize = 3;

/// Points per occupied cell of a placed piece
pub const PER_CELL: u32 = 1;

/// Line clear base, multiplied by `lines * lines`
pub const LINE_BASE: u32 = 100;

/// Bonus per simultaneous line beyond the first
pub const COMBO_BONUS: u32 = 50;

/// Per-cell stagger of the line clear animation, measured from the line centre
pub const CLEAR_STAGGER_MS: u32 = 30;

/// How long a rejected placement keeps its footprint marked as bad
pub const BAD_FLASH_MS: u32 = 200;

/// Fixed timestep used by the terminal front end (~60 FPS)
pub const TICK_MS: u32 = 16;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoring_constants() {
        assert_eq!(PER_CELL, 1);
        assert_eq!(LINE_BASE, 100);
        assert_eq!(COMBO_BONUS, 50);
        assert_eq!(GRID_CELLS, 100);
    }

    #[test]
    fn timing_profiles() {
        let easy = Difficulty::Easy.timings();
        assert_eq!(
            (easy.line_clear_ms, easy.area_clear_ms, easy.single_clear_ms, easy.place_pop_ms),
            (600, 500, 450, 250)
        );
        let medium = Difficulty::Medium.timings();
        assert_eq!(
            (medium.line_clear_ms, medium.area_clear_ms, medium.single_clear_ms, medium.place_pop_ms),
            (500, 400, 350, 200)
        );
        let hard = Difficulty::Hard.timings();
        assert_eq!(
            (hard.line_clear_ms, hard.area_clear_ms, hard.single_clear_ms, hard.place_pop_ms),
            (350, 300, 250, 150)
        );
    }

    #[test]
    fn difficulty_serializes_lowercase() {
        let json = serde_json::to_string(&Difficulty::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
        let back: Difficulty = serde_json::from_str("\"easy\"").unwrap();
        assert_eq!(back, Difficulty::Easy);
    }

    #[test]
    fn power_up_names() {
        for kind in PowerUpKind::ALL {
            assert_eq!(PowerUpKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(PowerUpKind::from_str("single_clear"), None);
        assert_eq!(PowerUpKind::AreaClear.initial_count(), 2);
        assert_eq!(PowerUpKind::Reshuffle.initial_count(), 2);
        assert_eq!(PowerUpKind::SingleClear.initial_count(), 3);
    }

    #[test]
    fn cycling_wraps_around() {
        assert_eq!(Difficulty::Hard.next(), Difficulty::Easy);
        assert_eq!(ThemeName::Futuristic.next(), ThemeName::Holographic);
    }
}

/// Game difficulty
///
/// Selects which catalog tiers are eligible for generation, which high-score
/// slot is used, and which timing profile drives transient animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Parse difficulty from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Animation timing profile for this difficulty
    pub fn timings(&self) -> Timings {
        match self {
            Difficulty::Easy => Timings {
                line_clear_ms: 600,
                area_clear_ms: 500,
                single_clear_ms: 450,
                place_pop_ms: 250,
            },
            Difficulty::Medium => Timings {
                line_clear_ms: 500,
                area_clear_ms: 400,
                single_clear_ms: 350,
                place_pop_ms: 200,
            },
            Difficulty::Hard => Timings {
                line_clear_ms: 350,
                area_clear_ms: 300,
                single_clear_ms: 250,
                place_pop_ms: 150,
            },
        }
    }

    /// Next difficulty in menu order (wraps)
    pub fn next(&self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

/// Durations of the transient phases, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub line_clear_ms: u32,
    pub area_clear_ms: u32,
    pub single_clear_ms: u32,
    pub place_pop_ms: u32,
}

/// The three limited-use special actions
///
/// - **AreaClear**: empties the 3x3 neighborhood of a target cell
/// - **Reshuffle**: replaces the current trio with a freshly dealt one
/// - **SingleClear**: empties one filled target cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PowerUpKind {
    AreaClear,
    Reshuffle,
    SingleClear,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::AreaClear,
        PowerUpKind::Reshuffle,
        PowerUpKind::SingleClear,
    ];

    /// Parse power-up kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blocks_types::PowerUpKind;
    ///
    /// assert_eq!(PowerUpKind::from_str("areaClear"), Some(PowerUpKind::AreaClear));
    /// assert_eq!(PowerUpKind::from_str("SINGLECLEAR"), Some(PowerUpKind::SingleClear));
    /// assert_eq!(PowerUpKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "areaclear" | "boom" => Some(PowerUpKind::AreaClear),
            "reshuffle" => Some(PowerUpKind::Reshuffle),
            "singleclear" => Some(PowerUpKind::SingleClear),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::AreaClear => "areaClear",
            PowerUpKind::Reshuffle => "reshuffle",
            PowerUpKind::SingleClear => "singleClear",
        }
    }

    /// Uses granted at the start of every session
    pub fn initial_count(&self) -> u8 {
        match self {
            PowerUpKind::AreaClear => 2,
            PowerUpKind::Reshuffle => 2,
            PowerUpKind::SingleClear => 3,
        }
    }

    /// Whether the power-up needs a board target
    pub fn is_targeted(&self) -> bool {
        !matches!(self, PowerUpKind::Reshuffle)
    }
}

/// Declared color of a catalog shape
///
/// The engine treats this as an opaque token: it is copied onto filled cells
/// and compared for equality, nothing more. Themes resolve it to real colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColorKey {
    Cyan,
    Blue,
    Orange,
    Yellow,
    Green,
    Purple,
    Red,
}

impl ColorKey {
    pub const ALL: [ColorKey; 7] = [
        ColorKey::Cyan,
        ColorKey::Blue,
        ColorKey::Orange,
        ColorKey::Yellow,
        ColorKey::Green,
        ColorKey::Purple,
        ColorKey::Red,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorKey::Cyan => "CYAN",
            ColorKey::Blue => "BLUE",
            ColorKey::Orange => "ORANGE",
            ColorKey::Yellow => "YELLOW",
            ColorKey::Green => "GREEN",
            ColorKey::Purple => "PURPLE",
            ColorKey::Red => "RED",
        }
    }
}

/// Opaque color identifier carried by pieces and filled cells
pub type ColorToken = ColorKey;

/// Visual themes offered by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Holographic,
    Wood,
    Futuristic,
}

impl ThemeName {
    pub const ALL: [ThemeName; 3] = [ThemeName::Holographic, ThemeName::Wood, ThemeName::Futuristic];

    /// Parse theme name from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "holographic" => Some(ThemeName::Holographic),
            "wood" => Some(ThemeName::Wood),
            "futuristic" => Some(ThemeName::Futuristic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Holographic => "holographic",
            ThemeName::Wood => "wood",
            ThemeName::Futuristic => "futuristic",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ThemeName::Holographic => "Holographic Arena",
            ThemeName::Wood => "Natural Wooden Board",
            ThemeName::Futuristic => "Futuristic Grid",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ThemeName::Holographic => ThemeName::Wood,
            ThemeName::Wood => ThemeName::Futuristic,
            ThemeName::Futuristic => ThemeName::Holographic,
        }
    }
}

/// Preview marking of a cell for a pending action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HintState {
    #[default]
    None,
    Good,
    Bad,
}

/// Transient animation status of a cell
///
/// At most one animation is active on a cell at a time; each one self-clears
/// once its duration has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellFx {
    #[default]
    Idle,
    /// Cell was filled by the last placement (pop animation)
    JustPlaced,
    /// Cell belongs to a completed line; `delay_ms` staggers the animation start
    Clearing { delay_ms: u32 },
    /// Cell is inside an area clear blast
    Exploding,
    /// Cell is the target of a single clear
    Dissolving,
}

/// Commands accepted by the session coordinator
///
/// These are used by both keyboard input and tests. Anchors are signed so
/// that off-board positions can be expressed (and rejected).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    /// Place a trio piece with its top-left corner at `(row, col)`
    Place { piece_id: u32, row: i8, col: i8 },
    /// Recompute the preview for a piece (or the armed power-up when `None`)
    SetHint {
        piece_id: Option<u32>,
        row: i8,
        col: i8,
    },
    /// Remove every preview marking
    ClearHint,
    /// Arm (or disarm) a power-up
    ArmPowerUp(PowerUpKind),
    /// Fire the armed power-up at a board cell
    ApplyPowerUpAt { row: i8, col: i8 },
    /// Replace the trio using one reshuffle
    Reshuffle,
    /// Start a fresh session
    Reset(Difficulty),
}

impl GameCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameCommand::Place { .. } => "place",
            GameCommand::SetHint { .. } => "setHint",
            GameCommand::ClearHint => "clearHint",
            GameCommand::ArmPowerUp(_) => "armPowerUp",
            GameCommand::ApplyPowerUpAt { .. } => "applyPowerUpAt",
            GameCommand::Reshuffle => "reshuffle",
            GameCommand::Reset(_) => "reset",
        }
    }
}

/// Fire-and-forget notifications for the audio/visual collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreEvent {
    /// A piece landed on the board
    PiecePlaced { piece_id: u32, cells: u8, points: u32 },
    /// A placement completed rows and/or columns
    LinesCleared { rows: u8, cols: u8 },
    /// The session score passed the stored best for this difficulty
    NewHighScore { difficulty: Difficulty, score: u32 },
    /// No piece of the trio fits anywhere
    GameOver { score: u32 },
}

//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the puzzle rules, state management, and timing logic.
//! It has **zero dependencies** on UI, persistence, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical trios
//! - **Testable**: Comprehensive unit tests for all game rules
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//! - **Fast**: Zero-allocation hot paths for placement, hints and ticks
//!
//! # Module Structure
//!
//! - [`board`]: 10x10 grid with placement validation and line detection
//! - [`game_state`]: Complete session state including trio, scoring, power-ups and the lock
//! - [`moves`]: Placement checks and the move-availability oracle
//! - [`pieces`]: Shape definitions and the difficulty-tiered catalog
//! - [`powerup`]: Power-up inventory and area-clear geometry
//! - [`rng`]: Uniform trio generation with replacement
//! - [`scoring`]: Quadratic line rewards with a multi-line bonus
//!
//! # Game Rules
//!
//! - **Placement**: Any trio piece may go anywhere it fits; there is no rotation
//! - **Clearing**: Full rows and full columns empty in place, nothing falls
//! - **Trio**: A new trio of three is dealt once all three pieces are used
//! - **Game Over**: When no remaining trio piece fits anywhere on the board
//!
//! # Example
//!
//! ```
//! use tui_blocks_core::GameState;
//! use tui_blocks_types::Difficulty;
//!
//! let mut game = GameState::new(Difficulty::Medium, 0, 12345);
//!
//! // Every piece fits somewhere on an empty board.
//! let piece = game.trio()[0];
//! assert!(game.attempt_place(piece.id(), 0, 0));
//! assert_eq!(game.score(), piece.cell_count() as u32);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with
//! elapsed time. Line clears and targeted power-ups lock the board until
//! their animation time has elapsed, then resolve in one step.

pub mod board;
pub mod error;
pub mod game_state;
pub mod moves;
pub mod pieces;
pub mod powerup;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tui_blocks_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Cell, CellWrite, ClearedLines};
pub use error::{PlaceError, PowerUpError};
pub use game_state::{clear_delay_ms, EventBuffer, GameState, PlaceOutcome, EVENT_CAPACITY};
pub use moves::{anchors, can_place, has_any_move};
pub use pieces::{
    block_pool, BlockDef, Piece, Shape, Tier, Trio, CATALOG_SIZE, COMPLEX_BLOCKS, MEDIUM_BLOCKS,
    SIMPLE_BLOCKS,
};
pub use powerup::{area_targets, PowerUpInventory};
pub use rng::BlockGenerator;
pub use scoring::{calculate_score, ScoreResult};
pub use snapshot::GameSnapshot;

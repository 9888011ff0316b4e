//! Rejection reasons for player commands
//!
//! Rejected commands never change the session; these errors only explain why.

use thiserror::Error;

/// Why a placement was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlaceError {
    #[error("board is locked while an effect resolves")]
    Locked,
    #[error("game is over")]
    GameOver,
    #[error("a power-up is armed")]
    PowerUpArmed,
    #[error("piece {0} is not in the trio")]
    UnknownPiece(u32),
    #[error("piece would extend past the board edge")]
    OutOfBounds,
    #[error("piece overlaps a filled cell")]
    Collision,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::Locked => "locked",
            PlaceError::GameOver => "game_over",
            PlaceError::PowerUpArmed => "power_up_armed",
            PlaceError::UnknownPiece(_) => "unknown_piece",
            PlaceError::OutOfBounds | PlaceError::Collision => "invalid_place",
        }
    }
}

/// Why a power-up activation was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PowerUpError {
    #[error("board is locked while an effect resolves")]
    Locked,
    #[error("game is over")]
    GameOver,
    #[error("no uses left")]
    Exhausted,
    #[error("no power-up is armed")]
    NotArmed,
    #[error("target cell is not valid for this power-up")]
    InvalidTarget,
}

impl PowerUpError {
    pub fn code(self) -> &'static str {
        match self {
            PowerUpError::Locked => "locked",
            PowerUpError::GameOver => "game_over",
            PowerUpError::Exhausted => "exhausted",
            PowerUpError::NotArmed => "not_armed",
            PowerUpError::InvalidTarget => "invalid_target",
        }
    }
}

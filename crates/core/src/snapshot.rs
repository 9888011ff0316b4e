use crate::board::Cell;
use crate::pieces::Trio;
use crate::powerup::PowerUpInventory;
use crate::types::{Difficulty, PowerUpKind, GRID_SIZE};

const SIDE: usize = GRID_SIZE as usize;

/// Read-only copy of everything the presentation layer draws
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: [[Cell; SIDE]; SIDE],
    pub trio: Trio,
    pub score: u32,
    pub high_score: u32,
    pub difficulty: Difficulty,
    pub power_ups: PowerUpInventory,
    pub armed: Option<PowerUpKind>,
    pub locked: bool,
    /// Time left before the current locked phase resolves
    pub lock_remaining_ms: u32,
    pub game_over: bool,
    pub episode_id: u32,
    pub seed: u64,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[Cell::EMPTY; SIDE]; SIDE];
        self.trio.clear();
        self.score = 0;
        self.high_score = 0;
        self.difficulty = Difficulty::default();
        self.power_ups = PowerUpInventory::new();
        self.armed = None;
        self.locked = false;
        self.lock_remaining_ms = 0;
        self.game_over = false;
        self.episode_id = 0;
        self.seed = 0;
    }

    /// Whether a placement could currently be accepted
    pub fn playable(&self) -> bool {
        !self.game_over && !self.locked
    }

    pub fn cell(&self, row: u8, col: u8) -> Option<Cell> {
        self.board
            .get(row as usize)
            .and_then(|cells| cells.get(col as usize))
            .copied()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[Cell::EMPTY; SIDE]; SIDE],
            trio: Trio::new(),
            score: 0,
            high_score: 0,
            difficulty: Difficulty::default(),
            power_ups: PowerUpInventory::new(),
            armed: None,
            locked: false,
            lock_remaining_ms: 0,
            game_over: false,
            episode_id: 0,
            seed: 0,
        }
    }
}

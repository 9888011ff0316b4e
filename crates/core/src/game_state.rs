//! Game state module - manages the complete session state
//!
//! This module ties together all core components: board, trio, generator,
//! scoring and power-ups. It owns the interaction lock: line clears and
//! targeted power-ups start a timed phase during which placements and
//! activations are rejected, and [`GameState::tick`] resolves that phase
//! atomically once its time has elapsed.
//!
//! # Phases
//!
//! | Phase | Entered by | Resolves to |
//! |-------|------------|-------------|
//! | idle | session start, any resolution | - |
//! | clearing | placement completing lines | cells emptied, trio refill, move check |
//! | exploding | area clear applied | 3x3 emptied, move check |
//! | dissolving | single clear applied | cell emptied, move check |
//!
//! The placement pop and the rejected-placement flash are cosmetic timers and
//! never lock interaction.

use arrayvec::ArrayVec;
use tracing::{debug, info};

use crate::board::{Board, CellWrite, ClearedLines};
use crate::error::{PlaceError, PowerUpError};
use crate::moves::{can_place, has_any_move};
use crate::pieces::{Piece, Trio};
use crate::powerup::{area_targets, PowerUpInventory};
use crate::rng::BlockGenerator;
use crate::scoring::{calculate_score, ScoreResult};
use crate::snapshot::GameSnapshot;
use crate::types::{
    CellFx, CoreEvent, Difficulty, HintState, PowerUpKind, Timings, BAD_FLASH_MS,
    CLEAR_STAGGER_MS, GRID_SIZE, TRIO_SIZE,
};

/// Pending notifications kept between drains; the oldest is dropped when full
pub const EVENT_CAPACITY: usize = 8;

pub type EventBuffer = ArrayVec<CoreEvent, EVENT_CAPACITY>;

/// Centre-outward animation delay for position `index` along a cleared line
///
/// ```
/// use tui_blocks_core::clear_delay_ms;
///
/// assert_eq!(clear_delay_ms(0), 120);
/// assert_eq!(clear_delay_ms(4), 0);
/// assert_eq!(clear_delay_ms(5), 0);
/// assert_eq!(clear_delay_ms(7), 60);
/// ```
pub fn clear_delay_ms(index: u8) -> u32 {
    // floor(|i - 4.5|) computed on doubled values to stay in integers.
    let doubled = (2 * index as i32 - (GRID_SIZE as i32 - 1)).unsigned_abs();
    (doubled / 2) * CLEAR_STAGGER_MS
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingEffect {
    ClearLines(ClearedLines),
    AreaClear(ArrayVec<(u8, u8), 9>),
    SingleClear { row: u8, col: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Idle,
    Resolving {
        remaining_ms: u32,
        effect: PendingEffect,
    },
}

/// Result of an accepted placement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceOutcome {
    pub piece_id: u32,
    pub cells: u8,
    pub score: ScoreResult,
    /// Lines that will empty once the clearing phase resolves
    pub cleared: ClearedLines,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    trio: Trio,
    generator: BlockGenerator,
    difficulty: Difficulty,
    timings: Timings,
    score: u32,
    high_score: u32,
    power_ups: PowerUpInventory,
    armed: Option<PowerUpKind>,
    phase: Phase,
    pop_timer_ms: u32,
    flash_timer_ms: u32,
    game_over: bool,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
    events: EventBuffer,
}

impl GameState {
    /// Start a session at `difficulty`, with the stored best score for that slot
    pub fn new(difficulty: Difficulty, high_score: u32, seed: u64) -> Self {
        let mut generator = BlockGenerator::new(seed);
        let trio = generator.deal(difficulty);

        Self {
            board: Board::new(),
            trio,
            generator,
            difficulty,
            timings: difficulty.timings(),
            score: 0,
            high_score,
            power_ups: PowerUpInventory::new(),
            armed: None,
            phase: Phase::Idle,
            pop_timer_ms: 0,
            flash_timer_ms: 0,
            game_over: false,
            episode_id: 0,
            events: EventBuffer::new(),
        }
    }

    /// Start a session from an explicit board and trio
    ///
    /// At most three pieces are kept. An empty trio is dealt fresh, and the
    /// move check runs immediately, so a stuck position starts game-over.
    pub fn with_position(
        difficulty: Difficulty,
        high_score: u32,
        seed: u64,
        board: Board,
        pieces: &[Piece],
    ) -> Self {
        let mut state = Self::new(difficulty, high_score, seed);
        state.board = board;
        state.trio = pieces.iter().take(TRIO_SIZE).copied().collect();
        for piece in &pieces[..pieces.len().min(TRIO_SIZE)] {
            state.generator.reserve_through(piece.id());
        }
        state.settle();
        state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn trio(&self) -> &[Piece] {
        &self.trio
    }

    /// Look up a trio piece by identity
    pub fn piece(&self, piece_id: u32) -> Option<&Piece> {
        self.trio.iter().find(|piece| piece.id() == piece_id)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn timings(&self) -> Timings {
        self.timings
    }

    pub fn power_ups(&self) -> &PowerUpInventory {
        &self.power_ups
    }

    pub fn armed_power_up(&self) -> Option<PowerUpKind> {
        self.armed
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Whether a timed effect is resolving (placements and activations refused)
    pub fn is_locked(&self) -> bool {
        matches!(self.phase, Phase::Resolving { .. })
    }

    pub fn lock_remaining_ms(&self) -> u32 {
        match self.phase {
            Phase::Resolving { remaining_ms, .. } => remaining_ms,
            Phase::Idle => 0,
        }
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn seed(&self) -> u64 {
        self.generator.seed()
    }

    /// Take and clear pending notifications
    pub fn take_events(&mut self) -> EventBuffer {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (dst, src) in out.board.iter_mut().zip(self.board.rows()) {
            dst.copy_from_slice(src);
        }
        out.trio.clone_from(&self.trio);
        out.score = self.score;
        out.high_score = self.high_score;
        out.difficulty = self.difficulty;
        out.power_ups = self.power_ups;
        out.armed = self.armed;
        out.locked = self.is_locked();
        out.lock_remaining_ms = self.lock_remaining_ms();
        out.game_over = self.game_over;
        out.episode_id = self.episode_id;
        out.seed = self.generator.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Place a trio piece with its top-left corner at `(row, col)`
    ///
    /// On success the piece leaves the trio, its cells are filled and scored.
    /// Completed lines start the clearing phase; otherwise the trio is
    /// refilled when empty and the move check runs right away.
    pub fn try_place(&mut self, piece_id: u32, row: i8, col: i8) -> Result<PlaceOutcome, PlaceError> {
        if self.game_over {
            return Err(PlaceError::GameOver);
        }
        if self.is_locked() {
            return Err(PlaceError::Locked);
        }
        if self.armed.is_some() {
            return Err(PlaceError::PowerUpArmed);
        }
        let Some(slot) = self.trio.iter().position(|piece| piece.id() == piece_id) else {
            return Err(PlaceError::UnknownPiece(piece_id));
        };
        let piece = self.trio[slot];
        if !can_place(&piece, row, col, &self.board) {
            return Err(rejection_reason(&piece, row, col));
        }

        self.trio.remove(slot);
        self.board.clear_hints();
        self.flash_timer_ms = 0;
        self.board.clear_fx(CellFx::JustPlaced);

        let color = piece.color();
        self.board.commit(piece.shape().cells().map(|(r, c)| {
            CellWrite::fill((row + r as i8) as u8, (col + c as i8) as u8, color)
        }));
        self.pop_timer_ms = self.timings.place_pop_ms;

        let cleared = self.board.completed_lines();
        let cells = piece.cell_count();
        let score = calculate_score(cells as u32, cleared.line_count());

        self.push_event(CoreEvent::PiecePlaced {
            piece_id,
            cells,
            points: score.total,
        });
        if !cleared.is_empty() {
            self.push_event(CoreEvent::LinesCleared {
                rows: cleared.rows.len() as u8,
                cols: cleared.cols.len() as u8,
            });
        }
        self.add_score(score.total);

        debug!(
            piece_id,
            row,
            col,
            points = score.total,
            lines = cleared.line_count(),
            "piece placed"
        );

        if cleared.is_empty() {
            self.settle();
        } else {
            let max_delay = self.mark_clearing(&cleared);
            self.phase = Phase::Resolving {
                remaining_ms: max_delay + self.timings.line_clear_ms,
                effect: PendingEffect::ClearLines(cleared.clone()),
            };
        }

        Ok(PlaceOutcome {
            piece_id,
            cells,
            score,
            cleared,
        })
    }

    /// Boolean form of [`try_place`](Self::try_place)
    pub fn attempt_place(&mut self, piece_id: u32, row: i8, col: i8) -> bool {
        match self.try_place(piece_id, row, col) {
            Ok(_) => true,
            Err(err) => {
                debug!(piece_id, row, col, reason = err.code(), "placement rejected");
                false
            }
        }
    }

    /// Recompute the preview for a hovered piece, or for the armed power-up
    ///
    /// Only hint markings change. Works while locked or game-over.
    pub fn set_hint(&mut self, piece_id: Option<u32>, row: i8, col: i8) {
        self.board.clear_hints();
        self.flash_timer_ms = 0;

        match self.armed {
            Some(PowerUpKind::AreaClear) => {
                if !Board::is_out_of_bounds(row, col) {
                    for (r, c) in area_targets(row as u8, col as u8) {
                        self.board.set_hint(r as i8, c as i8, HintState::Good);
                    }
                }
            }
            Some(PowerUpKind::SingleClear) => {
                if self.board.is_filled(row, col) {
                    self.board.set_hint(row, col, HintState::Good);
                }
            }
            Some(PowerUpKind::Reshuffle) | None => {
                let Some(piece) = piece_id.and_then(|id| self.piece(id)).copied() else {
                    return;
                };
                let hint = if can_place(&piece, row, col, &self.board) {
                    HintState::Good
                } else {
                    HintState::Bad
                };
                self.mark_footprint(&piece, row, col, hint);
            }
        }
    }

    /// Remove every hint marking
    pub fn clear_hint(&mut self) {
        self.board.clear_hints();
        self.flash_timer_ms = 0;
    }

    /// Briefly mark a refused drop target as bad
    pub fn flash_rejection(&mut self, piece_id: u32, row: i8, col: i8) {
        self.board.clear_hints();
        let Some(piece) = self.piece(piece_id).copied() else {
            return;
        };
        self.mark_footprint(&piece, row, col, HintState::Bad);
        self.flash_timer_ms = BAD_FLASH_MS;
    }

    /// Arm or disarm a targeted power-up; reshuffle fires immediately
    ///
    /// Returns false when nothing changed (no uses left, or game over).
    pub fn arm_power_up(&mut self, kind: PowerUpKind) -> bool {
        if self.game_over {
            return false;
        }
        if !kind.is_targeted() {
            return self.reshuffle();
        }
        if self.armed == Some(kind) {
            self.armed = None;
            self.board.clear_hints();
            return true;
        }
        if !self.power_ups.has(kind) {
            return false;
        }
        self.armed = Some(kind);
        self.board.clear_hints();
        true
    }

    /// Fire the armed power-up at `(row, col)`
    pub fn try_apply_power_up_at(&mut self, row: i8, col: i8) -> Result<(), PowerUpError> {
        if self.game_over {
            return Err(PowerUpError::GameOver);
        }
        if self.is_locked() {
            return Err(PowerUpError::Locked);
        }
        let Some(kind) = self.armed else {
            return Err(PowerUpError::NotArmed);
        };
        if Board::is_out_of_bounds(row, col) {
            return Err(PowerUpError::InvalidTarget);
        }
        let (r, c) = (row as u8, col as u8);

        let (effect, duration_ms) = match kind {
            PowerUpKind::AreaClear => (
                PendingEffect::AreaClear(area_targets(r, c)),
                self.timings.area_clear_ms,
            ),
            PowerUpKind::SingleClear => {
                if !self.board.is_filled(row, col) {
                    return Err(PowerUpError::InvalidTarget);
                }
                (
                    PendingEffect::SingleClear { row: r, col: c },
                    self.timings.single_clear_ms,
                )
            }
            PowerUpKind::Reshuffle => {
                self.armed = None;
                return self.try_reshuffle();
            }
        };

        if !self.power_ups.consume(kind) {
            self.armed = None;
            return Err(PowerUpError::Exhausted);
        }

        match &effect {
            PendingEffect::AreaClear(cells) => {
                for &(r, c) in cells {
                    self.board.set_fx(r, c, CellFx::Exploding);
                }
            }
            PendingEffect::SingleClear { row, col } => {
                self.board.set_fx(*row, *col, CellFx::Dissolving);
            }
            PendingEffect::ClearLines(_) => {}
        }

        self.armed = None;
        self.board.clear_hints();
        self.flash_timer_ms = 0;
        self.phase = Phase::Resolving {
            remaining_ms: duration_ms,
            effect,
        };

        info!(
            power_up = kind.as_str(),
            row,
            col,
            remaining = self.power_ups.count(kind),
            "power-up applied"
        );
        Ok(())
    }

    /// Boolean form of [`try_apply_power_up_at`](Self::try_apply_power_up_at)
    pub fn apply_power_up_at(&mut self, row: i8, col: i8) -> bool {
        match self.try_apply_power_up_at(row, col) {
            Ok(()) => true,
            Err(err) => {
                debug!(row, col, reason = err.code(), "power-up rejected");
                false
            }
        }
    }

    /// Spend a reshuffle to replace the whole trio
    ///
    /// The new trio may have no move at all, in which case the game ends.
    pub fn try_reshuffle(&mut self) -> Result<(), PowerUpError> {
        if self.game_over {
            return Err(PowerUpError::GameOver);
        }
        if self.is_locked() {
            return Err(PowerUpError::Locked);
        }
        if !self.power_ups.consume(PowerUpKind::Reshuffle) {
            return Err(PowerUpError::Exhausted);
        }

        self.trio = self.generator.deal(self.difficulty);
        self.board.clear_hints();
        info!(
            remaining = self.power_ups.count(PowerUpKind::Reshuffle),
            "trio reshuffled"
        );

        if !has_any_move(&self.trio, &self.board) {
            self.end_game();
        }
        Ok(())
    }

    /// Boolean form of [`try_reshuffle`](Self::try_reshuffle)
    pub fn reshuffle(&mut self) -> bool {
        match self.try_reshuffle() {
            Ok(()) => true,
            Err(err) => {
                debug!(reason = err.code(), "reshuffle rejected");
                false
            }
        }
    }

    /// Start a fresh session (the only way out of game-over)
    pub fn reset(&mut self, difficulty: Difficulty, high_score: u32) {
        self.board.clear();
        self.difficulty = difficulty;
        self.timings = difficulty.timings();
        self.trio = self.generator.deal(difficulty);
        self.score = 0;
        self.high_score = high_score;
        self.power_ups = PowerUpInventory::new();
        self.armed = None;
        self.phase = Phase::Idle;
        self.pop_timer_ms = 0;
        self.flash_timer_ms = 0;
        self.game_over = false;
        self.events.clear();
        self.episode_id = self.episode_id.wrapping_add(1);

        info!(
            episode_id = self.episode_id,
            difficulty = difficulty.as_str(),
            high_score,
            "session reset"
        );
    }

    /// Advance timers by `elapsed_ms`
    ///
    /// Returns true if anything visible changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let mut changed = false;

        if self.pop_timer_ms > 0 {
            self.pop_timer_ms = self.pop_timer_ms.saturating_sub(elapsed_ms);
            if self.pop_timer_ms == 0 {
                self.board.clear_fx(CellFx::JustPlaced);
                changed = true;
            }
        }

        if self.flash_timer_ms > 0 {
            self.flash_timer_ms = self.flash_timer_ms.saturating_sub(elapsed_ms);
            if self.flash_timer_ms == 0 {
                self.board.clear_hints_of(HintState::Bad);
                changed = true;
            }
        }

        if let Phase::Resolving { remaining_ms, .. } = &mut self.phase {
            *remaining_ms = remaining_ms.saturating_sub(elapsed_ms);
            if *remaining_ms == 0 {
                if let Phase::Resolving { effect, .. } = std::mem::replace(&mut self.phase, Phase::Idle) {
                    self.resolve(effect);
                }
                changed = true;
            }
        }

        changed
    }

    fn resolve(&mut self, effect: PendingEffect) {
        let emptied = match effect {
            PendingEffect::ClearLines(lines) => self
                .board
                .commit(lines.cells().map(|(r, c)| CellWrite::clear(r, c))),
            PendingEffect::AreaClear(cells) => self
                .board
                .commit(cells.into_iter().map(|(r, c)| CellWrite::clear(r, c))),
            PendingEffect::SingleClear { row, col } => {
                self.board.commit([CellWrite::clear(row, col)])
            }
        };
        debug!(emptied, "effect resolved");
        self.settle();
    }

    /// Refill an empty trio, then end the game if nothing fits
    fn settle(&mut self) {
        if self.trio.is_empty() {
            self.trio = self.generator.deal(self.difficulty);
        }
        if !has_any_move(&self.trio, &self.board) {
            self.end_game();
        }
    }

    fn end_game(&mut self) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        self.armed = None;
        self.push_event(CoreEvent::GameOver { score: self.score });
        info!(score = self.score, episode_id = self.episode_id, "game over");
    }

    fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        if self.score > self.high_score {
            self.high_score = self.score;
            self.push_event(CoreEvent::NewHighScore {
                difficulty: self.difficulty,
                score: self.score,
            });
        }
    }

    fn push_event(&mut self, event: CoreEvent) {
        if self.events.is_full() {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Flag cleared cells with their staggered delays; returns the largest delay
    fn mark_clearing(&mut self, lines: &ClearedLines) -> u32 {
        let mut max_delay = 0;
        for &row in &lines.rows {
            for col in 0..GRID_SIZE {
                let delay_ms = clear_delay_ms(col);
                self.board.set_fx(row, col, CellFx::Clearing { delay_ms });
                max_delay = max_delay.max(delay_ms);
            }
        }
        for &col in &lines.cols {
            for row in 0..GRID_SIZE {
                // Intersections keep the delay of their row.
                if lines.rows.contains(&row) {
                    continue;
                }
                let delay_ms = clear_delay_ms(row);
                self.board.set_fx(row, col, CellFx::Clearing { delay_ms });
                max_delay = max_delay.max(delay_ms);
            }
        }
        max_delay
    }

    fn mark_footprint(&mut self, piece: &Piece, row: i8, col: i8, hint: HintState) {
        for (r, c) in piece.shape().cells() {
            if let (Some(pr), Some(pc)) = (row.checked_add(r as i8), col.checked_add(c as i8)) {
                self.board.set_hint(pr, pc, hint);
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Difficulty::default(), 0, 0)
    }
}

/// Distinguish an off-board footprint from an overlap
fn rejection_reason(piece: &Piece, row: i8, col: i8) -> PlaceError {
    let inside = piece.shape().cells().all(|(r, c)| {
        match (row.checked_add(r as i8), col.checked_add(c as i8)) {
            (Some(pr), Some(pc)) => !Board::is_out_of_bounds(pr, pc),
            _ => false,
        }
    });
    if inside {
        PlaceError::Collision
    } else {
        PlaceError::OutOfBounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::{MEDIUM_BLOCKS, SIMPLE_BLOCKS};

    fn dot(id: u32) -> Piece {
        Piece::new(id, &SIMPLE_BLOCKS[0])
    }

    fn square(id: u32) -> Piece {
        Piece::new(id, &SIMPLE_BLOCKS[3])
    }

    fn bar3(id: u32) -> Piece {
        Piece::new(id, &MEDIUM_BLOCKS[0])
    }

    fn state(board: Board, pieces: &[Piece]) -> GameState {
        GameState::with_position(Difficulty::Medium, 0, 1, board, pieces)
    }

    #[test]
    fn test_new_game_state() {
        let gs = GameState::new(Difficulty::Hard, 77, 5);
        assert_eq!(gs.trio().len(), 3);
        assert_eq!(gs.score(), 0);
        assert_eq!(gs.high_score(), 77);
        assert_eq!(gs.board().filled_count(), 0);
        assert!(!gs.is_locked());
        assert!(!gs.is_game_over());
        assert_eq!(gs.power_ups(), &PowerUpInventory::new());
    }

    #[test]
    fn test_place_without_lines() {
        let mut gs = state(Board::new(), &[square(1), dot(2), dot(3)]);
        let outcome = gs.try_place(1, 3, 3).unwrap();
        assert_eq!(outcome.score.total, 4);
        assert_eq!(gs.score(), 4);
        assert!(gs.board().is_filled(4, 4));
        assert_eq!(gs.trio().len(), 2);
        assert!(gs.piece(1).is_none());
        assert!(!gs.is_locked());
    }

    #[test]
    fn test_rejections_leave_state_untouched() {
        let mut gs = state(Board::from_ascii(&["#"]), &[square(1), dot(2)]);
        let before = gs.snapshot();

        assert_eq!(gs.try_place(1, 0, 0), Err(PlaceError::Collision));
        assert_eq!(gs.try_place(1, 9, 0), Err(PlaceError::OutOfBounds));
        assert_eq!(gs.try_place(1, -1, 4), Err(PlaceError::OutOfBounds));
        assert_eq!(gs.try_place(9, 4, 4), Err(PlaceError::UnknownPiece(9)));
        assert!(!gs.attempt_place(1, 0, 0));

        assert_eq!(gs.snapshot(), before);
    }

    #[test]
    fn test_row_clear_locks_then_empties() {
        let mut gs = state(Board::from_ascii(&["#######", ".#"]), &[bar3(1), dot(2)]);
        let outcome = gs.try_place(1, 0, 7).unwrap();
        assert_eq!(outcome.score.total, 103);
        assert_eq!(outcome.cleared.rows.as_slice(), &[0]);
        assert!(gs.is_locked());
        assert_eq!(gs.lock_remaining_ms(), 120 + 500);

        assert_eq!(gs.try_place(2, 5, 5), Err(PlaceError::Locked));

        gs.tick(619);
        assert!(gs.is_locked());
        assert!(gs.board().is_filled(0, 3));

        assert!(gs.tick(1));
        assert!(!gs.is_locked());
        assert!((0..10).all(|c| !gs.board().is_filled(0, c)));
        // Nothing falls.
        assert!(gs.board().is_filled(1, 1));
        assert_eq!(gs.board().filled_count(), 1);
    }

    #[test]
    fn test_two_line_combo_score() {
        let rows = [
            "", "", "", "", "", "", "", "",
            "########..",
            "########..",
        ];
        let mut gs = state(Board::from_ascii(&rows), &[square(1), dot(2)]);
        let outcome = gs.try_place(1, 8, 8).unwrap();
        assert_eq!(outcome.cleared.rows.as_slice(), &[8, 9]);
        assert_eq!(outcome.score.total, 454);
        assert_eq!(gs.score(), 454);
    }

    #[test]
    fn test_intersection_keeps_row_delay() {
        let mut rows = [".#........"; 10];
        rows[0] = "#.########";
        let mut gs = state(Board::from_ascii(&rows), &[dot(1), dot(2)]);
        let outcome = gs.try_place(1, 0, 1).unwrap();
        assert_eq!(outcome.cleared.line_count(), 2);
        assert_eq!(outcome.score.total, 1 + 400 + 50);

        let fx = |r: i8, c: i8| gs.board().get(r, c).map(|cell| cell.fx());
        assert_eq!(fx(0, 1), Some(CellFx::Clearing { delay_ms: 90 }));
        assert_eq!(fx(0, 0), Some(CellFx::Clearing { delay_ms: 120 }));
        assert_eq!(fx(5, 1), Some(CellFx::Clearing { delay_ms: 0 }));
        assert_eq!(fx(9, 1), Some(CellFx::Clearing { delay_ms: 120 }));
        assert_eq!(fx(5, 0), Some(CellFx::Idle));
    }

    #[test]
    fn test_place_pop_expires_without_lock() {
        let mut gs = state(Board::new(), &[dot(1), dot(2)]);
        gs.try_place(1, 2, 2).unwrap();
        assert_eq!(gs.board().get(2, 2).map(|c| c.fx()), Some(CellFx::JustPlaced));
        assert!(!gs.is_locked());

        gs.tick(gs.timings().place_pop_ms);
        assert_eq!(gs.board().get(2, 2).map(|c| c.fx()), Some(CellFx::Idle));
    }

    #[test]
    fn test_trio_refills_after_last_piece() {
        let mut gs = state(Board::new(), &[dot(1)]);
        gs.try_place(1, 0, 0).unwrap();
        assert_eq!(gs.trio().len(), 3);
        assert!(gs.trio().iter().all(|piece| piece.id() > 1));
    }

    #[test]
    fn test_stuck_position_starts_game_over() {
        let full = Board::from_ascii(&["##########"; 10]);
        let mut gs = state(full, &[dot(1), square(2), bar3(3)]);
        assert!(gs.is_game_over());
        assert_eq!(gs.try_place(1, 0, 0), Err(PlaceError::GameOver));
        assert!(!gs.reshuffle());
        assert!(!gs.arm_power_up(PowerUpKind::AreaClear));

        gs.reset(Difficulty::Easy, 12);
        assert!(!gs.is_game_over());
        assert_eq!(gs.board().filled_count(), 0);
        assert_eq!(gs.trio().len(), 3);
        assert_eq!(gs.difficulty(), Difficulty::Easy);
        assert_eq!(gs.high_score(), 12);
        assert_eq!(gs.episode_id(), 1);
    }

    #[test]
    fn test_area_clear_corner() {
        let full = Board::from_ascii(&["##########"; 10]);
        let mut rows = ["##########"; 10];
        rows[5] = "#####.####";
        let mut gs = state(Board::from_ascii(&rows), &[dot(1)]);
        assert!(!gs.is_game_over());

        assert!(gs.arm_power_up(PowerUpKind::AreaClear));
        assert_eq!(gs.try_place(1, 5, 5), Err(PlaceError::PowerUpArmed));
        gs.try_apply_power_up_at(0, 0).unwrap();

        assert_eq!(gs.power_ups().count(PowerUpKind::AreaClear), 1);
        assert_eq!(gs.armed_power_up(), None);
        assert!(gs.is_locked());
        assert_eq!(gs.board().get(1, 1).map(|c| c.fx()), Some(CellFx::Exploding));

        gs.tick(gs.timings().area_clear_ms);
        assert!(!gs.is_locked());
        for (r, c) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
            assert!(!gs.board().is_filled(r, c));
        }
        assert_eq!(gs.board().filled_count(), full.filled_count() - 5);
        assert_eq!(gs.score(), 0);
    }

    #[test]
    fn test_single_clear_needs_filled_target() {
        let mut gs = state(Board::from_ascii(&["#"]), &[dot(1)]);
        assert!(gs.arm_power_up(PowerUpKind::SingleClear));

        assert_eq!(gs.try_apply_power_up_at(4, 4), Err(PowerUpError::InvalidTarget));
        assert_eq!(gs.try_apply_power_up_at(-1, 4), Err(PowerUpError::InvalidTarget));
        assert_eq!(gs.power_ups().count(PowerUpKind::SingleClear), 3);
        assert_eq!(gs.armed_power_up(), Some(PowerUpKind::SingleClear));

        gs.try_apply_power_up_at(0, 0).unwrap();
        assert_eq!(gs.power_ups().count(PowerUpKind::SingleClear), 2);
        gs.tick(gs.timings().single_clear_ms);
        assert_eq!(gs.board().filled_count(), 0);
    }

    #[test]
    fn test_inventory_never_negative() {
        let mut gs = state(Board::new(), &[dot(1)]);
        for _ in 0..2 {
            assert!(gs.arm_power_up(PowerUpKind::AreaClear));
            assert!(gs.apply_power_up_at(4, 4));
            gs.tick(1_000);
        }
        assert!(!gs.arm_power_up(PowerUpKind::AreaClear));
        assert_eq!(gs.armed_power_up(), None);
        assert_eq!(gs.power_ups().count(PowerUpKind::AreaClear), 0);
    }

    #[test]
    fn test_spent_power_up_leaves_board_alone() {
        let mut gs = state(Board::from_ascii(&["######"]), &[dot(1)]);
        for col in 0..3 {
            assert!(gs.arm_power_up(PowerUpKind::SingleClear));
            assert!(gs.apply_power_up_at(0, col));
            gs.tick(gs.timings().single_clear_ms);
        }
        assert_eq!(gs.power_ups().count(PowerUpKind::SingleClear), 0);

        let before = gs.board().clone();
        for _ in 0..5 {
            assert!(!gs.arm_power_up(PowerUpKind::SingleClear));
            assert_eq!(gs.try_apply_power_up_at(0, 4), Err(PowerUpError::NotArmed));
        }
        assert_eq!(gs.power_ups().count(PowerUpKind::SingleClear), 0);
        assert_eq!(gs.board(), &before);
        assert_eq!(gs.board().filled_count(), 3);
    }

    #[test]
    fn test_arming_twice_disarms() {
        let mut gs = GameState::new(Difficulty::Medium, 0, 3);
        assert!(gs.arm_power_up(PowerUpKind::SingleClear));
        assert!(gs.arm_power_up(PowerUpKind::SingleClear));
        assert_eq!(gs.armed_power_up(), None);
        assert_eq!(gs.power_ups().count(PowerUpKind::SingleClear), 3);
    }

    #[test]
    fn test_apply_without_arming() {
        let mut gs = GameState::new(Difficulty::Medium, 0, 3);
        assert_eq!(gs.try_apply_power_up_at(0, 0), Err(PowerUpError::NotArmed));
    }

    #[test]
    fn test_locked_rejects_power_ups_but_not_hints() {
        let mut gs = state(Board::from_ascii(&["#########"]), &[dot(1), dot(2)]);
        gs.try_place(1, 0, 9).unwrap();
        assert!(gs.is_locked());

        assert_eq!(gs.try_reshuffle(), Err(PowerUpError::Locked));
        assert!(gs.arm_power_up(PowerUpKind::SingleClear));
        assert_eq!(gs.try_apply_power_up_at(0, 0), Err(PowerUpError::Locked));
        assert!(gs.arm_power_up(PowerUpKind::SingleClear));

        gs.set_hint(Some(2), 5, 5);
        assert_eq!(gs.board().get(5, 5).map(|c| c.hint()), Some(HintState::Good));
    }

    #[test]
    fn test_reshuffle_replaces_trio() {
        let mut gs = GameState::new(Difficulty::Medium, 0, 11);
        let before: Vec<u32> = gs.trio().iter().map(Piece::id).collect();
        assert!(gs.reshuffle());
        assert_eq!(gs.power_ups().count(PowerUpKind::Reshuffle), 1);
        assert!(gs.trio().iter().all(|piece| !before.contains(&piece.id())));

        assert!(gs.arm_power_up(PowerUpKind::Reshuffle));
        assert_eq!(gs.try_reshuffle(), Err(PowerUpError::Exhausted));
        assert_eq!(gs.power_ups().count(PowerUpKind::Reshuffle), 0);
    }

    #[test]
    fn test_reshuffle_can_end_game() {
        let mut rows = ["##########"; 10];
        rows[4] = "####.#####";
        let board = Board::from_ascii(&rows);

        let mut ended = 0;
        for seed in 0..64 {
            let mut gs = GameState::with_position(Difficulty::Medium, 0, seed, board.clone(), &[dot(1)]);
            assert!(!gs.is_game_over());
            assert!(gs.reshuffle());
            let fits = gs.trio().iter().any(|piece| piece.cell_count() == 1);
            assert_eq!(gs.is_game_over(), !fits);
            if gs.is_game_over() {
                ended += 1;
            }
        }
        assert!(ended > 0);
    }

    #[test]
    fn test_hint_good_and_bad() {
        let mut gs = state(Board::from_ascii(&["", "", "", "", "#"]), &[square(1)]);

        gs.set_hint(Some(1), 0, 0);
        let good = gs.board().cells().iter().filter(|c| c.hint() == HintState::Good).count();
        assert_eq!(good, 4);

        gs.set_hint(Some(1), 3, 0);
        let bad = gs.board().cells().iter().filter(|c| c.hint() == HintState::Bad).count();
        assert_eq!(bad, 4);
        assert!(gs.board().is_filled(4, 0));

        // Only in-bounds footprint cells are marked.
        gs.set_hint(Some(1), 9, 9);
        let bad = gs.board().cells().iter().filter(|c| c.hint() == HintState::Bad).count();
        assert_eq!(bad, 1);

        gs.clear_hint();
        assert!(gs.board().cells().iter().all(|c| c.hint() == HintState::None));
    }

    #[test]
    fn test_clear_hint_is_idempotent() {
        let mut gs = state(Board::from_ascii(&["##"]), &[square(1)]);
        gs.set_hint(Some(1), 0, 0);
        gs.clear_hint();
        let once = gs.board().clone();
        gs.clear_hint();
        assert_eq!(gs.board(), &once);
        assert_eq!(gs.board().filled_count(), 2);
    }

    #[test]
    fn test_hint_for_armed_area_clear() {
        let mut gs = GameState::new(Difficulty::Medium, 0, 3);
        gs.arm_power_up(PowerUpKind::AreaClear);
        gs.set_hint(None, 0, 9);
        let good = gs.board().cells().iter().filter(|c| c.hint() == HintState::Good).count();
        assert_eq!(good, 4);
    }

    #[test]
    fn test_flash_rejection_self_clears() {
        let mut gs = state(Board::from_ascii(&["#"]), &[square(1)]);
        gs.flash_rejection(1, 0, 0);
        assert_eq!(gs.board().get(0, 1).map(|c| c.hint()), Some(HintState::Bad));

        assert!(!gs.tick(BAD_FLASH_MS - 1));
        assert!(gs.tick(1));
        assert!(gs.board().cells().iter().all(|c| c.hint() == HintState::None));
    }

    #[test]
    fn test_events_for_scoring_placement() {
        let mut gs = state(Board::from_ascii(&["#########"]), &[dot(1), dot(2)]);
        let outcome = gs.try_place(1, 0, 9).unwrap();
        assert_eq!(outcome.cleared.rows.as_slice(), &[0]);
        assert!(outcome.cleared.cols.is_empty());

        let events = gs.take_events();
        assert_eq!(
            events.as_slice(),
            &[
                CoreEvent::PiecePlaced { piece_id: 1, cells: 1, points: 101 },
                CoreEvent::LinesCleared { rows: 1, cols: 0 },
                CoreEvent::NewHighScore { difficulty: Difficulty::Medium, score: 101 },
            ]
        );
        assert!(gs.take_events().is_empty());

        gs.tick(gs.lock_remaining_ms());
        assert!(!gs.is_locked());
        assert!((0..GRID_SIZE as i8).all(|col| !gs.board().is_filled(0, col)));
        assert_eq!(gs.board().filled_count(), 0);
    }

    #[test]
    fn test_reset_drops_stale_events() {
        let mut gs = state(Board::from_ascii(&["#########"]), &[dot(1), dot(2)]);
        gs.try_place(1, 0, 9).unwrap();
        gs.reset(Difficulty::Easy, 0);
        assert!(gs.take_events().is_empty());
    }

    #[test]
    fn test_no_high_score_event_below_best() {
        let mut gs = GameState::with_position(Difficulty::Hard, 500, 1, Board::new(), &[dot(1), dot(2)]);
        gs.try_place(1, 0, 0).unwrap();
        let events = gs.take_events();
        assert_eq!(events.len(), 1);
        assert_eq!(gs.high_score(), 500);
    }

    #[test]
    fn test_event_buffer_drops_oldest() {
        let mut gs = GameState::new(Difficulty::Medium, u32::MAX, 2);
        for _ in 0..20 {
            let next = gs.trio().iter().find_map(|piece| {
                crate::moves::anchors(piece, gs.board())
                    .next()
                    .map(|(row, col)| (piece.id(), row, col))
            });
            let Some((id, row, col)) = next else {
                break;
            };
            gs.try_place(id, row, col).unwrap();
            gs.tick(2_000);
            if gs.is_game_over() {
                break;
            }
        }
        assert!(gs.take_events().len() <= EVENT_CAPACITY);
    }

    #[test]
    fn test_snapshot_matches_state() {
        let gs = state(Board::from_ascii(&["#"]), &[dot(1), square(2)]);
        let snap = gs.snapshot();
        assert!(snap.board[0][0].is_filled());
        assert_eq!(snap.trio.len(), 2);
        assert_eq!(snap.difficulty, Difficulty::Medium);
        assert!(snap.playable());
        assert_eq!(snap.seed, 1);
    }
}

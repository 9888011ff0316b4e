//! Cursor-driven input handler for terminal play.
//!
//! Terminals have no drag and drop, so a board cursor stands in for the
//! pointer: the selected trio piece is anchored (top-left) at the cursor, and
//! the preview follows the cursor around.
//!
//! The handler only tracks the cursor and the selected slot. It turns
//! [`InputAction`]s into [`Intent`]s using a read-only [`InputContext`]; the
//! caller applies them and then calls [`CursorHandler::hint_command`] to
//! refresh the preview against the updated session.

use crate::map::InputAction;
use crate::types::{Difficulty, GameCommand, PowerUpKind, GRID_SIZE, TRIO_SIZE};

/// What the handler needs to know about the session
#[derive(Debug, Clone, Copy)]
pub struct InputContext<'a> {
    /// Ids of the trio pieces, in slot order
    pub trio_ids: &'a [u32],
    pub armed: Option<PowerUpKind>,
    pub difficulty: Difficulty,
}

/// Result of handling one action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Forward to the session
    Command(GameCommand),
    CycleTheme,
    ToggleSfx,
    ToggleMusic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorHandler {
    row: i8,
    col: i8,
    slot: usize,
}

impl CursorHandler {
    /// Cursor starts near the middle of the board with the first slot selected
    pub fn new() -> Self {
        Self {
            row: (GRID_SIZE / 2 - 1) as i8,
            col: (GRID_SIZE / 2 - 1) as i8,
            slot: 0,
        }
    }

    pub fn cursor(&self) -> (i8, i8) {
        (self.row, self.col)
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Selected piece; falls back to the first remaining piece when the
    /// selected slot has been used up
    pub fn selected_piece(&self, ctx: &InputContext<'_>) -> Option<u32> {
        ctx.trio_ids
            .get(self.slot)
            .or_else(|| ctx.trio_ids.first())
            .copied()
    }

    /// Preview command for the current cursor and selection
    pub fn hint_command(&self, ctx: &InputContext<'_>) -> GameCommand {
        let piece_id = match ctx.armed {
            Some(_) => None,
            None => self.selected_piece(ctx),
        };
        GameCommand::SetHint {
            piece_id,
            row: self.row,
            col: self.col,
        }
    }

    /// Handle one action; returns what the caller should do, if anything
    pub fn handle(&mut self, action: InputAction, ctx: &InputContext<'_>) -> Option<Intent> {
        match action {
            InputAction::MoveCursor { d_row, d_col } => {
                let max = GRID_SIZE as i8 - 1;
                self.row = (self.row + d_row).clamp(0, max);
                self.col = (self.col + d_col).clamp(0, max);
                None
            }
            InputAction::SelectSlot(slot) => {
                if (slot as usize) < TRIO_SIZE {
                    self.slot = slot as usize;
                }
                None
            }
            InputAction::Confirm => {
                let command = match ctx.armed {
                    Some(_) => GameCommand::ApplyPowerUpAt {
                        row: self.row,
                        col: self.col,
                    },
                    None => GameCommand::Place {
                        piece_id: self.selected_piece(ctx)?,
                        row: self.row,
                        col: self.col,
                    },
                };
                Some(Intent::Command(command))
            }
            InputAction::Cancel => Some(Intent::Command(match ctx.armed {
                // Arming the armed kind again disarms it.
                Some(kind) => GameCommand::ArmPowerUp(kind),
                None => GameCommand::ClearHint,
            })),
            InputAction::ArmAreaClear => {
                Some(Intent::Command(GameCommand::ArmPowerUp(PowerUpKind::AreaClear)))
            }
            InputAction::ArmSingleClear => {
                Some(Intent::Command(GameCommand::ArmPowerUp(PowerUpKind::SingleClear)))
            }
            InputAction::Reshuffle => Some(Intent::Command(GameCommand::Reshuffle)),
            InputAction::NewGame => Some(Intent::Command(GameCommand::Reset(ctx.difficulty))),
            InputAction::CycleDifficulty => {
                Some(Intent::Command(GameCommand::Reset(ctx.difficulty.next())))
            }
            InputAction::CycleTheme => Some(Intent::CycleTheme),
            InputAction::ToggleSfx => Some(Intent::ToggleSfx),
            InputAction::ToggleMusic => Some(Intent::ToggleMusic),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for CursorHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(trio_ids: &[u32]) -> InputContext<'_> {
        InputContext {
            trio_ids,
            armed: None,
            difficulty: Difficulty::Medium,
        }
    }

    #[test]
    fn test_cursor_clamps_to_board() {
        let mut handler = CursorHandler::new();
        let ids = [1, 2, 3];
        for _ in 0..20 {
            handler.handle(InputAction::MoveCursor { d_row: -1, d_col: 1 }, &ctx(&ids));
        }
        assert_eq!(handler.cursor(), (0, 9));
    }

    #[test]
    fn test_confirm_places_selected_piece() {
        let mut handler = CursorHandler::new();
        let ids = [10, 11, 12];
        handler.handle(InputAction::SelectSlot(2), &ctx(&ids));
        let intent = handler.handle(InputAction::Confirm, &ctx(&ids));
        assert_eq!(
            intent,
            Some(Intent::Command(GameCommand::Place {
                piece_id: 12,
                row: 4,
                col: 4
            }))
        );
    }

    #[test]
    fn test_used_slot_falls_back_to_first() {
        let mut handler = CursorHandler::new();
        handler.handle(InputAction::SelectSlot(2), &ctx(&[1, 2, 3]));
        assert_eq!(handler.selected_piece(&ctx(&[7])), Some(7));
        assert_eq!(handler.selected_piece(&ctx(&[])), None);
        assert_eq!(handler.handle(InputAction::Confirm, &ctx(&[])), None);
    }

    #[test]
    fn test_confirm_fires_armed_power_up() {
        let mut handler = CursorHandler::new();
        let ids = [1];
        let armed = InputContext {
            armed: Some(PowerUpKind::AreaClear),
            ..ctx(&ids)
        };
        assert_eq!(
            handler.handle(InputAction::Confirm, &armed),
            Some(Intent::Command(GameCommand::ApplyPowerUpAt { row: 4, col: 4 }))
        );
        assert_eq!(
            handler.hint_command(&armed),
            GameCommand::SetHint {
                piece_id: None,
                row: 4,
                col: 4
            }
        );
        assert_eq!(
            handler.handle(InputAction::Cancel, &armed),
            Some(Intent::Command(GameCommand::ArmPowerUp(PowerUpKind::AreaClear)))
        );
    }

    #[test]
    fn test_difficulty_cycles_through_reset() {
        let mut handler = CursorHandler::new();
        assert_eq!(
            handler.handle(InputAction::CycleDifficulty, &ctx(&[])),
            Some(Intent::Command(GameCommand::Reset(Difficulty::Hard)))
        );
    }
}

//! Key mapping from terminal events to player actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks for, before any game context is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Move the board cursor by one cell
    MoveCursor { d_row: i8, d_col: i8 },
    /// Select the trio piece in slot `0..3`
    SelectSlot(u8),
    /// Place the selected piece, or fire the armed power-up, at the cursor
    Confirm,
    /// Disarm the power-up, or drop the preview
    Cancel,
    ArmAreaClear,
    ArmSingleClear,
    Reshuffle,
    NewGame,
    CycleDifficulty,
    CycleTheme,
    ToggleSfx,
    ToggleMusic,
}

/// Map keyboard input to player actions.
pub fn handle_key_event(key: KeyEvent) -> Option<InputAction> {
    let cursor = |d_row, d_col| Some(InputAction::MoveCursor { d_row, d_col });
    match key.code {
        // Cursor
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => cursor(0, -1),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => cursor(0, 1),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => cursor(-1, 0),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => cursor(1, 0),

        // Trio
        KeyCode::Char('1') => Some(InputAction::SelectSlot(0)),
        KeyCode::Char('2') => Some(InputAction::SelectSlot(1)),
        KeyCode::Char('3') => Some(InputAction::SelectSlot(2)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(InputAction::Confirm),
        KeyCode::Esc => Some(InputAction::Cancel),

        // Power-ups
        KeyCode::Char('b') | KeyCode::Char('B') => Some(InputAction::ArmAreaClear),
        KeyCode::Char('x') | KeyCode::Char('X') => Some(InputAction::ArmSingleClear),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(InputAction::Reshuffle),

        // Session and preferences
        KeyCode::Char('n') | KeyCode::Char('N') => Some(InputAction::NewGame),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(InputAction::CycleDifficulty),
        KeyCode::Char('t') | KeyCode::Char('T') => Some(InputAction::CycleTheme),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(InputAction::ToggleSfx),
        KeyCode::Char('u') | KeyCode::Char('U') => Some(InputAction::ToggleMusic),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_cursor_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some(InputAction::MoveCursor { d_row: 0, d_col: -1 })
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('j'))),
            Some(InputAction::MoveCursor { d_row: 1, d_col: 0 })
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('K'))),
            Some(InputAction::MoveCursor { d_row: -1, d_col: 0 })
        );
    }

    #[test]
    fn test_trio_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('3'))),
            Some(InputAction::SelectSlot(2))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Enter)),
            Some(InputAction::Confirm)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(InputAction::Confirm)
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('4'))), None);
    }

    #[test]
    fn test_power_up_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('b'))),
            Some(InputAction::ArmAreaClear)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('X'))),
            Some(InputAction::ArmSingleClear)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('r'))),
            Some(InputAction::Reshuffle)
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}

//! Scoring module - placement points
//!
//! A placement of `k` cells that completes `L` lines (rows plus columns,
//! counted together) is worth:
//!
//! ```text
//! k * PER_CELL + LINE_BASE * L^2 + COMBO_BONUS * max(0, L - 1)
//! ```
//!
//! Power-ups never award points.

use crate::types::{COMBO_BONUS, LINE_BASE, PER_CELL};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points for the placed cells.
    pub cell_points: u32,
    /// Quadratic line reward.
    pub line_points: u32,
    /// Bonus for clearing more than one line at once.
    pub combo_bonus: u32,
    pub total: u32,
}

/// Calculate the line reward: `LINE_BASE * lines^2`
pub fn calculate_line_score(lines: u32) -> u32 {
    LINE_BASE.saturating_mul(lines.saturating_mul(lines))
}

/// Calculate the multi-line bonus: `COMBO_BONUS * (lines - 1)`, zero below two lines
pub fn calculate_combo_bonus(lines: u32) -> u32 {
    COMBO_BONUS.saturating_mul(lines.saturating_sub(1))
}

/// Calculate the full reward for one placement
///
/// # Examples
///
/// ```
/// use tui_blocks_core::calculate_score;
///
/// // 4 cells completing two lines.
/// let result = calculate_score(4, 2);
/// assert_eq!(result.total, 4 + 400 + 50);
/// ```
pub fn calculate_score(cells: u32, lines: u32) -> ScoreResult {
    let cell_points = cells.saturating_mul(PER_CELL);
    let line_points = calculate_line_score(lines);
    let combo_bonus = calculate_combo_bonus(lines);
    ScoreResult {
        cell_points,
        line_points,
        combo_bonus,
        total: cell_points
            .saturating_add(line_points)
            .saturating_add(combo_bonus),
    }
}

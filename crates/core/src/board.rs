//! Board module - manages the 10x10 grid
//!
//! Each cell is either empty or filled with a color token, and may carry a
//! transient animation flag and a hint marking.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (row, col) where both range 0..9, row 0 at the top.
//!
//! Completed lines are detected here but never collapse: clearing a row or
//! column empties its cells in place and nothing above moves.

use arrayvec::ArrayVec;

use crate::pieces::Shape;
use crate::types::{CellFx, ColorToken, HintState, GRID_CELLS, GRID_SIZE};

/// A single grid square
///
/// An unfilled cell never carries a color: the color lives inside the
/// `Option`, so `is_filled()` and `color()` cannot disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    color: Option<ColorToken>,
    fx: CellFx,
    hint: HintState,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        color: None,
        fx: CellFx::Idle,
        hint: HintState::None,
    };

    /// A freshly placed cell (carries the placement pop)
    pub const fn placed(color: ColorToken) -> Self {
        Self {
            color: Some(color),
            fx: CellFx::JustPlaced,
            hint: HintState::None,
        }
    }

    pub fn is_filled(&self) -> bool {
        self.color.is_some()
    }

    pub fn color(&self) -> Option<ColorToken> {
        self.color
    }

    pub fn fx(&self) -> CellFx {
        self.fx
    }

    pub fn hint(&self) -> HintState {
        self.hint
    }
}

/// One cell update applied by [`Board::commit`]
///
/// `Some(color)` fills the cell; `None` resets it to [`Cell::EMPTY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellWrite {
    pub row: u8,
    pub col: u8,
    pub color: Option<ColorToken>,
}

impl CellWrite {
    pub fn fill(row: u8, col: u8, color: ColorToken) -> Self {
        Self {
            row,
            col,
            color: Some(color),
        }
    }

    pub fn clear(row: u8, col: u8) -> Self {
        Self {
            row,
            col,
            color: None,
        }
    }
}

/// Rows and columns that are completely filled
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearedLines {
    pub rows: ArrayVec<u8, { GRID_SIZE as usize }>,
    pub cols: ArrayVec<u8, { GRID_SIZE as usize }>,
}

impl ClearedLines {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.cols.is_empty()
    }

    /// Rows plus columns; an intersection counts once for each line
    pub fn line_count(&self) -> u32 {
        (self.rows.len() + self.cols.len()) as u32
    }

    /// Every affected cell exactly once (rows first, then column cells not
    /// already covered by a row)
    pub fn cells(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        let row_cells = self
            .rows
            .iter()
            .flat_map(|&r| (0..GRID_SIZE).map(move |c| (r, c)));
        let col_cells = self.cols.iter().flat_map(move |&c| {
            (0..GRID_SIZE)
                .filter(move |r| !self.rows.contains(r))
                .map(move |r| (r, c))
        });
        row_cells.chain(col_cells)
    }

    /// Number of distinct affected cells
    pub fn cell_count(&self) -> usize {
        let rows = self.rows.len();
        let cols = self.cols.len();
        rows * GRID_SIZE as usize + cols * (GRID_SIZE as usize - rows)
    }
}

/// The game board - 10 rows x 10 columns using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * SIZE + col)
    cells: [Cell; GRID_CELLS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [Cell::EMPTY; GRID_CELLS],
        }
    }

    /// Parse a board from text rows, `#` (or any color letter) filled and `.` empty
    ///
    /// Letters pick a color by initial (`C`yan, `B`lue, `O`range, `Y`ellow,
    /// `G`reen, `P`urple, `R`ed); `#` is cyan. Missing rows or columns are
    /// empty. Intended for tests and tooling.
    ///
    /// ```
    /// use tui_blocks_core::Board;
    ///
    /// let board = Board::from_ascii(&["##..", ".R"]);
    /// assert!(board.is_filled(0, 1));
    /// assert!(board.is_filled(1, 1));
    /// assert!(!board.is_filled(1, 0));
    /// assert_eq!(board.filled_count(), 3);
    /// ```
    pub fn from_ascii(rows: &[&str]) -> Self {
        use crate::types::ColorKey;

        let mut board = Self::new();
        for (r, line) in rows.iter().take(GRID_SIZE as usize).enumerate() {
            for (c, ch) in line.chars().take(GRID_SIZE as usize).enumerate() {
                let color = match ch {
                    '#' | 'C' => ColorKey::Cyan,
                    'B' => ColorKey::Blue,
                    'O' => ColorKey::Orange,
                    'Y' => ColorKey::Yellow,
                    'G' => ColorKey::Green,
                    'P' => ColorKey::Purple,
                    'R' => ColorKey::Red,
                    _ => continue,
                };
                board.cells[r * GRID_SIZE as usize + c] = Cell {
                    color: Some(color),
                    ..Cell::EMPTY
                };
            }
        }
        board
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if row < 0 || row >= GRID_SIZE as i8 || col < 0 || col >= GRID_SIZE as i8 {
            return None;
        }
        Some((row as usize) * (GRID_SIZE as usize) + (col as usize))
    }

    /// Get cell at position (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Check if position is within bounds and filled
    pub fn is_filled(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(cell) if cell.is_filled())
    }

    /// Check if position is within bounds and empty
    pub fn is_vacant(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(cell) if !cell.is_filled())
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(row: i8, col: i8) -> bool {
        Self::index(row, col).is_none()
    }

    /// Check whether `shape` fits with its top-left corner at `(row, col)`
    ///
    /// Every occupied offset must land inside the grid on an empty cell.
    /// Hint markings and animation flags are ignored.
    pub fn can_place(&self, shape: &Shape, row: i8, col: i8) -> bool {
        shape.cells().all(|(r, c)| {
            let (Some(pr), Some(pc)) = (row.checked_add(r as i8), col.checked_add(c as i8)) else {
                return false;
            };
            self.is_vacant(pr, pc)
        })
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: u8) -> bool {
        if row >= GRID_SIZE {
            return false;
        }
        let start = row as usize * GRID_SIZE as usize;
        let end = start + GRID_SIZE as usize;
        self.cells[start..end].iter().all(Cell::is_filled)
    }

    /// Check if a column is completely filled
    pub fn is_col_full(&self, col: u8) -> bool {
        if col >= GRID_SIZE {
            return false;
        }
        self.cells
            .iter()
            .skip(col as usize)
            .step_by(GRID_SIZE as usize)
            .all(Cell::is_filled)
    }

    /// Collect every completely filled row and column, ascending
    pub fn completed_lines(&self) -> ClearedLines {
        let mut lines = ClearedLines::default();
        for i in 0..GRID_SIZE {
            if self.is_row_full(i) {
                lines.rows.push(i);
            }
            if self.is_col_full(i) {
                lines.cols.push(i);
            }
        }
        lines
    }

    /// Apply a batch of cell writes
    ///
    /// Returns the number of writes applied; out-of-bounds writes are skipped.
    pub fn commit<I>(&mut self, writes: I) -> usize
    where
        I: IntoIterator<Item = CellWrite>,
    {
        let mut applied = 0;
        for write in writes {
            let Some(idx) = Self::index(write.row as i8, write.col as i8) else {
                continue;
            };
            self.cells[idx] = match write.color {
                Some(color) => Cell::placed(color),
                None => Cell::EMPTY,
            };
            applied += 1;
        }
        applied
    }

    /// Set the animation flag of one cell
    pub(crate) fn set_fx(&mut self, row: u8, col: u8, fx: CellFx) {
        if let Some(idx) = Self::index(row as i8, col as i8) {
            self.cells[idx].fx = fx;
        }
    }

    /// Reset every cell whose animation matches `fx` back to idle
    pub(crate) fn clear_fx(&mut self, fx: CellFx) {
        for cell in &mut self.cells {
            if cell.fx == fx {
                cell.fx = CellFx::Idle;
            }
        }
    }

    /// Set the hint marking of one cell (ignored out of bounds)
    pub(crate) fn set_hint(&mut self, row: i8, col: i8, hint: HintState) {
        if let Some(idx) = Self::index(row, col) {
            self.cells[idx].hint = hint;
        }
    }

    /// Remove every hint marking equal to `hint`
    pub(crate) fn clear_hints_of(&mut self, hint: HintState) {
        for cell in &mut self.cells {
            if cell.hint == hint {
                cell.hint = HintState::None;
            }
        }
    }

    /// Remove every hint marking
    pub(crate) fn clear_hints(&mut self) {
        for cell in &mut self.cells {
            cell.hint = HintState::None;
        }
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_filled()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(GRID_SIZE as usize)
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [Cell::EMPTY; GRID_CELLS];
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

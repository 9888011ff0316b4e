//! Placement validation and the move-availability oracle

use crate::board::Board;
use crate::pieces::Piece;
use crate::types::GRID_SIZE;

/// Check if `piece` fits with its top-left corner at `(row, col)`
///
/// Out-of-range anchors are simply rejected. Does not mutate anything.
pub fn can_place(piece: &Piece, row: i8, col: i8, board: &Board) -> bool {
    board.can_place(piece.shape(), row, col)
}

/// Every anchor where `piece` fits, row-major
pub fn anchors<'a>(piece: &'a Piece, board: &'a Board) -> impl Iterator<Item = (i8, i8)> + 'a {
    let max_row = (GRID_SIZE - piece.height()) as i8;
    let max_col = (GRID_SIZE - piece.width()) as i8;
    (0..=max_row)
        .flat_map(move |r| (0..=max_col).map(move |c| (r, c)))
        .filter(move |&(r, c)| can_place(piece, r, c, board))
}

/// Whether any piece of `pieces` fits anywhere on `board`
///
/// An empty slice has no moves.
///
/// ```
/// use tui_blocks_core::{has_any_move, Board, Piece, SIMPLE_BLOCKS};
///
/// let dot = Piece::new(1, &SIMPLE_BLOCKS[0]);
/// assert!(has_any_move(&[dot], &Board::new()));
/// assert!(!has_any_move(&[], &Board::new()));
/// ```
pub fn has_any_move(pieces: &[Piece], board: &Board) -> bool {
    pieces
        .iter()
        .any(|piece| anchors(piece, board).next().is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::{COMPLEX_BLOCKS, MEDIUM_BLOCKS, SIMPLE_BLOCKS};

    fn full_board() -> Board {
        Board::from_ascii(&["##########"; 10])
    }

    #[test]
    fn test_anchor_range_respects_size() {
        let bar = Piece::new(1, &COMPLEX_BLOCKS[1]); // 1x5
        let anchors: Vec<_> = anchors(&bar, &Board::new()).collect();
        assert_eq!(anchors.len(), 10 * 6);
        assert!(anchors.iter().all(|&(_, c)| c <= 5));
    }

    #[test]
    fn test_no_move_on_full_board() {
        let pieces = [
            Piece::new(1, &SIMPLE_BLOCKS[0]),
            Piece::new(2, &MEDIUM_BLOCKS[0]),
            Piece::new(3, &COMPLEX_BLOCKS[4]),
        ];
        assert!(!has_any_move(&pieces, &full_board()));
    }

    #[test]
    fn test_single_hole_fits_dot_only() {
        let mut rows = ["##########"; 10];
        rows[4] = "####.#####";
        let board = Board::from_ascii(&rows);
        let dot = Piece::new(1, &SIMPLE_BLOCKS[0]);
        let square = Piece::new(2, &SIMPLE_BLOCKS[3]);
        assert!(!has_any_move(&[square], &board));
        assert!(has_any_move(&[square, dot], &board));
        assert_eq!(anchors(&dot, &board).collect::<Vec<_>>(), vec![(4, 4)]);
    }

    #[test]
    fn test_can_place_rejects_far_anchor() {
        let dot = Piece::new(1, &SIMPLE_BLOCKS[0]);
        assert!(!can_place(&dot, 10, 0, &Board::new()));
        assert!(!can_place(&dot, 0, -3, &Board::new()));
        assert!(can_place(&dot, 9, 9, &Board::new()));
    }
}

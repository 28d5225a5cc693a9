//! Win condition checking for free-style Gomoku
//!
//! Five or more stones of one color in a row on any axis wins; overlines
//! count.

use crate::board::{Board, Pos, Stone, DIRECTIONS};

/// Check if there's 5+ in a row anywhere for the given color
pub fn has_five_in_row(board: &Board, stone: Stone) -> bool {
    board
        .positions(stone)
        .any(|pos| board.check_win(pos, stone))
}

/// Whether playing `stone` at `pos` would complete five in a row.
///
/// The board is not modified: `pos` is counted as `stone` and only its
/// neighbours are read.
#[inline]
pub fn is_winning_move(board: &Board, pos: Pos, stone: Stone) -> bool {
    if stone == Stone::Empty || !board.is_valid_move(pos) {
        return false;
    }
    DIRECTIONS
        .iter()
        .any(|&(dx, dy)| board.count_consecutive(pos, dx, dy, stone) >= 5)
}

/// Find the positions of a 5-in-a-row if exists
///
/// Returns Some(Vec<Pos>) with at least 5 positions, ordered along the
/// line, if a winning line exists.
pub fn find_five_positions(board: &Board, stone: Stone) -> Option<Vec<Pos>> {
    for pos in board.positions(stone) {
        for &(dx, dy) in &DIRECTIONS {
            // Only start from the first stone of a run
            if let Some(prev) = pos.offset(dx, dy, -1) {
                if board.get(prev) == stone {
                    continue;
                }
            }

            let mut line = vec![pos];
            let mut k = 1;
            while let Some(next) = pos.offset(dx, dy, k) {
                if board.get(next) != stone {
                    break;
                }
                line.push(next);
                k += 1;
            }

            if line.len() >= 5 {
                return Some(line);
            }
        }
    }
    None
}

/// Check for a winner
///
/// Returns `Some(Stone)` if either color has five in a row, `None` otherwise.
pub fn check_winner(board: &Board) -> Option<Stone> {
    [Stone::Black, Stone::White]
        .into_iter()
        .find(|&stone| has_five_in_row(board, stone))
}

//! Static evaluation of board positions
//!
//! The positional score of a color is the sum of the line patterns around
//! each of its stones. A position is then judged as our score minus a
//! weighted opponent score; a weight above 1.0 makes the engine prefer
//! blocking to extending.

use crate::board::{Board, Stone};

use super::patterns::analyze_position;

/// Default weight applied to the opponent's pattern score.
pub const DEFAULT_DEFENSE_WEIGHT: f64 = 1.1;

/// Sum of `analyze_position` over every stone of `player`.
#[must_use]
pub fn evaluate_patterns(board: &Board, player: Stone) -> i32 {
    board
        .positions(player)
        .map(|pos| analyze_position(board, pos, player))
        .sum()
}

/// Evaluate the board from the perspective of `color`.
///
/// Returns `own - defense_weight * opponent`, truncated toward zero.
/// Positive values favour `color`.
#[must_use]
pub fn evaluate(board: &Board, color: Stone, defense_weight: f64) -> i32 {
    let own = evaluate_patterns(board, color);
    let opp = evaluate_patterns(board, color.opponent());
    (f64::from(own) - defense_weight * f64::from(opp)) as i32
}

//! Candidate generation and move ordering
//!
//! Only cells near existing stones are worth searching. Candidates are
//! then ranked by what they make for us and what they deny the opponent,
//! so that alpha-beta meets the strongest replies first.

use crate::board::{Board, Pos, Stone, TOTAL_CELLS};
use crate::config::{EngineConfig, OrderingWeights};
use crate::eval::{has_four, has_open_four, has_open_three, has_three};
use crate::rules::is_winning_move;

/// Empty cells within Chebyshev distance `radius` of any stone, row-major.
///
/// On an empty board the only candidate is the center.
pub fn relevant_moves(board: &Board, radius: u8) -> Vec<Pos> {
    if board.is_empty_board() {
        return vec![Pos::CENTER];
    }

    let radius = i32::from(radius);
    let mut near = [false; TOTAL_CELLS];
    for pos in board
        .positions(Stone::Black)
        .chain(board.positions(Stone::White))
    {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if let Some(cell) = pos.offset(dx, dy, 1) {
                    near[cell.to_index()] = true;
                }
            }
        }
    }

    (0..TOTAL_CELLS)
        .filter(|&idx| near[idx])
        .map(Pos::from_index)
        .filter(|&pos| board.is_valid_move(pos))
        .collect()
}

/// Ordering score of playing `color` at the empty cell `pos`.
pub fn score_move(board: &Board, pos: Pos, color: Stone, weights: &OrderingWeights) -> i32 {
    let opponent = color.opponent();
    let mut score = 0;

    if is_winning_move(board, pos, color) {
        score += weights.win;
    }
    if is_winning_move(board, pos, opponent) {
        score += weights.block_win;
    }

    if has_open_four(board, pos, color) {
        score += weights.open_four;
    }
    if has_four(board, pos, color) {
        score += weights.four;
    }
    if has_open_three(board, pos, color) {
        score += weights.open_three;
    }
    if has_three(board, pos, color) {
        score += weights.three;
    }

    if has_open_four(board, pos, opponent) {
        score += weights.block_open_four;
    }
    if has_open_three(board, pos, opponent) {
        score += weights.block_open_three;
    }

    score + (weights.center_reach - pos.center_distance()) * weights.center_weight
}

/// Relevant moves for `color`, best first, at most `max_candidates`.
///
/// The sort is stable, so equal scores keep row-major order.
pub fn ordered_moves(board: &Board, color: Stone, config: &EngineConfig) -> Vec<Pos> {
    let mut scored: Vec<(Pos, i32)> = relevant_moves(board, config.candidate_radius)
        .into_iter()
        .map(|pos| (pos, score_move(board, pos, color, &config.ordering)))
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.truncate(config.max_candidates);
    scored.into_iter().map(|(pos, _)| pos).collect()
}

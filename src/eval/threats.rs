//! Threat detection: forks and forcing moves

use crate::board::{Board, Pos, Stone, DIRECTIONS};
use crate::rules::is_winning_move;

use super::patterns::{has_open_four, has_open_three};

/// Whether playing `player` at `pos` makes a run of three or more on two
/// or more axes at once (a fork that one reply cannot stop).
pub fn is_double_threat(board: &Board, pos: Pos, player: Stone) -> bool {
    let mut probe = board.clone();
    if !probe.place_stone(pos, player) {
        return false;
    }

    let lines = DIRECTIONS
        .iter()
        .filter(|&&(dx, dy)| probe.count_consecutive(pos, dx, dy, player) >= 3)
        .count();
    lines >= 2
}

/// Every empty cell, row-major, where `player` would win immediately or
/// make an open four or open three.
pub fn find_threats(board: &Board, player: Stone) -> Vec<Pos> {
    board
        .available_moves()
        .into_iter()
        .filter(|&pos| {
            is_winning_move(board, pos, player)
                || has_open_four(board, pos, player)
                || has_open_three(board, pos, player)
        })
        .collect()
}

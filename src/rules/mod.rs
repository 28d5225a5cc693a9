//! Game rules for free-style Gomoku
//!
//! Five or more in a row wins. There are no captures and no forbidden
//! moves, so every empty cell is a legal move.

pub mod win;

// Re-exports for convenient access
pub use win::{check_winner, find_five_positions, has_five_in_row, is_winning_move};

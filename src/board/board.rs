//! Board structure with move bookkeeping

use std::fmt;

use super::bitboard::Bitboard;
use super::{Pos, Stone, BOARD_SIZE, DIRECTIONS, TOTAL_CELLS};

/// Game board.
///
/// The move counter always equals the number of occupied cells; every
/// mutating method keeps that invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Black stones bitboard
    pub(crate) black: Bitboard,
    /// White stones bitboard
    pub(crate) white: Bitboard,
    move_count: u32,
}

impl Board {
    pub fn new() -> Self {
        Self {
            black: Bitboard::new(),
            white: Bitboard::new(),
            move_count: 0,
        }
    }

    /// Remove every stone
    pub fn clear(&mut self) {
        self.black.reset();
        self.white.reset();
        self.move_count = 0;
    }

    /// Get stone at position (`Empty` when off the board)
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        if !pos.in_bounds() {
            Stone::Empty
        } else if self.black.get(pos) {
            Stone::Black
        } else if self.white.get(pos) {
            Stone::White
        } else {
            Stone::Empty
        }
    }

    /// Check if position is in bounds and empty
    #[inline]
    pub fn is_valid_move(&self, pos: Pos) -> bool {
        pos.in_bounds() && !self.black.get(pos) && !self.white.get(pos)
    }

    /// Place a stone.
    ///
    /// Fails without touching the board when `pos` is off the board or
    /// already occupied. Placing `Stone::Empty` clears the cell instead,
    /// which is how speculative moves are taken back.
    pub fn place_stone(&mut self, pos: Pos, stone: Stone) -> bool {
        match stone {
            Stone::Empty => {
                if !pos.in_bounds() {
                    return false;
                }
                self.remove_stone(pos);
                true
            }
            Stone::Black | Stone::White => {
                if !self.is_valid_move(pos) {
                    return false;
                }
                if stone == Stone::Black {
                    self.black.set(pos);
                } else {
                    self.white.set(pos);
                }
                self.move_count += 1;
                true
            }
        }
    }

    /// Remove a stone. Returns false if there was nothing to remove.
    pub fn remove_stone(&mut self, pos: Pos) -> bool {
        if self.get(pos) == Stone::Empty {
            return false;
        }
        self.black.clear(pos);
        self.white.clear(pos);
        self.move_count -= 1;
        true
    }

    /// Get bitboard for a color (returns None for Empty)
    #[inline]
    pub fn stones(&self, stone: Stone) -> Option<&Bitboard> {
        match stone {
            Stone::Black => Some(&self.black),
            Stone::White => Some(&self.white),
            Stone::Empty => None,
        }
    }

    /// Iterate over the stones of one color in row-major order
    pub fn positions(&self, stone: Stone) -> impl Iterator<Item = Pos> + '_ {
        self.stones(stone).into_iter().flat_map(Bitboard::iter_ones)
    }

    /// Number of stones on the board
    #[inline]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    #[inline]
    pub fn is_empty_board(&self) -> bool {
        self.move_count == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.move_count as usize >= TOTAL_CELLS
    }

    /// Length of the run of `stone` through `pos` along `(dx, dy)`,
    /// extended both ways. `pos` itself always counts.
    pub fn count_consecutive(&self, pos: Pos, dx: i32, dy: i32, stone: Stone) -> u32 {
        let mut count = 1;
        for sign in [1, -1] {
            let mut k = 1;
            while let Some(next) = pos.offset(dx * sign, dy * sign, k) {
                if self.get(next) != stone {
                    break;
                }
                count += 1;
                k += 1;
            }
        }
        count
    }

    /// Five or more of `stone` in a row through `pos` on any axis.
    ///
    /// Only the four lines through `pos` are inspected.
    pub fn check_win(&self, pos: Pos, stone: Stone) -> bool {
        if stone == Stone::Empty || !pos.in_bounds() {
            return false;
        }
        DIRECTIONS
            .iter()
            .any(|&(dx, dy)| self.count_consecutive(pos, dx, dy, stone) >= 5)
    }

    /// All empty cells, row-major
    pub fn available_moves(&self) -> Vec<Pos> {
        (0..TOTAL_CELLS)
            .map(Pos::from_index)
            .filter(|&pos| self.is_valid_move(pos))
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..BOARD_SIZE as u8 {
            let row: Vec<String> = (0..BOARD_SIZE as u8)
                .map(|x| self.get(Pos::new(x, y)).symbol().to_string())
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}

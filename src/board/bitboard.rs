//! Bitboard implementation for fast stone iteration

use super::{Pos, TOTAL_CELLS};

const WORDS: usize = TOTAL_CELLS.div_ceil(64);

/// One bit per cell.
/// Uses 7 x u64 to represent 400 cells (7 * 64 = 448 >= 400)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bitboard {
    bits: [u64; WORDS],
}

impl Bitboard {
    /// Create empty bitboard
    pub const fn new() -> Self {
        Self { bits: [0; WORDS] }
    }

    /// Set a bit at position
    #[inline]
    pub fn set(&mut self, pos: Pos) {
        let idx = pos.to_index();
        self.bits[idx / 64] |= 1u64 << (idx % 64);
    }

    /// Clear a bit at position
    #[inline]
    pub fn clear(&mut self, pos: Pos) {
        let idx = pos.to_index();
        self.bits[idx / 64] &= !(1u64 << (idx % 64));
    }

    /// Check if bit is set at position
    #[inline]
    pub fn get(&self, pos: Pos) -> bool {
        let idx = pos.to_index();
        (self.bits[idx / 64] >> (idx % 64)) & 1 == 1
    }

    /// Reset every bit
    #[inline]
    pub fn reset(&mut self) {
        self.bits = [0; WORDS];
    }

    /// Iterate over set bit positions in row-major order
    pub fn iter_ones(&self) -> BitboardIter {
        BitboardIter {
            bits: self.bits,
            word_idx: 0,
            current_word: self.bits[0],
        }
    }
}

/// Iterator over set bits in a Bitboard
pub struct BitboardIter {
    bits: [u64; WORDS],
    word_idx: usize,
    current_word: u64,
}

impl Iterator for BitboardIter {
    type Item = Pos;

    fn next(&mut self) -> Option<Self::Item> {
        while self.current_word == 0 {
            self.word_idx += 1;
            if self.word_idx >= WORDS {
                return None;
            }
            self.current_word = self.bits[self.word_idx];
        }

        let bit_pos = self.current_word.trailing_zeros() as usize;
        let idx = self.word_idx * 64 + bit_pos;

        // Clear the bit we just found
        self.current_word &= self.current_word - 1;

        // Padding bits past the last cell are never set, but stay safe
        if idx < TOTAL_CELLS {
            Some(Pos::from_index(idx))
        } else {
            None
        }
    }
}

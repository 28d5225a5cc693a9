//! Board representation for Gomoku

pub mod bitboard;
pub mod board;


// Re-exports
pub use bitboard::Bitboard;
pub use board::Board;

/// Board size (20x20)
pub const BOARD_SIZE: usize = 20;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE; // 400

/// The four line axes: horizontal, vertical and both diagonals.
/// Each axis is scanned both ways, so one vector per axis is enough.
pub const DIRECTIONS: [(i32, i32); 4] = [
    (1, 0),  // Horizontal
    (0, 1),  // Vertical
    (1, 1),  // Diagonal SE
    (1, -1), // Diagonal NE
];

/// Stone colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stone {
    Empty,
    Black,
    White,
}

impl Stone {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
            Stone::Empty => Stone::Empty,
        }
    }

    /// Character used when rendering the board
    #[inline]
    pub fn symbol(self) -> char {
        match self {
            Stone::Black => 'X',
            Stone::White => 'O',
            Stone::Empty => '.',
        }
    }
}

/// Position on the board.
///
/// `x` is the column and `y` the row, matching the wire protocol's `x,y`.
/// Fields are public so out-of-range coordinates can be expressed; the
/// board rejects them instead of panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: u8,
    pub y: u8,
}

impl Pos {
    /// Center of the board, the opening move and the last-resort fallback.
    pub const CENTER: Pos = Pos {
        x: (BOARD_SIZE / 2) as u8,
        y: (BOARD_SIZE / 2) as u8,
    };

    #[inline]
    pub fn new(x: u8, y: u8) -> Self {
        debug_assert!(x < BOARD_SIZE as u8 && y < BOARD_SIZE as u8);
        Self { x, y }
    }

    /// Build a position from signed coordinates, `None` when off the board.
    #[inline]
    pub fn try_new(x: i32, y: i32) -> Option<Self> {
        if Self::is_valid(x, y) {
            Some(Self {
                x: x as u8,
                y: y as u8,
            })
        } else {
            None
        }
    }

    #[inline]
    pub fn to_index(self) -> usize {
        self.y as usize * BOARD_SIZE + self.x as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        Self {
            x: (idx % BOARD_SIZE) as u8,
            y: (idx / BOARD_SIZE) as u8,
        }
    }

    #[inline]
    pub fn is_valid(x: i32, y: i32) -> bool {
        x >= 0 && x < BOARD_SIZE as i32 && y >= 0 && y < BOARD_SIZE as i32
    }

    #[inline]
    pub fn in_bounds(self) -> bool {
        (self.x as usize) < BOARD_SIZE && (self.y as usize) < BOARD_SIZE
    }

    /// Step `k` cells along `(dx, dy)`, `None` when that leaves the board.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32, k: i32) -> Option<Pos> {
        Pos::try_new(i32::from(self.x) + dx * k, i32::from(self.y) + dy * k)
    }

    /// Manhattan distance to the board center.
    #[inline]
    pub fn center_distance(self) -> i32 {
        (i32::from(self.x) - i32::from(Pos::CENTER.x)).abs()
            + (i32::from(self.y) - i32::from(Pos::CENTER.y)).abs()
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

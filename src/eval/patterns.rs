//! Line pattern classification
//!
//! A pattern is the run of same-colored stones through one cell along one
//! axis, together with whether each end of the run is open. "Open" means
//! the single cell right past the run is on the board and empty; nothing
//! further along the line is considered.

use crate::board::{Board, Pos, Stone, DIRECTIONS};

/// Line shapes, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PatternType {
    /// Five or more in a row, open or not
    Five,
    /// _OOOO_
    OpenFour,
    /// XOOOO_ or _OOOOX
    Four,
    /// _OOO_
    OpenThree,
    /// XOOO_ or _OOOX
    Three,
    /// _OO_
    OpenTwo,
    /// XOO_ or _OOX
    Two,
    /// Single stone with at least one open side
    One,
}

impl PatternType {
    pub const ALL: [PatternType; 8] = [
        PatternType::Five,
        PatternType::OpenFour,
        PatternType::Four,
        PatternType::OpenThree,
        PatternType::Three,
        PatternType::OpenTwo,
        PatternType::Two,
        PatternType::One,
    ];

    /// Fixed score of the shape
    #[inline]
    pub const fn score(self) -> i32 {
        match self {
            PatternType::Five => 100_000,
            PatternType::OpenFour => 10_000,
            PatternType::Four => 5_000,
            PatternType::OpenThree => 1_000,
            PatternType::Three => 500,
            PatternType::OpenTwo => 100,
            PatternType::Two => 50,
            PatternType::One => 10,
        }
    }

    /// Classify a run by its length and open ends.
    ///
    /// Runs of five or more are `Five` regardless of openness; shorter runs
    /// blocked on both sides are worth nothing and yield `None`.
    pub fn classify(count: u32, open_ends: u8) -> Option<PatternType> {
        if count >= 5 {
            return Some(PatternType::Five);
        }
        match (count, open_ends) {
            (_, 0) => None,
            (4, 2) => Some(PatternType::OpenFour),
            (4, _) => Some(PatternType::Four),
            (3, 2) => Some(PatternType::OpenThree),
            (3, _) => Some(PatternType::Three),
            (2, 2) => Some(PatternType::OpenTwo),
            (2, _) => Some(PatternType::Two),
            (1, _) => Some(PatternType::One),
            _ => None,
        }
    }
}

/// Extent of one run through a cell along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineScan {
    /// Run length, including the origin cell
    pub count: u32,
    /// Cell right after the run in the `(dx, dy)` direction is empty
    pub open_forward: bool,
    /// Cell right after the run in the `(-dx, -dy)` direction is empty
    pub open_backward: bool,
}

impl LineScan {
    #[inline]
    pub fn open_ends(&self) -> u8 {
        u8::from(self.open_forward) + u8::from(self.open_backward)
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.open_forward && self.open_backward
    }
}

/// Walk both ways from `pos` along `(dx, dy)`.
///
/// `pos` is counted as `player`'s stone whether or not it is occupied yet,
/// so the same scan answers "what does this stone make" and "what would
/// playing here make".
pub fn scan_line(board: &Board, pos: Pos, dx: i32, dy: i32, player: Stone) -> LineScan {
    let mut count = 1;
    let mut open = [false; 2];

    for (side, sign) in [1, -1].into_iter().enumerate() {
        let mut k = 1;
        loop {
            match pos.offset(dx * sign, dy * sign, k) {
                Some(next) if board.get(next) == player => {
                    count += 1;
                    k += 1;
                }
                Some(next) => {
                    open[side] = board.get(next) == Stone::Empty;
                    break;
                }
                None => break,
            }
        }
    }

    LineScan {
        count,
        open_forward: open[0],
        open_backward: open[1],
    }
}

/// Pattern formed through `pos` along one axis, if it scores at all.
#[inline]
pub fn classify_direction(
    board: &Board,
    pos: Pos,
    dx: i32,
    dy: i32,
    player: Stone,
) -> Option<PatternType> {
    let scan = scan_line(board, pos, dx, dy, player);
    PatternType::classify(scan.count, scan.open_ends())
}

/// Score of the pattern through `pos` along one axis.
#[inline]
pub fn analyze_direction(board: &Board, pos: Pos, dx: i32, dy: i32, player: Stone) -> i32 {
    classify_direction(board, pos, dx, dy, player).map_or(0, PatternType::score)
}

/// Sum of the four axis scores through `pos`.
///
/// A stone taking part in several lines scores once per line.
pub fn analyze_position(board: &Board, pos: Pos, player: Stone) -> i32 {
    DIRECTIONS
        .iter()
        .map(|&(dx, dy)| analyze_direction(board, pos, dx, dy, player))
        .sum()
}

fn any_line(board: &Board, pos: Pos, player: Stone, test: impl Fn(&LineScan) -> bool) -> bool {
    DIRECTIONS
        .iter()
        .any(|&(dx, dy)| test(&scan_line(board, pos, dx, dy, player)))
}

/// Exactly four in a row through `pos` with both ends open.
pub fn has_open_four(board: &Board, pos: Pos, player: Stone) -> bool {
    any_line(board, pos, player, |scan| scan.count == 4 && scan.is_open())
}

/// Exactly three in a row through `pos` with both ends open.
pub fn has_open_three(board: &Board, pos: Pos, player: Stone) -> bool {
    any_line(board, pos, player, |scan| scan.count == 3 && scan.is_open())
}

/// Four or more in a row through `pos`, open or not.
pub fn has_four(board: &Board, pos: Pos, player: Stone) -> bool {
    any_line(board, pos, player, |scan| scan.count >= 4)
}

/// Three or more in a row through `pos`, open or not.
pub fn has_three(board: &Board, pos: Pos, player: Stone) -> bool {
    any_line(board, pos, player, |scan| scan.count >= 3)
}

/// Any stone among the eight neighbours of `pos`.
pub fn has_neighbor(board: &Board, pos: Pos) -> bool {
    (-1..=1)
        .flat_map(|dy| (-1..=1).map(move |dx| (dx, dy)))
        .filter(|&d| d != (0, 0))
        .filter_map(|(dx, dy)| pos.offset(dx, dy, 1))
        .any(|n| board.get(n) != Stone::Empty)
}

//! Main AI engine integrating the search components
//!
//! The engine picks a move for the side to play, in this order:
//!
//! 1. **Immediate win**: any candidate that completes five
//! 2. **Block**: the cell where the opponent would complete five
//! 3. **Iterative deepening**: alpha-beta at increasing depths until the
//!    time budget runs out
//!
//! The first two steps do not depend on how deep the search gets, so a
//! one-move win or loss is never missed.
//!
//! # Example
//!
//! ```
//! use gomoku::{Board, EngineConfig, Pos, SearchEngine, Stone};
//!
//! let mut engine = SearchEngine::new(EngineConfig { max_depth: 2, ..EngineConfig::default() });
//! let mut board = Board::new();
//! board.place_stone(Pos::new(10, 10), Stone::Black);
//!
//! let reply = engine.find_best_move(&board, Stone::White);
//! assert!(board.is_valid_move(reply));
//! ```

use std::time::Duration;

use tracing::info;

use crate::board::{Board, Pos, Stone};
use crate::config::EngineConfig;
use crate::rules::is_winning_move;
use crate::search::{relevant_moves, Clock, Deadline, MonotonicClock, Searcher, WIN_SCORE};

/// Which step of the decision produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// The move completes five
    ImmediateWin,
    /// The move takes the opponent's winning cell
    Block,
    /// Only one candidate existed, no search needed
    SingleCandidate,
    /// No candidate at all; the fixed fallback cell
    Fallback,
    /// Result of iterative deepening
    AlphaBeta,
}

/// Result of a move search with statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    pub best_move: Pos,
    /// Score of the move from the mover's point of view
    pub score: i32,
    pub search_type: SearchType,
    /// Deepest completed iteration (0 when no search ran or none finished)
    pub depth: u8,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
}

/// Main AI engine.
///
/// Keeps only its configuration between calls; statistics are reset at
/// the start of every search.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    searcher: Searcher,
}

impl SearchEngine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            searcher: Searcher::new(config),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        self.searcher.config()
    }

    /// Best move for `color`, timed with the wall clock.
    ///
    /// The board is not modified.
    #[must_use]
    pub fn find_best_move(&mut self, board: &Board, color: Stone) -> Pos {
        let clock = MonotonicClock::start();
        self.find_best_move_with_clock(board, color, &clock).best_move
    }

    /// Best move for `color` with full statistics, timed by `clock`.
    pub fn find_best_move_with_clock(
        &mut self,
        board: &Board,
        color: Stone,
        clock: &dyn Clock,
    ) -> MoveResult {
        self.searcher.reset_stats();
        let deadline = Deadline::new(clock, self.time_limit());

        let result = self.decide(board, color, &deadline);
        info!(
            color = ?color,
            best = %result.best_move,
            kind = ?result.search_type,
            score = result.score,
            depth = result.depth,
            nodes = result.nodes,
            time_ms = result.time_ms,
            "move chosen"
        );
        result
    }

    fn decide(&mut self, board: &Board, color: Stone, deadline: &Deadline<'_>) -> MoveResult {
        if let Some(win) = self.find_immediate_win(board, color) {
            return MoveResult {
                best_move: win,
                score: WIN_SCORE,
                search_type: SearchType::ImmediateWin,
                depth: 0,
                time_ms: elapsed_ms(deadline),
                nodes: 0,
            };
        }

        if let Some(threat) = self.find_immediate_win(board, color.opponent()) {
            return MoveResult {
                best_move: threat,
                score: 0,
                search_type: SearchType::Block,
                depth: 0,
                time_ms: elapsed_ms(deadline),
                nodes: 0,
            };
        }

        let result = self.searcher.iterative_deepening(board, color, deadline);
        let search_type = match result.candidates {
            0 => SearchType::Fallback,
            1 => SearchType::SingleCandidate,
            _ => SearchType::AlphaBeta,
        };

        MoveResult {
            best_move: result.best_move.unwrap_or(Pos::CENTER),
            score: result.score,
            search_type,
            depth: result.depth,
            time_ms: elapsed_ms(deadline),
            nodes: result.nodes,
        }
    }

    /// First relevant candidate (row-major) that completes five for `color`.
    pub fn find_immediate_win(&self, board: &Board, color: Stone) -> Option<Pos> {
        relevant_moves(board, self.config().candidate_radius)
            .into_iter()
            .find(|&pos| is_winning_move(board, pos, color))
    }

    /// Nodes visited by the last search
    pub fn nodes(&self) -> u64 {
        self.searcher.nodes()
    }

    pub fn time_limit(&self) -> Duration {
        Duration::from_millis(self.config().time_limit_ms)
    }

    /// Set the per-move budget in milliseconds (at least 1).
    pub fn set_time_limit(&mut self, time_ms: u64) {
        self.searcher.config_mut().time_limit_ms = time_ms.max(1);
    }

    pub fn max_depth(&self) -> u8 {
        self.config().max_depth
    }

    /// Set the deepest iteration; never below the first one.
    pub fn set_max_depth(&mut self, depth: u8) {
        let config = self.searcher.config_mut();
        config.max_depth = depth.max(config.min_depth);
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[inline]
fn elapsed_ms(deadline: &Deadline<'_>) -> u64 {
    u64::try_from(deadline.elapsed().as_millis()).unwrap_or(u64::MAX)
}

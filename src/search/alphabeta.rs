//! Alpha-Beta search with iterative deepening
//!
//! This module implements the core search algorithm for the Gomoku AI.
//! It uses negamax with alpha-beta pruning over a single scratch board:
//! every candidate is placed, searched and taken back before its sibling
//! is tried.
//!
//! # Features
//!
//! - Iterative deepening; a depth only counts if it finished in time
//! - Cooperative deadline polled at every node and in every move loop
//! - Move generation with proximity filtering and heuristic ordering
//! - Plain minimax over the same tree, for checking the pruning
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use gomoku::board::{Board, Pos, Stone};
//! use gomoku::config::EngineConfig;
//! use gomoku::search::{Deadline, ManualClock, Searcher};
//!
//! let config = EngineConfig { max_depth: 2, ..EngineConfig::default() };
//! let mut searcher = Searcher::new(config);
//! let mut board = Board::new();
//! board.place_stone(Pos::new(10, 10), Stone::Black);
//!
//! let clock = ManualClock::new();
//! let deadline = Deadline::new(&clock, Duration::from_secs(1));
//! let result = searcher.iterative_deepening(&board, Stone::White, &deadline);
//! assert!(result.best_move.is_some());
//! ```

use tracing::{debug, trace};

use crate::board::{Board, Pos, Stone};
use crate::config::EngineConfig;
use crate::eval::{evaluate, PatternType};
use crate::rules::{has_five_in_row, is_winning_move};

use super::deadline::Deadline;
use super::movegen::ordered_moves;

/// Score of a decided game, from the winner's side
pub const WIN_SCORE: i32 = PatternType::Five.score();

/// Infinity score for alpha-beta bounds
pub const INF: i32 = 1_000_000_000;

/// Result of one iterative-deepening run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found; `None` only when there was no candidate at all
    pub best_move: Option<Pos>,
    /// Score of the best move at the last completed depth
    pub score: i32,
    /// Deepest completed iteration, 0 if none finished
    pub depth: u8,
    /// Number of candidates at the root
    pub candidates: usize,
    /// Total nodes searched
    pub nodes: u64,
}

/// Negamax alpha-beta searcher.
///
/// Holds nothing between calls apart from its configuration and the node
/// counter, which the caller resets per move.
#[derive(Debug, Clone)]
pub struct Searcher {
    config: EngineConfig,
    nodes: u64,
}

impl Searcher {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config, nodes: 0 }
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EngineConfig {
        &mut self.config
    }

    /// Nodes visited since the last reset
    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn reset_stats(&mut self) {
        self.nodes = 0;
    }

    /// Static evaluation from `maximizing`'s point of view.
    #[inline]
    pub fn evaluate(&self, board: &Board, maximizing: Stone) -> i32 {
        evaluate(board, maximizing, self.config.defense_weight)
    }

    /// Static evaluation as seen by the side to move.
    #[inline]
    fn leaf_score(&self, board: &Board, maximizing: Stone, mover: Stone) -> i32 {
        let score = self.evaluate(board, maximizing);
        if mover == maximizing {
            score
        } else {
            -score
        }
    }

    /// Terminal score for `mover` if either side already has five.
    #[inline]
    fn terminal_score(board: &Board, mover: Stone) -> Option<i32> {
        if has_five_in_row(board, mover) {
            Some(WIN_SCORE)
        } else if has_five_in_row(board, mover.opponent()) {
            Some(-WIN_SCORE)
        } else {
            None
        }
    }

    /// Iterative deepening from `min_depth` to `max_depth`.
    ///
    /// The caller's board is copied once; all lookahead happens on that
    /// copy. A depth interrupted by the deadline is thrown away and the
    /// previous depth's move stands. If no depth finished, the first
    /// ordered candidate is returned. Deepening stops early only when the
    /// committed move completes five.
    pub fn iterative_deepening(
        &mut self,
        board: &Board,
        color: Stone,
        deadline: &Deadline<'_>,
    ) -> SearchResult {
        let mut scratch = board.clone();
        let moves = ordered_moves(&scratch, color, &self.config);

        let mut result = SearchResult {
            best_move: moves.first().copied(),
            score: 0,
            depth: 0,
            candidates: moves.len(),
            nodes: 0,
        };

        if moves.len() <= 1 {
            result.nodes = self.nodes;
            return result;
        }

        for depth in self.config.min_depth..=self.config.max_depth {
            if deadline.expired() {
                break;
            }

            match self.search_root(&mut scratch, color, depth, &moves, deadline) {
                Some((mov, score)) => {
                    result.best_move = Some(mov);
                    result.score = score;
                    result.depth = depth;
                    debug!(depth, score, best = %mov, nodes = self.nodes, "depth completed");

                    // Static sums can exceed WIN_SCORE; only a root five is proof
                    if is_winning_move(&scratch, mov, color) {
                        break;
                    }
                }
                None => {
                    trace!(depth, nodes = self.nodes, "depth abandoned on timeout");
                    break;
                }
            }
        }

        debug_assert_eq!(&scratch, board, "lookahead leaked into the board");
        result.nodes = self.nodes;
        result
    }

    /// Search every root move to `depth`.
    ///
    /// Returns `None` when the deadline passed before the depth was done.
    pub fn search_root(
        &mut self,
        board: &mut Board,
        color: Stone,
        depth: u8,
        moves: &[Pos],
        deadline: &Deadline<'_>,
    ) -> Option<(Pos, i32)> {
        let mut best: Option<(Pos, i32)> = None;
        let mut alpha = -INF;
        let beta = INF;

        for &mov in moves {
            if deadline.expired() {
                return None;
            }

            board.place_stone(mov, color);
            let score = -self.alpha_beta(
                board,
                depth.saturating_sub(1),
                -beta,
                -alpha,
                color,
                color.opponent(),
                deadline,
            );
            board.remove_stone(mov);

            if best.map_or(true, |(_, s)| score > s) {
                best = Some((mov, score));
            }
            alpha = alpha.max(score);
        }

        // The last subtree may have been cut short
        if deadline.expired() {
            return None;
        }
        best
    }

    /// Negamax alpha-beta.
    ///
    /// Scores are from `mover`'s point of view. `maximizing` is the side
    /// the search is run for; the static evaluation is always taken from
    /// its perspective and then signed for the mover.
    #[allow(clippy::too_many_arguments)]
    pub fn alpha_beta(
        &mut self,
        board: &mut Board,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        maximizing: Stone,
        mover: Stone,
        deadline: &Deadline<'_>,
    ) -> i32 {
        self.nodes += 1;

        if deadline.expired() {
            return self.leaf_score(board, maximizing, mover);
        }

        if let Some(score) = Self::terminal_score(board, mover) {
            return score;
        }

        if depth == 0 {
            return self.leaf_score(board, maximizing, mover);
        }

        let moves = ordered_moves(board, mover, &self.config);
        if moves.is_empty() {
            return self.leaf_score(board, maximizing, mover);
        }

        let mut best_score = -INF;
        for mov in moves {
            if deadline.expired() {
                break;
            }

            board.place_stone(mov, mover);
            let score = -self.alpha_beta(
                board,
                depth - 1,
                -beta,
                -alpha,
                maximizing,
                mover.opponent(),
                deadline,
            );
            board.remove_stone(mov);

            best_score = best_score.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }

        if best_score == -INF {
            // Timed out before any child was searched
            return self.leaf_score(board, maximizing, mover);
        }
        best_score
    }

    /// Negamax without pruning or deadline, over the same ordered moves.
    pub fn minimax(&mut self, board: &mut Board, depth: u8, maximizing: Stone, mover: Stone) -> i32 {
        self.nodes += 1;

        if let Some(score) = Self::terminal_score(board, mover) {
            return score;
        }
        if depth == 0 {
            return self.leaf_score(board, maximizing, mover);
        }

        let moves = ordered_moves(board, mover, &self.config);
        if moves.is_empty() {
            return self.leaf_score(board, maximizing, mover);
        }

        let mut best_score = -INF;
        for mov in moves {
            board.place_stone(mov, mover);
            let score = -self.minimax(board, depth - 1, maximizing, mover.opponent());
            board.remove_stone(mov);
            best_score = best_score.max(score);
        }
        best_score
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::search::deadline::ManualClock;

    fn searcher(max_depth: u8, max_candidates: usize) -> Searcher {
        Searcher::new(EngineConfig {
            max_depth,
            max_candidates,
            ..EngineConfig::default()
        })
    }

    fn place(board: &mut Board, stones: &[(u8, u8)], stone: Stone) {
        for &(x, y) in stones {
            assert!(board.place_stone(Pos::new(x, y), stone));
        }
    }

    #[test]
    fn test_search_empty_board() {
        let mut s = searcher(3, 20);
        let board = Board::new();
        let clock = ManualClock::new();
        let deadline = Deadline::new(&clock, Duration::from_secs(1));

        let result = s.iterative_deepening(&board, Stone::Black, &deadline);
        assert_eq!(result.best_move, Some(Pos::CENTER));
        assert_eq!(result.candidates, 1);
        assert_eq!(result.depth, 0);
    }

    #[test]
    fn test_search_finds_winning_move() {
        let mut s = searcher(3, 10);
        let mut board = Board::new();
        place(&mut board, &[(5, 9), (6, 9), (7, 9), (8, 9)], Stone::Black);
        place(&mut board, &[(4, 9), (6, 10)], Stone::White);

        let clock = ManualClock::new();
        let deadline = Deadline::new(&clock, Duration::from_secs(1));
        let result = s.iterative_deepening(&board, Stone::Black, &deadline);
        assert_eq!(result.best_move, Some(Pos::new(9, 9)));
        assert!(result.score >= WIN_SCORE);
        // A proven win stops deepening
        assert_eq!(result.depth, 2);
    }

    #[test]
    fn test_search_blocks_four() {
        let mut s = searcher(3, 10);
        let mut board = Board::new();
        place(&mut board, &[(5, 5), (6, 5), (7, 5), (8, 5)], Stone::White);
        place(&mut board, &[(4, 5), (7, 7)], Stone::Black);

        let clock = ManualClock::new();
        let deadline = Deadline::new(&clock, Duration::from_secs(1));
        let result = s.iterative_deepening(&board, Stone::Black, &deadline);
        assert_eq!(result.best_move, Some(Pos::new(9, 5)));
        assert!(result.score > -WIN_SCORE);
    }

    #[test]
    fn test_board_untouched_after_search() {
        let mut s = searcher(3, 8);
        let mut board = Board::new();
        place(&mut board, &[(9, 9), (10, 10)], Stone::Black);
        place(&mut board, &[(9, 10), (10, 9)], Stone::White);
        let before = board.clone();

        let clock = ManualClock::new();
        let deadline = Deadline::new(&clock, Duration::from_secs(1));
        let _ = s.iterative_deepening(&board, Stone::Black, &deadline);
        assert_eq!(board, before);
    }

    #[test]
    fn test_expired_deadline_returns_first_candidate() {
        let mut s = searcher(5, 20);
        let mut board = Board::new();
        place(&mut board, &[(9, 9)], Stone::Black);
        place(&mut board, &[(10, 10)], Stone::White);

        let first = ordered_moves(&board, Stone::Black, s.config())[0];
        let clock = ManualClock::new();
        let deadline = Deadline::new(&clock, Duration::ZERO);
        let result = s.iterative_deepening(&board, Stone::Black, &deadline);
        assert_eq!(result.best_move, Some(first));
        assert_eq!(result.depth, 0);
        assert_eq!(result.nodes, 0);
    }

    #[test]
    fn test_abandoned_depth_keeps_previous_move() {
        let mut board = Board::new();
        place(&mut board, &[(9, 9), (11, 9)], Stone::Black);
        place(&mut board, &[(10, 10), (10, 8)], Stone::White);

        // Count the polls a full depth-2 run makes
        let mut shallow = Searcher::new(EngineConfig {
            min_depth: 2,
            max_depth: 2,
            max_candidates: 6,
            ..EngineConfig::default()
        });
        let clock = ManualClock::ticking(Duration::from_millis(1));
        let deadline = Deadline::new(&clock, Duration::from_secs(3600));
        let reference = shallow.iterative_deepening(&board, Stone::Black, &deadline);
        assert_eq!(reference.depth, 2);
        let polls = clock.now();

        // Same search allowed to start depth 3, but expiring just after
        let mut deep = Searcher::new(EngineConfig {
            min_depth: 2,
            max_depth: 3,
            max_candidates: 6,
            ..EngineConfig::default()
        });
        let clock = ManualClock::ticking(Duration::from_millis(1));
        let deadline = Deadline::new(&clock, polls + Duration::from_millis(3));
        let result = deep.iterative_deepening(&board, Stone::Black, &deadline);

        assert_eq!(result.depth, 2);
        assert_eq!(result.best_move, reference.best_move);
        assert_eq!(result.score, reference.score);
        assert!(result.nodes > reference.nodes);
    }

    #[test]
    fn test_alpha_beta_matches_minimax() {
        let positions: Vec<(Vec<(u8, u8)>, Vec<(u8, u8)>)> = vec![
            (vec![(10, 10)], vec![(11, 11)]),
            (vec![(9, 9), (10, 9), (11, 9)], vec![(9, 10), (10, 10)]),
            (vec![(3, 3), (4, 4), (5, 5)], vec![(6, 6), (2, 2), (4, 3)]),
            (vec![(0, 0), (1, 0), (2, 0), (3, 0)], vec![(0, 1), (1, 1), (2, 1)]),
        ];

        for (black, white) in positions {
            let mut board = Board::new();
            place(&mut board, &black, Stone::Black);
            place(&mut board, &white, Stone::White);

            for depth in 1..=3 {
                for color in [Stone::Black, Stone::White] {
                    let mut s = searcher(depth, 6);
                    let clock = ManualClock::new();
                    let deadline = Deadline::new(&clock, Duration::from_secs(1));

                    let pruned =
                        s.alpha_beta(&mut board.clone(), depth, -INF, INF, color, color, &deadline);
                    let pruned_nodes = s.nodes();
                    s.reset_stats();
                    let full = s.minimax(&mut board.clone(), depth, color, color);

                    assert_eq!(pruned, full, "depth {depth} {color:?} black={black:?}");
                    assert!(pruned_nodes <= s.nodes());
                }
            }
        }
    }

    #[test]
    fn test_terminal_scores() {
        let mut s = searcher(2, 6);
        let mut board = Board::new();
        place(&mut board, &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)], Stone::White);
        place(&mut board, &[(0, 5)], Stone::Black);

        let clock = ManualClock::new();
        let deadline = Deadline::new(&clock, Duration::from_secs(1));
        let for_black = s.alpha_beta(&mut board, 2, -INF, INF, Stone::Black, Stone::Black, &deadline);
        let for_white = s.alpha_beta(&mut board, 2, -INF, INF, Stone::White, Stone::White, &deadline);
        assert_eq!(for_black, -WIN_SCORE);
        assert_eq!(for_white, WIN_SCORE);
    }

    #[test]
    fn test_depth_zero_is_signed_static_eval() {
        let mut s = searcher(2, 6);
        let mut board = Board::new();
        place(&mut board, &[(10, 10), (11, 10)], Stone::Black);
        place(&mut board, &[(5, 5)], Stone::White);

        let clock = ManualClock::new();
        let deadline = Deadline::new(&clock, Duration::from_secs(1));
        let static_black = s.evaluate(&board, Stone::Black);
        assert_eq!(
            s.alpha_beta(&mut board, 0, -INF, INF, Stone::Black, Stone::Black, &deadline),
            static_black
        );
        assert_eq!(
            s.alpha_beta(&mut board, 0, -INF, INF, Stone::Black, Stone::White, &deadline),
            -static_black
        );
    }

    #[test]
    fn test_deeper_iteration_does_not_regress() {
        let mut board = Board::new();
        place(&mut board, &[(5, 5), (6, 5), (7, 5), (8, 5)], Stone::White);
        place(&mut board, &[(4, 5), (6, 7), (7, 8)], Stone::Black);

        let mut previous: Option<i32> = None;
        for depth in 2..=3 {
            let mut s = Searcher::new(EngineConfig {
                min_depth: depth,
                max_depth: depth,
                max_candidates: 8,
                ..EngineConfig::default()
            });
            let clock = ManualClock::new();
            let deadline = Deadline::new(&clock, Duration::from_secs(1));
            let result = s.iterative_deepening(&board, Stone::Black, &deadline);
            let mov = result.best_move.unwrap();

            let mut after = board.clone();
            after.place_stone(mov, Stone::Black);
            let static_score = s.evaluate(&after, Stone::Black);
            if let Some(prev) = previous {
                assert!(static_score >= prev, "depth {depth}: {static_score} < {prev}");
            }
            previous = Some(static_score);
        }
    }

    #[test]
    fn test_heuristic_score_does_not_stop_deepening() {
        // Forty separate open threes: a huge static score with no five
        let mut board = Board::new();
        for y in (0..20).step_by(2) {
            for start in [1u8, 6, 11, 16] {
                place(&mut board, &[(start, y), (start + 1, y), (start + 2, y)], Stone::Black);
            }
        }
        place(&mut board, &[(0, 1), (19, 1), (0, 19), (10, 17)], Stone::White);

        let mut s = Searcher::new(EngineConfig {
            min_depth: 2,
            max_depth: 3,
            max_candidates: 4,
            ..EngineConfig::default()
        });
        assert!(s.evaluate(&board, Stone::Black) >= WIN_SCORE);
        assert_eq!(crate::rules::check_winner(&board), None);

        let clock = ManualClock::new();
        let deadline = Deadline::new(&clock, Duration::from_secs(1));
        let result = s.iterative_deepening(&board, Stone::Black, &deadline);
        let mov = result.best_move.unwrap();
        assert!(!is_winning_move(&board, mov, Stone::Black));
        assert_eq!(result.depth, 3);
    }

    #[test]
    fn test_node_count_resets() {
        let mut s = searcher(2, 6);
        let mut board = Board::new();
        place(&mut board, &[(9, 9)], Stone::Black);
        place(&mut board, &[(10, 10)], Stone::White);

        let clock = ManualClock::new();
        let deadline = Deadline::new(&clock, Duration::from_secs(1));
        let result = s.iterative_deepening(&board, Stone::Black, &deadline);
        assert!(result.nodes > 0);
        s.reset_stats();
        assert_eq!(s.nodes(), 0);
    }
}

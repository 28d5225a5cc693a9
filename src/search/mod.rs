//! Search module for Gomoku AI
//!
//! Contains:
//! - Deadline and clock abstraction for cooperative time control
//! - Candidate generation and heuristic move ordering
//! - Alpha-Beta search with iterative deepening

pub mod alphabeta;
pub mod deadline;
pub mod movegen;

pub use alphabeta::{SearchResult, Searcher, INF, WIN_SCORE};
pub use deadline::{Clock, Deadline, ManualClock, MonotonicClock};
pub use movegen::{ordered_moves, relevant_moves, score_move};

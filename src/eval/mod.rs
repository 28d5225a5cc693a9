//! Evaluation module for Gomoku positions
//!
//! Stateless pattern detection over a board:
//! - Line pattern classification (fives, fours, threes, twos, ones)
//! - Positional scoring of a whole color
//! - Fork and forcing-move detection

pub mod heuristic;
pub mod patterns;
pub mod threats;

pub use heuristic::{evaluate, evaluate_patterns, DEFAULT_DEFENSE_WEIGHT};
pub use patterns::{
    analyze_direction, analyze_position, classify_direction, has_four, has_neighbor,
    has_open_four, has_open_three, has_three, scan_line, LineScan, PatternType,
};
pub use threats::{find_threats, is_double_threat};

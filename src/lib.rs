//! Time-bounded Gomoku (five-in-a-row) engine
//!
//! A brain for free-style Gomoku on a 20x20 board:
//! - Five or more in a row wins
//! - No captures, no forbidden moves
//! - Every move is chosen within a fixed time budget
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation with bitboards
//! - [`rules`]: Whole-board five-in-a-row detection
//! - [`eval`]: Line patterns, threats and position evaluation
//! - [`search`]: Deadline, move ordering, alpha-beta with iterative deepening
//! - [`engine`]: Main AI engine integrating all components
//! - [`config`]: Tunables and TOML loading
//! - [`protocol`]: Line protocol spoken with the game manager
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{Board, EngineConfig, Pos, SearchEngine, Stone};
//!
//! // Shallow search keeps the doc test quick
//! let mut board = Board::new();
//! let mut engine = SearchEngine::new(EngineConfig { max_depth: 2, ..EngineConfig::default() });
//!
//! board.place_stone(Pos::new(10, 10), Stone::Black);
//!
//! // AI responds as White
//! let pos = engine.find_best_move(&board, Stone::White);
//! board.place_stone(pos, Stone::White);
//! println!("AI plays at {pos}");
//! ```
//!
//! # Search Priority
//!
//! The AI engine follows this search priority:
//! 1. Immediate winning move
//! 2. Block of the opponent's immediate win
//! 3. Alpha-Beta search with iterative deepening until the deadline

pub mod board;
pub mod config;
pub mod engine;
pub mod eval;
pub mod protocol;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Board, Pos, Stone, BOARD_SIZE};
pub use config::{AppConfig, EngineConfig};
pub use engine::{MoveResult, SearchEngine, SearchType};

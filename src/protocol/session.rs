//! Game state shared by the commands of one protocol session

use std::collections::HashMap;

use tracing::{debug, info};

use crate::board::{Board, Pos, Stone, BOARD_SIZE};
use crate::config::AppConfig;
use crate::engine::SearchEngine;
use crate::rules::{check_winner, find_five_positions};

use super::command::Owner;
use super::error::ProtocolError;

/// Board, engine and own colour for one manager connection.
#[derive(Debug, Clone)]
pub struct Session {
    board: Board,
    engine: SearchEngine,
    own: Stone,
    info: HashMap<String, String>,
    config: AppConfig,
}

impl Session {
    pub fn new(config: AppConfig) -> Self {
        Self {
            board: Board::new(),
            engine: SearchEngine::new(config.engine.clone()),
            own: Stone::White,
            info: HashMap::new(),
            config,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    /// Colour the brain plays
    pub fn own_color(&self) -> Stone {
        self.own
    }

    /// Last value stored by `INFO key value`
    pub fn info(&self, key: &str) -> Option<&str> {
        self.info.get(key).map(String::as_str)
    }

    /// `START n`: only the fixed board size is accepted.
    pub fn start(&mut self, size: u32) -> Result<(), ProtocolError> {
        if size as usize != BOARD_SIZE {
            return Err(ProtocolError::UnsupportedBoardSize(size.to_string()));
        }
        self.restart();
        Ok(())
    }

    /// Empty the board. Until `BEGIN` arrives the brain moves second.
    pub fn restart(&mut self) {
        self.board.clear();
        self.own = Stone::White;
    }

    /// `BEGIN`: the brain opens as Black.
    pub fn begin(&mut self) -> Result<Pos, ProtocolError> {
        self.own = Stone::Black;
        self.think()
    }

    /// `TURN x,y`: record the opponent's move, then reply.
    pub fn turn(&mut self, pos: Pos) -> Result<Pos, ProtocolError> {
        if !self.board.place_stone(pos, self.own.opponent()) {
            return Err(ProtocolError::InvalidMove {
                x: i32::from(pos.x),
                y: i32::from(pos.y),
            });
        }
        self.think()
    }

    /// `BOARD ... DONE`: replace the position, then reply.
    ///
    /// The side to move is Black when an even number of stones is on the
    /// board. Nothing changes if any entry cannot be placed.
    pub fn load_board(&mut self, entries: &[(Pos, Owner)]) -> Result<Pos, ProtocolError> {
        let stones = entries
            .iter()
            .filter(|(_, owner)| *owner != Owner::Marker)
            .count();
        let own = if stones % 2 == 0 {
            Stone::Black
        } else {
            Stone::White
        };

        let mut board = Board::new();
        for &(pos, owner) in entries {
            let stone = match owner {
                Owner::Own => own,
                Owner::Opponent => own.opponent(),
                Owner::Marker => continue,
            };
            if !board.place_stone(pos, stone) {
                return Err(ProtocolError::InvalidMove {
                    x: i32::from(pos.x),
                    y: i32::from(pos.y),
                });
            }
        }

        self.board = board;
        self.own = own;
        debug!(stones, own = ?own, "position loaded\n{}", self.board);
        self.think()
    }

    /// `INFO key value`. `timeout_turn` adjusts the search budget; other
    /// keys are only stored.
    pub fn set_info(&mut self, key: &str, value: &str) -> Result<(), ProtocolError> {
        if key == "timeout_turn" {
            let timeout: u64 = value.parse().map_err(|_| {
                ProtocolError::MalformedCommand(format!("INFO {key} {value}"))
            })?;
            let budget = timeout
                .saturating_sub(self.config.safety_margin_ms)
                .min(self.config.engine.time_limit_ms);
            self.engine.set_time_limit(budget);
            debug!(timeout, budget_ms = self.engine.config().time_limit_ms, "turn budget set");
        }
        self.info.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Reply to `ABOUT`
    pub fn about(&self) -> String {
        let about = &self.config.about;
        format!(
            "name=\"{}\", version=\"{}\", author=\"{}\", country=\"{}\"",
            about.name, about.version, about.author, about.country
        )
    }

    /// Search, play and return the brain's move.
    fn think(&mut self) -> Result<Pos, ProtocolError> {
        if self.board.is_full() {
            return Err(ProtocolError::BoardFull);
        }

        let mut mov = self.engine.find_best_move(&self.board, self.own);
        if !self.board.is_valid_move(mov) {
            mov = self
                .board
                .available_moves()
                .first()
                .copied()
                .ok_or(ProtocolError::BoardFull)?;
        }
        self.board.place_stone(mov, self.own);

        if let Some((winner, line)) = self.winning_line() {
            let line: Vec<String> = line.iter().map(Pos::to_string).collect();
            info!(
                winner = ?winner,
                line = %line.join(" "),
                moves = self.board.move_count(),
                "game decided"
            );
        }
        Ok(mov)
    }

    /// Winner and the stones of its line, once a five is on the board.
    pub fn winning_line(&self) -> Option<(Stone, Vec<Pos>)> {
        let winner = check_winner(&self.board)?;
        find_five_positions(&self.board, winner).map(|line| (winner, line))
    }
}

//! Engine and application configuration
//!
//! Every heuristic constant of the search lives here so it can be tuned
//! from a TOML file without rebuilding. Missing keys fall back to the
//! defaults below.
//!
//! ```toml
//! log_level = "debug"
//!
//! [engine]
//! max_depth = 6
//! time_limit_ms = 4500
//!
//! [engine.ordering]
//! block_win = 600000
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Move-ordering bonuses, summed per candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderingWeights {
    /// The move wins on the spot
    pub win: i32,
    /// The move takes the opponent's winning cell
    pub block_win: i32,
    pub open_four: i32,
    pub four: i32,
    pub open_three: i32,
    pub three: i32,
    /// The opponent would get an open four here
    pub block_open_four: i32,
    /// The opponent would get an open three here
    pub block_open_three: i32,
    /// Center bonus is `(center_reach - manhattan distance) * center_weight`
    pub center_reach: i32,
    pub center_weight: i32,
}

impl Default for OrderingWeights {
    fn default() -> Self {
        Self {
            win: 1_000_000,
            block_win: 500_000,
            open_four: 100_000,
            four: 50_000,
            open_three: 10_000,
            three: 5_000,
            block_open_four: 80_000,
            block_open_three: 8_000,
            center_reach: 40,
            center_weight: 10,
        }
    }
}

/// Search parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// First depth of iterative deepening
    pub min_depth: u8,
    /// Last depth of iterative deepening
    pub max_depth: u8,
    /// Wall-clock budget per move, kept under the protocol's limit
    pub time_limit_ms: u64,
    /// Candidates are empty cells within this Chebyshev distance of a stone
    pub candidate_radius: u8,
    /// Candidates kept per node after ordering
    pub max_candidates: usize,
    /// Weight of the opponent's pattern score in the static evaluation
    pub defense_weight: f64,
    pub ordering: OrderingWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_depth: 2,
            max_depth: 5,
            time_limit_ms: 4_900,
            candidate_radius: 2,
            max_candidates: 20,
            defense_weight: crate::eval::DEFAULT_DEFENSE_WEIGHT,
            ordering: OrderingWeights::default(),
        }
    }
}

impl EngineConfig {
    /// Reject settings the search cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_depth == 0 {
            return Err(ConfigError::Invalid("min_depth must be at least 1".into()));
        }
        if self.min_depth > self.max_depth {
            return Err(ConfigError::Invalid(format!(
                "min_depth {} exceeds max_depth {}",
                self.min_depth, self.max_depth
            )));
        }
        if self.time_limit_ms == 0 {
            return Err(ConfigError::Invalid("time_limit_ms must be positive".into()));
        }
        if self.candidate_radius == 0 {
            return Err(ConfigError::Invalid("candidate_radius must be at least 1".into()));
        }
        if self.max_candidates == 0 {
            return Err(ConfigError::Invalid("max_candidates must be positive".into()));
        }
        if !self.defense_weight.is_finite() || self.defense_weight < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "defense_weight must be a non-negative number, got {}",
                self.defense_weight
            )));
        }
        Ok(())
    }
}

/// Brain metadata reported by `ABOUT`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutInfo {
    pub name: String,
    pub version: String,
    pub author: String,
    pub country: String,
}

impl Default for AboutInfo {
    fn default() -> Self {
        Self {
            name: "GomokuBrain".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            author: "gomoku_brain".into(),
            country: "Unknown".into(),
        }
    }
}

/// Top-level configuration of the brain binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default log filter when `RUST_LOG` is not set
    pub log_level: String,
    /// Kept free below `INFO timeout_turn` when shortening the budget
    pub safety_margin_ms: u64,
    pub about: AboutInfo,
    pub engine: EngineConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            safety_margin_ms: 100,
            about: AboutInfo::default(),
            engine: EngineConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(text)?;
        config.engine.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }
}

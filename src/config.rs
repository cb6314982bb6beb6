// Configuration module for reading Snake.toml
// This module provides OOP-style configuration management for the Battlesnake bot

use log::warn;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

/// Environment variable naming an alternative config file
pub const CONFIG_PATH_ENV: &str = "SNAKE_CONFIG";

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub timing: TimingConfig,
    pub selector: SelectorConfig,
    pub search: SearchConfig,
    pub occupancy: OccupancyConfig,
    pub appearance: AppearanceConfig,
    pub debug: DebugConfig,
}

/// Response time budget
#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    pub response_time_budget_ms: u64,
    pub network_overhead_ms: u64,
}

impl TimingConfig {
    /// Computes the effective computation budget
    pub fn effective_budget_ms(&self) -> u64 {
        self.response_time_budget_ms.saturating_sub(self.network_overhead_ms)
    }

    /// Effective budget for a game whose server timeout may be tighter than ours
    pub fn budget_for(&self, game_timeout_ms: u32) -> u64 {
        let ceiling = if game_timeout_ms == 0 {
            self.response_time_budget_ms
        } else {
            self.response_time_budget_ms.min(game_timeout_ms as u64)
        };
        ceiling.saturating_sub(self.network_overhead_ms)
    }
}

/// How ties on free space are resolved
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TieBreak {
    /// First candidate in up, right, down, left order
    Priority,
    /// Uniform choice among tied candidates
    Random,
}

/// Move selector constants
#[derive(Debug, Deserialize, Clone)]
pub struct SelectorConfig {
    /// SEEK_FOOD when health is at or below this value
    pub health_threshold: i32,
    /// Static annotation sent with every move; empty disables it
    pub shout: String,
    pub tie_break: TieBreak,
    /// Seed for `TieBreak::Random`; the turn number is added per turn
    #[serde(default)]
    pub random_seed: Option<u64>,
}

/// Largest width or height accepted by default (standard boards are 7, 11 or 19)
pub const DEFAULT_MAX_BOARD_DIM: i32 = 25;

fn default_max_board_dim() -> i32 {
    DEFAULT_MAX_BOARD_DIM
}

/// Search caps, on top of the board-area bound every search already has
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Snapshots wider or taller than this are rejected before any search
    #[serde(default = "default_max_board_dim")]
    pub max_board_dim: i32,
    #[serde(default)]
    pub max_path_nodes: Option<usize>,
    #[serde(default)]
    pub max_flood_fill_nodes: Option<usize>,
}

/// Occupancy rules
#[derive(Debug, Deserialize, Clone)]
pub struct OccupancyConfig {
    /// Treat our own tail as free unless it is stacked (we ate last turn)
    pub own_tail_vacates: bool,
}

/// Values returned by GET /
#[derive(Debug, Deserialize, Clone)]
pub struct AppearanceConfig {
    pub apiversion: String,
    pub author: String,
    pub color: String,
    pub head: String,
    pub tail: String,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    /// Parses configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads the file named by `SNAKE_CONFIG`, or Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        let path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "Snake.toml".to_string());
        Self::from_file(path)
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            timing: TimingConfig {
                response_time_budget_ms: 400,
                network_overhead_ms: 50,
            },
            selector: SelectorConfig {
                health_threshold: 25,
                shout: "Can I have a hug? :3".to_string(),
                tie_break: TieBreak::Priority,
                random_seed: None,
            },
            search: SearchConfig {
                max_board_dim: DEFAULT_MAX_BOARD_DIM,
                max_path_nodes: None,
                max_flood_fill_nodes: None,
            },
            occupancy: OccupancyConfig {
                own_tail_vacates: true,
            },
            appearance: AppearanceConfig {
                apiversion: "1".to_string(),
                author: "".to_string(),
                color: "#006AC3".to_string(),
                head: "default".to_string(),
                tail: "default".to_string(),
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "battlesnake_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            warn!("Could not load Snake.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}

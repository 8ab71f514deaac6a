use anyhow::{Context, Result, ensure};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::rules::RuleVariant;

/// Side length of one grid cell, in board units
pub const CELL_SIZE: i32 = 20;

/// Number of body cells a fresh run starts with
pub const INITIAL_SNAKE_LENGTH: usize = 4;

/// Selectable square board extents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BoardSize {
    /// 200 x 200 (10 x 10 cells)
    Small,
    /// 400 x 400 (20 x 20 cells)
    #[default]
    Medium,
    /// 600 x 600 (30 x 30 cells)
    Large,
}

impl BoardSize {
    pub const ALL: [BoardSize; 3] = [BoardSize::Small, BoardSize::Medium, BoardSize::Large];

    /// Board extent in board units; always a multiple of `CELL_SIZE`
    pub fn extent(&self) -> i32 {
        match self {
            Self::Small => 200,
            Self::Medium => 400,
            Self::Large => 600,
        }
    }

    /// Number of cells along one side
    pub fn cells(&self) -> usize {
        (self.extent() / CELL_SIZE) as usize
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Small => Self::Medium,
            Self::Medium => Self::Large,
            Self::Large => Self::Small,
        }
    }
}

/// Selectable tick periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TickSpeed {
    /// 150ms per tick
    Slow,
    /// 100ms per tick
    #[default]
    Normal,
    /// 60ms per tick
    Fast,
}

impl TickSpeed {
    /// Get the tick interval for this speed
    pub fn tick_interval(&self) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(150),
            Self::Normal => Duration::from_millis(100),
            Self::Fast => Duration::from_millis(60),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slow => "Slow",
            Self::Normal => "Normal",
            Self::Fast => "Fast",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Slow => Self::Normal,
            Self::Normal => Self::Fast,
            Self::Fast => Self::Slow,
        }
    }
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GameConfig {
    /// Board extent
    pub board: BoardSize,
    /// Tick period while a run is in progress
    pub speed: TickSpeed,
    /// Collision rules in effect
    pub variant: RuleVariant,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Seed for target and obstacle placement; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board: BoardSize::default(),
            speed: TickSpeed::default(),
            variant: RuleVariant::default(),
            initial_snake_length: INITIAL_SNAKE_LENGTH,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with the given board, speed and rules
    pub fn new(board: BoardSize, speed: TickSpeed, variant: RuleVariant) -> Self {
        Self {
            board,
            speed,
            variant,
            ..Default::default()
        }
    }

    /// Create a small board for testing
    pub fn small() -> Self {
        Self {
            board: BoardSize::Small,
            ..Default::default()
        }
    }

    pub fn with_variant(mut self, variant: RuleVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Board extent in board units
    pub fn extent(&self) -> i32 {
        self.board.extent()
    }

    /// Check the values serde and clap cannot: the initial snake must fit
    /// between the top edge and the centre of the board
    pub fn validate(&self) -> Result<()> {
        let max_length = (self.extent() / 2 / CELL_SIZE + 1) as usize;
        ensure!(
            (1..=max_length).contains(&self.initial_snake_length),
            "initial-snake-length must be between 1 and {} on a {} board, got {}",
            max_length,
            self.extent(),
            self.initial_snake_length
        );
        Ok(())
    }

    /// Load a configuration from a TOML file; missing keys fall back to defaults
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

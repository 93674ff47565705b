use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SnakeError};
use crate::game::{Board, Direction, Position};

pub const DEFAULT_SAVE_PATH: &str = "snake_save.json";

/// Slowest allowed starting level: one tick every 1000 seconds.
pub const MIN_LEVEL: f64 = 0.001;

/// Tunables for a game. Every field has a default, so a config file only
/// needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board: Board,
    pub initial_level: f64,
    /// Factor applied to the level every time food is eaten.
    pub level_growth: f64,
    /// Head first.
    pub initial_snake: Vec<Position>,
    pub initial_direction: Direction,
    pub save_path: PathBuf,
    pub sound_on: bool,
    /// Fixed seed for food placement; random when absent.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board: Board::default(),
            initial_level: 3.0,
            level_growth: 1.5,
            initial_snake: vec![
                Position::new(200, 200),
                Position::new(190, 200),
                Position::new(180, 200),
            ],
            initial_direction: Direction::Right,
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
            sound_on: true,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let b = self.board;
        if b.cell <= 0 || b.width <= 0 || b.height <= 0 {
            return Err(invalid("board dimensions must be positive"));
        }
        if b.width % b.cell != 0 || b.height % b.cell != 0 {
            return Err(invalid(format!(
                "board {}x{} is not a multiple of cell size {}",
                b.width, b.height, b.cell
            )));
        }
        if !self.initial_level.is_finite() || self.initial_level < MIN_LEVEL {
            return Err(invalid(format!(
                "initial_level must be a finite number of at least {MIN_LEVEL}"
            )));
        }
        if self.level_growth.is_nan() || self.level_growth < 1.0 {
            return Err(invalid("level_growth must be at least 1"));
        }
        if self.initial_snake.is_empty() {
            return Err(invalid("initial_snake needs at least one segment"));
        }
        for (i, seg) in self.initial_snake.iter().enumerate() {
            if !b.contains(*seg) || !b.is_aligned(*seg) {
                return Err(invalid(format!(
                    "initial_snake segment {i} at ({}, {}) is off the grid",
                    seg.x, seg.y
                )));
            }
            if self.initial_snake[..i].contains(seg) {
                return Err(invalid(format!("initial_snake segment {i} overlaps an earlier one")));
            }
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> SnakeError {
    SnakeError::InvalidConfig(msg.into())
}

#[derive(Debug, Default, Parser)]
#[command(name = "snake_canvas", version, about = "Grid snake on a 600x600 canvas")]
pub struct Options {
    /// JSON file overriding the default game settings
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Where the high score is kept
    #[arg(long, value_name = "FILE")]
    pub save: Option<PathBuf>,

    /// Seed for food placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start with sound off
    #[arg(long)]
    pub mute: bool,
}

impl Options {
    /// Config file first, then command-line overrides on top.
    pub fn resolve(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };
        if let Some(save) = &self.save {
            config.save_path = save.clone();
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.mute {
            config.sound_on = false;
        }
        config.validate()?;
        Ok(config)
    }
}

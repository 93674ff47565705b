use std::time::Duration;

use rand::Rng;

use super::engine::place_food;
use super::geometry::{Board, Direction, Position};
use crate::config::GameConfig;

/// Everything that changes while a game is played. The engine is the only
/// writer; renderers get a shared reference.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub board: Board,
    /// Head first, never empty.
    pub snake: Vec<Position>,
    pub food: Position,
    pub direction: Direction,
    pub score: u32,
    pub level: f64,
    pub high_score: u32,
    /// Cleared on game over; the scheduler stops ticking once this is false.
    pub running: bool,
}

impl GameState {
    pub fn new<R: Rng + ?Sized>(config: &GameConfig, high_score: u32, rng: &mut R) -> Self {
        Self {
            board: config.board,
            snake: config.initial_snake.clone(),
            food: place_food(&config.board, rng),
            direction: config.initial_direction,
            score: 0,
            level: config.initial_level,
            high_score,
            running: true,
        }
    }

    pub fn head(&self) -> Position { self.snake[0] }

    /// The segment right behind the head, if the snake is long enough to have one.
    pub fn neck(&self) -> Option<Position> { self.snake.get(1).copied() }

    /// True when heading in `dir` would put the head straight back onto the neck.
    pub fn reverses_into_neck(&self, dir: Direction) -> bool {
        self.neck() == Some(self.head().step(dir, self.board.cell))
    }

    /// Accept `dir` as the next heading unless it folds back onto the neck.
    /// Returns whether the heading was accepted.
    pub fn steer(&mut self, dir: Direction) -> bool {
        if self.reverses_into_neck(dir) {
            tracing::debug!(?dir, current = ?self.direction, "reversal rejected");
            return false;
        }
        self.direction = dir;
        true
    }

    /// Delay before the next tick: `1000 / level` milliseconds.
    pub fn tick_interval(&self) -> Duration {
        crate::scheduler::interval_for(self.level)
    }
}

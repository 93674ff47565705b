use rand::Rng;

use super::geometry::{Board, Direction, Position};
use super::state::GameState;
use crate::config::GameConfig;

/// What a single tick did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    AteFood,
    GameOver,
}

/// Uniform cell on the board, snapped to the grid. Cells under the snake are
/// not excluded, so food can land on the body.
pub fn place_food<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Position {
    Position {
        x: rng.gen_range(0..board.columns()) * board.cell,
        y: rng.gen_range(0..board.rows()) * board.cell,
    }
}

/// Advances a [`GameState`] one cell at a time.
#[derive(Debug, Clone)]
pub struct Engine {
    level_growth: f64,
}

impl Engine {
    pub fn new(config: &GameConfig) -> Self {
        Self { level_growth: config.level_growth }
    }

    /// Move the snake one cell, consuming the old state and returning the new
    /// one.
    pub fn tick<R: Rng + ?Sized>(
        &self,
        mut state: GameState,
        direction: Direction,
        rng: &mut R,
    ) -> (GameState, TickOutcome) {
        let outcome = self.advance(&mut state, direction, rng);
        (state, outcome)
    }

    /// In-place form of [`Engine::tick`]. `direction` goes through the
    /// reversal guard first; a rejected heading leaves the previous one in
    /// force.
    ///
    /// Food is resolved before collisions, so a fatal move onto food still
    /// scores. A finished game is left untouched.
    pub fn advance<R: Rng + ?Sized>(
        &self,
        state: &mut GameState,
        direction: Direction,
        rng: &mut R,
    ) -> TickOutcome {
        if !state.running {
            return TickOutcome::GameOver;
        }

        state.steer(direction);
        let head = state.head().step(state.direction, state.board.cell);
        state.snake.insert(0, head);

        let mut outcome = TickOutcome::Continue;
        if head == state.food {
            state.score += 1;
            state.level *= self.level_growth;
            state.food = place_food(&state.board, rng);
            if state.score > state.high_score {
                state.high_score = state.score;
            }
            tracing::debug!(score = state.score, level = state.level, "food eaten");
            outcome = TickOutcome::AteFood;
        } else {
            state.snake.pop();
        }

        let hit_wall = !state.board.contains(head);
        let hit_self = state.snake[1..].contains(&head);
        if hit_wall || hit_self {
            state.running = false;
            tracing::info!(score = state.score, hit_wall, hit_self, "game over");
            outcome = TickOutcome::GameOver;
        }

        outcome
    }
}

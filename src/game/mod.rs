pub mod engine;
pub mod geometry;
pub mod state;

pub use engine::{Engine, TickOutcome, place_food};
pub use geometry::{Board, Direction, Position};
pub use state::GameState;

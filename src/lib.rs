//! Grid snake on a 2D canvas.
//!
//! The game logic in [`game`] is plain data and functions; everything that
//! touches the window, the clock, the speakers or the disk sits behind a
//! small trait so it can be swapped out in tests.

pub mod audio;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod render;
pub mod scheduler;
pub mod session;
pub mod storage;
pub mod ui;

pub use config::{GameConfig, Options};
pub use error::{Result, SnakeError};
pub use game::{Direction, Engine, GameState, Position, TickOutcome};
pub use session::Session;

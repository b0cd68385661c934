//! Core engine types: grid, directions, state, configuration, RNG, errors.
//!
//! Everything here is synchronous and free of I/O. Presentation layers drive
//! a `GameState` and read the grid back for drawing.

pub mod config;
pub mod direction;
pub mod error;
pub mod grid;
pub mod rng;
pub mod state;

pub use config::{EngineConfig, MAX_SIZE, MIN_SIZE};
pub use direction::Direction;
pub use error::EngineError;
pub use grid::{EmptyCells, Grid, Tile, Value, MAX_VALUE};
pub use rng::GameRng;
pub use state::{GameState, MoveOutcome};

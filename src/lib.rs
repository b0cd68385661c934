//! # merge-grid
//!
//! Rule engine for a sliding-tile merging puzzle ("2048").
//!
//! ## Design Principles
//!
//! 1. **Core Only**: The engine owns the grid, applies moves, spawns tiles and
//!    detects termination. Drawing, input polling and timing belong to the
//!    presentation layer, which reads the grid back through `GameState`.
//!
//! 2. **One Traversal**: Slide, merge and movability are written once against
//!    `Direction::cell`, which maps a (line, offset-from-edge) pair to grid
//!    coordinates for each direction.
//!
//! 3. **Deterministic**: Spawns draw from a seeded ChaCha8 stream, so a seed
//!    plus a move list replays a game exactly.
//!
//! ## Modules
//!
//! - `core`: Grid, directions, state machine, configuration, RNG, errors
//! - `rules`: Game status and win/loss predicates
//! - `policy`: Move policies and headless playouts
//!
//! ```
//! use merge_grid::{Direction, EngineConfig, GameState, GameStatus};
//!
//! let mut game = GameState::new(EngineConfig::default().with_seed(7)).unwrap();
//! assert_eq!(game.tile_count(), 2);
//!
//! let dir = game.movable_directions().next().unwrap();
//! assert!(game.apply_move(dir).unwrap().changed());
//! assert_eq!(game.moves_made(), 1);
//! assert_eq!(game.status(), GameStatus::Playing);
//! ```

pub mod core;
pub mod policy;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Direction, EngineConfig, EngineError, GameRng, GameState, Grid, MoveOutcome, Tile, Value,
};

pub use crate::rules::GameStatus;

pub use crate::policy::{
    play_many, play_out, GreedyPolicy, MovePolicy, OrderedPolicy, PlayoutStats, RandomPolicy,
};

//! Engine configuration.
//!
//! Presentation layers build an `EngineConfig` once and hand it to
//! [`GameState::new`](super::GameState::new). Defaults reproduce the classic
//! game: 4×4 grid, two starting tiles, 2048 to win.

use serde::{Deserialize, Serialize};

use super::error::EngineError;
use super::grid::{Value, MAX_VALUE};

/// Smallest supported grid side.
pub const MIN_SIZE: usize = 2;

/// Largest supported grid side. Keeps every reachable value within `u64`.
pub const MAX_SIZE: usize = 7;

/// Engine configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Grid side length (default: 4).
    pub size: usize,

    /// A tile at or above this value wins the game (default: 2048).
    /// Must be a power of two in `8..=MAX_VALUE`, so no spawned tile wins.
    pub win_threshold: Value,

    /// Tiles spawned on the empty grid at start (default: 2).
    pub initial_tiles: usize,

    /// Probability that a spawned tile is a 4 rather than a 2 (default: 0.5).
    pub four_probability: f64,

    /// Seed for tile spawning. `None` draws a fresh seed from the OS.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            size: 4,
            win_threshold: 2048,
            initial_tiles: 2,
            four_probability: 0.5,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Set the grid side length.
    #[must_use]
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Set the win threshold.
    #[must_use]
    pub fn with_win_threshold(mut self, threshold: Value) -> Self {
        self.win_threshold = threshold;
        self
    }

    /// Set the number of starting tiles.
    #[must_use]
    pub fn with_initial_tiles(mut self, count: usize) -> Self {
        self.initial_tiles = count;
        self
    }

    /// Set the probability of spawning a 4.
    #[must_use]
    pub fn with_four_probability(mut self, p: f64) -> Self {
        self.four_probability = p;
        self
    }

    /// Fix the spawn seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of cells on the configured grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// Check every parameter against its allowed range.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.size) {
            return Err(EngineError::InvalidConfig(format!(
                "size {} outside {}..={}",
                self.size, MIN_SIZE, MAX_SIZE
            )));
        }
        let threshold = self.win_threshold;
        if !(8..=MAX_VALUE).contains(&threshold) || !threshold.is_power_of_two() {
            return Err(EngineError::InvalidConfig(format!(
                "win threshold {} is not a power of two in 8..={}",
                self.win_threshold, MAX_VALUE
            )));
        }
        if self.initial_tiles > self.cell_count() {
            return Err(EngineError::InvalidConfig(format!(
                "{} initial tiles do not fit on a {}x{} grid",
                self.initial_tiles, self.size, self.size
            )));
        }
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(EngineError::InvalidConfig(format!(
                "four probability {} outside [0, 1]",
                self.four_probability
            )));
        }
        Ok(())
    }
}

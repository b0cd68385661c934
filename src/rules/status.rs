//! Game status and the win/loss predicates.

use serde::{Deserialize, Serialize};

use crate::core::grid::{Grid, Value};

/// Where a game stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Moves are accepted.
    #[default]
    Playing,
    /// A tile reached the win threshold.
    Won,
    /// Full grid, nothing can merge.
    Lost,
}

impl GameStatus {
    /// Won or lost: no further moves are accepted.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Playing)
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameStatus::Playing => "playing",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
        };
        f.write_str(name)
    }
}

/// Does any tile hold `threshold` or more?
#[must_use]
pub fn is_won(grid: &Grid, threshold: Value) -> bool {
    grid.tiles().any(|tile| tile.value >= threshold)
}

/// Is the grid full with no equal right/down neighbours anywhere?
#[must_use]
pub fn is_lost(grid: &Grid) -> bool {
    grid.is_full() && !grid.has_adjacent_pair()
}

/// Status of a grid, checking win before loss.
#[must_use]
pub fn evaluate(grid: &Grid, threshold: Value) -> GameStatus {
    if is_won(grid, threshold) {
        GameStatus::Won
    } else if is_lost(grid) {
        GameStatus::Lost
    } else {
        GameStatus::Playing
    }
}

//! Game state: the grid plus everything needed to advance it.
//!
//! ## GameState
//!
//! - The grid (exclusively owned; renderers borrow it read-only)
//! - Move counter
//! - Status (`Playing`, `Won`, `Lost`)
//! - Configuration and the spawn RNG
//!
//! Play advances through [`GameState::apply_move`]; each call runs to
//! completion: status checks, slide/merge, spawn, counter. The grid is never
//! changed without the status being re-evaluated.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::config::EngineConfig;
use super::direction::Direction;
use super::error::EngineError;
use super::grid::{Grid, Tile, Value};
use super::rng::GameRng;
use crate::rules::{self, GameStatus};

/// Result of [`GameState::apply_move`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The grid changed: tiles slid and/or merged, then a tile spawned.
    Moved {
        /// Merges performed by this move.
        merges: u32,
        /// Tile spawned after the move.
        spawned: Tile,
    },
    /// Nothing can move in that direction. State unchanged.
    Rejected,
    /// The game is already over. State unchanged.
    Finished(GameStatus),
}

impl MoveOutcome {
    /// Did the grid change?
    #[must_use]
    pub fn changed(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }
}

/// Complete game state.
#[derive(Clone, Debug)]
pub struct GameState {
    grid: Grid,
    moves_made: u32,
    status: GameStatus,
    config: EngineConfig,
    rng: GameRng,
}

impl GameState {
    /// Start a game: empty grid plus `initial_tiles` spawned tiles.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let grid = Grid::new(config.size);
        let mut state = Self::assemble(config, grid);
        for _ in 0..state.config.initial_tiles {
            state.spawn()?;
        }
        state.refresh_status();
        Ok(state)
    }

    /// Resume from explicit grid contents. No tiles are spawned.
    pub fn with_grid(config: EngineConfig, grid: Grid) -> Result<Self, EngineError> {
        config.validate()?;
        if grid.size() != config.size {
            return Err(EngineError::InvalidGrid(format!(
                "grid is {}x{}, config expects {}x{}",
                grid.size(),
                grid.size(),
                config.size,
                config.size
            )));
        }
        let mut state = Self::assemble(config, grid);
        state.refresh_status();
        Ok(state)
    }

    fn assemble(config: EngineConfig, grid: Grid) -> Self {
        let rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        Self {
            grid,
            moves_made: 0,
            status: GameStatus::Playing,
            config,
            rng,
        }
    }

    // === Queries ===

    /// Read-only view of the grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Occupied cells, for rendering.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.grid.tiles()
    }

    /// Accepted moves so far.
    #[must_use]
    pub fn moves_made(&self) -> u32 {
        self.moves_made
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.grid.tile_count()
    }

    /// Largest tile on the grid.
    #[must_use]
    pub fn max_tile(&self) -> Value {
        self.grid.max_value().unwrap_or(0)
    }

    /// The configuration this game runs under.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Would a move in `dir` change the grid?
    #[must_use]
    pub fn can_move(&self, dir: Direction) -> bool {
        self.grid.can_move(dir)
    }

    /// Directions that would change the grid, in [`Direction::ALL`] order.
    pub fn movable_directions(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(|&dir| self.can_move(dir))
    }

    /// Win check against the configured threshold.
    #[must_use]
    pub fn is_won(&self) -> bool {
        rules::is_won(&self.grid, self.config.win_threshold)
    }

    /// Loss check: full grid, no equal neighbours.
    #[must_use]
    pub fn is_lost(&self) -> bool {
        rules::is_lost(&self.grid)
    }

    // === Mutation ===

    /// Place a 2 or a 4 on a uniformly chosen empty cell, then re-check status.
    pub fn spawn_tile(&mut self) -> Result<Tile, EngineError> {
        let tile = self.spawn()?;
        self.refresh_status();
        Ok(tile)
    }

    fn spawn(&mut self) -> Result<Tile, EngineError> {
        let empty = self.grid.empty_cells();
        let &(row, col) = self.rng.choose(&empty).ok_or(EngineError::GridFull)?;
        let value = if self.rng.gen_bool(self.config.four_probability) {
            4
        } else {
            2
        };
        self.grid.place(row, col, value);
        debug!("spawned {} at ({}, {})", value, row, col);
        Ok(Tile { row, col, value })
    }

    /// Apply one move command.
    ///
    /// Status is re-checked first (win before loss); a finished game and a
    /// direction in which nothing can move both leave the state untouched.
    pub fn apply_move(&mut self, dir: Direction) -> Result<MoveOutcome, EngineError> {
        self.refresh_status();
        if self.status.is_terminal() {
            return Ok(MoveOutcome::Finished(self.status));
        }
        if !self.grid.can_move(dir) {
            debug!("move {} rejected", dir);
            return Ok(MoveOutcome::Rejected);
        }

        let merges = self.grid.shift(dir);
        let spawned = self.spawn()?;
        self.moves_made += 1;
        debug!(
            "move {} #{}: {} merges, {} tiles",
            dir,
            self.moves_made,
            merges,
            self.grid.tile_count()
        );

        self.refresh_status();
        Ok(MoveOutcome::Moved { merges, spawned })
    }

    /// Re-evaluate status. Terminal states are sticky.
    fn refresh_status(&mut self) {
        if self.status.is_terminal() {
            return;
        }
        let status = rules::evaluate(&self.grid, self.config.win_threshold);
        if status != self.status {
            info!(
                "game {} after {} moves (max tile {})",
                status,
                self.moves_made,
                self.max_tile()
            );
            self.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> EngineConfig {
        EngineConfig::default().with_seed(42)
    }

    fn state_from(rows: &[[Value; 4]]) -> GameState {
        GameState::with_grid(seeded(), Grid::from_rows(rows).unwrap()).unwrap()
    }

    #[test]
    fn test_new_game() {
        let state = GameState::new(seeded()).unwrap();
        assert_eq!(state.tile_count(), 2);
        assert_eq!(state.moves_made(), 0);
        assert_eq!(state.status(), GameStatus::Playing);
        assert!(state.tiles().all(|t| t.value == 2 || t.value == 4));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = GameState::new(EngineConfig::default().with_size(9)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn test_with_grid_size_mismatch() {
        let grid = Grid::new(3);
        assert!(matches!(
            GameState::with_grid(seeded(), grid),
            Err(EngineError::InvalidGrid(_))
        ));
    }

    #[test]
    fn test_accepted_move() {
        let mut state = state_from(&[[2, 2, 0, 0], [0; 4], [0; 4], [0, 0, 0, 4]]);
        let outcome = state.apply_move(Direction::Left).unwrap();

        let MoveOutcome::Moved { merges, spawned } = outcome else {
            panic!("expected a move, got {:?}", outcome);
        };
        assert_eq!(merges, 1);
        assert_eq!(state.grid().get(0, 0), Some(4));
        assert_eq!(state.grid().get(spawned.row, spawned.col), Some(spawned.value));
        assert_eq!(state.moves_made(), 1);
        // 3 tiles - 1 merge + 1 spawn
        assert_eq!(state.tile_count(), 3);
    }

    #[test]
    fn test_rejected_move_is_noop() {
        let mut state = state_from(&[[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let before = state.grid().clone();

        assert_eq!(state.apply_move(Direction::Left).unwrap(), MoveOutcome::Rejected);
        assert_eq!(state.apply_move(Direction::Up).unwrap(), MoveOutcome::Rejected);
        assert_eq!(state.grid(), &before);
        assert_eq!(state.moves_made(), 0);
    }

    #[test]
    fn test_spawn_never_overwrites() {
        let mut state = state_from(&[[2, 4, 8, 16], [32, 64, 128, 256], [2, 4, 8, 16], [0, 64, 128, 256]]);
        let tile = state.spawn_tile().unwrap();
        assert_eq!((tile.row, tile.col), (3, 0));
        assert!(state.grid().is_full());
        assert_eq!(state.spawn_tile(), Err(EngineError::GridFull));
    }

    #[test]
    fn test_spawn_into_last_cell_updates_status() {
        let mut state = state_from(&[[8, 16, 8, 16], [16, 8, 16, 8], [8, 16, 8, 16], [16, 8, 16, 0]]);
        assert_eq!(state.status(), GameStatus::Playing);

        let tile = state.spawn_tile().unwrap();
        assert_eq!((tile.row, tile.col), (3, 3));
        assert!(state.is_lost());
        assert_eq!(state.status(), GameStatus::Lost);
        assert_eq!(
            state.apply_move(Direction::Left).unwrap(),
            MoveOutcome::Finished(GameStatus::Lost)
        );
    }

    #[test]
    fn test_spawn_value_follows_probability() {
        let config = seeded().with_four_probability(1.0).with_initial_tiles(0);
        let mut state = GameState::new(config).unwrap();
        for _ in 0..5 {
            assert_eq!(state.spawn_tile().unwrap().value, 4);
        }

        let config = seeded().with_four_probability(0.0).with_initial_tiles(0);
        let mut state = GameState::new(config).unwrap();
        for _ in 0..5 {
            assert_eq!(state.spawn_tile().unwrap().value, 2);
        }
    }

    #[test]
    fn test_win_detected_after_merge() {
        let config = seeded().with_win_threshold(16);
        let grid = Grid::from_rows(&[[8u64, 8, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        let mut state = GameState::with_grid(config, grid).unwrap();
        assert_eq!(state.status(), GameStatus::Playing);

        assert!(state.apply_move(Direction::Left).unwrap().changed());
        assert_eq!(state.status(), GameStatus::Won);
        assert_eq!(
            state.apply_move(Direction::Right).unwrap(),
            MoveOutcome::Finished(GameStatus::Won)
        );
        assert_eq!(state.moves_made(), 1);
    }

    #[test]
    fn test_lost_state_rejects_moves() {
        let mut state = state_from(&[[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert_eq!(state.status(), GameStatus::Lost);
        for dir in Direction::ALL {
            assert_eq!(
                state.apply_move(dir).unwrap(),
                MoveOutcome::Finished(GameStatus::Lost)
            );
        }
        assert_eq!(state.moves_made(), 0);
    }

    #[test]
    fn test_movable_directions() {
        let state = state_from(&[[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let dirs: Vec<_> = state.movable_directions().collect();
        assert_eq!(dirs, vec![Direction::Down, Direction::Right]);
    }

    #[test]
    fn test_seeded_games_match() {
        let mut a = GameState::new(seeded()).unwrap();
        let mut b = GameState::new(seeded()).unwrap();
        assert_eq!(a.grid(), b.grid());

        for dir in [Direction::Left, Direction::Up, Direction::Right, Direction::Down] {
            assert_eq!(a.apply_move(dir).unwrap(), b.apply_move(dir).unwrap());
        }
        assert_eq!(a.grid(), b.grid());
    }
}

//! Property tests for the move kernel.
//!
//! Invariants covered:
//! - An accepted move changes the tile count by exactly `1 - merges`.
//! - A rejected move leaves grid and counter untouched.
//! - Sliding and merging conserve the sum of tile values.
//! - The spawn lands on a cell the move left empty.
//! - Random rollouts keep every value a power of two and end terminal.

use merge_grid::{
    Direction, EngineConfig, GameRng, GameState, GameStatus, Grid, MoveOutcome, MovePolicy,
    RandomPolicy, Value,
};
use proptest::prelude::*;

fn cell_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        3 => Just(0u64),
        2 => (1u32..=7).prop_map(|k| 1u64 << k),
    ]
}

fn grid_rows() -> impl Strategy<Value = Vec<Vec<Value>>> {
    prop::collection::vec(prop::collection::vec(cell_value(), 4), 4)
}

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn value_sum(grid: &Grid) -> Value {
    grid.tiles().map(|t| t.value).sum()
}

proptest! {
    #[test]
    fn tile_count_tracks_merges(rows in grid_rows(), dir in direction(), seed in any::<u64>()) {
        let grid = Grid::from_rows(&rows).unwrap();
        let config = EngineConfig::default().with_seed(seed).with_win_threshold(1 << 20);
        let mut state = GameState::with_grid(config, grid).unwrap();
        prop_assume!(state.status() == GameStatus::Playing);

        let before = state.tile_count();
        let moves_before = state.moves_made();
        let snapshot = state.grid().clone();
        let movable = state.can_move(dir);

        match state.apply_move(dir).unwrap() {
            MoveOutcome::Moved { merges, spawned } => {
                prop_assert!(movable);
                prop_assert_eq!(state.tile_count(), before - merges as usize + 1);
                prop_assert!(state.tile_count() <= 16);
                prop_assert_eq!(state.moves_made(), moves_before + 1);

                let (shifted, preview_merges) = snapshot.preview(dir).unwrap();
                prop_assert_eq!(preview_merges, merges);
                prop_assert_eq!(shifted.get(spawned.row, spawned.col), None);
                prop_assert_eq!(value_sum(state.grid()), value_sum(&snapshot) + spawned.value);
            }
            MoveOutcome::Rejected => {
                prop_assert!(!movable);
                prop_assert_eq!(state.grid(), &snapshot);
                prop_assert_eq!(state.moves_made(), moves_before);
            }
            MoveOutcome::Finished(status) => {
                prop_assert!(false, "unexpected finished state {:?}", status);
            }
        }
    }

    #[test]
    fn shift_conserves_value(rows in grid_rows(), dir in direction()) {
        let grid = Grid::from_rows(&rows).unwrap();
        if let Some((shifted, merges)) = grid.preview(dir) {
            prop_assert_eq!(value_sum(&shifted), value_sum(&grid));
            prop_assert_eq!(shifted.tile_count() + merges as usize, grid.tile_count());
            prop_assert!(shifted.tiles().all(|t| t.value >= 2 && t.value.is_power_of_two()));
        } else {
            prop_assert!(!grid.can_move(dir));
        }
    }

    #[test]
    fn shifted_grid_is_settled(rows in grid_rows(), dir in direction()) {
        let grid = Grid::from_rows(&rows).unwrap();
        if let Some((shifted, _)) = grid.preview(dir) {
            // Every line is packed against the edge: no tile has an empty
            // cell on its edge side.
            let n = shifted.size();
            for line in 0..n {
                for offset in 1..n {
                    let (r, c) = dir.cell(n, line, offset);
                    let (er, ec) = dir.cell(n, line, offset - 1);
                    if shifted.get(r, c).is_some() {
                        prop_assert!(shifted.get(er, ec).is_some());
                    }
                }
            }
        }
    }

    #[test]
    fn random_rollout_ends_terminal(seed in any::<u64>()) {
        let config = EngineConfig::default().with_seed(seed).with_win_threshold(256);
        let mut state = GameState::new(config).unwrap();
        let mut rng = GameRng::new(seed ^ 0x5eed);

        for _ in 0..5_000 {
            let Some(dir) = RandomPolicy.choose(&state, &mut rng) else {
                break;
            };
            prop_assert!(state.apply_move(dir).unwrap().changed());
            prop_assert!(state.tiles().all(|t| t.value.is_power_of_two() && t.value >= 2));
            if state.status().is_terminal() {
                break;
            }
        }

        prop_assert!(state.status().is_terminal());
        match state.status() {
            GameStatus::Won => prop_assert!(state.max_tile() >= 256),
            GameStatus::Lost => {
                prop_assert_eq!(state.tile_count(), 16);
                for dir in Direction::ALL {
                    prop_assert!(!state.can_move(dir));
                }
            }
            GameStatus::Playing => unreachable!(),
        }
    }
}

//! Headless playouts driven by a [`MovePolicy`].

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::{EngineConfig, EngineError, GameRng, GameState, MoveOutcome, Value};
use crate::rules::GameStatus;

use super::policies::MovePolicy;

/// Statistics for one finished (or capped) playout.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayoutStats {
    /// Seed the game's spawns were drawn from, when known.
    pub seed: Option<u64>,

    /// Accepted moves.
    pub moves: u32,

    /// Total merges across all moves.
    pub merges: u32,

    /// Moves the engine rejected (policy picked a blocked direction).
    pub rejected: u32,

    /// Largest tile at the end.
    pub max_tile: Value,

    /// Status at the end. `Playing` means the move cap was hit.
    pub status: GameStatus,
}

impl PlayoutStats {
    /// Average merges per accepted move.
    #[must_use]
    pub fn merges_per_move(&self) -> f64 {
        if self.moves == 0 {
            0.0
        } else {
            self.merges as f64 / self.moves as f64
        }
    }
}

/// Drive `state` with `policy` until it ends or `max_moves` accepted moves
/// have been made (0 = no cap).
///
/// Stops early if the policy has no move to offer.
pub fn play_out<P: MovePolicy + ?Sized>(
    state: &mut GameState,
    policy: &P,
    rng: &mut GameRng,
    max_moves: u32,
) -> Result<PlayoutStats, EngineError> {
    let mut stats = PlayoutStats {
        seed: state.config().seed,
        ..PlayoutStats::default()
    };

    while !state.status().is_terminal() {
        if max_moves > 0 && stats.moves >= max_moves {
            break;
        }
        let Some(dir) = policy.choose(state, rng) else {
            break;
        };
        match state.apply_move(dir)? {
            MoveOutcome::Moved { merges, .. } => {
                stats.moves += 1;
                stats.merges += merges;
            }
            MoveOutcome::Rejected => stats.rejected += 1,
            MoveOutcome::Finished(_) => break,
        }
    }

    stats.max_tile = state.max_tile();
    stats.status = state.status();
    debug!(
        "{} playout ended {} after {} moves, max tile {}",
        policy.name(),
        stats.status,
        stats.moves,
        stats.max_tile
    );
    Ok(stats)
}

/// Play `games` fresh games, each seeded from a fork of `seed`.
pub fn play_many<P: MovePolicy + ?Sized>(
    config: &EngineConfig,
    policy: &P,
    games: usize,
    seed: u64,
    max_moves: u32,
) -> Result<Vec<PlayoutStats>, EngineError> {
    let mut master = GameRng::new(seed);
    let mut results = Vec::with_capacity(games);
    for _ in 0..games {
        let game_seed = master.fork().seed();
        let mut policy_rng = master.fork();
        let mut state = GameState::new(config.clone().with_seed(game_seed))?;
        results.push(play_out(&mut state, policy, &mut policy_rng, max_moves)?);
    }
    Ok(results)
}

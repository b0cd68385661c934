//! Seeded randomness for tile spawns and policies.
//!
//! A game owns one `GameRng`; playout batches fork a child stream per game so
//! results do not depend on scheduling order.
//!
//! ```
//! use merge_grid::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let mut policy_rng = rng.fork();
//!
//! let cells: Vec<usize> = (0..1000).collect();
//! assert_ne!(
//!     (0..8).map(|_| *rng.choose(&cells).unwrap()).collect::<Vec<_>>(),
//!     (0..8).map(|_| *policy_rng.choose(&cells).unwrap()).collect::<Vec<_>>(),
//! );
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// ChaCha8 stream that remembers its seed.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    forks: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            forks: 0,
        }
    }

    /// Fresh seed from the OS.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Seed this stream started from. Logged so a game can be replayed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive a child stream. The n-th fork of a given seed is always the same.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.forks += 1;
        Self::new(self.seed ^ self.forks.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// True with the given probability.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }

    /// Uniform pick from a slice, `None` when it is empty.
    #[must_use]
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.inner)
    }
}

//! Move policies and headless playouts.
//!
//! Policies are trait-based so drivers (the CLI autoplay mode, benchmarks,
//! tests) can swap strategies:
//! - `RandomPolicy`: uniform over movable directions
//! - `GreedyPolicy`: most merges in one step
//! - `OrderedPolicy`: first movable direction from a preference list

pub mod playout;
pub mod policies;

pub use playout::{play_many, play_out, PlayoutStats};
pub use policies::{GreedyPolicy, MovePolicy, OrderedPolicy, RandomPolicy};

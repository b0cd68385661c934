//! Termination rules.
//!
//! - Win: some tile reached the configured threshold
//! - Loss: the grid is full and no two neighbouring tiles match
//!
//! Win is always checked before loss, so a full, stuck grid that also holds
//! a winning tile counts as won.

pub mod status;

pub use status::{evaluate, is_lost, is_won, GameStatus};

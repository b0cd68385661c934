//! Engine error type.
//!
//! A rejected move is not an error: it is reported as
//! [`MoveOutcome::Rejected`](super::MoveOutcome::Rejected).

use std::fmt;

/// Errors raised by the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// A tile was spawned with no empty cell left on the grid.
    GridFull,
    /// A key outside the four admissible move keys.
    InvalidDirection(char),
    /// Configuration failed validation.
    InvalidConfig(String),
    /// Explicit grid contents were malformed.
    InvalidGrid(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::GridFull => write!(f, "cannot spawn a tile: grid is full"),
            EngineError::InvalidDirection(key) => write!(f, "invalid direction key {:?}", key),
            EngineError::InvalidConfig(msg) => write!(f, "invalid config: {}", msg),
            EngineError::InvalidGrid(msg) => write!(f, "invalid grid: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            EngineError::GridFull.to_string(),
            "cannot spawn a tile: grid is full"
        );
        assert_eq!(
            EngineError::InvalidDirection('x').to_string(),
            "invalid direction key 'x'"
        );
        assert!(EngineError::InvalidConfig("size".into())
            .to_string()
            .contains("size"));
    }
}

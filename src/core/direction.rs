//! Move directions and their traversal order.
//!
//! Every direction is described by one mapping from
//! `(line, offset)` to `(row, col)`, where `offset` 0 is the cell on the
//! target edge and offsets grow toward the interior. Slide, merge and
//! movability checks are written once against that mapping.

use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// One of the four admissible move commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward row 0.
    Up,
    /// Toward the last row.
    Down,
    /// Toward column 0.
    Left,
    /// Toward the last column.
    Right,
}

impl Direction {
    /// All directions in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Map a key to a direction.
    ///
    /// Accepts `w/a/s/d` and the vi keys `k/h/j/l`, case-insensitively.
    pub fn from_key(key: char) -> Result<Self, EngineError> {
        match key.to_ascii_lowercase() {
            'w' | 'k' => Ok(Direction::Up),
            's' | 'j' => Ok(Direction::Down),
            'a' | 'h' => Ok(Direction::Left),
            'd' | 'l' => Ok(Direction::Right),
            _ => Err(EngineError::InvalidDirection(key)),
        }
    }

    /// Grid coordinates of the cell at `offset` from the target edge in `line`.
    ///
    /// For horizontal moves a line is a row; for vertical moves a column.
    #[inline]
    #[must_use]
    pub fn cell(self, size: usize, line: usize, offset: usize) -> (usize, usize) {
        let far = size - 1 - offset;
        match self {
            Direction::Up => (offset, line),
            Direction::Down => (far, line),
            Direction::Left => (line, offset),
            Direction::Right => (line, far),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

impl TryFrom<char> for Direction {
    type Error = EngineError;

    fn try_from(key: char) -> Result<Self, Self::Error> {
        Direction::from_key(key)
    }
}

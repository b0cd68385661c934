//! The N×N grid of optional tile values.
//!
//! ## Layout
//!
//! Cells are stored row-major; row 0 is the top row and column 0 the left
//! column. Empty cells are `None`.
//!
//! ## Moves
//!
//! A move is three passes over every line, all driven by
//! [`Direction::cell`]:
//!
//! 1. slide: compact tiles toward the target edge
//! 2. merge: walk each line from the edge inward, folding a tile into its
//!    edge-side neighbour when the values match
//! 3. slide again to close the gaps left by merges
//!
//! The merge walk clears the source cell of every merge, so the next tile
//! inward always compares against an empty cell and never re-merges the value
//! just created. `[2,2,2,2]` therefore becomes `[4,4,_,_]`, not `[8,_,_,_]`.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::config::{MAX_SIZE, MIN_SIZE};
use super::direction::Direction;
use super::error::EngineError;

/// Tile value. Always a power of two, 2 or greater.
pub type Value = u64;

/// Largest tile a `MAX_SIZE` grid can build: every cell folded into one,
/// starting from spawned 4s. Doubling it still fits in a `Value`.
pub const MAX_VALUE: Value = 1 << (MAX_SIZE * MAX_SIZE + 1);

/// Occupied cell as seen by a renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub row: usize,
    pub col: usize,
    pub value: Value,
}

/// Empty cell coordinates, inline for grids up to 4×4.
pub type EmptyCells = SmallVec<[(usize, usize); 16]>;

/// Square grid of optional tile values.
///
/// Serializes for renderers and logs; build one back with
/// [`Grid::from_rows`] so the tile count stays consistent.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<Value>>,
    tile_count: usize,
}

impl Grid {
    /// Empty grid. `size` has already been validated by the caller.
    #[must_use]
    pub(crate) fn new(size: usize) -> Self {
        debug_assert!((MIN_SIZE..=MAX_SIZE).contains(&size));
        Self {
            size,
            cells: vec![None; size * size],
            tile_count: 0,
        }
    }

    /// Build a grid from explicit rows, `0` meaning empty.
    ///
    /// Rows must form a square of side `MIN_SIZE..=MAX_SIZE` and every
    /// non-zero value must be a power of two in `2..=MAX_VALUE`.
    pub fn from_rows<R: AsRef<[Value]>>(rows: &[R]) -> Result<Self, EngineError> {
        let size = rows.len();
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(EngineError::InvalidGrid(format!(
                "{} rows, expected {}..={}",
                size, MIN_SIZE, MAX_SIZE
            )));
        }

        let mut grid = Grid::new(size);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != size {
                return Err(EngineError::InvalidGrid(format!(
                    "row {} has {} cells, expected {}",
                    row,
                    values.len(),
                    size
                )));
            }
            for (col, &value) in values.iter().enumerate() {
                if value == 0 {
                    continue;
                }
                if value < 2 || value > MAX_VALUE || !value.is_power_of_two() {
                    return Err(EngineError::InvalidGrid(format!(
                        "value {} at ({}, {}) is not a power of two in 2..={}",
                        value, row, col, MAX_VALUE
                    )));
                }
                grid.place(row, col, value);
            }
        }
        Ok(grid)
    }

    #[inline]
    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// Side length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tile_count
    }

    /// True when no cell is empty.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.tile_count == self.capacity()
    }

    /// Value at a cell, `None` when empty.
    ///
    /// Panics if the coordinates are out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<Value> {
        self.cells[self.idx(row, col)]
    }

    /// Put a value into an empty cell.
    pub(crate) fn place(&mut self, row: usize, col: usize, value: Value) {
        let i = self.idx(row, col);
        debug_assert!(self.cells[i].is_none(), "cell ({}, {}) occupied", row, col);
        self.cells[i] = Some(value);
        self.tile_count += 1;
    }

    /// Iterate over occupied cells in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.map(|value| Tile {
                row: i / self.size,
                col: i % self.size,
                value,
            })
        })
    }

    /// Coordinates of every empty cell in row-major order.
    #[must_use]
    pub fn empty_cells(&self) -> EmptyCells {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| (i / self.size, i % self.size))
            .collect()
    }

    /// Largest tile value, `None` on an empty grid.
    #[must_use]
    pub fn max_value(&self) -> Option<Value> {
        self.cells.iter().flatten().copied().max()
    }

    /// Rows with empty cells as `0`.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<Value>> {
        self.cells
            .chunks(self.size)
            .map(|row| row.iter().map(|cell| cell.unwrap_or(0)).collect())
            .collect()
    }

    // === Move Primitives ===

    /// Can any tile slide or merge in `dir`?
    ///
    /// True iff some tile not on the target edge has an empty or equal-valued
    /// neighbour on its edge side.
    #[must_use]
    pub fn can_move(&self, dir: Direction) -> bool {
        let n = self.size;
        for line in 0..n {
            for offset in 1..n {
                let (r, c) = dir.cell(n, line, offset);
                let Some(value) = self.get(r, c) else {
                    continue;
                };
                let (nr, nc) = dir.cell(n, line, offset - 1);
                match self.get(nr, nc) {
                    None => return true,
                    Some(next) if next == value => return true,
                    Some(_) => {}
                }
            }
        }
        false
    }

    /// Does any cell equal its right or down neighbour?
    #[must_use]
    pub fn has_adjacent_pair(&self) -> bool {
        let n = self.size;
        for r in 0..n {
            for c in 0..n {
                let Some(value) = self.get(r, c) else {
                    continue;
                };
                if c + 1 < n && self.get(r, c + 1) == Some(value) {
                    return true;
                }
                if r + 1 < n && self.get(r + 1, c) == Some(value) {
                    return true;
                }
            }
        }
        false
    }

    /// Compact every line toward the target edge.
    pub(crate) fn slide(&mut self, dir: Direction) {
        let n = self.size;
        for line in 0..n {
            for offset in 1..n {
                let mut k = offset;
                while k > 0 {
                    let from = self.idx_of(dir, line, k);
                    let to = self.idx_of(dir, line, k - 1);
                    if self.cells[from].is_none() || self.cells[to].is_some() {
                        break;
                    }
                    self.cells[to] = self.cells[from].take();
                    k -= 1;
                }
            }
        }
    }

    /// Single edge-to-interior merge pass. Returns the number of merges.
    pub(crate) fn merge(&mut self, dir: Direction) -> u32 {
        let n = self.size;
        let mut merges = 0;
        for line in 0..n {
            for offset in 1..n {
                let src = self.idx_of(dir, line, offset);
                let dst = self.idx_of(dir, line, offset - 1);
                match (self.cells[src], self.cells[dst]) {
                    (Some(a), Some(b)) if a == b => {
                        self.cells[dst] = Some(a * 2);
                        self.cells[src] = None;
                        self.tile_count -= 1;
                        merges += 1;
                    }
                    _ => {}
                }
            }
        }
        merges
    }

    /// Slide, merge and slide again. Returns the number of merges.
    ///
    /// Does not spawn. Callers check [`can_move`](Self::can_move) first.
    pub(crate) fn shift(&mut self, dir: Direction) -> u32 {
        self.slide(dir);
        let merges = self.merge(dir);
        self.slide(dir);
        merges
    }

    /// The grid after moving in `dir` without a spawn, plus its merge count.
    ///
    /// Returns `None` if nothing can move in that direction.
    #[must_use]
    pub fn preview(&self, dir: Direction) -> Option<(Grid, u32)> {
        if !self.can_move(dir) {
            return None;
        }
        let mut next = self.clone();
        let merges = next.shift(dir);
        Some((next, merges))
    }

    #[inline]
    fn idx_of(&self, dir: Direction, line: usize, offset: usize) -> usize {
        let (r, c) = dir.cell(self.size, line, offset);
        self.idx(r, c)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .max_value()
            .map_or(1, |v| v.to_string().len())
            .max(4);
        for row in self.cells.chunks(self.size) {
            let line: Vec<String> = row
                .iter()
                .map(|cell| match cell {
                    Some(v) => format!("{:>width$}", v, width = width),
                    None => format!("{:>width$}", ".", width = width),
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

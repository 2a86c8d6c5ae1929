//! Core rule engine for the sliding-tile merge puzzle.
//!
//! This module defines the game's fundamental components:
//! - `Direction`: The four directions tiles can be slid toward.
//! - `Grid`: The square board of tile values, with the movability predicate,
//!   move execution (compaction and merging), rotation, and rendering.
//! - `Snapshot`: A deep copy of a grid's values used to preview or undo one move.
//!
//! Only the LEFT slide is implemented directly. Every other direction is
//! obtained by rotating the grid so that direction becomes LEFT, sliding, and
//! rotating back.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

use crate::error::GridError;

/// The board size used when none is given. The board is always square.
pub const DEFAULT_GRID_SIZE: usize = 4;

/// Minimum column width used when rendering a grid as text.
pub const NUMBER_WIDTH: usize = 5;

/// One of the four directions a move can slide tiles toward.
///
/// Serialized with upper-case names (`"UP"`, `"DOWN"`, `"LEFT"`, `"RIGHT"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
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
    /// All four directions, in the order a caller would usually list them.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns the upper-case name of the direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use tile_merge::engine::Direction;
    /// assert_eq!(Direction::Left.as_str(), "LEFT");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        }
    }

    /// Number of clockwise quarter turns that carry this direction onto LEFT.
    ///
    /// One clockwise turn moves the bottom edge to the left edge, so DOWN needs
    /// one turn, RIGHT two and UP three.
    pub fn quarter_turns_to_left(&self) -> i32 {
        match self {
            Direction::Left => 0,
            Direction::Down => 1,
            Direction::Right => 2,
            Direction::Up => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = GridError;

    /// Parses a direction name (case-insensitive) or one of the `w a s d` keys.
    ///
    /// Anything else is rejected with `GridError::UnknownDirection`; there is
    /// no silent fallback.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "w" => Ok(Direction::Up),
            "down" | "s" => Ok(Direction::Down),
            "left" | "a" => Ok(Direction::Left),
            "right" | "d" => Ok(Direction::Right),
            _ => Err(GridError::UnknownDirection(s.to_string())),
        }
    }
}

/// A deep copy of a grid's cell values.
///
/// Produced by `Grid::snapshot` and consumed by `Grid::restore`. The contents
/// are only reachable by restoring them into a grid of the same size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    size: usize,
    cells: Vec<u64>,
}

impl Snapshot {
    /// Side length of the grid this snapshot was taken from.
    pub fn size(&self) -> usize {
        self.size
    }
}

/// Represents the game board as a square grid of tile values.
///
/// A value of `0` is an empty cell; any other value is a tile. Cells are
/// stored row-major in a single buffer and addressed by `(row, column)`.
///
/// The grid does not check that tiles are powers of two. Merges only ever add
/// two equal values, so a grid built from powers of two stays that way.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    cells: Vec<u64>,
}

impl Grid {
    /// Creates an empty `size` x `size` grid.
    ///
    /// # Errors
    /// Returns `GridError::ZeroSize` if `size` is 0.
    ///
    /// # Examples
    /// ```
    /// use tile_merge::engine::Grid;
    /// let grid = Grid::new(4).unwrap();
    /// assert_eq!(grid.get(0, 0), 0);
    /// assert_eq!(grid.tile_count(), 0);
    /// ```
    pub fn new(size: usize) -> Result<Self, GridError> {
        if size == 0 {
            return Err(GridError::ZeroSize);
        }
        Ok(Grid {
            size,
            cells: vec![0; size * size],
        })
    }

    /// Creates a grid from a square matrix of values, one slice per row.
    ///
    /// This is useful for testing or setting up specific game scenarios.
    ///
    /// # Arguments
    /// * `rows`: The rows of the board, top to bottom. The number of rows sets
    ///   the grid size and every row must have exactly that many cells.
    ///
    /// # Errors
    /// * `GridError::ZeroSize` if `rows` is empty.
    /// * `GridError::NotSquare` for the first row whose length differs from
    ///   the number of rows.
    ///
    /// # Examples
    /// ```
    /// use tile_merge::engine::Grid;
    /// let grid = Grid::from_rows(&[[2, 0], [0, 4]]).unwrap();
    /// assert_eq!(grid.size(), 2);
    /// assert_eq!(grid.get(1, 1), 4);
    ///
    /// assert!(Grid::from_rows(&[vec![2, 0], vec![4]]).is_err());
    /// ```
    pub fn from_rows<R: AsRef<[u64]>>(rows: &[R]) -> Result<Self, GridError> {
        let size = rows.len();
        if size == 0 {
            return Err(GridError::ZeroSize);
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != size {
                return Err(GridError::NotSquare {
                    row,
                    expected: size,
                    found: values.len(),
                });
            }
            cells.extend_from_slice(values);
        }
        Ok(Grid { size, cells })
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, r: usize, c: usize) -> usize {
        assert!(
            r < self.size && c < self.size,
            "cell ({}, {}) is outside a {}x{} grid",
            r,
            c,
            self.size,
            self.size
        );
        r * self.size + c
    }

    /// Returns the value at row `r`, column `c` (0 means empty).
    ///
    /// # Panics
    /// Panics if `r` or `c` is not less than `size()`.
    pub fn get(&self, r: usize, c: usize) -> u64 {
        self.cells[self.index(r, c)]
    }

    /// Sets the value at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` is not less than `size()`.
    pub fn set(&mut self, r: usize, c: usize, value: u64) {
        let idx = self.index(r, c);
        self.cells[idx] = value;
    }

    /// All cell values in row-major order.
    pub fn cells(&self) -> &[u64] {
        &self.cells
    }

    /// Iterates over the rows, top to bottom.
    pub fn rows(&self) -> std::slice::Chunks<'_, u64> {
        self.cells.chunks(self.size)
    }

    /// Copies the grid out as a matrix of rows.
    pub fn to_rows(&self) -> Vec<Vec<u64>> {
        self.rows().map(<[u64]>::to_vec).collect()
    }

    /// Sum of all cell values. Moves never change it.
    ///
    /// Widened to `u128` so grids holding tiles near `u64::MAX` still add up.
    pub fn tile_sum(&self) -> u128 {
        self.cells.iter().map(|&v| u128::from(v)).sum()
    }

    /// Number of non-empty cells.
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != 0).count()
    }

    /// Coordinates of every empty cell, in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v == 0)
            .map(|(idx, _)| (idx / self.size, idx % self.size))
            .collect()
    }

    // Flat index of the cell `offset` steps away from the edge `direction`
    // slides toward, on the `line`-th row (LEFT/RIGHT) or column (UP/DOWN).
    fn line_index(&self, direction: Direction, line: usize, offset: usize) -> usize {
        let last = self.size - 1;
        match direction {
            Direction::Left => self.index(line, offset),
            Direction::Right => self.index(line, last - offset),
            Direction::Up => self.index(offset, line),
            Direction::Down => self.index(last - offset, line),
        }
    }

    /// Checks whether sliding toward `direction` would change the grid.
    ///
    /// Looks at every pair of neighbouring cells along the direction of travel.
    /// The move is possible if, for some pair, the cell nearer the target edge
    /// is empty while the farther one holds a tile, or both hold the same tile.
    ///
    /// Checking neighbours only is enough for any grid size: if an empty cell
    /// lies anywhere before a tile in a line, the last empty cell before that
    /// tile is directly followed by a tile. If a line has no such gap, its
    /// tiles are already packed and a merge needs two equal neighbours.
    ///
    /// Two equal tiles whose sum does not fit in a `u64` never merge, so they
    /// do not count as a possible move.
    ///
    /// This never mutates the grid.
    ///
    /// # Examples
    /// ```
    /// use tile_merge::engine::{Direction, Grid};
    /// let grid = Grid::from_rows(&[[2, 4], [0, 0]]).unwrap();
    /// assert!(!grid.can_move(Direction::Left));
    /// assert!(grid.can_move(Direction::Down));
    /// ```
    pub fn can_move(&self, direction: Direction) -> bool {
        (0..self.size).any(|line| {
            (0..self.size - 1).any(|offset| {
                let near = self.cells[self.line_index(direction, line, offset)];
                let far = self.cells[self.line_index(direction, line, offset + 1)];
                (near == 0 && far != 0) || mergeable(near, far)
            })
        })
    }

    /// Slides every tile toward `direction`, merging equal neighbours.
    ///
    /// Each line along the direction is compacted toward the target edge,
    /// merged once from the edge outward (a tile produced by a merge does not
    /// merge again in the same move), and compacted again. `[2, 2, 2, 2]`
    /// slid left becomes `[4, 4, 0, 0]`, not `[8, 0, 0, 0]`.
    ///
    /// Directions other than LEFT rotate the grid onto LEFT, slide, and rotate
    /// back, so the grid ends in its original orientation.
    ///
    /// # Returns
    /// `true` if any cell changed. A blocked move leaves the grid untouched
    /// and returns `false`.
    ///
    /// # Examples
    /// ```
    /// use tile_merge::engine::{Direction, Grid};
    /// let mut grid = Grid::from_rows(&[[2, 0, 2, 2], [0; 4], [0; 4], [0; 4]]).unwrap();
    /// assert!(grid.slide(Direction::Left));
    /// assert_eq!(grid.to_rows()[0], vec![4, 2, 0, 0]);
    /// ```
    pub fn slide(&mut self, direction: Direction) -> bool {
        if !self.can_move(direction) {
            debug!(%direction, "slide blocked");
            return false;
        }

        let turns = direction.quarter_turns_to_left();
        self.rotate(turns);
        for row in self.cells.chunks_mut(self.size) {
            slide_line_left(row);
        }
        self.rotate((4 - turns) % 4);

        debug!(%direction, tiles = self.tile_count(), "slide applied");
        true
    }

    /// Rotates the grid 90 degrees clockwise, `times` modulo 4 times.
    ///
    /// A non-positive `times` does nothing. Each quarter turn walks the rings
    /// of the grid from the outside in and cycles four cells at a time, so the
    /// rotation happens in place for any grid size.
    pub fn rotate(&mut self, times: i32) {
        if times <= 0 {
            return;
        }
        let turns = times % 4;
        trace!(turns, "rotating grid");
        for _ in 0..turns {
            self.rotate_once();
        }
    }

    fn rotate_once(&mut self) {
        let n = self.size;
        let g = &mut self.cells;
        let at = |r: usize, c: usize| r * n + c;

        for i in 0..n / 2 {
            for j in i..n - 1 - i {
                // (i, j) <- (n-1-j, i) <- (n-1-i, n-1-j) <- (j, n-1-i) <- (i, j)
                let held = g[at(i, j)];
                g[at(i, j)] = g[at(n - 1 - j, i)];
                g[at(n - 1 - j, i)] = g[at(n - 1 - i, n - 1 - j)];
                g[at(n - 1 - i, n - 1 - j)] = g[at(j, n - 1 - i)];
                g[at(j, n - 1 - i)] = held;
            }
        }
    }

    /// Takes a deep copy of the current cell values.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            size: self.size,
            cells: self.cells.clone(),
        }
    }

    /// Overwrites every cell with the values held in `snapshot`.
    ///
    /// # Errors
    /// Returns `GridError::DimensionMismatch` if the snapshot came from a grid
    /// of a different size. The grid is left unchanged in that case.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), GridError> {
        if snapshot.size != self.size {
            return Err(GridError::DimensionMismatch {
                expected: self.size,
                found: snapshot.size,
            });
        }
        self.cells.copy_from_slice(&snapshot.cells);
        debug!(size = self.size, "grid restored from snapshot");
        Ok(())
    }

    /// Renders the grid as it would look after sliding toward `direction`.
    ///
    /// The grid is snapshotted, slid, rendered and restored, so it is
    /// unchanged when this returns.
    pub fn render_preview(&mut self, direction: Direction) -> Result<String, GridError> {
        let saved = self.snapshot();
        self.slide(direction);
        let rendered = self.to_string();
        self.restore(&saved)?;
        Ok(rendered)
    }
}

/// Moves every tile in `line` toward index 0, keeping their order.
fn compact(line: &mut [u64]) {
    let mut write = 0;
    for read in 0..line.len() {
        if line[read] != 0 {
            if read != write {
                line[write] = line[read];
                line[read] = 0;
            }
            write += 1;
        }
    }
}

/// Whether two neighbouring cells merge: equal tiles whose sum fits in a `u64`.
fn mergeable(near: u64, far: u64) -> bool {
    near != 0 && near == far && near.checked_add(far).is_some()
}

/// Merges equal neighbours from index 0 outward, each cell at most once.
fn merge(line: &mut [u64]) {
    let mut i = 0;
    while i + 1 < line.len() {
        if mergeable(line[i], line[i + 1]) {
            line[i] += line[i + 1];
            line[i + 1] = 0;
            i += 2;
        } else {
            i += 1;
        }
    }
}

fn slide_line_left(line: &mut [u64]) {
    compact(line);
    merge(line);
    compact(line);
}

impl fmt::Display for Grid {
    /// Right-justifies every value in a column of at least `NUMBER_WIDTH`
    /// characters (wider if a value needs it) and ends each row with `\n`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widest = self
            .cells
            .iter()
            .map(|v| v.to_string().len())
            .max()
            .unwrap_or(1);
        let width = NUMBER_WIDTH.max(widest + 1);

        for row in self.rows() {
            for value in row {
                write!(f, "{:>width$}", value, width = width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

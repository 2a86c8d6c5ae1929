//! Random tile placement for live play.
//!
//! The engine never spawns tiles on its own; a game loop calls into a
//! `TileSpawner` after every successful slide.
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::engine::Grid;
use crate::error::GridError;

/// Number of tiles placed on a fresh board.
pub const NUM_START_TILES: usize = 2;

/// Chance (out of 100) that a spawned tile is a 2 rather than a 4.
pub const TWO_PROBABILITY: u32 = 90;

/// A tile placed by the spawner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Spawned {
    pub row: usize,
    pub col: usize,
    pub value: u64,
}

/// Places 2s and 4s on empty cells.
#[derive(Clone, Debug)]
pub struct TileSpawner {
    rng: SmallRng,
}

impl TileSpawner {
    /// Creates a spawner whose placements are fully determined by `seed`.
    pub fn new(seed: u64) -> Self {
        TileSpawner {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Creates a spawner seeded from the operating system.
    pub fn from_entropy() -> Self {
        TileSpawner {
            rng: SmallRng::from_entropy(),
        }
    }

    fn draw_value(&mut self) -> u64 {
        if self.rng.gen_range(0..100) < TWO_PROBABILITY {
            2
        } else {
            4
        }
    }

    /// Puts one new tile on a uniformly chosen empty cell.
    ///
    /// # Returns
    /// The placed tile, or `None` if the grid has no empty cell.
    pub fn spawn(&mut self, grid: &mut Grid) -> Option<Spawned> {
        let empty = grid.empty_cells();
        let &(row, col) = empty.choose(&mut self.rng)?;
        let value = self.draw_value();
        grid.set(row, col, value);
        debug!(row, col, value, "spawned tile");
        Some(Spawned { row, col, value })
    }

    /// Places up to `NUM_START_TILES` tiles and returns how many were placed.
    pub fn populate(&mut self, grid: &mut Grid) -> usize {
        (0..NUM_START_TILES)
            .filter_map(|_| self.spawn(grid))
            .count()
    }

    /// Creates an empty `size` x `size` grid holding the starting tiles.
    pub fn new_grid(&mut self, size: usize) -> Result<Grid, GridError> {
        let mut grid = Grid::new(size)?;
        self.populate(&mut grid);
        Ok(grid)
    }
}

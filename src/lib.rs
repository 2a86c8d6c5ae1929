//! # Tile Merge Library
//!
//! This library provides the rule engine for a 2048-style sliding-tile merge
//! puzzle: a square grid of tile values where a move slides every tile toward
//! one edge and merges equal neighbours into a tile of double value.
//!
//! It is used by two binaries:
//! - `play`: Allows interactive gameplay via the command line.
//! - `preview`: Loads a board from a file and shows what each move would do.
//!
//! ## Modules
//! - `engine`: Contains the board representation (`Grid`), the slide directions
//!   (`Direction`), and all move mechanics (movability, compaction, merging,
//!   rotation, snapshot/restore).
//! - `error`: The `GridError` type returned by fallible operations.
//! - `spawn`: Places new random tiles for live play (`TileSpawner`).
//! - `utils`: Provides utility functions, such as parsing boards from text.

pub mod engine;
pub mod error;
pub mod spawn;
pub mod utils;

pub use engine::{Direction, Grid, Snapshot};
pub use error::GridError;

//! Spatial data structures for tiles and grids
//!
//! This module contains:
//! - Tiles, their eight symmetries and edge extraction
//! - The grid of tile placements
//! - Seeded generation of synthetic puzzles

/// Seeded synthetic puzzle generation
pub mod generator;
/// Grid of tile placements
pub mod grid;
/// Tiles, orientations and edge extraction
pub mod tiles;

pub use grid::{Grid, Placement};
pub use tiles::{Direction, Orientation, Tile};

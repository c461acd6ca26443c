//! Square-tile jigsaw assembly and rotation-invariant motif search
//!
//! Tiles are square bitmaps that may appear rotated or mirrored. Tiles whose
//! borders match are neighbours; the system finds the four corners, assembles
//! the full grid, strips every border into one composite image and counts the
//! cells of that image not covered by a motif.

/// Edge index, assembly and the end-to-end solve pipeline
pub mod algorithm;
/// Composite image construction and motif search
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Tiles, grids and puzzle generation
pub mod spatial;

pub use io::error::{JigsawError, Result};

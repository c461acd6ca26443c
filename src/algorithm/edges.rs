//! Edge index mapping border patterns to the tiles that expose them
//!
//! Every tile contributes its four physical edges in both walk directions,
//! which covers the edges it exposes under all eight symmetries. Entries are
//! never consumed: an edge is unmatched when exactly one tile exposes it.

use std::collections::HashMap;

use log::debug;

use crate::algorithm::bitset::TileBitset;
use crate::io::error::{JigsawError, Result};
use crate::spatial::tiles::{Edge, Tile, reversed};

/// Number of corner tiles in any square jigsaw
pub const CORNER_COUNT: usize = 4;

/// Lookup from edge pattern to the indices of tiles exposing it
#[derive(Debug, Clone, Default)]
pub struct EdgeIndex {
    entries: HashMap<Edge, Vec<usize>>,
    tile_count: usize,
}

impl EdgeIndex {
    /// Index every edge of every tile in both walk directions
    pub fn build(tiles: &[Tile]) -> Self {
        let mut entries: HashMap<Edge, Vec<usize>> = HashMap::new();
        for (index, tile) in tiles.iter().enumerate() {
            for edge in tile.edges() {
                let reverse = reversed(&edge);
                for pattern in [edge, reverse] {
                    let owners = entries.entry(pattern).or_default();
                    // Palindromic edges would otherwise list the tile twice
                    if owners.last() != Some(&index) {
                        owners.push(index);
                    }
                }
            }
        }

        debug!(
            "Indexed {} distinct edge patterns over {} tiles",
            entries.len(),
            tiles.len()
        );

        Self {
            entries,
            tile_count: tiles.len(),
        }
    }

    /// Tile indices exposing an edge pattern, in ascending order
    pub fn lookup(&self, edge: &Edge) -> &[usize] {
        self.entries
            .get(edge)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Tile indices exposing an edge pattern as a bitset
    pub fn lookup_set(&self, edge: &Edge) -> TileBitset {
        TileBitset::from_indices(self.lookup(edge), self.tile_count)
    }

    /// Whether exactly one tile exposes the edge
    pub fn is_unmatched(&self, edge: &Edge) -> bool {
        self.lookup(edge).len() == 1
    }

    /// Number of distinct edge patterns
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no edges have been indexed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of tiles the index was built over
    pub const fn tile_count(&self) -> usize {
        self.tile_count
    }

    /// Count the physical sides of a tile no other tile can match
    pub fn unmatched_sides(&self, tile: &Tile) -> usize {
        tile.edges()
            .iter()
            .filter(|edge| self.is_unmatched(edge))
            .count()
    }

    /// Split tiles into corner, border and interior tiles
    ///
    /// # Errors
    ///
    /// Returns `CornerCount` unless exactly four tiles have two unmatched sides
    pub fn classify(&self, tiles: &[Tile]) -> Result<TileClassification> {
        let mut classification = TileClassification::default();
        for (index, tile) in tiles.iter().enumerate() {
            match self.unmatched_sides(tile) {
                0 => classification.interior.push(index),
                1 => classification.borders.push(index),
                2 => classification.corners.push(index),
                // Three or more open sides can't occur in a grid wider than one tile
                _ => classification.invalid.push(index),
            }
        }

        debug!(
            "Classified tiles: {} corners, {} borders, {} interior, {} invalid",
            classification.corners.len(),
            classification.borders.len(),
            classification.interior.len(),
            classification.invalid.len()
        );

        if classification.corners.len() != CORNER_COUNT {
            return Err(JigsawError::CornerCount {
                found: classification.corners.len(),
            });
        }
        Ok(classification)
    }
}

/// Tile indices grouped by number of unmatched sides
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileClassification {
    /// Tiles with exactly two unmatched sides
    pub corners: Vec<usize>,
    /// Tiles with exactly one unmatched side
    pub borders: Vec<usize>,
    /// Tiles whose sides all match another tile
    pub interior: Vec<usize>,
    /// Tiles with three or four unmatched sides
    pub invalid: Vec<usize>,
}

impl TileClassification {
    /// Product of the corner tile identifiers
    ///
    /// # Errors
    ///
    /// Returns an error if a corner index is out of range or the product overflows
    pub fn corner_product(&self, tiles: &[Tile]) -> Result<u64> {
        self.corners.iter().try_fold(1_u64, |product, &index| {
            let tile = tiles.get(index).ok_or(JigsawError::InvalidTileIndex {
                index,
                max_tiles: tiles.len(),
            })?;
            product
                .checked_mul(tile.id())
                .ok_or_else(|| JigsawError::Computation {
                    operation: "corner product",
                    reason: format!("{product} * {} overflows u64", tile.id()),
                })
        })
    }
}

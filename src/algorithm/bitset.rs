use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset over tile indices
///
/// Indices are 0-based positions in the puzzle's tile list. Used for
/// candidate sets during assembly and for tracking placed tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBitset {
    bits: BitVec,
    max_tiles: usize,
}

impl TileBitset {
    /// Create a bitset with no tiles present
    pub fn new(max_tiles: usize) -> Self {
        Self {
            bits: bitvec![0; max_tiles],
            max_tiles,
        }
    }

    /// Create a bitset from a list of tile indices
    ///
    /// Indices outside `0..max_tiles` are ignored.
    pub fn from_indices(indices: &[usize], max_tiles: usize) -> Self {
        let mut bitset = Self::new(max_tiles);
        for &tile in indices {
            bitset.insert(tile);
        }
        bitset
    }

    /// Insert a tile index
    pub fn insert(&mut self, tile: usize) {
        if tile < self.max_tiles {
            self.bits.set(tile, true);
        }
    }

    /// Remove a tile index
    pub fn remove(&mut self, tile: usize) {
        if tile < self.max_tiles {
            self.bits.set(tile, false);
        }
    }

    /// Test tile membership
    pub fn contains(&self, tile: usize) -> bool {
        self.bits.get(tile).as_deref() == Some(&true)
    }

    /// Add every tile of another set in-place
    pub fn union_with(&mut self, other: &Self) {
        self.bits |= &other.bits;
    }

    /// Drop every tile present in another set
    pub fn difference_with(&mut self, other: &Self) {
        for index in other.bits.iter_ones() {
            self.remove(index);
        }
    }

    /// Test if no tiles are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count tiles in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Lowest tile index in the set
    pub fn first(&self) -> Option<usize> {
        self.bits.first_one()
    }

    /// Extract all tile indices in ascending order
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}

impl fmt::Display for TileBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileBitset({} tiles: {:?})", self.count(), self.to_vec())
    }
}

//! Square grid of tile placements
//!
//! A grid position holds a tile index and the orientation chosen for it,
//! never a transformed copy of the tile. Positions are `[x, y]` with `x`
//! growing east and `y` growing south; the backing array is indexed
//! `(y, x)`.

use ndarray::Array2;

use crate::io::error::{JigsawError, Result};
use crate::spatial::tiles::{Direction, Orientation};

/// A tile fixed at a grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Index of the tile in the puzzle's tile list
    pub tile: usize,
    /// Symmetry applied to the tile at this position
    pub orientation: Orientation,
}

/// N×N grid filled in row-major scan order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dimension: usize,
    cells: Array2<Option<Placement>>,
    resolved: usize,
}

impl Grid {
    /// Create an empty grid able to hold exactly `tile_count` tiles
    ///
    /// # Errors
    ///
    /// Returns an error if `tile_count` is zero or not a perfect square
    pub fn for_tile_count(tile_count: usize) -> Result<Self> {
        let dimension = dimension_for(tile_count)?;
        Ok(Self {
            dimension,
            cells: Array2::from_elem((dimension, dimension), None),
            resolved: 0,
        })
    }

    /// Number of tiles per side
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Placement at a position, if resolved
    pub fn get(&self, position: [usize; 2]) -> Option<&Placement> {
        self.cells
            .get((position[1], position[0]))
            .and_then(Option::as_ref)
    }

    /// Resolve a position
    ///
    /// # Errors
    ///
    /// Returns an error if the position is outside the grid or already resolved
    pub fn place(&mut self, position: [usize; 2], placement: Placement) -> Result<()> {
        let dimension = self.dimension;
        let cell = self
            .cells
            .get_mut((position[1], position[0]))
            .ok_or_else(|| JigsawError::InvalidParameter {
                parameter: "position",
                value: format!("({}, {})", position[0], position[1]),
                reason: format!("outside the {dimension}x{dimension} grid"),
            })?;
        if cell.is_some() {
            return Err(JigsawError::InvalidParameter {
                parameter: "position",
                value: format!("({}, {})", position[0], position[1]),
                reason: "position is already resolved".to_string(),
            });
        }
        *cell = Some(placement);
        self.resolved += 1;
        Ok(())
    }

    /// Number of resolved positions
    pub const fn resolved(&self) -> usize {
        self.resolved
    }

    /// Whether every position holds a tile
    pub const fn is_complete(&self) -> bool {
        self.resolved == self.dimension * self.dimension
    }

    /// Resolved neighbour of a position in the given direction
    pub fn neighbor(&self, position: [usize; 2], direction: Direction) -> Option<&Placement> {
        let [x, y] = position;
        let target = match direction {
            Direction::North => [x, y.checked_sub(1)?],
            Direction::West => [x.checked_sub(1)?, y],
            Direction::South => [x, y + 1],
            Direction::East => [x + 1, y],
        };
        self.get(target)
    }

    /// Positions in scan order: `y` outer, `x` inner
    ///
    /// North and west neighbours of every position come before it.
    pub fn scan_order(&self) -> impl Iterator<Item = [usize; 2]> + use<> {
        let dimension = self.dimension;
        (0..dimension).flat_map(move |y| (0..dimension).map(move |x| [x, y]))
    }

    /// Resolved placements in scan order
    pub fn placements(&self) -> impl Iterator<Item = ([usize; 2], &Placement)> + '_ {
        self.scan_order()
            .filter_map(|position| self.get(position).map(|placement| (position, placement)))
    }

    /// Tile indices at the four corners: NW, NE, SW, SE
    pub fn corner_tiles(&self) -> Option<[usize; 4]> {
        let last = self.dimension.checked_sub(1)?;
        Some([
            self.get([0, 0])?.tile,
            self.get([last, 0])?.tile,
            self.get([0, last])?.tile,
            self.get([last, last])?.tile,
        ])
    }
}

/// Side length of the square grid holding `tile_count` tiles
///
/// # Errors
///
/// Returns an error if `tile_count` is zero or not a perfect square
pub fn dimension_for(tile_count: usize) -> Result<usize> {
    let dimension = tile_count.isqrt();
    if tile_count == 0 || dimension * dimension != tile_count {
        return Err(JigsawError::NotSquare { tile_count });
    }
    Ok(dimension)
}

//! Square tiles, their eight symmetries and border edge extraction
//!
//! A tile's cell data is never mutated after construction. Orientation is a
//! separate value that is applied on demand, so the same tile can be viewed
//! in its original form or under any of the eight symmetries of the square.

use bitvec::prelude::*;
use ndarray::{Array2, ArrayView2, Axis};
use std::fmt;

use crate::io::error::{JigsawError, Result};

/// Tile identifier as printed in the puzzle label line
pub type TileId = u64;

/// Border row or column read as a boolean sequence
///
/// Rows read left to right, columns top to bottom.
pub type Edge = BitVec;

/// One of the eight symmetries of a square
///
/// Applying an orientation rotates the cells counter-clockwise by
/// `quarter_turns * 90°` first, then mirrors left-right if `mirrored`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Orientation {
    /// Counter-clockwise quarter turns (0..4)
    pub quarter_turns: u8,
    /// Whether the rotated cells are mirrored left-right
    pub mirrored: bool,
}

impl Orientation {
    /// The untransformed orientation
    pub const IDENTITY: Self = Self {
        quarter_turns: 0,
        mirrored: false,
    };

    /// All eight symmetries in generation order
    ///
    /// For every quarter turn the unmirrored view comes before the mirrored
    /// one, so the identity is always first.
    pub const ALL: [Self; 8] = [
        Self::new(0, false),
        Self::new(0, true),
        Self::new(1, false),
        Self::new(1, true),
        Self::new(2, false),
        Self::new(2, true),
        Self::new(3, false),
        Self::new(3, true),
    ];

    /// Create an orientation, reducing the turn count modulo 4
    pub const fn new(quarter_turns: u8, mirrored: bool) -> Self {
        Self {
            quarter_turns: quarter_turns % 4,
            mirrored,
        }
    }

    /// Rotation angle in degrees
    pub const fn degrees(self) -> u16 {
        self.quarter_turns as u16 * 90
    }

    /// The orientation undoing this one
    ///
    /// Mirrored orientations are their own inverse; pure rotations invert
    /// to the complementary rotation.
    pub const fn inverse(self) -> Self {
        if self.mirrored {
            self
        } else {
            Self::new(4 - self.quarter_turns, false)
        }
    }

    /// Apply this orientation to a square matrix
    pub fn apply<T: Clone>(self, cells: &ArrayView2<'_, T>) -> Array2<T> {
        let mut view = cells.view();
        for _ in 0..self.quarter_turns {
            // Transpose then flip rows: one counter-clockwise quarter turn
            view.swap_axes(0, 1);
            view.invert_axis(Axis(0));
        }
        if self.mirrored {
            view.invert_axis(Axis(1));
        }
        view.to_owned()
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mirrored {
            write!(f, "{}°+mirror", self.degrees())
        } else {
            write!(f, "{}°", self.degrees())
        }
    }
}

/// Compass side of a square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// First row
    North,
    /// Last column
    East,
    /// Last row
    South,
    /// First column
    West,
}

impl Direction {
    /// All four sides, clockwise from north
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// The facing side of a neighbour in this direction
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }
}

/// Extract the border edge of a matrix on the given side
///
/// Returns an empty edge for an empty matrix.
pub fn edge(cells: &ArrayView2<'_, bool>, direction: Direction) -> Edge {
    let (rows, cols) = cells.dim();
    if rows == 0 || cols == 0 {
        return Edge::new();
    }
    match direction {
        Direction::North => cells.row(0).iter().copied().collect(),
        Direction::South => cells.row(rows - 1).iter().copied().collect(),
        Direction::West => cells.column(0).iter().copied().collect(),
        Direction::East => cells.column(cols - 1).iter().copied().collect(),
    }
}

/// Reverse the walk direction of an edge
pub fn reversed(edge: &Edge) -> Edge {
    let mut reversed = edge.clone();
    reversed.reverse();
    reversed
}

/// Lazily produce all eight symmetric views of a matrix
///
/// The sequence is finite and can be restarted by calling this again.
pub fn symmetries<'a, T: Clone + 'a>(
    cells: ArrayView2<'a, T>,
) -> impl Iterator<Item = (Array2<T>, Orientation)> + 'a {
    Orientation::ALL
        .into_iter()
        .map(move |orientation| (orientation.apply(&cells), orientation))
}

/// A square patch of boolean cells with a unique identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    id: TileId,
    cells: Array2<bool>,
}

impl Tile {
    /// Create a tile from its identifier and cells
    ///
    /// # Errors
    ///
    /// Returns an error if the cell matrix is empty or not square
    pub fn new(id: TileId, cells: Array2<bool>) -> Result<Self> {
        let (rows, cols) = cells.dim();
        if rows == 0 || rows != cols {
            return Err(JigsawError::InvalidSourceData {
                reason: format!("tile {id} is {rows}x{cols}, expected a non-empty square"),
            });
        }
        Ok(Self { id, cells })
    }

    /// Tile identifier
    pub const fn id(&self) -> TileId {
        self.id
    }

    /// Side length of the tile
    pub fn size(&self) -> usize {
        self.cells.nrows()
    }

    /// Cells in their original orientation
    pub const fn cells(&self) -> &Array2<bool> {
        &self.cells
    }

    /// Cells under the given orientation
    pub fn oriented(&self, orientation: Orientation) -> Array2<bool> {
        orientation.apply(&self.cells.view())
    }

    /// All eight symmetric views of the tile with their orientation labels
    pub fn symmetries(&self) -> impl Iterator<Item = (Array2<bool>, Orientation)> + '_ {
        symmetries(self.cells.view())
    }

    /// Border edge on one side after applying an orientation
    pub fn edge(&self, orientation: Orientation, direction: Direction) -> Edge {
        edge(&self.oriented(orientation).view(), direction)
    }

    /// The four physical border edges in the original orientation
    pub fn edges(&self) -> [Edge; 4] {
        let view = self.cells.view();
        Direction::ALL.map(|direction| edge(&view, direction))
    }

    /// Number of active cells
    pub fn active_cells(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tile {} ({}x{})", self.id, self.size(), self.size())
    }
}

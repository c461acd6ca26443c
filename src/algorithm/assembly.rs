//! Grid assembly by deduction from already-resolved neighbours
//!
//! Positions are resolved in scan order, so every position except the first
//! has a resolved north or west neighbour. The tile sharing those edges is
//! the only candidate left once neighbours and placed tiles are removed, and
//! its orientation is the first symmetry whose north and west edges agree
//! with the neighbours. Nothing is ever undone: any violated uniqueness
//! assumption is reported as an error at the offending position.

use log::debug;

use crate::algorithm::bitset::TileBitset;
use crate::algorithm::edges::EdgeIndex;
use crate::io::error::{JigsawError, Result};
use crate::spatial::grid::{Grid, Placement};
use crate::spatial::tiles::{self, Direction, Edge, Orientation, Tile};

/// Sides constrained by already-resolved neighbours
const CONSTRAINED_SIDES: [Direction; 2] = [Direction::North, Direction::West];

/// Edge a resolved neighbour presents to the position being resolved
#[derive(Debug, Clone)]
struct SharedEdge {
    /// Side of the position being resolved
    side: Direction,
    /// Pattern read from the neighbour's facing side
    pattern: Edge,
    /// Tile index of the neighbour
    neighbor: usize,
}

/// Fills a grid with tiles and orientations consistent along every seam
pub struct GridAssembler<'a> {
    tiles: &'a [Tile],
    index: &'a EdgeIndex,
    grid: Grid,
    placed: TileBitset,
}

impl<'a> GridAssembler<'a> {
    /// Prepare an empty grid for the given tiles
    ///
    /// # Errors
    ///
    /// Returns an error if the tile count is not a perfect square
    pub fn new(tiles: &'a [Tile], index: &'a EdgeIndex) -> Result<Self> {
        Ok(Self {
            tiles,
            index,
            grid: Grid::for_tile_count(tiles.len())?,
            placed: TileBitset::new(tiles.len()),
        })
    }

    /// Assemble the full grid starting from one of the corner tiles
    ///
    /// The corner with the smallest identifier goes to the top-left position,
    /// which makes the result reproducible for a given input.
    ///
    /// # Errors
    ///
    /// Returns an error if no corner is given, or if any position has zero or
    /// several candidates, or no orientation satisfying its neighbours
    pub fn assemble(mut self, corners: &[usize]) -> Result<Grid> {
        let corner = self.smallest_corner(corners)?;
        self.place_initial_corner(corner)?;

        for position in self.grid.scan_order().skip(1) {
            self.resolve_position(position)?;
        }

        debug!(
            "Assembled {}x{} grid",
            self.grid.dimension(),
            self.grid.dimension()
        );
        Ok(self.grid)
    }

    /// Grid in its current, possibly partial, state
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Put a corner tile at the top-left position
    ///
    /// The first symmetry leaving both the north and the west edge unmatched
    /// is chosen.
    ///
    /// # Errors
    ///
    /// Returns an error if the tile index is invalid or no symmetry leaves both
    /// edges unmatched
    pub fn place_initial_corner(&mut self, corner: usize) -> Result<()> {
        let tile = self.tile(corner)?;
        let orientation = tile
            .symmetries()
            .find(|(cells, _)| {
                let view = cells.view();
                self.index
                    .is_unmatched(&tiles::edge(&view, Direction::North))
                    && self
                        .index
                        .is_unmatched(&tiles::edge(&view, Direction::West))
            })
            .map(|(_, orientation)| orientation)
            .ok_or(JigsawError::OrientationExhausted {
                position: [0, 0],
                tile_id: tile.id(),
            })?;

        self.commit([0, 0], corner, orientation)
    }

    /// Resolve one position from its north and west neighbours
    ///
    /// # Errors
    ///
    /// Returns an error if the position has no resolved neighbour, the
    /// candidate set does not contain exactly one tile, or no symmetry of the
    /// candidate agrees with every neighbour
    pub fn resolve_position(&mut self, position: [usize; 2]) -> Result<()> {
        let shared = self.shared_edges(position)?;
        if shared.is_empty() {
            return Err(JigsawError::NoCandidate { position });
        }

        let candidate = self.unique_candidate(position, &shared)?;
        let tile = self.tile(candidate)?;
        let orientation = Orientation::ALL
            .into_iter()
            .find(|&orientation| {
                let cells = tile.oriented(orientation);
                let view = cells.view();
                shared
                    .iter()
                    .all(|edge| tiles::edge(&view, edge.side) == edge.pattern)
            })
            .ok_or(JigsawError::OrientationExhausted {
                position,
                tile_id: tile.id(),
            })?;

        self.commit(position, candidate, orientation)
    }

    fn smallest_corner(&self, corners: &[usize]) -> Result<usize> {
        let mut best: Option<(u64, usize)> = None;
        for &corner in corners {
            let id = self.tile(corner)?.id();
            if best.is_none_or(|(best_id, _)| id < best_id) {
                best = Some((id, corner));
            }
        }
        best.map(|(_, corner)| corner)
            .ok_or(JigsawError::CornerCount { found: 0 })
    }

    fn shared_edges(&self, position: [usize; 2]) -> Result<Vec<SharedEdge>> {
        let mut shared = Vec::with_capacity(CONSTRAINED_SIDES.len());
        for side in CONSTRAINED_SIDES {
            if let Some(neighbor) = self.grid.neighbor(position, side) {
                // The neighbour's orientation is fixed; read its facing side as placed
                let pattern = self
                    .tile(neighbor.tile)?
                    .edge(neighbor.orientation, side.opposite());
                shared.push(SharedEdge {
                    side,
                    pattern,
                    neighbor: neighbor.tile,
                });
            }
        }
        Ok(shared)
    }

    fn unique_candidate(&self, position: [usize; 2], shared: &[SharedEdge]) -> Result<usize> {
        let mut candidates = TileBitset::new(self.tiles.len());
        let mut neighbors = TileBitset::new(self.tiles.len());
        for edge in shared {
            candidates.union_with(&self.index.lookup_set(&edge.pattern));
            neighbors.insert(edge.neighbor);
        }
        candidates.difference_with(&neighbors);
        candidates.difference_with(&self.placed);

        match (candidates.count(), candidates.first()) {
            (1, Some(candidate)) => Ok(candidate),
            (0, _) => Err(JigsawError::NoCandidate { position }),
            _ => Err(JigsawError::AmbiguousPlacement {
                position,
                candidates: candidates
                    .to_vec()
                    .into_iter()
                    .filter_map(|index| self.tiles.get(index).map(Tile::id))
                    .collect(),
            }),
        }
    }

    fn commit(&mut self, position: [usize; 2], tile: usize, orientation: Orientation) -> Result<()> {
        self.grid.place(position, Placement { tile, orientation })?;
        self.placed.insert(tile);
        debug!(
            "Placed tile {} at ({}, {}) with orientation {orientation}",
            self.tile(tile)?.id(),
            position[0],
            position[1]
        );
        Ok(())
    }

    fn tile(&self, index: usize) -> Result<&'a Tile> {
        self.tiles.get(index).ok_or(JigsawError::InvalidTileIndex {
            index,
            max_tiles: self.tiles.len(),
        })
    }
}

//! Stitching the interiors of an assembled grid into one image

use ndarray::{Array2, s};

use crate::io::error::{JigsawError, Result};
use crate::spatial::grid::Grid;
use crate::spatial::tiles::Tile;

/// Side length of a tile once its border ring is stripped
pub const fn interior_size(tile_size: usize) -> usize {
    tile_size.saturating_sub(2)
}

/// Build the composite image from a completed grid
///
/// Every tile contributes its oriented cells minus the outermost ring; the
/// interior of the tile at `[x, y]` lands at row `y * (D - 2)` and column
/// `x * (D - 2)`.
///
/// # Errors
///
/// Returns an error if a grid position is unresolved, refers to a missing
/// tile, or holds a tile whose size differs from the others
pub fn compose(tiles: &[Tile], grid: &Grid) -> Result<Array2<bool>> {
    let tile_size = tiles.first().map_or(0, Tile::size);
    let interior = interior_size(tile_size);
    let side = grid.dimension() * interior;
    let mut image = Array2::from_elem((side, side), false);

    for position in grid.scan_order() {
        let placement = grid
            .get(position)
            .ok_or(JigsawError::UnresolvedPosition { position })?;
        let tile = tiles
            .get(placement.tile)
            .ok_or(JigsawError::InvalidTileIndex {
                index: placement.tile,
                max_tiles: tiles.len(),
            })?;
        if tile.size() != tile_size {
            return Err(JigsawError::InvalidSourceData {
                reason: format!(
                    "tile {} is {}x{}, expected {tile_size}x{tile_size}",
                    tile.id(),
                    tile.size(),
                    tile.size()
                ),
            });
        }

        let cells = tile.oriented(placement.orientation);
        let [x, y] = position;
        let row = y * interior;
        let col = x * interior;
        image
            .slice_mut(s![row..row + interior, col..col + interior])
            .assign(&cells.slice(s![1..=interior, 1..=interior]));
    }

    Ok(image)
}

//! Frame capture and GIF generation for the assembly process

use crate::io::configuration::{
    ACTIVE_COLOR, BACKGROUND_COLOR, GIF_FINAL_FRAME_FACTOR, INACTIVE_COLOR,
};
use crate::io::error::{JigsawError, Result};
use crate::spatial::grid::Grid;
use crate::spatial::tiles::Tile;
use image::{Frame, Rgba, RgbaImage};
use ndarray::Array2;
use std::path::Path;

/// One tile placement as it appears in the animation
#[derive(Debug, Clone)]
pub struct PlacementFrame {
    /// Grid position `[x, y]`
    pub position: [usize; 2],
    /// Identifier of the placed tile
    pub tile_id: u64,
    /// Tile cells under the chosen orientation, border included
    pub cells: Array2<bool>,
}

/// Captures tile placements for visualization
///
/// Placements are recorded in assembly order; each animation frame shows
/// every tile placed so far, separated by one background pixel.
pub struct AssemblyCapture {
    placements: Vec<PlacementFrame>,
    dimension: usize,
    tile_size: usize,
    scale: u32,
}

impl AssemblyCapture {
    /// Create an empty capture for a `dimension` x `dimension` grid
    pub fn new(dimension: usize, tile_size: usize, scale: u32) -> Self {
        Self {
            placements: Vec::with_capacity(dimension * dimension),
            dimension,
            tile_size,
            scale: scale.max(1),
        }
    }

    /// Replay an assembled grid in scan order
    ///
    /// # Errors
    ///
    /// Returns an error if a grid position is empty or refers to a missing tile
    pub fn from_grid(tiles: &[Tile], grid: &Grid, scale: u32) -> Result<Self> {
        let tile_size = tiles.first().map_or(0, Tile::size);
        let mut capture = Self::new(grid.dimension(), tile_size, scale);

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
            capture.record_placement(position, tile.id(), tile.oriented(placement.orientation));
        }

        Ok(capture)
    }

    /// Records a tile placement at the given position
    pub fn record_placement(&mut self, position: [usize; 2], tile_id: u64, cells: Array2<bool>) {
        self.placements.push(PlacementFrame {
            position,
            tile_id,
            cells,
        });
    }

    /// Returns all recorded placement events
    pub fn placements(&self) -> &[PlacementFrame] {
        &self.placements
    }

    /// Returns the total number of placement events
    pub const fn placement_count(&self) -> usize {
        self.placements.len()
    }

    /// Side length of a frame in pixels
    pub const fn frame_size(&self) -> u32 {
        let cells = self.dimension * (self.tile_size + 1) + 1;
        cells as u32 * self.scale
    }

    /// Export the captured placements as an animated GIF
    ///
    /// The first frame is empty, then one frame per placement; the final
    /// frame is held longer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No tile placements were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.placements.is_empty() {
            return Err(JigsawError::InvalidSourceData {
                reason: "No tile placements captured for visualization".to_string(),
            });
        }

        let frames = self.generate_frames(frame_delay_ms);

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| JigsawError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| JigsawError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| JigsawError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Build every animation frame
    pub fn generate_frames(&self, delay_ms: u32) -> Vec<Frame> {
        let side = self.frame_size();
        let mut canvas = RgbaImage::from_pixel(side, side, Rgba(BACKGROUND_COLOR));
        let mut frames = Vec::with_capacity(self.placements.len() + 2);

        frames.push(frame(canvas.clone(), delay_ms));
        for placement in &self.placements {
            self.draw_tile(&mut canvas, placement);
            frames.push(frame(canvas.clone(), delay_ms));
        }

        // Final frame displays longer for better visibility
        frames.push(frame(canvas, delay_ms * GIF_FINAL_FRAME_FACTOR));
        frames
    }

    fn draw_tile(&self, canvas: &mut RgbaImage, placement: &PlacementFrame) {
        let [x, y] = placement.position;
        let stride = self.tile_size + 1;
        let origin_col = (x * stride + 1) as u32 * self.scale;
        let origin_row = (y * stride + 1) as u32 * self.scale;

        for ((row, col), &active) in placement.cells.indexed_iter() {
            let color = if active { ACTIVE_COLOR } else { INACTIVE_COLOR };
            for dy in 0..self.scale {
                for dx in 0..self.scale {
                    let px = origin_col + col as u32 * self.scale + dx;
                    let py = origin_row + row as u32 * self.scale + dy;
                    if px < canvas.width() && py < canvas.height() {
                        canvas.put_pixel(px, py, Rgba(color));
                    }
                }
            }
        }
    }
}

fn frame(img: RgbaImage, delay_ms: u32) -> Frame {
    Frame::from_parts(img, 0, 0, image::Delay::from_numer_denom_ms(delay_ms, 1))
}

//! PNG export of the composite image with motif cells highlighted

use crate::io::configuration::{ACTIVE_COLOR, INACTIVE_COLOR, MOTIF_COLOR};
use crate::io::error::{JigsawError, Result};
use image::{Rgba, RgbaImage};
use ndarray::Array2;
use std::path::Path;

/// Render a boolean image as RGBA pixels, `scale` pixels per cell
///
/// Cells set in `marked` are drawn in the motif colour whatever their own
/// state; `marked` must have the same shape as `cells` to take effect.
pub fn render_cells(cells: &Array2<bool>, marked: Option<&Array2<bool>>, scale: u32) -> RgbaImage {
    let scale = scale.max(1);
    let (rows, cols) = cells.dim();
    let mut img = RgbaImage::new(cols as u32 * scale, rows as u32 * scale);

    for ((row, col), &active) in cells.indexed_iter() {
        let is_marked = marked
            .and_then(|mask| mask.get((row, col)))
            .copied()
            .unwrap_or(false);
        let color = if is_marked {
            MOTIF_COLOR
        } else if active {
            ACTIVE_COLOR
        } else {
            INACTIVE_COLOR
        };

        for dy in 0..scale {
            for dx in 0..scale {
                img.put_pixel(col as u32 * scale + dx, row as u32 * scale + dy, Rgba(color));
            }
        }
    }

    img
}

/// Write a rendered image to disk, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or saved to the specified path
pub fn save_image(img: &RgbaImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| JigsawError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| JigsawError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}

/// Export the composite image as a PNG
///
/// # Errors
///
/// Returns an error if:
/// - The image is empty
/// - The file cannot be written
pub fn export_composite_png(
    cells: &Array2<bool>,
    marked: Option<&Array2<bool>>,
    scale: u32,
    output_path: &Path,
) -> Result<()> {
    if cells.is_empty() {
        return Err(JigsawError::InvalidSourceData {
            reason: "Composite image has no cells".to_string(),
        });
    }
    save_image(&render_cells(cells, marked, scale), output_path)
}

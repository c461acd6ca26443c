//! Motif search over the eight symmetries of a composite image
//!
//! A motif is a small bitmap of "care" cells. It occurs at an offset when
//! every care cell lands on an active image cell; inactive motif cells are
//! ignored. The image is searched in each symmetry in turn and the search
//! stops at the first symmetry with at least one occurrence.

use log::debug;
use ndarray::{Array2, ArrayView2};

use crate::io::configuration::{ACTIVE_CELL, DEFAULT_MOTIF};
use crate::io::error::{JigsawError, Result, invalid_parameter};
use crate::spatial::tiles::{Orientation, symmetries};

/// Small bitmap searched for inside the composite image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Motif {
    cells: Array2<bool>,
    care_cells: Vec<[usize; 2]>,
}

impl Motif {
    /// Parse a motif from text
    ///
    /// `#` marks a care cell, any other character is ignored. Rows shorter
    /// than the longest row are padded with ignored cells.
    ///
    /// # Errors
    ///
    /// Returns an error if the text contains no care cell
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_cells(bitmap(text))
    }

    /// Build a motif from a boolean bitmap
    ///
    /// # Errors
    ///
    /// Returns an error if the bitmap contains no care cell
    pub fn from_cells(cells: Array2<bool>) -> Result<Self> {
        let motif = Self::unchecked(cells);
        if motif.care_cells.is_empty() {
            return Err(invalid_parameter(
                "motif",
                &format!("{:?}", motif.cells.dim()),
                &"motif has no active cells",
            ));
        }
        Ok(motif)
    }

    fn unchecked(cells: Array2<bool>) -> Self {
        let care_cells = cells
            .indexed_iter()
            .filter(|&(_, &cell)| cell)
            .map(|((r, c), _)| [r, c])
            .collect();
        Self { cells, care_cells }
    }

    /// Motif cells, `true` for care cells
    pub const fn cells(&self) -> &Array2<bool> {
        &self.cells
    }

    /// Number of care cells
    pub fn care_count(&self) -> usize {
        self.care_cells.len()
    }

    /// Motif size as (rows, cols)
    pub fn dim(&self) -> (usize, usize) {
        self.cells.dim()
    }

    /// Whether the motif occurs with its top-left corner at `[row, col]`
    pub fn matches_at(&self, image: &ArrayView2<'_, bool>, origin: [usize; 2]) -> bool {
        self.care_cells.iter().all(|&[r, c]| {
            image
                .get((origin[0] + r, origin[1] + c))
                .copied()
                .unwrap_or(false)
        })
    }

    /// Top-left corners of every occurrence in row-major order
    ///
    /// Occurrences may overlap.
    pub fn occurrences(&self, image: &ArrayView2<'_, bool>) -> Vec<[usize; 2]> {
        let (rows, cols) = image.dim();
        let (motif_rows, motif_cols) = self.dim();
        if motif_rows > rows || motif_cols > cols {
            return Vec::new();
        }
        (0..=rows - motif_rows)
            .flat_map(|r| (0..=cols - motif_cols).map(move |c| [r, c]))
            .filter(|&origin| self.matches_at(image, origin))
            .collect()
    }
}

impl Default for Motif {
    /// The three-line "sea monster" with 15 care cells
    fn default() -> Self {
        Self::unchecked(bitmap(DEFAULT_MOTIF))
    }
}

fn bitmap(text: &str) -> Array2<bool> {
    let rows: Vec<&str> = text.lines().collect();
    let width = rows
        .iter()
        .map(|row| row.chars().count())
        .max()
        .unwrap_or(0);
    let mut cells = Array2::from_elem((rows.len(), width), false);
    for (r, row) in rows.iter().enumerate() {
        for (c, symbol) in row.chars().enumerate() {
            if let Some(cell) = cells.get_mut((r, c)) {
                *cell = symbol == ACTIVE_CELL;
            }
        }
    }
    cells
}

/// Result of searching an image for a motif
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotifSearch {
    /// Symmetry of the image in which the motif was found
    pub orientation: Orientation,
    /// The image under that symmetry
    pub image: Array2<bool>,
    /// Top-left corners of every occurrence
    pub occurrences: Vec<[usize; 2]>,
    /// Active cells in the image
    pub active_cells: usize,
    /// Care cells per motif occurrence
    pub care_count: usize,
}

impl MotifSearch {
    /// Active cells not covered by a motif occurrence
    ///
    /// Counted as active cells minus occurrences times care cells, so
    /// overlapping occurrences are subtracted once each.
    pub fn roughness(&self) -> usize {
        self.active_cells
            .saturating_sub(self.occurrences.len() * self.care_count)
    }

    /// Mask of image cells covered by at least one occurrence
    pub fn marked_cells(&self, motif: &Motif) -> Array2<bool> {
        let mut marked = Array2::from_elem(self.image.dim(), false);
        for origin in &self.occurrences {
            for [r, c] in &motif.care_cells {
                if let Some(cell) = marked.get_mut((origin[0] + r, origin[1] + c)) {
                    *cell = true;
                }
            }
        }
        marked
    }
}

/// Search the eight symmetries of an image for a motif
///
/// # Errors
///
/// Returns `MotifNotFound` if no symmetry contains the motif
pub fn find_motif(image: &Array2<bool>, motif: &Motif) -> Result<MotifSearch> {
    let active_cells = image.iter().filter(|&&cell| cell).count();
    for (oriented, orientation) in symmetries(image.view()) {
        let occurrences = motif.occurrences(&oriented.view());
        if !occurrences.is_empty() {
            debug!(
                "Found {} motif occurrences with image orientation {orientation}",
                occurrences.len()
            );
            return Ok(MotifSearch {
                orientation,
                image: oriented,
                occurrences,
                active_cells,
                care_count: motif.care_count(),
            });
        }
    }
    Err(JigsawError::MotifNotFound {
        image_size: image.nrows(),
    })
}

/// Count motif occurrences in each of the eight symmetries of an image
pub fn scan_orientations(image: &Array2<bool>, motif: &Motif) -> Vec<(Orientation, usize)> {
    symmetries(image.view())
        .map(|(oriented, orientation)| (orientation, motif.occurrences(&oriented.view()).len()))
        .collect()
}

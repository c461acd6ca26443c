use log::{debug, info};
use ndarray::Array2;

use crate::{
    algorithm::assembly::GridAssembler,
    algorithm::edges::{EdgeIndex, TileClassification},
    analysis::composite::compose,
    analysis::patterns::{Motif, MotifSearch, find_motif},
    io::error::Result,
    io::input::parse_tiles,
    spatial::grid::{Grid, dimension_for},
    spatial::tiles::Tile,
};

/// Answers and intermediate products of a fully solved puzzle
#[derive(Debug, Clone)]
pub struct Solution {
    /// Product of the four corner tile identifiers
    pub corner_product: u64,
    /// Active cells left uncovered by motif occurrences
    pub roughness: usize,
    /// Assembled grid of placements
    pub grid: Grid,
    /// Composite image in assembly orientation
    pub composite: Array2<bool>,
    /// Motif search result, including the image symmetry that matched
    pub search: MotifSearch,
}

/// End-to-end jigsaw pipeline over one parsed puzzle
///
/// Construction parses and validates the puzzle, builds the edge index and
/// classifies every tile, so a solver that exists already knows its four
/// corners. Assembly, compositing and the motif search are separate steps
/// and can be run individually.
#[derive(Debug, Clone)]
pub struct JigsawSolver {
    tiles: Vec<Tile>,
    index: EdgeIndex,
    classification: TileClassification,
    dimension: usize,
}

impl JigsawSolver {
    /// Index and classify an already parsed tile set
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tile count is not a perfect square
    /// - Corner detection does not find exactly four corners
    pub fn new(tiles: Vec<Tile>) -> Result<Self> {
        let dimension = dimension_for(tiles.len())?;
        let index = EdgeIndex::build(&tiles);
        let classification = index.classify(&tiles)?;

        debug!(
            "Prepared {dimension}x{dimension} puzzle with corners {:?}",
            classification
                .corners
                .iter()
                .filter_map(|&corner| tiles.get(corner).map(Tile::id))
                .collect::<Vec<_>>()
        );

        Ok(Self {
            tiles,
            index,
            classification,
            dimension,
        })
    }

    /// Parse puzzle text and prepare it for solving
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be parsed or the tiles do not form
    /// a valid square jigsaw
    pub fn from_input(text: &str) -> Result<Self> {
        Self::new(parse_tiles(text)?)
    }

    /// Tiles in input order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Edge index over all tiles
    pub const fn index(&self) -> &EdgeIndex {
        &self.index
    }

    /// Tiles grouped by their number of unmatched sides
    pub const fn classification(&self) -> &TileClassification {
        &self.classification
    }

    /// Number of tiles per grid side
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Product of the four corner tile identifiers
    ///
    /// # Errors
    ///
    /// Returns an error if the product overflows `u64`
    pub fn corner_product(&self) -> Result<u64> {
        self.classification.corner_product(&self.tiles)
    }

    /// Assemble the grid from the detected corners
    ///
    /// # Errors
    ///
    /// Returns an error if any position cannot be resolved to exactly one
    /// tile and orientation
    pub fn assemble(&self) -> Result<Grid> {
        GridAssembler::new(&self.tiles, &self.index)?.assemble(&self.classification.corners)
    }

    /// Stitch the interiors of an assembled grid into one image
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is incomplete
    pub fn compose(&self, grid: &Grid) -> Result<Array2<bool>> {
        compose(&self.tiles, grid)
    }

    /// Run every stage and compute both answers
    ///
    /// # Errors
    ///
    /// Returns an error if assembly fails or the motif is absent from every
    /// symmetry of the composite image
    pub fn solve(&self, motif: &Motif) -> Result<Solution> {
        let corner_product = self.corner_product()?;
        let grid = self.assemble()?;
        let composite = self.compose(&grid)?;
        let search = find_motif(&composite, motif)?;
        let roughness = search.roughness();

        info!(
            "Solved {}x{} puzzle: corner product {corner_product}, {} motifs, roughness {roughness}",
            self.dimension,
            self.dimension,
            search.occurrences.len()
        );

        Ok(Solution {
            corner_product,
            roughness,
            grid,
            composite,
            search,
        })
    }
}

/// Parse and fully solve a puzzle in one call
///
/// # Errors
///
/// Returns any error raised while parsing, assembling or searching
pub fn solve_puzzle(text: &str, motif: &Motif) -> Result<Solution> {
    JigsawSolver::from_input(text)?.solve(motif)
}

//! Puzzle format constants and runtime configuration defaults

// Puzzle text format
/// Character marking an active cell
pub const ACTIVE_CELL: char = '#';
/// Character marking an inactive cell
pub const INACTIVE_CELL: char = '.';
/// Keyword opening every tile label line
pub const TILE_LABEL_KEYWORD: &str = "Tile";
/// Character terminating every tile label line
pub const TILE_LABEL_DELIMITER: char = ':';

// Tiles must keep a non-empty interior once the border ring is stripped
/// Smallest tile side length accepted by the parser
pub const MIN_TILE_SIZE: usize = 3;

/// Motif searched for in the composite image
///
/// Active cells are `#`; every other character is a "don't care" cell.
/// Trailing spaces are significant for the motif width.
pub const DEFAULT_MOTIF: &str = concat!(
    "                  # \n",
    "#    ##    ##    ###\n",
    " #  #  #  #  #  #   ",
);

// Default values for the synthetic puzzle generator
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;
/// Default number of tiles per grid side
pub const DEFAULT_GRID_SIZE: usize = 12;
/// Default tile side length
pub const DEFAULT_TILE_SIZE: usize = 10;
/// Default probability of an interior cell being active
pub const DEFAULT_DENSITY: f64 = 0.5;
/// Default number of motif instances to plant
pub const DEFAULT_MOTIF_COUNT: usize = 2;
/// Smallest tile side length the generator can produce unique seams for
pub const MIN_GENERATED_TILE_SIZE: usize = 4;
/// Tile identifiers are drawn from `FIRST_TILE_ID..FIRST_TILE_ID + TILE_ID_RANGE`
pub const FIRST_TILE_ID: u64 = 1000;
/// Number of distinct tile identifiers available to the generator
pub const TILE_ID_RANGE: usize = 9000;

// Bounded rejection sampling keeps generation deterministic on bad parameters
/// Maximum draws per seam before giving up
pub const MAX_SEAM_ATTEMPTS: usize = 10_000;
/// Maximum draws per planted motif before giving up on that motif
pub const MAX_MOTIF_ATTEMPTS: usize = 1_000;
/// Maximum interior redraws before giving up on an image whose only motifs are the planted ones
pub const MAX_INTERIOR_ATTEMPTS: usize = 1_000;

// Progress bar display settings
/// Threshold for adding a batch progress bar
pub const BATCH_PROGRESS_THRESHOLD: usize = 1;
/// Number of pipeline stages reported per file
pub const PIPELINE_STAGES: u64 = 5;

// Output settings
/// Extension of puzzle input files picked up from directories
pub const INPUT_EXTENSION: &str = "txt";
/// Suffix added to composite image filenames
pub const COMPOSITE_SUFFIX: &str = "_composite";
/// Suffix added to assembly animation filenames
pub const ASSEMBLY_SUFFIX: &str = "_assembly";
/// Pixels per cell in exported images
pub const IMAGE_SCALE: u32 = 4;
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 80;
/// The final frame is held this many times longer
pub const GIF_FINAL_FRAME_FACTOR: u32 = 25;

// Render colours (RGBA)
/// Colour of inactive cells
pub const INACTIVE_COLOR: [u8; 4] = [16, 42, 82, 255];
/// Colour of active cells
pub const ACTIVE_COLOR: [u8; 4] = [140, 190, 230, 255];
/// Colour of cells covered by a found motif
pub const MOTIF_COLOR: [u8; 4] = [240, 120, 40, 255];
/// Colour of unfilled grid area and tile separators
pub const BACKGROUND_COLOR: [u8; 4] = [0, 0, 0, 0];

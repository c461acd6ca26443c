//! Error types for puzzle parsing, assembly and motif search

use std::fmt;
use std::path::PathBuf;

/// Main error type for all jigsaw operations
#[derive(Debug)]
pub enum JigsawError {
    /// Puzzle text could not be parsed
    Parse {
        /// 1-based line number of the offending line
        line: usize,
        /// Description of what's wrong with the line
        reason: String,
    },

    /// Parsed tiles don't meet the solver's requirements
    InvalidSourceData {
        /// Description of what's wrong with the tile set
        reason: String,
    },

    /// Tile count cannot be arranged into a square grid
    NotSquare {
        /// Number of tiles in the puzzle
        tile_count: usize,
    },

    /// Corner detection did not find exactly four corners
    ///
    /// Occurs when the input violates the unique edge matching guarantee:
    /// some seam is shared by more than two tiles, or a border edge happens
    /// to match another tile.
    CornerCount {
        /// Number of tiles with exactly two unmatched sides
        found: usize,
    },

    /// No symmetry of a tile satisfies the edge constraints at its position
    OrientationExhausted {
        /// Grid position (x, y) being resolved
        position: [usize; 2],
        /// Identifier of the tile that could not be oriented
        tile_id: u64,
    },

    /// No unplaced tile shares an edge with the resolved neighbours
    NoCandidate {
        /// Grid position (x, y) being resolved
        position: [usize; 2],
    },

    /// More than one unplaced tile shares an edge with the resolved neighbours
    AmbiguousPlacement {
        /// Grid position (x, y) being resolved
        position: [usize; 2],
        /// Identifiers of all competing tiles
        candidates: Vec<u64>,
    },

    /// Grid position has no tile assigned
    UnresolvedPosition {
        /// Grid position (x, y) that is still empty
        position: [usize; 2],
    },

    /// None of the eight image symmetries contains the motif
    MotifNotFound {
        /// Side length of the searched image
        image_size: usize,
    },

    /// Tile index exceeds available tile set
    InvalidTileIndex {
        /// The invalid tile index
        index: usize,
        /// Number of tiles available
        max_tiles: usize,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to save a rendered image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Numerical computation produced invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for JigsawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { line, reason } => {
                write!(f, "Parse error on line {line}: {reason}")
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::NotSquare { tile_count } => {
                write!(
                    f,
                    "Not a valid square jigsaw: {tile_count} tiles cannot form a square grid"
                )
            }
            Self::CornerCount { found } => {
                write!(
                    f,
                    "Not a valid square jigsaw: found {found} corner tiles, expected 4"
                )
            }
            Self::OrientationExhausted { position, tile_id } => {
                write!(
                    f,
                    "No orientation of tile {tile_id} fits position ({}, {})",
                    position[0], position[1]
                )
            }
            Self::NoCandidate { position } => {
                write!(
                    f,
                    "No unique tile for position ({}, {}): no candidates left",
                    position[0], position[1]
                )
            }
            Self::AmbiguousPlacement {
                position,
                candidates,
            } => {
                write!(
                    f,
                    "Ambiguous placement at position ({}, {}): candidates {candidates:?}",
                    position[0], position[1]
                )
            }
            Self::UnresolvedPosition { position } => {
                write!(
                    f,
                    "Grid position ({}, {}) has no tile",
                    position[0], position[1]
                )
            }
            Self::MotifNotFound { image_size } => {
                write!(
                    f,
                    "No motif found in any symmetry of the {image_size}x{image_size} image"
                )
            }
            Self::InvalidTileIndex { index, max_tiles } => {
                write!(f, "Tile index {index} is out of bounds (max: {max_tiles})")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for JigsawError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for jigsaw results
pub type Result<T> = std::result::Result<T, JigsawError>;

impl From<std::io::Error> for JigsawError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> JigsawError {
    JigsawError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> JigsawError {
    JigsawError::Computation {
        operation,
        reason: reason.to_string(),
    }
}

/// Create a parse error for a 1-based line number
pub fn parse_error(line: usize, reason: &impl ToString) -> JigsawError {
    JigsawError::Parse {
        line,
        reason: reason.to_string(),
    }
}

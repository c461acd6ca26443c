//! Image-level analysis of an assembled puzzle

/// Stitching tile interiors into the composite image
pub mod composite;
/// Motif search over image symmetries
pub mod patterns;

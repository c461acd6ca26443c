/// Grid assembly by deduction from resolved neighbours
pub mod assembly;
/// Compact set of tile indices used for candidate filtering
pub mod bitset;
/// Edge index, corner detection and tile classification
pub mod edges;
/// End-to-end solve pipeline
pub mod executor;

//! Input/output, configuration and error handling

/// Command-line interface and batch file processing
pub mod cli;
/// Format constants and runtime defaults
pub mod configuration;
/// Error taxonomy
pub mod error;
/// PNG export of the composite image
pub mod image;
/// Puzzle text parsing and formatting
pub mod input;
/// Terminal progress bars
pub mod progress;
/// Animated GIF of the assembly
pub mod visualization;

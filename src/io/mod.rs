/// Command-line interface and end-to-end run
pub mod cli;
/// Solver constants and defaults
pub mod configuration;
/// Border constraints pinning grid edges to fingerprints
pub mod constraints;
/// Error types and result alias
pub mod error;
/// Tile image loading and raster export
pub mod image;
/// Attempt progress display
pub mod progress;

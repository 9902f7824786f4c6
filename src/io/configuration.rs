//! Solver constants and runtime configuration defaults

/// Largest accepted grid width or height
pub const MAX_GRID_DIMENSION: usize = 10_000;

/// Seed used when none is given
pub const DEFAULT_SEED: u64 = 42;

/// Default number of attempts before giving up
pub const DEFAULT_MAX_ATTEMPTS: usize = 200;

/// Default grid width in tiles
pub const DEFAULT_WIDTH: usize = 8;

/// Default grid height in tiles
pub const DEFAULT_HEIGHT: usize = 8;

// Three samples per edge, plus the trailing point past the tile
/// Number of colors sampled along each tile edge
pub const DEFAULT_EDGE_SAMPLES: usize = 3;

/// Low bits dropped from each color channel before hashing
pub const DEFAULT_DISCARD_BITS: u8 = 0;

// Output settings
/// Output path template; `{seed}` is replaced by the seed
pub const DEFAULT_OUTPUT: &str = "output/{seed}.png";

/// Placeholder substituted in output paths
pub const SEED_PLACEHOLDER: &str = "{seed}";

/// File extensions accepted when loading a tile folder
pub const TILE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

//! Command-line interface: load a tileset, solve a grid and export the image

use clap::Parser;
use std::fmt::Write;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::algorithm::executor::Wave;
use crate::analysis::edges::EdgeSampler;
use crate::io::configuration::{
    DEFAULT_DISCARD_BITS, DEFAULT_EDGE_SAMPLES, DEFAULT_HEIGHT, DEFAULT_MAX_ATTEMPTS,
    DEFAULT_OUTPUT, DEFAULT_SEED, DEFAULT_WIDTH, SEED_PLACEHOLDER,
};
use crate::io::constraints::{BorderConstraint, apply_all};
use crate::io::error::{Result, WaveError, invalid_parameter};
use crate::io::image::{compose, load_tile, load_tile_folder, save_png, slice_sprite_sheet};
use crate::io::progress::AttemptProgress;
use crate::spatial::direction::Direction;
use crate::spatial::tiles::ModuleCatalog;
use image::RgbaImage;

/// Tile dimensions given as `WxH`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSize {
    /// Tile width in pixels
    pub width: u32,
    /// Tile height in pixels
    pub height: u32,
}

impl FromStr for TileSize {
    type Err = WaveError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || invalid_parameter("sheet", &s, &"expected WIDTHxHEIGHT, e.g. 16x16");
        let (width, height) = s.split_once(['x', 'X']).ok_or_else(invalid)?;
        let width = width.trim().parse().map_err(|_parse_error| invalid())?;
        let height = height.trim().parse().map_err(|_parse_error| invalid())?;
        Ok(Self { width, height })
    }
}

#[derive(Parser, Debug)]
#[command(name = "wavetile")]
#[command(
    author,
    version,
    about = "Generate tile maps with wave function collapse"
)]
/// Command-line arguments for the tile map generator
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Directory of tile images, or a sprite sheet when --sheet is given
    #[arg(value_name = "TILESET")]
    pub tileset: PathBuf,

    /// Grid width in tiles
    #[arg(short = 'W', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Grid height in tiles
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Maximum attempts before giving up
    #[arg(short, long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub attempts: usize,

    /// Output PNG path; `{seed}` is replaced by the seed
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Colors sampled along each tile edge
    #[arg(long, default_value_t = DEFAULT_EDGE_SAMPLES)]
    pub samples: usize,

    /// Low bits dropped from each color channel before hashing
    #[arg(long, default_value_t = DEFAULT_DISCARD_BITS)]
    pub discard_bits: u8,

    /// Treat TILESET as a sprite sheet of WxH tiles
    #[arg(long, value_name = "WxH")]
    pub sheet: Option<TileSize>,

    /// Pin a grid edge to a fingerprint, e.g. up=d4789c1e (repeatable)
    #[arg(short, long = "border", value_name = "SIDE=FINGERPRINT")]
    pub borders: Vec<BorderConstraint>,

    /// Print the fingerprint table of every tile and exit
    #[arg(long)]
    pub fingerprints: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log solver diagnostics at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Output path with the seed substituted
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(self.output.replace(SEED_PLACEHOLDER, &self.seed.to_string()))
    }
}

/// Install the stderr log subscriber
///
/// `RUST_LOG` takes precedence; otherwise warnings only, or debug output with
/// `verbose`. Installing twice is a no-op.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "wavetile=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// What a run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Modules in the loaded catalog
    pub modules: usize,
    /// Image written, if the run got that far
    pub output: Option<PathBuf>,
    /// Attempts used by the solve
    pub attempts: usize,
}

/// Render the direction/fingerprint table for a catalog
pub fn fingerprint_table<T>(catalog: &ModuleCatalog<T>) -> String {
    let mut table = String::new();
    let _ = writeln!(table, "| Tile | Direction | Fingerprint |");
    let _ = writeln!(table, "|------|-----------|-------------|");
    for module in catalog {
        for direction in Direction::ALL {
            let _ = writeln!(
                table,
                "| {:>4} | {:<9} | {:<11} |",
                module.index(),
                direction.to_string(),
                module.adjacency(direction).to_string()
            );
        }
    }
    table
}

/// Drives one end-to-end run from parsed arguments
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for the given arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Arguments this runner was built with
    pub const fn cli(&self) -> &Cli {
        &self.cli
    }

    /// Load tiles, solve and export
    ///
    /// When every attempt fails the best-effort grid is still written before
    /// the error is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tileset cannot be loaded or is empty
    /// - Parameters or border constraints are invalid
    /// - Every attempt ended in contradiction
    /// - The output image cannot be written
    // Allow print for the fingerprint table and user feedback
    #[allow(clippy::print_stdout, clippy::print_stderr)]
    pub fn run(&self) -> Result<RunSummary> {
        let tiles = self.load_tiles()?;
        let sampler = EdgeSampler::new(self.cli.samples, self.cli.discard_bits)?;
        let catalog = Arc::new(ModuleCatalog::from_tiles(tiles, |tile, direction| {
            sampler.fingerprint(tile, direction)
        })?);
        let modules = catalog.len();

        if self.cli.fingerprints {
            print!("{}", fingerprint_table(&catalog));
            return Ok(RunSummary {
                modules,
                output: None,
                attempts: 0,
            });
        }

        let mut wave = Wave::initialize(catalog, self.cli.width, self.cli.height, self.cli.seed)?;
        apply_all(&self.cli.borders, &mut wave)?;

        let mut progress = if self.cli.should_show_progress() {
            AttemptProgress::new(self.cli.attempts)
        } else {
            AttemptProgress::hidden()
        };
        let outcome = wave.collapse_observed(self.cli.attempts, |report| progress.record(report));
        progress.finish();

        let exhausted = match outcome {
            Ok(_) => None,
            Err(error @ WaveError::Exhausted { .. }) => Some(error),
            Err(error) => return Err(error),
        };

        let output_path = self.cli.output_path();
        let image = compose(&wave.export())?;
        save_png(&image, &output_path)?;

        if !self.cli.quiet {
            eprintln!("Image saved to: {}", output_path.display());
        }

        match exhausted {
            Some(error) => {
                if !self.cli.quiet {
                    eprintln!("Unable to generate a consistent grid: {error}");
                }
                Err(error)
            }
            None => Ok(RunSummary {
                modules,
                output: Some(output_path),
                attempts: wave.attempts(),
            }),
        }
    }

    fn load_tiles(&self) -> Result<Vec<RgbaImage>> {
        let tiles = match self.cli.sheet {
            Some(size) => {
                let sheet = load_tile(&self.cli.tileset)?;
                slice_sprite_sheet(&sheet, size.width, size.height)?
            }
            None => {
                if !self.cli.tileset.is_dir() {
                    return Err(invalid_parameter(
                        "tileset",
                        &self.cli.tileset.display(),
                        &"expected a directory of tiles (use --sheet for sprite sheets)",
                    ));
                }
                load_tile_folder(&self.cli.tileset)?
            }
        };

        if tiles.is_empty() {
            return Err(WaveError::EmptyCatalog);
        }
        Ok(tiles)
    }
}

//! Wave function collapse tile map generation
//!
//! Every grid cell starts able to hold any tile module. The solver repeatedly
//! commits the most constrained cell to one random module and propagates the
//! choice outward, removing modules whose edge fingerprints no longer match a
//! neighbor, until every cell holds one module or a contradiction forces a
//! fresh attempt.

#![forbid(unsafe_code)]

/// Solver core: compatibility, propagation, cell selection and the collapse driver
pub mod algorithm;
/// Fingerprint derivation from tile images
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Directions, fingerprints, modules and the possibility space
pub mod spatial;

pub use algorithm::executor::{Solved, Wave};
pub use io::error::{Result, WaveError};
pub use spatial::{Coordinate, Direction, Fingerprint, Module, ModuleCatalog};

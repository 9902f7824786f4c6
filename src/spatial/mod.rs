//! Spatial data structures for the solver
//!
//! This module contains:
//! - Cardinal directions and edge fingerprints
//! - Tile modules and the shared module catalog
//! - The possibility space grid and its slots

/// Cardinal directions and their opposites
pub mod direction;
/// Opaque edge fingerprint values
pub mod fingerprint;
/// Grid coordinates, slots and the possibility space
pub mod grid;
/// Modules and the module catalog
pub mod tiles;

pub use direction::Direction;
pub use fingerprint::Fingerprint;
pub use grid::{Coordinate, PossibilitySpace, Slot};
pub use tiles::{Module, ModuleCatalog, ModuleId};

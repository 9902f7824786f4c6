//! Tile modules and the immutable catalog shared by every grid cell
//!
//! A module pairs an opaque tile payload with the four edge fingerprints
//! computed once when the catalog is built. Cells refer to modules by their
//! catalog index, so the catalog can be shared read-only across any number of
//! independent solves.

use crate::io::error::{Result, WaveError};
use crate::spatial::direction::Direction;
use crate::spatial::fingerprint::Fingerprint;

/// Catalog index of a module
pub type ModuleId = usize;

/// One reusable tile definition
#[derive(Debug, Clone)]
pub struct Module<T> {
    index: ModuleId,
    adjacency: [Fingerprint; 4],
    tile: T,
}

impl<T> Module<T> {
    /// Stable position of this module in its catalog
    pub const fn index(&self) -> ModuleId {
        self.index
    }

    /// Fingerprint exposed on the given edge
    pub const fn adjacency(&self, direction: Direction) -> Fingerprint {
        match direction {
            Direction::Up => self.adjacency[0],
            Direction::Down => self.adjacency[1],
            Direction::Left => self.adjacency[2],
            Direction::Right => self.adjacency[3],
        }
    }

    /// All four fingerprints in [`Direction::ALL`] order
    pub const fn adjacencies(&self) -> &[Fingerprint; 4] {
        &self.adjacency
    }

    /// The caller's payload, passed through untouched
    pub const fn tile(&self) -> &T {
        &self.tile
    }
}

/// Fixed set of modules available to the solver
#[derive(Debug, Clone)]
pub struct ModuleCatalog<T> {
    modules: Vec<Module<T>>,
}

impl<T> ModuleCatalog<T> {
    /// Build a catalog by fingerprinting each tile in every direction
    ///
    /// The fingerprint function is called exactly once per tile and direction.
    ///
    /// # Errors
    ///
    /// Returns [`WaveError::EmptyCatalog`] if no tiles are supplied
    pub fn from_tiles<F>(tiles: Vec<T>, mut fingerprint: F) -> Result<Self>
    where
        F: FnMut(&T, Direction) -> Fingerprint,
    {
        let entries = tiles
            .into_iter()
            .map(|tile| {
                let adjacency = Direction::ALL.map(|direction| fingerprint(&tile, direction));
                (tile, adjacency)
            })
            .collect();
        Self::from_adjacencies(entries)
    }

    /// Build a catalog from precomputed fingerprints in [`Direction::ALL`] order
    ///
    /// # Errors
    ///
    /// Returns [`WaveError::EmptyCatalog`] if no entries are supplied
    pub fn from_adjacencies(entries: Vec<(T, [Fingerprint; 4])>) -> Result<Self> {
        if entries.is_empty() {
            return Err(WaveError::EmptyCatalog);
        }

        let modules = entries
            .into_iter()
            .enumerate()
            .map(|(index, (tile, adjacency))| Module {
                index,
                adjacency,
                tile,
            })
            .collect();

        Ok(Self { modules })
    }

    /// Number of modules
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the catalog holds no modules (never true for a built catalog)
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Look up a module by index
    pub fn get(&self, id: ModuleId) -> Option<&Module<T>> {
        self.modules.get(id)
    }

    /// Iterate modules in index order
    pub fn iter(&self) -> std::slice::Iter<'_, Module<T>> {
        self.modules.iter()
    }

    /// Indices of every module
    pub fn ids(&self) -> std::ops::Range<ModuleId> {
        0..self.modules.len()
    }
}

impl<'a, T> IntoIterator for &'a ModuleCatalog<T> {
    type Item = &'a Module<T>;
    type IntoIter = std::slice::Iter<'a, Module<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.modules.iter()
    }
}

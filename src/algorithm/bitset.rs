use bitvec::prelude::*;
use std::fmt;

use crate::spatial::tiles::ModuleId;

/// Fixed-size bitset over catalog module indices
///
/// Indices are 0-based, matching [`ModuleId`]. Out-of-range indices are
/// ignored on insert and reported absent on lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleBitset {
    bits: BitVec,
}

impl ModuleBitset {
    /// Create a bitset with no modules present
    pub fn new(module_count: usize) -> Self {
        Self {
            bits: bitvec![0; module_count],
        }
    }

    /// Insert a module index
    pub fn insert(&mut self, id: ModuleId) {
        if id < self.bits.len() {
            self.bits.set(id, true);
        }
    }

    /// Test module membership
    pub fn contains(&self, id: ModuleId) -> bool {
        self.bits.get(id).as_deref() == Some(&true)
    }

    /// Add every member of another bitset in-place
    pub fn union_with(&mut self, other: &Self) {
        self.bits |= &other.bits;
    }

    /// Remove every member
    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    /// Whether every module is present
    pub fn is_full(&self) -> bool {
        self.bits.all()
    }

    /// Count modules in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Extract all module indices in ascending order
    pub fn to_vec(&self) -> Vec<ModuleId> {
        self.bits.iter_ones().collect()
    }
}

impl fmt::Display for ModuleBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModuleBitset({} modules: {:?})", self.count(), self.to_vec())
    }
}

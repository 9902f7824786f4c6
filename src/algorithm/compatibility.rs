//! Adjacency legality between modules and neighboring slots
//!
//! [`is_compatible`] is the reference predicate: a linear scan over the
//! neighbor's superposition. [`AdjacencyRules`] precomputes the same relation
//! as one bitset per module and direction so propagation can filter a whole
//! slot with a few word-wide operations.

use crate::algorithm::bitset::ModuleBitset;
use crate::spatial::direction::Direction;
use crate::spatial::grid::Slot;
use crate::spatial::tiles::{Module, ModuleCatalog, ModuleId};

/// Whether `candidate` may sit with `neighbor` on its `direction` side
///
/// True iff some module `m` still possible in `neighbor` exposes on
/// `direction.opposite()` the fingerprint `candidate` exposes on `direction`.
/// Neighbor entries missing from the catalog never match.
pub fn is_compatible<T>(
    catalog: &ModuleCatalog<T>,
    candidate: &Module<T>,
    neighbor: &Slot,
    direction: Direction,
) -> bool {
    let edge = candidate.adjacency(direction);
    let facing = direction.opposite();

    neighbor
        .superposition()
        .iter()
        .filter_map(|&id| catalog.get(id))
        .any(|module| module.adjacency(facing) == edge)
}

/// Whether two modules may touch with `b` on the `direction` side of `a`
pub fn modules_fit<T>(a: &Module<T>, b: &Module<T>, direction: Direction) -> bool {
    a.adjacency(direction) == b.adjacency(direction.opposite())
}

/// Precomputed compatibility table
///
/// `allowed(id, d)` is the set of modules that may sit on the `d` side of
/// module `id`.
#[derive(Debug, Clone)]
pub struct AdjacencyRules {
    module_count: usize,
    allowed: Vec<[ModuleBitset; 4]>,
}

impl AdjacencyRules {
    /// Build the table with one fingerprint comparison per module pair and direction
    pub fn from_catalog<T>(catalog: &ModuleCatalog<T>) -> Self {
        let module_count = catalog.len();
        let allowed = catalog
            .iter()
            .map(|module| {
                Direction::ALL.map(|direction| {
                    let mut set = ModuleBitset::new(module_count);
                    for other in catalog {
                        if modules_fit(module, other, direction) {
                            set.insert(other.index());
                        }
                    }
                    set
                })
            })
            .collect();

        Self {
            module_count,
            allowed,
        }
    }

    /// Number of modules covered by the table
    pub const fn module_count(&self) -> usize {
        self.module_count
    }

    /// Modules allowed on the `direction` side of `id`
    pub fn allowed(&self, id: ModuleId, direction: Direction) -> Option<&ModuleBitset> {
        self.allowed
            .get(id)
            .and_then(|sets| sets.get(direction.index()))
    }

    /// Union of modules allowed on the `direction` side of any module in `slot`
    pub fn supported_by(&self, slot: &Slot, direction: Direction) -> ModuleBitset {
        let mut support = ModuleBitset::new(self.module_count);
        for &id in slot.superposition() {
            if let Some(set) = self.allowed(id, direction) {
                support.union_with(set);
            }
            if support.is_full() {
                break;
            }
        }
        support
    }
}

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::spatial::grid::{Coordinate, PossibilitySpace, Slot};
use crate::spatial::tiles::ModuleId;

/// Seeded random source for every stochastic choice in a solve
///
/// One selector is threaded through all attempts; retries keep consuming
/// its state, so a run is reproducible from the seed and the attempt path.
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform index in `0..len`, or `None` when `len` is zero
    pub fn choose_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.random_range(0..len))
    }

    /// Uniformly pick one module still possible in the slot
    pub fn choose_module(&mut self, slot: &Slot) -> Option<ModuleId> {
        let index = self.choose_index(slot.len())?;
        slot.superposition().get(index).copied()
    }
}

/// Undetermined slots sharing the smallest superposition size
///
/// Returned in row-major order; empty when no slot has more than one module.
pub fn lowest_entropy_candidates(space: &PossibilitySpace) -> Vec<Coordinate> {
    let mut best = usize::MAX;
    let mut candidates = Vec::new();

    for (coordinate, slot) in space.cells() {
        let len = slot.len();
        if len <= 1 || len > best {
            continue;
        }
        if len < best {
            best = len;
            candidates.clear();
        }
        candidates.push(coordinate);
    }

    candidates
}

/// Pick the next slot to collapse by minimum remaining values
///
/// Ties are broken uniformly through the selector. Returns `None` once no
/// slot is undetermined.
pub fn select_cell(space: &PossibilitySpace, random: &mut RandomSelector) -> Option<Coordinate> {
    let candidates = lowest_entropy_candidates(space);
    match candidates.len() {
        0 => None,
        1 => candidates.first().copied(),
        len => {
            let index = random.choose_index(len)?;
            candidates.get(index).copied()
        }
    }
}

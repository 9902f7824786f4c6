use bitvec::prelude::*;
use std::collections::VecDeque;

use crate::algorithm::compatibility::AdjacencyRules;
use crate::spatial::direction::Direction;
use crate::spatial::grid::{Coordinate, PossibilitySpace};

/// A slot emptied by propagation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contradiction {
    /// First slot found with no remaining module
    pub at: Coordinate,
}

/// Work performed by one propagation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationStats {
    /// Slots taken from the worklist
    pub visited: usize,
    /// Modules removed across all slots
    pub removals: usize,
}

/// FIFO queue of slots whose shrinkage has not yet been pushed to neighbors
///
/// A slot is queued at most once at a time; it may be queued again after
/// it has been taken.
#[derive(Debug)]
pub struct Worklist {
    queue: VecDeque<Coordinate>,
    queued: BitVec,
    width: usize,
}

impl Worklist {
    /// Create an empty worklist sized for the given space
    pub fn for_space(space: &PossibilitySpace) -> Self {
        Self {
            queue: VecDeque::new(),
            queued: bitvec![0; space.len()],
            width: space.width(),
        }
    }

    /// Queue a slot unless it is already waiting or lies outside the grid
    ///
    /// Returns whether the slot was added
    pub fn push(&mut self, coordinate: Coordinate) -> bool {
        if coordinate.x >= self.width {
            return false;
        }
        let index = coordinate.y * self.width + coordinate.x;
        if self.queued.get(index).as_deref() != Some(&false) {
            return false;
        }
        self.queued.set(index, true);
        self.queue.push_back(coordinate);
        true
    }

    /// Remove and return the oldest queued slot
    pub fn take_next(&mut self) -> Option<Coordinate> {
        let coordinate = self.queue.pop_front()?;
        let index = coordinate.y * self.width + coordinate.x;
        if index < self.queued.len() {
            self.queued.set(index, false);
        }
        Some(coordinate)
    }

    /// Check if nothing is queued
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of queued slots
    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Remove modules left unsupported after `origin` shrank, cascading outward
///
/// For each taken slot `c` and each in-bounds neighbor `n` in direction `d`,
/// `n` keeps only modules allowed on the `d` side of some module still in
/// `c`. Neighbors that shrink are queued. Stops at the first slot emptied.
///
/// # Errors
///
/// Returns the [`Contradiction`] naming the first empty slot found,
/// including `origin` itself if it is already empty
pub fn propagate(
    space: &mut PossibilitySpace,
    rules: &AdjacencyRules,
    origin: Coordinate,
) -> Result<PropagationStats, Contradiction> {
    let mut worklist = Worklist::for_space(space);
    worklist.push(origin);
    propagate_from(space, rules, &mut worklist)
}

/// Run propagation over an already seeded worklist
///
/// # Errors
///
/// Returns the [`Contradiction`] naming the first empty slot found
pub fn propagate_from(
    space: &mut PossibilitySpace,
    rules: &AdjacencyRules,
    worklist: &mut Worklist,
) -> Result<PropagationStats, Contradiction> {
    let mut stats = PropagationStats::default();

    while let Some(current) = worklist.take_next() {
        stats.visited += 1;

        let Some(source) = space.slot(current) else {
            continue;
        };
        if source.is_empty() {
            return Err(Contradiction { at: current });
        }

        let supports = Direction::ALL.map(|direction| {
            space
                .neighbor(current, direction)
                .map(|next| (next, rules.supported_by(source, direction)))
        });

        for (next, support) in supports.into_iter().flatten() {
            if support.is_full() {
                continue;
            }
            let Some(target) = space.slot_mut(next) else {
                continue;
            };

            let removed = target.retain(|id| support.contains(id));
            if removed == 0 {
                continue;
            }

            stats.removals += removed;
            if target.is_empty() {
                return Err(Contradiction { at: next });
            }
            worklist.push(next);
        }
    }

    Ok(stats)
}

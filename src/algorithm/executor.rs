use ndarray::Array2;
use std::sync::Arc;
use tracing::{debug, info, trace};

use crate::algorithm::bitset::ModuleBitset;
use crate::algorithm::compatibility::AdjacencyRules;
use crate::algorithm::propagation::{Worklist, propagate, propagate_from};
use crate::algorithm::selection::{RandomSelector, select_cell};
use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{Result, WaveError, invalid_parameter};
use crate::spatial::direction::Direction;
use crate::spatial::grid::{Coordinate, PossibilitySpace};
use crate::spatial::tiles::{Module, ModuleCatalog, ModuleId};

/// Where the collapse driver stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveState {
    /// Initialized; constraints may still be applied
    Ready,
    /// An attempt is in progress
    Running,
    /// The last attempt emptied the given slot
    Contradiction(Coordinate),
    /// Every slot holds exactly one module
    Solved,
    /// Every allowed attempt ended in contradiction; carries the last one
    Exhausted(Coordinate),
}

/// Successful collapse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Solved {
    /// Attempts used by the call that solved the grid
    pub attempts: usize,
}

/// How a single attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The attempt collapsed every slot
    Solved,
    /// The attempt emptied the given slot
    Contradiction(Coordinate),
}

/// Notification sent to observers after every attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptReport {
    /// 1-based attempt number within the current call
    pub attempt: usize,
    /// Attempt budget of the current call
    pub max_attempts: usize,
    /// Slots committed by random choice during the attempt
    pub collapses: usize,
    /// Result of the attempt
    pub outcome: AttemptOutcome,
}

/// Committed tile payloads laid out like the grid
///
/// Each cell holds the first module still in its superposition, or `None`
/// for a slot in contradiction.
#[derive(Debug)]
pub struct TileGrid<'a, T> {
    cells: Array2<Option<&'a T>>,
}

impl<'a, T> TileGrid<'a, T> {
    /// Number of columns
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Tile at a coordinate
    pub fn get(&self, coordinate: Coordinate) -> Option<&'a T> {
        self.cells.get([coordinate.y, coordinate.x]).copied().flatten()
    }

    /// Iterate cells in row-major order with their coordinates
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, Option<&'a T>)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((y, x), tile)| (Coordinate::new(x, y), *tile))
    }

    /// Whether every cell has a tile
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }
}

/// Wave function collapse driver over one possibility space
///
/// Owns the grid and the random source for a solve session. The catalog is
/// shared and never mutated, so independent waves may solve in parallel
/// over the same catalog.
#[derive(Debug)]
pub struct Wave<T> {
    catalog: Arc<ModuleCatalog<T>>,
    rules: AdjacencyRules,
    space: PossibilitySpace,
    /// Constrained, propagated state every attempt starts from
    baseline: Option<PossibilitySpace>,
    random: RandomSelector,
    state: SolveState,
    attempts: usize,
    dirty: bool,
}

impl<T> Wave<T> {
    /// Create a grid where every slot may hold any catalog module
    ///
    /// The seed drives every random choice of the solve.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The catalog has no modules
    /// - Width or height is zero or exceeds the maximum grid dimension
    pub fn initialize(
        catalog: Arc<ModuleCatalog<T>>,
        width: usize,
        height: usize,
        seed: u64,
    ) -> Result<Self> {
        if catalog.is_empty() {
            return Err(WaveError::EmptyCatalog);
        }
        if width == 0 || height == 0 || width > MAX_GRID_DIMENSION || height > MAX_GRID_DIMENSION
        {
            return Err(WaveError::InvalidDimensions { width, height });
        }

        let rules = AdjacencyRules::from_catalog(&catalog);
        let space = PossibilitySpace::new(width, height, catalog.len());
        debug!(
            width,
            height,
            modules = catalog.len(),
            seed,
            "initialized possibility space"
        );

        Ok(Self {
            catalog,
            rules,
            space,
            baseline: None,
            random: RandomSelector::new(seed),
            state: SolveState::Ready,
            attempts: 0,
            dirty: false,
        })
    }

    /// The shared module catalog
    pub fn catalog(&self) -> &ModuleCatalog<T> {
        &self.catalog
    }

    /// Precomputed compatibility table for the catalog
    pub const fn rules(&self) -> &AdjacencyRules {
        &self.rules
    }

    /// Current grid state
    pub const fn possibility_space(&self) -> &PossibilitySpace {
        &self.space
    }

    /// Direct write access to the grid for external hard constraints
    ///
    /// # Errors
    ///
    /// Returns [`WaveError::InvalidParameter`] once collapsing has started
    pub fn possibility_space_mut(&mut self) -> Result<&mut PossibilitySpace> {
        self.ensure_unlocked()?;
        Ok(&mut self.space)
    }

    /// Keep only modules matching the predicate in one slot
    ///
    /// Returns the number of modules removed.
    ///
    /// # Errors
    ///
    /// Returns [`WaveError::InvalidParameter`] if collapsing has started or
    /// the coordinate lies outside the grid
    pub fn constrain<F>(&mut self, coordinate: Coordinate, mut predicate: F) -> Result<usize>
    where
        F: FnMut(&Module<T>) -> bool,
    {
        self.ensure_unlocked()?;
        let catalog = &self.catalog;
        let slot = self.space.slot_mut(coordinate).ok_or_else(|| {
            invalid_parameter("coordinate", &coordinate, &"outside the grid")
        })?;
        Ok(slot.retain(|id| catalog.get(id).is_some_and(&mut predicate)))
    }

    /// Keep only modules matching the predicate along one edge of the grid
    ///
    /// Returns the number of modules removed across the edge.
    ///
    /// # Errors
    ///
    /// Returns [`WaveError::InvalidParameter`] once collapsing has started
    pub fn constrain_border<F>(&mut self, side: Direction, mut predicate: F) -> Result<usize>
    where
        F: FnMut(&Module<T>) -> bool,
    {
        let mut removed = 0;
        for coordinate in self.space.border(side) {
            removed += self.constrain(coordinate, &mut predicate)?;
        }
        Ok(removed)
    }

    /// Solve the grid, retrying from the constrained state after contradictions
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `max_attempts` is zero
    /// - A caller constraint left a slot empty or the constraints contradict
    ///   each other before any collapse
    /// - Every attempt ended in contradiction ([`WaveError::Exhausted`]); the
    ///   grid keeps the last attempt's state for best-effort export
    pub fn collapse(&mut self, max_attempts: usize) -> Result<Solved> {
        self.collapse_observed(max_attempts, |_| {})
    }

    /// Like [`Wave::collapse`], reporting every finished attempt to `observer`
    ///
    /// # Errors
    ///
    /// Same as [`Wave::collapse`]
    pub fn collapse_observed<F>(&mut self, max_attempts: usize, mut observer: F) -> Result<Solved>
    where
        F: FnMut(&AttemptReport),
    {
        if max_attempts == 0 {
            return Err(invalid_parameter(
                "max_attempts",
                &max_attempts,
                &"at least one attempt is required",
            ));
        }
        if self.state == SolveState::Solved {
            return Ok(Solved { attempts: 0 });
        }
        if self.baseline.is_none() {
            self.prepare_baseline()?;
        }

        let mut last_contradiction = Coordinate::new(0, 0);
        for attempt in 1..=max_attempts {
            self.reset_to_baseline();
            self.state = SolveState::Running;
            self.attempts += 1;

            let (collapses, outcome) = self.run_attempt();
            observer(&AttemptReport {
                attempt,
                max_attempts,
                collapses,
                outcome,
            });

            match outcome {
                AttemptOutcome::Solved => {
                    self.state = SolveState::Solved;
                    info!(attempt, collapses, "wave collapsed");
                    return Ok(Solved { attempts: attempt });
                }
                AttemptOutcome::Contradiction(at) => {
                    self.state = SolveState::Contradiction(at);
                    last_contradiction = at;
                    debug!(
                        attempt,
                        collapses,
                        x = at.x,
                        y = at.y,
                        "attempt ended in contradiction"
                    );
                }
            }
        }

        self.state = SolveState::Exhausted(last_contradiction);
        info!(
            attempts = max_attempts,
            x = last_contradiction.x,
            y = last_contradiction.y,
            "attempts exhausted"
        );
        Err(WaveError::Exhausted {
            attempts: max_attempts,
            coordinate: last_contradiction,
        })
    }

    /// Current driver state
    pub const fn state(&self) -> SolveState {
        self.state
    }

    /// Attempts started over the lifetime of this wave
    pub const fn attempts(&self) -> usize {
        self.attempts
    }

    /// Committed tile of every cell, laid out like the grid
    pub fn export(&self) -> TileGrid<'_, T> {
        let catalog = &self.catalog;
        let cells = Array2::from_shape_fn((self.space.height(), self.space.width()), |(y, x)| {
            self.space
                .slot(Coordinate::new(x, y))
                .and_then(|slot| slot.first())
                .and_then(|id| catalog.get(id))
                .map(Module::tile)
        });
        TileGrid { cells }
    }

    /// Committed module index of every cell in row-major order
    pub fn assignment(&self) -> Vec<Option<ModuleId>> {
        self.space.slots().map(|slot| slot.first()).collect()
    }

    fn ensure_unlocked(&self) -> Result<()> {
        if self.baseline.is_some() {
            return Err(invalid_parameter(
                "constraint",
                &"possibility space",
                &"constraints must be applied before the first collapse",
            ));
        }
        Ok(())
    }

    // Caller constraints are validated and propagated once; every attempt
    // then restarts from this snapshot.
    fn prepare_baseline(&mut self) -> Result<()> {
        let module_count = self.catalog.len();
        let mut seen = ModuleBitset::new(module_count);
        for slot in self.space.slots_mut() {
            seen.clear();
            // Out-of-catalog ids and repeats are dropped, first occurrence wins
            slot.retain(|id| {
                let fresh = !seen.contains(id);
                seen.insert(id);
                fresh && id < module_count
            });
        }
        if let Some(coordinate) = self.space.first_contradiction() {
            return Err(WaveError::EmptyCell { coordinate });
        }

        // After deduplication a shorter list means the caller narrowed the cell
        let mut worklist = Worklist::for_space(&self.space);
        for (coordinate, slot) in self.space.cells() {
            if slot.len() < module_count {
                worklist.push(coordinate);
            }
        }
        let narrowed = worklist.len();

        if let Err(contradiction) = propagate_from(&mut self.space, &self.rules, &mut worklist) {
            return Err(WaveError::UnsatisfiableConstraints {
                coordinate: contradiction.at,
            });
        }

        debug!(narrowed, "captured constrained baseline");
        self.baseline = Some(self.space.clone());
        Ok(())
    }

    fn reset_to_baseline(&mut self) {
        if self.dirty {
            if let Some(baseline) = &self.baseline {
                self.space.clone_from(baseline);
            }
        }
        self.dirty = true;
    }

    fn run_attempt(&mut self) -> (usize, AttemptOutcome) {
        let mut collapses = 0;

        loop {
            let Some(coordinate) = select_cell(&self.space, &mut self.random) else {
                let outcome = self
                    .space
                    .first_contradiction()
                    .map_or(AttemptOutcome::Solved, AttemptOutcome::Contradiction);
                return (collapses, outcome);
            };

            let Some(slot) = self.space.slot_mut(coordinate) else {
                return (collapses, AttemptOutcome::Contradiction(coordinate));
            };
            let Some(module) = self.random.choose_module(slot) else {
                return (collapses, AttemptOutcome::Contradiction(coordinate));
            };
            slot.collapse_to(module);
            collapses += 1;
            trace!(x = coordinate.x, y = coordinate.y, module, "collapsed slot");

            if let Err(contradiction) = propagate(&mut self.space, &self.rules, coordinate) {
                return (collapses, AttemptOutcome::Contradiction(contradiction.at));
            }
        }
    }
}

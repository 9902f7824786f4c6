//! Possibility space: the grid of cells and their remaining modules
//!
//! Cells live in one row-major `ndarray` indexed `[y, x]`, so the flattened
//! position of a cell is `y * width + x`. Neighbors are found by coordinate
//! arithmetic, never by references between cells.

use ndarray::Array2;
use std::fmt;

use crate::spatial::direction::Direction;
use crate::spatial::tiles::ModuleId;

/// Position of a cell in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinate {
    /// Column
    pub x: usize,
    /// Row, 0 at the top
    pub y: usize,
}

impl Coordinate {
    /// Create a coordinate
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// State of a single cell derived from its superposition size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// No module remains
    Contradiction,
    /// Exactly one module remains
    Collapsed,
    /// More than one module remains
    Undetermined,
}

/// The modules still possible at one grid position
///
/// A slot does not know where it sits; the space derives positions from
/// storage order, so writing a slot can never move it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    superposition: Vec<ModuleId>,
}

impl Slot {
    /// Create a slot holding the given modules
    pub const fn new(superposition: Vec<ModuleId>) -> Self {
        Self { superposition }
    }

    /// Modules still possible, in catalog order unless the caller reordered them
    pub fn superposition(&self) -> &[ModuleId] {
        &self.superposition
    }

    /// Number of modules still possible
    pub fn len(&self) -> usize {
        self.superposition.len()
    }

    /// Whether the slot is in contradiction
    pub fn is_empty(&self) -> bool {
        self.superposition.is_empty()
    }

    /// Classify the slot by superposition size
    pub fn state(&self) -> SlotState {
        match self.superposition.len() {
            0 => SlotState::Contradiction,
            1 => SlotState::Collapsed,
            _ => SlotState::Undetermined,
        }
    }

    /// Whether exactly one module remains
    pub fn is_collapsed(&self) -> bool {
        self.superposition.len() == 1
    }

    /// The first remaining module, which is the committed one once collapsed
    pub fn first(&self) -> Option<ModuleId> {
        self.superposition.first().copied()
    }

    /// Whether the module is still possible here
    pub fn contains(&self, id: ModuleId) -> bool {
        self.superposition.contains(&id)
    }

    /// Keep only modules matching the predicate, returning how many were removed
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(ModuleId) -> bool,
    {
        let before = self.superposition.len();
        self.superposition.retain(|&id| keep(id));
        before - self.superposition.len()
    }

    /// Replace the remaining modules with a caller-written list
    pub fn set_superposition(&mut self, superposition: Vec<ModuleId>) {
        self.superposition = superposition;
    }

    /// Commit the slot to a single module
    pub fn collapse_to(&mut self, id: ModuleId) {
        self.superposition.clear();
        self.superposition.push(id);
    }
}

/// Width × height grid of slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PossibilitySpace {
    slots: Array2<Slot>,
}

impl PossibilitySpace {
    /// Create a grid where every slot may hold any of `module_count` modules
    pub fn new(width: usize, height: usize, module_count: usize) -> Self {
        let all: Vec<ModuleId> = (0..module_count).collect();
        let slots = Array2::from_elem((height, width), Slot::new(all));
        Self { slots }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.slots.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.slots.nrows()
    }

    /// Total number of slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the grid has no slots
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether the coordinate lies inside the grid
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        coordinate.x < self.width() && coordinate.y < self.height()
    }

    /// Flattened position `y * width + x`
    pub fn index_of(&self, coordinate: Coordinate) -> Option<usize> {
        self.contains(coordinate)
            .then(|| coordinate.y * self.width() + coordinate.x)
    }

    /// Coordinate of a flattened position
    pub fn coordinate_of(&self, index: usize) -> Option<Coordinate> {
        (index < self.len()).then(|| Coordinate::new(index % self.width(), index / self.width()))
    }

    /// Slot at a coordinate
    pub fn slot(&self, coordinate: Coordinate) -> Option<&Slot> {
        self.slots.get([coordinate.y, coordinate.x])
    }

    /// Mutable slot at a coordinate
    pub fn slot_mut(&mut self, coordinate: Coordinate) -> Option<&mut Slot> {
        self.slots.get_mut([coordinate.y, coordinate.x])
    }

    /// Iterate slots in row-major order
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    /// Iterate slots with their coordinates in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (Coordinate, &Slot)> {
        self.slots
            .indexed_iter()
            .map(|((y, x), slot)| (Coordinate::new(x, y), slot))
    }

    /// Iterate slots mutably in row-major order
    pub fn slots_mut(&mut self) -> impl Iterator<Item = &mut Slot> {
        self.slots.iter_mut()
    }

    /// Neighbor one step away, if it is inside the grid
    pub fn neighbor(&self, coordinate: Coordinate, direction: Direction) -> Option<Coordinate> {
        let (dx, dy) = direction.offset();
        let x = coordinate.x.checked_add_signed(dx)?;
        let y = coordinate.y.checked_add_signed(dy)?;
        let next = Coordinate::new(x, y);
        self.contains(next).then_some(next)
    }

    /// Coordinates of the slots along one edge of the grid
    pub fn border(&self, side: Direction) -> Vec<Coordinate> {
        let (width, height) = (self.width(), self.height());
        match side {
            Direction::Up => (0..width).map(|x| Coordinate::new(x, 0)).collect(),
            Direction::Down => (0..width)
                .map(|x| Coordinate::new(x, height.saturating_sub(1)))
                .collect(),
            Direction::Left => (0..height).map(|y| Coordinate::new(0, y)).collect(),
            Direction::Right => (0..height)
                .map(|y| Coordinate::new(width.saturating_sub(1), y))
                .collect(),
        }
    }

    /// Whether every slot holds exactly one module
    pub fn is_fully_collapsed(&self) -> bool {
        self.slots.iter().all(Slot::is_collapsed)
    }

    /// First slot in row-major order with an empty superposition
    pub fn first_contradiction(&self) -> Option<Coordinate> {
        self.cells()
            .find(|(_, slot)| slot.is_empty())
            .map(|(coordinate, _)| coordinate)
    }

    /// Sum of superposition sizes, useful for monotonicity checks
    pub fn total_possibilities(&self) -> usize {
        self.slots.iter().map(Slot::len).sum()
    }
}

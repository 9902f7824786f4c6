/// Bitset over module indices
pub mod bitset;
/// Edge compatibility predicate and precomputed adjacency table
pub mod compatibility;
/// Collapse driver with contradiction retry
pub mod executor;
/// Worklist constraint propagation
pub mod propagation;
/// Lowest-entropy cell selection and seeded randomness
pub mod selection;

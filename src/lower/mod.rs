//! Lowering of index expressions toward loop code.
//!
//! This module contains the machinery that turns a tensor index
//! expression into the symbolic structures loop generation consumes:
//! - Tensor paths and iteration schedules
//! - Iterator handles over tensor dimensions
//! - Merge lattices describing every co-iteration case

pub mod schedule;
pub mod iterators;
pub mod merge_lattice;

// Re-exports
pub use schedule::{IterationSchedule, Step, TensorPath};
pub use iterators::{IteratorHandle, Iterators};
pub use merge_lattice::{build_merge_lattice, simplify, MergeLattice, MergeLatticePoint};

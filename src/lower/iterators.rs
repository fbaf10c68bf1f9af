//! Iterator handles over tensor dimensions.
//!
//! An iterator handle is an opaque descriptor of how generated code
//! advances over one dimension of one tensor. Handles are cheap to copy,
//! totally ordered, and characterised by a single predicate: dense
//! iterators traverse every position of a dimension, sparse iterators
//! only the stored coordinates.

use crate::ir::LevelFormat;
use crate::lower::schedule::{IterationSchedule, Step};
use serde::{Serialize, Deserialize};
use std::collections::HashMap;
use std::fmt;

/// An iterator over one dimension of one tensor.
///
/// Identity is the step the iterator is drawn from; the format determines
/// how exhaustion of the iterator affects a co-iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IteratorHandle {
    /// The tensor path step this iterator advances over
    step: Step,
    /// Storage format of the dimension
    format: LevelFormat,
}

impl IteratorHandle {
    /// Create an iterator for a step with the given dimension format.
    pub fn new(step: Step, format: LevelFormat) -> Self {
        Self { step, format }
    }

    /// The step this iterator advances over.
    pub fn step(&self) -> Step {
        self.step
    }

    /// Whether the iterator traverses every position of its dimension.
    pub fn is_dense(&self) -> bool {
        self.format == LevelFormat::Dense
    }
}

impl fmt::Display for IteratorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.step.tensor(), self.step.level())
    }
}

/// Registry of iterator handles, one per tensor path step.
#[derive(Debug, Clone, Default)]
pub struct Iterators {
    map: HashMap<Step, IteratorHandle>,
}

impl Iterators {
    /// Mint one iterator per step of every path in the schedule, dense or
    /// sparse per the tensor's declared level format.
    pub fn from_schedule(schedule: &IterationSchedule) -> Self {
        let mut map = HashMap::new();
        for path in schedule.paths() {
            for (i, &step) in path.steps().iter().enumerate() {
                let format = path.read().tensor().format(i);
                map.insert(step, IteratorHandle::new(step, format));
            }
        }
        Self { map }
    }

    /// The iterator for a step, if the registry covers it.
    pub fn get(&self, step: &Step) -> Option<IteratorHandle> {
        self.map.get(step).copied()
    }

    /// The number of registered iterators.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

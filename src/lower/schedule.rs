//! Iteration schedules and tensor paths.
//!
//! A tensor path records the order in which one tensor's dimensions are
//! traversed: an ordered list of index variables together with a parallel
//! list of steps, one per variable. The iteration schedule maps every
//! tensor read in an index expression to its path. The lowering machinery
//! treats both as read-only oracles.

use crate::ir::{IndexExpr, IndexVar, Read};
use crate::utils::intern::Symbol;
use serde::{Serialize, Deserialize};
use std::collections::HashMap;
use std::fmt;

/// One step of a tensor path: a (tensor, level) pair from which an
/// iterator is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Step {
    /// Interned name of the tensor
    tensor: Symbol,
    /// Dimension level within the tensor, outermost first
    level: usize,
}

impl Step {
    /// Create a step for the given tensor and level.
    pub fn new(tensor: Symbol, level: usize) -> Self {
        Self { tensor, level }
    }

    /// The interned name of the tensor.
    pub fn tensor(&self) -> Symbol {
        self.tensor
    }

    /// The dimension level within the tensor.
    pub fn level(&self) -> usize {
        self.level
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.tensor, self.level)
    }
}

/// The ordered traversal of one tensor read: index variables plus the
/// parallel steps iterators are drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TensorPath {
    /// The read this path traverses
    read: Read,
    /// Index variables in traversal order
    variables: Vec<IndexVar>,
    /// One step per variable
    steps: Vec<Step>,
}

impl TensorPath {
    /// Create the path of a read, traversing its dimensions in access
    /// order.
    pub fn from_read(read: &Read) -> Self {
        let variables = read.index_vars().to_vec();
        let steps = (0..variables.len())
            .map(|level| Step::new(read.tensor().name(), level))
            .collect();
        Self { read: read.clone(), variables, steps }
    }

    /// The read this path traverses.
    pub fn read(&self) -> &Read {
        &self.read
    }

    /// The index variables of the path, in traversal order.
    pub fn variables(&self) -> &[IndexVar] {
        &self.variables
    }

    /// The step for the i-th variable of the path.
    pub fn step(&self, i: usize) -> Step {
        self.steps[i]
    }

    /// All steps of the path, in traversal order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

/// Maps each tensor read in an index expression to its tensor path.
#[derive(Debug, Clone, Default)]
pub struct IterationSchedule {
    paths: HashMap<Read, TensorPath>,
}

impl IterationSchedule {
    /// Derive the schedule of an expression, one path per distinct read.
    pub fn from_expr(expr: &IndexExpr) -> Self {
        let mut paths = HashMap::new();
        for read in expr.reads() {
            paths
                .entry(read.clone())
                .or_insert_with(|| TensorPath::from_read(read));
        }
        Self { paths }
    }

    /// The tensor path of a read, if the schedule covers it.
    pub fn tensor_path(&self, read: &Read) -> Option<&TensorPath> {
        self.paths.get(read)
    }

    /// All paths in the schedule, in no particular order.
    pub fn paths(&self) -> impl Iterator<Item = &TensorPath> {
        self.paths.values()
    }

    /// The number of distinct reads the schedule covers.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the schedule covers no reads.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

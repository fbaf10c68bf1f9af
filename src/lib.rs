//! # Sparsec - Sparse Tensor Algebra Compiler Core
//!
//! A compiler core for sparse tensor algebra, including:
//! - Tensor index expressions over sparse and dense tensors
//! - Iteration schedules and tensor paths
//! - Merge-lattice construction for co-iteration
//!
//! ## Architecture
//!
//! ```text
//! Index expression → Schedule → Iterators → Merge lattice → (loop codegen)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use sparsec::prelude::*;
//!
//! let i = IndexVar::new("i");
//! let a = TensorVar::sparse("A", 1);
//! let b = TensorVar::sparse("B", 1);
//!
//! let lattice = sparsec::build_lattice(&(a.read([i]) + b.read([i])), i).unwrap();
//! assert_eq!(lattice.size(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ir;
pub mod lower;
pub mod utils;

// Re-export commonly used types
pub mod prelude {
    //! Convenient re-exports of commonly used types and traits.

    pub use crate::ir::{
        BinaryOp, IndexExpr, IndexVar, LevelFormat, Read, TensorVar, UnaryOp,
    };
    pub use crate::lower::{
        build_merge_lattice, IterationSchedule, IteratorHandle, Iterators, MergeLattice,
        MergeLatticePoint, Step, TensorPath,
    };
    pub use crate::utils::errors::*;
}

use anyhow::Result;
use ir::{IndexExpr, IndexVar};
use lower::{IterationSchedule, Iterators, MergeLattice};

/// Build the merge lattice of `expr` over `index_var`, deriving the
/// iteration schedule and iterator registry from the expression itself.
pub fn build_lattice(expr: &IndexExpr, index_var: IndexVar) -> Result<MergeLattice> {
    let schedule = IterationSchedule::from_expr(expr);
    let iterators = Iterators::from_schedule(&schedule);
    let lattice = lower::build_merge_lattice(expr, index_var, &schedule, &iterators)?;
    Ok(lattice)
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

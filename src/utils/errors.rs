//! Error types for the sparse tensor compiler.
//!
//! This module defines all error types used throughout the crate,
//! organized by the phase that produces them.

use thiserror::Error;
use std::fmt;

/// Top-level error type for the compiler.
#[derive(Error, Debug)]
pub enum SparsecError {
    /// Error while lowering an index expression
    #[error("Lowering error: {0}")]
    Lower(#[from] LowerError),

    /// Internal compiler error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error during lowering of an index expression to merge lattices.
#[derive(Error, Debug, Clone)]
pub struct LowerError {
    /// The error message
    pub message: String,
    /// The kind of lowering error
    pub kind: LowerErrorKind,
}

impl LowerError {
    /// An unsupported construct in the input expression.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: LowerErrorKind::Unsupported,
        }
    }

    /// A read with no tensor path in the iteration schedule.
    pub fn missing_path(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: LowerErrorKind::MissingTensorPath,
        }
    }

    /// A step with no iterator in the iterator registry.
    pub fn missing_iterator(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: LowerErrorKind::MissingIterator,
        }
    }
}

impl fmt::Display for LowerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LowerErrorKind {
    /// Construct not supported by the lowering machinery
    Unsupported,
    /// The iteration schedule has no path for a read
    MissingTensorPath,
    /// The iterator registry has no iterator for a step
    MissingIterator,
}

/// Result type using LowerError.
pub type LowerResult<T> = Result<T, LowerError>;

/// Result type using SparsecError.
pub type SparsecResult<T> = Result<T, SparsecError>;

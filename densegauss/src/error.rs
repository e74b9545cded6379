use std::fmt;
use thiserror::Error;

use crate::source::SourceError;

/// Dimensions of a matrix, or of a vector seen as a single column
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    #[inline]
    pub fn new(rows: usize, cols: usize) -> Self {
        Shape { rows, cols }
    }

    #[inline]
    pub fn column(len: usize) -> Self {
        Shape { rows: len, cols: 1 }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Errors raised by matrix construction, arithmetic and the solvers
#[derive(Error, Debug)]
pub enum MatrixError {
    #[error("dimension mismatch in {op}: {left} vs {right}")]
    DimensionMismatch {
        op: &'static str,
        left: Shape,
        right: Shape,
    },

    #[error("singular system: zero pivot in column {column}")]
    SingularSystem { column: usize },

    /// An integer result did not fit in the element type
    #[error("integer overflow in {op}")]
    Overflow { op: &'static str },

    #[error("invalid matrix shape {rows}x{cols}: both dimensions must be positive")]
    InvalidShape { rows: usize, cols: usize },

    #[error("matrix must be square to solve, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("row {row} has {found} entries, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Source(#[from] SourceError),
}

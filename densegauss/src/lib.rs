//! `densegauss` is a small Rust library for dense matrix arithmetic and for solving square linear
//! systems by Gaussian elimination. Some features include:
//! - matrices generic over any primitive integer or floating-point element type
//! - addition, subtraction, matrix and matrix-vector multiplication, all checked for shape
//! - Gaussian elimination with no pivoting, partial (row) pivoting or full (row and column)
//!   pivoting, followed by back substitution
//! - a pristine snapshot taken at construction, which every solve restores, so one matrix can be
//!   solved against many right-hand sides
//! - construction from text or files through the [`source::MatrixSource`] trait
//!
//! The main data structures provided by this crate are:
//! - [`DenseMatrix`]: a row-major matrix with its construction-time snapshot
//! - [`Row`]: a borrowed row, carrying the row arithmetic used by the solvers
//! - [`PermutationTable`]: the column bookkeeping of full pivoting
//!
//! Pivot search compares signed values, not magnitudes; see [`pivot`] for details.

#![allow(
    clippy::needless_range_loop,
    clippy::uninlined_format_args,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]
pub mod elimination;
pub mod error;
pub mod matrix;
pub mod permutation;
pub mod pivot;
pub mod row;
pub mod scalar;
pub mod source;
pub mod substitution;

pub use elimination::{ParsePivotingError, Pivoting, RowOps};
pub use error::{MatrixError, Shape};
pub use matrix::DenseMatrix;
pub use permutation::PermutationTable;
pub use row::Row;
pub use scalar::{GridElement, Scalar};
pub use source::{MatrixSource, SourceError, TextGrid};

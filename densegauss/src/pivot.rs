//! Pivot search over the live grid of a [`DenseMatrix`]
//!
//! Both searches pick the greatest *signed* value, not the greatest magnitude, so a large negative
//! entry is never preferred over a small positive one.
//!
//! Ties keep the first candidate in scan order, since only a strictly greater value replaces the
//! running best. `NaN` never compares greater, so it is never chosen over the starting entry.

use crate::matrix::DenseMatrix;
use crate::scalar::Scalar;

impl<T: Scalar> DenseMatrix<T> {
    /// Returns the row in `col..rows` holding the greatest value in column `col`
    pub fn max_in_column_below(&self, col: usize) -> usize {
        let mut best = col;
        for i in (col + 1)..self.rows() {
            if self[(i, col)] > self[(best, col)] {
                best = i;
            }
        }
        best
    }

    /// Returns the `(row, column)` holding the greatest value in the sub-grid starting at
    /// `(start, start)`, scanning row by row
    pub fn max_in_submatrix(&self, start: usize) -> (usize, usize) {
        let mut best = (start, start);
        for i in start..self.rows() {
            for j in start..self.cols() {
                if self[(i, j)] > self[best] {
                    best = (i, j);
                }
            }
        }
        best
    }
}

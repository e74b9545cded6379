use crate::elimination::Pivoting;
use crate::error::MatrixError;
use crate::matrix::DenseMatrix;
use crate::scalar::Scalar;

impl<T: Scalar> DenseMatrix<T> {
    /// Solves the upper-triangular system in the live grid, from the last unknown to the first
    ///
    /// Anything below the diagonal is ignored, so this can be called directly on the output of
    /// [`DenseMatrix::row_echelon`].
    pub fn back_substitute(&self, rhs: Vec<T>) -> Result<Vec<T>, MatrixError> {
        self.check_system(rhs.len())?;
        let n = rhs.len();
        let mut x = rhs;

        for i in (0..n).rev() {
            let diag = self[(i, i)];
            if diag.is_zero() {
                return Err(MatrixError::SingularSystem { column: i });
            }
            let b = x[i];
            x[i] = self.row(i)[(i + 1)..n]
                .dot(&x[(i + 1)..])
                .and_then(|known| b.checked_sub(known))
                .and_then(|v| v.checked_div(diag))
                .ok_or(MatrixError::Overflow {
                    op: "back substitution",
                })?;
        }

        Ok(x)
    }

    /// Solves `self * x = rhs` with the given pivoting strategy
    ///
    /// The live grid is restored from the pristine snapshot before this returns, on success and
    /// on failure alike, so the same matrix can be solved again with another right-hand side.
    ///
    /// ```
    /// use densegauss::{DenseMatrix, Pivoting};
    ///
    /// let mut m = DenseMatrix::<f64>::from_rows(vec![vec![2.0, 1.0], vec![1.0, 3.0]]).unwrap();
    /// let x = m.solve(vec![3.0, 5.0], Pivoting::Full).unwrap();
    /// assert!((x[0] - 0.8).abs() < 1e-12 && (x[1] - 1.4).abs() < 1e-12);
    /// ```
    pub fn solve(&mut self, rhs: Vec<T>, pivoting: Pivoting) -> Result<Vec<T>, MatrixError> {
        self.check_system(rhs.len())?;
        log::debug!(
            "solving {}x{} system with {} pivoting",
            self.rows(),
            self.cols(),
            pivoting
        );

        let result = self.solve_in_place(rhs, pivoting);
        self.reset_to_original();

        if let Err(e) = &result {
            log::debug!("solve with {} pivoting failed: {}", pivoting, e);
        }
        result
    }

    fn solve_in_place(
        &mut self,
        mut rhs: Vec<T>,
        pivoting: Pivoting,
    ) -> Result<Vec<T>, MatrixError> {
        let mut table = self.row_echelon(&mut rhs, pivoting)?;
        let mut x = self.back_substitute(rhs)?;
        if !table.is_identity() {
            log::trace!("restoring unknowns from column order {}", table);
            table.restore_order(&mut x);
        }
        Ok(x)
    }

    /// Gaussian elimination using each diagonal entry as the pivot
    ///
    /// Fails with `SingularSystem` as soon as a diagonal pivot is exactly zero, even when the
    /// system itself is solvable; use a pivoting variant for such inputs.
    #[inline]
    pub fn solve_no_pivot(&mut self, rhs: Vec<T>) -> Result<Vec<T>, MatrixError> {
        self.solve(rhs, Pivoting::None)
    }

    /// Gaussian elimination with partial (row) pivoting
    #[inline]
    pub fn solve_row_pivot(&mut self, rhs: Vec<T>) -> Result<Vec<T>, MatrixError> {
        self.solve(rhs, Pivoting::Partial)
    }

    /// Gaussian elimination with full (row and column) pivoting
    ///
    /// The solution is returned in the original order of the unknowns, whatever columns were
    /// swapped along the way.
    #[inline]
    pub fn solve_full_pivot(&mut self, rhs: Vec<T>) -> Result<Vec<T>, MatrixError> {
        self.solve(rhs, Pivoting::Full)
    }
}

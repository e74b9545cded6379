use std::{fmt, str::FromStr};

use crate::error::{MatrixError, Shape};
use crate::matrix::DenseMatrix;
use crate::permutation::PermutationTable;
use crate::scalar::Scalar;

/// How the elimination engine chooses a pivot before clearing each column
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Pivoting {
    /// Use the diagonal entry as it stands
    None,

    /// Swap in the row holding the greatest value in the pivot column
    #[default]
    Partial,

    /// Swap in the row and column holding the greatest value in the remaining sub-grid
    Full,
}

impl fmt::Display for Pivoting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Pivoting::None => "none",
            Pivoting::Partial => "partial",
            Pivoting::Full => "full",
        })
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown pivoting strategy {0:?}, expected one of \"none\", \"partial\", \"full\"")]
pub struct ParsePivotingError(pub String);

impl FromStr for Pivoting {
    type Err = ParsePivotingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "no" => Ok(Pivoting::None),
            "partial" | "row" => Ok(Pivoting::Partial),
            "full" | "complete" => Ok(Pivoting::Full),
            _ => Err(ParsePivotingError(s.to_owned())),
        }
    }
}

/// Row operations that elimination mirrors onto whatever rides along with the matrix
pub trait RowOps<T> {
    fn swap_rows(&mut self, a: usize, b: usize);

    /// `row[to] -= factor * row[from]`, or `None` if that overflows the element type
    fn sub_scaled_row(&mut self, from: usize, to: usize, factor: T) -> Option<()>;
}

/// A right-hand side vector: each entry is the "row" for the equation of the same index
impl<T: Scalar> RowOps<T> for [T] {
    #[inline]
    fn swap_rows(&mut self, a: usize, b: usize) {
        self.swap(a, b);
    }

    #[inline]
    fn sub_scaled_row(&mut self, from: usize, to: usize, factor: T) -> Option<()> {
        let x = self[from];
        self[to] = self[to].checked_sub(x.checked_mul(factor)?)?;
        Some(())
    }
}

impl<T: Scalar> DenseMatrix<T> {
    pub(crate) fn check_system(&self, rhs_len: usize) -> Result<(), MatrixError> {
        if !self.is_square() {
            return Err(MatrixError::NotSquare {
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        if rhs_len != self.rows() {
            return Err(MatrixError::DimensionMismatch {
                op: "solve",
                left: self.shape(),
                right: Shape::column(rhs_len),
            });
        }
        Ok(())
    }

    /// Swaps two full rows of the matrix, and the matching entries of `rhs`
    pub fn swap_rows(&mut self, a: usize, b: usize, rhs: &mut (impl RowOps<T> + ?Sized)) {
        if a == b {
            return;
        }
        let (ra, rb) = self.row_pair_mut(a, b);
        ra.swap_with(rb);
        rhs.swap_rows(a, b);
    }

    /// Swaps two full columns of the matrix, and the matching entries of the permutation table
    pub fn swap_cols(&mut self, a: usize, b: usize, table: &mut PermutationTable) {
        if a == b {
            return;
        }
        for i in 0..self.rows() {
            self.row_mut(i).as_mut_slice().swap(a, b);
        }
        table.swap(a, b);
    }

    /// Clears column `k` below the diagonal, updating only the columns from `k` onward
    ///
    /// Integer elements divide with truncation here, so for integer matrices the entries below
    /// the pivot are only zeroed when every multiplier is exact.
    fn eliminate_column(
        &mut self,
        k: usize,
        rhs: &mut (impl RowOps<T> + ?Sized),
    ) -> Result<(), MatrixError> {
        if k + 1 >= self.rows() {
            return Ok(());
        }

        let pivot = self[(k, k)];
        if pivot.is_zero() {
            return Err(MatrixError::SingularSystem { column: k });
        }

        let overflow = || MatrixError::Overflow { op: "elimination" };
        for i in (k + 1)..self.rows() {
            let factor = self[(i, k)].checked_div(pivot).ok_or_else(overflow)?;
            let (pivot_row, row) = self.row_pair_mut(k, i);
            row[k..].sub_scaled(&pivot_row[k..], factor).ok_or_else(overflow)?;
            rhs.sub_scaled_row(k, i, factor).ok_or_else(overflow)?;
        }

        Ok(())
    }

    /// Reduces the live grid to row-echelon form in place, applying every row operation to `rhs`
    /// as well
    ///
    /// The returned table records the column swaps made by [`Pivoting::Full`]; for the other
    /// strategies it is the identity. The grid is left in echelon form so it can be inspected;
    /// call [`DenseMatrix::reset_to_original`] to get the original grid back.
    ///
    /// # Errors
    ///
    /// `NotSquare` or `DimensionMismatch` before anything is touched, `SingularSystem` if a zero
    /// pivot has to be divided by, and `Overflow` if an integer multiplier or row update does not
    /// fit in `T`. In the last two cases the grid and `rhs` are left part way through
    /// elimination.
    pub fn row_echelon(
        &mut self,
        rhs: &mut [T],
        pivoting: Pivoting,
    ) -> Result<PermutationTable, MatrixError> {
        self.check_system(rhs.len())?;
        let mut table = PermutationTable::identity(self.cols());

        for k in 0..self.cols() {
            match pivoting {
                Pivoting::None => {}
                Pivoting::Partial => {
                    let row = self.max_in_column_below(k);
                    if row != k {
                        log::trace!("column {}: swapping rows {} and {}", k, k, row);
                        self.swap_rows(k, row, rhs);
                    }
                }
                Pivoting::Full => {
                    let (row, col) = self.max_in_submatrix(k);
                    if row != k {
                        log::trace!("column {}: swapping rows {} and {}", k, k, row);
                        self.swap_rows(k, row, rhs);
                    }
                    if col != k {
                        log::trace!("column {}: swapping columns {} and {}", k, k, col);
                        self.swap_cols(k, col, &mut table);
                    }
                }
            }

            self.eliminate_column(k, rhs)?;
        }

        Ok(table)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn scenario() -> DenseMatrix<i32> {
        DenseMatrix::from_rows(vec![vec![-1, 2, 1], vec![1, -3, -2], vec![3, -1, -1]]).unwrap()
    }

    #[test]
    fn echelon_no_pivot() {
        let mut m = scenario();
        let mut b = vec![-1, -1, 4];
        let table = m.row_echelon(&mut b, Pivoting::None).unwrap();

        assert_eq!(
            m.to_rows(),
            vec![vec![-1, 2, 1], vec![0, -1, -1], vec![0, 0, -3]]
        );
        assert_eq!(b, vec![-1, -2, -9]);
        assert!(table.is_identity());

        m.reset_to_original();
        assert_eq!(m, scenario());
    }

    #[test]
    fn echelon_partial_pivot() {
        let mut m = DenseMatrix::from_rows(vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 10.0],
        ])
        .unwrap();
        let mut b = vec![1.0, 2.0, 3.0];
        m.row_echelon(&mut b, Pivoting::Partial).unwrap();

        // the 7 is the greatest entry of column 0, so the last row moves up
        assert_eq!(m.row(0).as_slice(), &[7.0, 8.0, 10.0]);
        assert_eq!(b[0], 3.0);
        for i in 0..3 {
            for j in 0..i {
                approx::assert_abs_diff_eq!(m[(i, j)], 0.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn echelon_full_pivot_tracks_columns() {
        let mut m = DenseMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 9.0]]).unwrap();
        let mut b = vec![5.0, 21.0];
        let table = m.row_echelon(&mut b, Pivoting::Full).unwrap();

        // the 9 moves to the top left, dragging row 1 up and column 1 left
        assert_eq!(m.row(0).as_slice(), &[9.0, 3.0]);
        assert_eq!(table.as_slice(), &[2, 1]);
        assert_eq!(b[0], 21.0);
        assert!(table.is_permutation());
    }

    #[test]
    fn swap_rows_and_cols() {
        let grid = vec![
            vec![0.3, 0.6, 0.6, 0.1],
            vec![0.4, 0.4, 0.2, 0.6],
            vec![0.3, 0.2, 0.3, 0.2],
        ];

        let mut m = DenseMatrix::from_rows(grid.clone()).unwrap();
        let mut b = vec![0.3, 0.8, 0.4];
        m.swap_rows(0, 2, b.as_mut_slice());
        assert_eq!(
            m.to_rows(),
            vec![
                vec![0.3, 0.2, 0.3, 0.2],
                vec![0.4, 0.4, 0.2, 0.6],
                vec![0.3, 0.6, 0.6, 0.1],
            ]
        );
        assert_eq!(b, vec![0.4, 0.8, 0.3]);

        let mut m = DenseMatrix::from_rows(grid).unwrap();
        let mut table = PermutationTable::identity(4);
        m.swap_cols(0, 2, &mut table);
        assert_eq!(
            m.to_rows(),
            vec![
                vec![0.6, 0.6, 0.3, 0.1],
                vec![0.2, 0.4, 0.4, 0.6],
                vec![0.3, 0.2, 0.3, 0.2],
            ]
        );
        assert_eq!(table.as_slice(), &[3, 2, 1, 4]);
    }

    #[test]
    fn zero_pivot_is_singular() {
        let mut m = DenseMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0, 1.0]]).unwrap();
        let mut b = vec![1.0, 2.0];
        assert!(matches!(
            m.row_echelon(&mut b, Pivoting::None),
            Err(MatrixError::SingularSystem { column: 0 })
        ));
    }

    #[test]
    fn integer_overflow_is_an_error() {
        // i32::MIN / -1 does not fit in an i32
        let mut m = DenseMatrix::from_rows(vec![vec![-1, 0], vec![i32::MIN, 1]]).unwrap();
        assert!(matches!(
            m.row_echelon(&mut [0, 0], Pivoting::None),
            Err(MatrixError::Overflow { op: "elimination" })
        ));

        let mut m = DenseMatrix::from_rows(vec![vec![1, 2], vec![-2, i32::MAX]]).unwrap();
        assert!(matches!(
            m.row_echelon(&mut [0, 0], Pivoting::None),
            Err(MatrixError::Overflow { .. })
        ));

        let mut m = DenseMatrix::from_rows(vec![vec![1, 0], vec![2, 1]]).unwrap();
        assert!(matches!(
            m.row_echelon(&mut [i32::MAX, i32::MIN], Pivoting::None),
            Err(MatrixError::Overflow { .. })
        ));
    }

    #[test]
    fn validates_before_mutating() {
        let mut m = DenseMatrix::<f64>::zeros(2, 3).unwrap();
        assert!(matches!(
            m.row_echelon(&mut [1.0, 2.0], Pivoting::Partial),
            Err(MatrixError::NotSquare { rows: 2, cols: 3 })
        ));

        let mut m = scenario();
        assert!(matches!(
            m.row_echelon(&mut [1, 2], Pivoting::None),
            Err(MatrixError::DimensionMismatch { op: "solve", .. })
        ));
        assert_eq!(m, scenario());
    }

    #[test]
    fn parse_pivoting() {
        assert_eq!("none".parse::<Pivoting>().unwrap(), Pivoting::None);
        assert_eq!(" Row ".parse::<Pivoting>().unwrap(), Pivoting::Partial);
        assert_eq!("FULL".parse::<Pivoting>().unwrap(), Pivoting::Full);
        assert!("diagonal".parse::<Pivoting>().is_err());
        assert_eq!(Pivoting::default(), Pivoting::Partial);
        for p in [Pivoting::None, Pivoting::Partial, Pivoting::Full] {
            assert_eq!(p.to_string().parse::<Pivoting>().unwrap(), p);
        }
    }
}

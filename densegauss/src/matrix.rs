use rand::Rng;
use std::{
    fmt,
    ops::{Add, Index, Mul, Sub},
};

use crate::error::{MatrixError, Shape};
use crate::row::{render_cell, Row};
use crate::scalar::{GridElement, Scalar};
use crate::source::MatrixSource;

/// A dense matrix of numeric elements, stored in row-major order
///
/// Alongside the live grid, the matrix keeps a pristine snapshot of the grid it was constructed
/// with. The solvers eliminate destructively in the live grid and restore it from the snapshot
/// before returning, so one matrix can be solved against many right-hand sides.
#[derive(Clone, Debug)]
pub struct DenseMatrix<T> {
    /// the number of rows in the matrix
    rows: usize,

    /// the number of columns in the matrix
    cols: usize,

    /// the live grid, which elimination works on in place
    data: Vec<T>,

    /// the grid as it was at construction time
    pristine: Vec<T>,
}

impl<T: Scalar> DenseMatrix<T> {
    fn from_data(rows: usize, cols: usize, data: Vec<T>) -> Self {
        DenseMatrix {
            rows,
            cols,
            pristine: data.clone(),
            data,
        }
    }

    fn check_shape(rows: usize, cols: usize) -> Result<(), MatrixError> {
        if rows == 0 || cols == 0 {
            Err(MatrixError::InvalidShape { rows, cols })
        } else {
            Ok(())
        }
    }

    /// Builds a matrix from a function `f` giving the value at each row and column
    pub fn build(
        rows: usize,
        cols: usize,
        mut f: impl FnMut(usize, usize) -> T,
    ) -> Result<Self, MatrixError> {
        Self::check_shape(rows, cols)?;
        let data = (0..rows)
            .flat_map(|i| (0..cols).map(move |j| (i, j)))
            .map(|(i, j)| f(i, j))
            .collect();
        Ok(Self::from_data(rows, cols, data))
    }

    pub fn zeros(rows: usize, cols: usize) -> Result<Self, MatrixError> {
        Self::check_shape(rows, cols)?;
        Ok(Self::from_data(rows, cols, vec![T::zero(); rows * cols]))
    }

    pub fn identity(size: usize) -> Result<Self, MatrixError> {
        Self::build(size, size, |i, j| if i == j { T::one() } else { T::zero() })
    }

    /// Copies a grid given as a vector of rows, which must all have the same, non-zero length
    pub fn from_rows(grid: Vec<Vec<T>>) -> Result<Self, MatrixError> {
        let rows = grid.len();
        let cols = grid.first().map_or(0, |r| r.len());
        Self::check_shape(rows, cols)?;

        let mut data = Vec::with_capacity(rows * cols);
        for (i, row) in grid.into_iter().enumerate() {
            if row.len() != cols {
                return Err(MatrixError::RaggedRows {
                    row: i,
                    expected: cols,
                    found: row.len(),
                });
            }
            data.extend(row);
        }

        Ok(Self::from_data(rows, cols, data))
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn shape(&self) -> Shape {
        Shape::new(self.rows, self.cols)
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    #[inline]
    pub fn row(&self, row: usize) -> &Row<T> {
        Row::new(&self.data[row * self.cols..(row + 1) * self.cols])
    }

    #[inline]
    pub(crate) fn row_mut(&mut self, row: usize) -> &mut Row<T> {
        Row::new_mut(&mut self.data[row * self.cols..(row + 1) * self.cols])
    }

    /// Returns mutable references to two distinct rows
    pub(crate) fn row_pair_mut(&mut self, a: usize, b: usize) -> (&mut Row<T>, &mut Row<T>) {
        debug_assert!(a != b);
        let cols = self.cols;
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.data.split_at_mut(hi * cols);
        let lo_row = Row::new_mut(&mut head[lo * cols..(lo + 1) * cols]);
        let hi_row = Row::new_mut(&mut tail[..cols]);
        if a < b {
            (lo_row, hi_row)
        } else {
            (hi_row, lo_row)
        }
    }

    /// Copies the live grid out as a vector of rows
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.data.chunks(self.cols).map(|r| r.to_vec()).collect()
    }

    /// Copies the grid captured at construction out as a vector of rows
    pub fn original(&self) -> Vec<Vec<T>> {
        self.pristine.chunks(self.cols).map(|r| r.to_vec()).collect()
    }

    /// Overwrites the live grid with the snapshot taken at construction
    ///
    /// Every solver calls this before returning, whether or not it succeeded.
    #[inline]
    pub fn reset_to_original(&mut self) {
        self.data.clone_from(&self.pristine);
    }

    /// Renders the live grid as pipe-delimited rows with 3 decimals per element
    ///
    /// All cells are padded to the width of the widest one, so columns line up:
    ///
    /// ```
    /// use densegauss::DenseMatrix;
    ///
    /// let m = DenseMatrix::from_rows(vec![vec![1, -20], vec![3, 4]]).unwrap();
    /// assert_eq!(m.render(), "|   1.000| -20.000|\n|   3.000|   4.000|\n");
    /// ```
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl<T: GridElement> DenseMatrix<T> {
    /// Reads the grid for `T` from `source` once, and snapshots it as the pristine copy
    pub fn from_source(source: &mut impl MatrixSource) -> Result<Self, MatrixError> {
        Self::from_rows(T::read_grid(source)?)
    }
}

impl DenseMatrix<f64> {
    /// Random matrix with entries uniform in `[-1, 1)`
    pub fn random(rng: &mut impl Rng, rows: usize, cols: usize) -> Result<Self, MatrixError> {
        Self::build(rows, cols, |_, _| rng.random_range(-1.0..1.0))
    }

    /// Random square matrix that is strictly diagonally dominant by rows and by columns, with a
    /// positive diagonal
    ///
    /// Elimination never meets a zero pivot on these, whichever pivoting strategy is used.
    pub fn random_well_conditioned(rng: &mut impl Rng, size: usize) -> Result<Self, MatrixError> {
        let diag = 2.0 * size as f64;
        Self::build(size, size, |i, j| {
            if i == j {
                diag + rng.random_range(0.0..1.0)
            } else {
                rng.random_range(-1.0..1.0)
            }
        })
    }
}

impl<T: Scalar> TryFrom<Vec<Vec<T>>> for DenseMatrix<T> {
    type Error = MatrixError;

    fn try_from(value: Vec<Vec<T>>) -> Result<Self, Self::Error> {
        DenseMatrix::from_rows(value)
    }
}

/// Two matrices are equal if their shapes and live grids agree; the pristine snapshots are not
/// compared
impl<T: PartialEq> PartialEq for DenseMatrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.cols == other.cols && self.data == other.data
    }
}

impl<T> Index<(usize, usize)> for DenseMatrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.data[index.0 * self.cols + index.1]
    }
}

impl<T: Scalar> fmt::Display for DenseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .data
            .iter()
            .map(|x| render_cell(x).len())
            .max()
            .unwrap_or(0);
        for i in 0..self.rows {
            writeln!(f, "{:width$}", self.row(i), width = width)?;
        }

        Ok(())
    }
}

impl<T: Scalar> DenseMatrix<T> {
    fn zip_with(
        &self,
        rhs: &DenseMatrix<T>,
        op: &'static str,
        f: impl Fn(T, T) -> Option<T>,
    ) -> Result<DenseMatrix<T>, MatrixError> {
        if self.shape() != rhs.shape() {
            return Err(MatrixError::DimensionMismatch {
                op,
                left: self.shape(),
                right: rhs.shape(),
            });
        }

        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect::<Option<Vec<T>>>()
            .ok_or(MatrixError::Overflow { op })?;
        Ok(DenseMatrix::from_data(self.rows, self.cols, data))
    }
}

impl<T: Scalar> Add<&DenseMatrix<T>> for &DenseMatrix<T> {
    type Output = Result<DenseMatrix<T>, MatrixError>;

    fn add(self, rhs: &DenseMatrix<T>) -> Self::Output {
        self.zip_with(rhs, "add", T::checked_add)
    }
}

impl<T: Scalar> Sub<&DenseMatrix<T>> for &DenseMatrix<T> {
    type Output = Result<DenseMatrix<T>, MatrixError>;

    fn sub(self, rhs: &DenseMatrix<T>) -> Self::Output {
        self.zip_with(rhs, "subtract", T::checked_sub)
    }
}

impl<T: Scalar> Mul<&DenseMatrix<T>> for &DenseMatrix<T> {
    type Output = Result<DenseMatrix<T>, MatrixError>;

    fn mul(self, rhs: &DenseMatrix<T>) -> Self::Output {
        if self.cols != rhs.rows {
            return Err(MatrixError::DimensionMismatch {
                op: "multiply",
                left: self.shape(),
                right: rhs.shape(),
            });
        }

        let mut res = vec![T::zero(); self.rows * rhs.cols];
        for i in 0..self.rows {
            let out = Row::new_mut(&mut res[i * rhs.cols..(i + 1) * rhs.cols]);
            // accumulate row i of the product as a combination of the rows of `rhs`
            for (k, a) in self.row(i).iter().enumerate() {
                out.add_scaled(rhs.row(k), a)
                    .ok_or(MatrixError::Overflow { op: "multiply" })?;
            }
        }

        Ok(DenseMatrix::from_data(self.rows, rhs.cols, res))
    }
}

/// Matrix-vector product, treating the slice as a column vector
impl<T: Scalar> Mul<&[T]> for &DenseMatrix<T> {
    type Output = Result<Vec<T>, MatrixError>;

    fn mul(self, rhs: &[T]) -> Self::Output {
        if self.cols != rhs.len() {
            return Err(MatrixError::DimensionMismatch {
                op: "multiply",
                left: self.shape(),
                right: Shape::column(rhs.len()),
            });
        }

        (0..self.rows)
            .map(|i| {
                self.row(i)
                    .dot(rhs)
                    .ok_or(MatrixError::Overflow { op: "multiply" })
            })
            .collect()
    }
}

use pyo3::exceptions::{PyIndexError, PyValueError};
use pyo3::prelude::*;

use densegauss::{DenseMatrix, MatrixError, Pivoting, TextGrid};
use rand::{rngs::SmallRng, SeedableRng};

#[pyclass(name = "DenseMatrix")]
#[derive(Clone)]
pub struct PyDenseMatrix {
    pub(crate) inner: DenseMatrix<f64>,
}

fn value_error(e: MatrixError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn parse_pivoting(pivoting: &str) -> PyResult<Pivoting> {
    pivoting
        .parse()
        .map_err(|e: densegauss::ParsePivotingError| PyValueError::new_err(e.to_string()))
}

#[pymethods]
impl PyDenseMatrix {
    /// Creates a new matrix of the given dimensions, filled with zeros
    #[new]
    pub fn new(rows: usize, cols: usize) -> PyResult<Self> {
        DenseMatrix::<f64>::zeros(rows, cols)
            .map(Into::into)
            .map_err(value_error)
    }

    /// Creates a matrix from a list of rows
    #[staticmethod]
    pub fn from_list(data: Vec<Vec<f64>>) -> PyResult<Self> {
        DenseMatrix::from_rows(data)
            .map(Into::into)
            .map_err(value_error)
    }

    /// Reads a matrix from a text file with one row per line
    #[staticmethod]
    pub fn from_file(path: &str) -> PyResult<Self> {
        let mut source = TextGrid::from_path(path)
            .map_err(|e| value_error(MatrixError::from(e)))?;
        DenseMatrix::<f64>::from_source(&mut source)
            .map(Into::into)
            .map_err(value_error)
    }

    /// Creates an identity matrix of the given size
    #[staticmethod]
    pub fn identity(size: usize) -> PyResult<Self> {
        DenseMatrix::<f64>::identity(size)
            .map(Into::into)
            .map_err(value_error)
    }

    /// Creates a matrix with entries drawn uniformly from [-1, 1)
    #[staticmethod]
    #[pyo3(signature = (rows, cols, seed=None))]
    pub fn random(rows: usize, cols: usize, seed: Option<u64>) -> PyResult<Self> {
        let mut rng = if let Some(s) = seed {
            SmallRng::seed_from_u64(s)
        } else {
            SmallRng::from_os_rng()
        };

        DenseMatrix::random(&mut rng, rows, cols)
            .map(Into::into)
            .map_err(value_error)
    }

    /// Returns the number of rows
    #[getter]
    pub fn rows(&self) -> usize {
        self.inner.rows()
    }

    /// Returns the number of columns
    #[getter]
    pub fn cols(&self) -> usize {
        self.inner.cols()
    }

    /// Convert the matrix to a list of rows
    pub fn to_list(&self) -> Vec<Vec<f64>> {
        self.inner.to_rows()
    }

    /// The grid as it was when the matrix was created
    pub fn original(&self) -> Vec<Vec<f64>> {
        self.inner.original()
    }

    /// Support for indexing with [i, j]
    pub fn __getitem__(&self, key: (usize, usize)) -> PyResult<f64> {
        let (i, j) = key;
        if i >= self.inner.rows() || j >= self.inner.cols() {
            return Err(PyIndexError::new_err("Index out of bounds"));
        }
        Ok(self.inner[(i, j)])
    }

    pub fn __add__(&self, other: &PyDenseMatrix) -> PyResult<Self> {
        (&self.inner + &other.inner)
            .map(Into::into)
            .map_err(value_error)
    }

    pub fn __sub__(&self, other: &PyDenseMatrix) -> PyResult<Self> {
        (&self.inner - &other.inner)
            .map(Into::into)
            .map_err(value_error)
    }

    /// Matrix product using the * operator
    pub fn __mul__(&self, other: &PyDenseMatrix) -> PyResult<Self> {
        (&self.inner * &other.inner)
            .map(Into::into)
            .map_err(value_error)
    }

    /// Multiplies the matrix by a column vector given as a list
    pub fn mul_vector(&self, vector: Vec<f64>) -> PyResult<Vec<f64>> {
        (&self.inner * vector.as_slice()).map_err(value_error)
    }

    /// Solves the system against `b`, choosing the pivoting strategy by name
    #[pyo3(signature = (b, pivoting="partial"))]
    pub fn solve(&mut self, b: Vec<f64>, pivoting: &str) -> PyResult<Vec<f64>> {
        let pivoting = parse_pivoting(pivoting)?;
        self.inner.solve(b, pivoting).map_err(value_error)
    }

    pub fn solve_no_pivot(&mut self, b: Vec<f64>) -> PyResult<Vec<f64>> {
        self.inner.solve_no_pivot(b).map_err(value_error)
    }

    pub fn solve_row_pivot(&mut self, b: Vec<f64>) -> PyResult<Vec<f64>> {
        self.inner.solve_row_pivot(b).map_err(value_error)
    }

    pub fn solve_full_pivot(&mut self, b: Vec<f64>) -> PyResult<Vec<f64>> {
        self.inner.solve_full_pivot(b).map_err(value_error)
    }

    /// Reduces the matrix to row-echelon form in place
    ///
    /// Returns the transformed right-hand side and the 1-based column permutation. The matrix
    /// stays in echelon form until `reset_to_original` is called.
    #[pyo3(signature = (b, pivoting="none"))]
    pub fn row_echelon(
        &mut self,
        mut b: Vec<f64>,
        pivoting: &str,
    ) -> PyResult<(Vec<f64>, Vec<usize>)> {
        let pivoting = parse_pivoting(pivoting)?;
        let table = self
            .inner
            .row_echelon(&mut b, pivoting)
            .map_err(value_error)?;
        Ok((b, table.as_slice().to_vec()))
    }

    pub fn reset_to_original(&mut self) {
        self.inner.reset_to_original();
    }

    /// Returns a copy of the matrix
    pub fn copy(&self) -> Self {
        self.clone()
    }

    pub fn __eq__(&self, other: &PyDenseMatrix) -> bool {
        self.inner == other.inner
    }

    pub fn __str__(&self) -> String {
        self.inner.render()
    }

    pub fn __repr__(&self) -> String {
        format!(
            "DenseMatrix(rows={}, cols={})",
            self.inner.rows(),
            self.inner.cols()
        )
    }
}

impl From<DenseMatrix<f64>> for PyDenseMatrix {
    fn from(inner: DenseMatrix<f64>) -> Self {
        PyDenseMatrix { inner }
    }
}

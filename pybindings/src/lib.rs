// There seems to be some issues with the pyo3 bindings generation on methods returning
// a `PyResult<T>`.
#![allow(clippy::useless_conversion)]

pub mod densematrix;

use crate::densematrix::PyDenseMatrix;
use pyo3::prelude::*;

#[pymodule]
fn densegauss(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyDenseMatrix>()?;
    Ok(())
}

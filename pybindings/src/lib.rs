// There seems to be some issues with the pyo3 bindings generation on methods returning
// a `PyResult<T>`.
#![allow(clippy::useless_conversion)]

pub mod graph;

use crate::graph::PyRelatednessGraph;

use ::kinprune::kinship::{KinshipError, KinshipMatrix};
use ::kinprune::prune::{PruneError, Pruner};
use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

#[pymodule]
fn kinprune_py(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(read_matrix, m)?)?;
    m.add_function(wrap_pyfunction!(prune_related, m)?)?;
    m.add_class::<PyRelatednessGraph>()?;
    Ok(())
}

pub(crate) fn kinship_err(e: KinshipError) -> PyErr {
    match e {
        KinshipError::Io(e) => PyIOError::new_err(e.to_string()),
        e => PyValueError::new_err(e.to_string()),
    }
}

fn prune_err(e: PruneError) -> PyErr {
    match e {
        PruneError::Kinship(e) => kinship_err(e),
        e => PyValueError::new_err(e.to_string()),
    }
}

pub(crate) fn matrix_from_rows(matrix: Vec<Vec<f64>>) -> PyResult<KinshipMatrix> {
    KinshipMatrix::from_rows(matrix).map_err(kinship_err)
}

/// Read a comma separated kinship matrix into a list of rows.
#[pyfunction]
fn read_matrix(path: &str) -> PyResult<Vec<Vec<f64>>> {
    let m = KinshipMatrix::from_csv_file(path).map_err(kinship_err)?;
    Ok(m.as_array().outer_iter().map(|row| row.to_vec()).collect())
}

/// Returns the individuals to keep and, if an include list was given, the
/// survivors of that list.
#[pyfunction]
#[pyo3(signature = (matrix, threshold, include=None, tolerance=0.0))]
fn prune_related(
    matrix: Vec<Vec<f64>>,
    threshold: f64,
    include: Option<Vec<usize>>,
    tolerance: f64,
) -> PyResult<(Vec<usize>, Option<Vec<usize>>)> {
    let m = matrix_from_rows(matrix)?;
    let res = Pruner::new()
        .with_threshold(threshold)
        .with_tolerance(tolerance)
        .with_include(include)
        .prune(&m)
        .map_err(prune_err)?;
    Ok((res.kept, res.kept_include))
}

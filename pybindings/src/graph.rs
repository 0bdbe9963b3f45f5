use ::kinprune::graph::{GraphLike, V};
use ::kinprune::independent_set::IndependentSetFinder;
use ::kinprune::kinship::relatedness_graph;
use ::kinprune::vec_graph::Graph;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::{kinship_err, matrix_from_rows};

/// Wrapper for kinprune::vec_graph::Graph
#[pyclass(name = "RelatednessGraph")]
pub struct PyRelatednessGraph {
    pub g: Graph,
}

#[pymethods]
impl PyRelatednessGraph {
    #[new]
    #[pyo3(signature = (n=0))]
    fn new(n: usize) -> PyRelatednessGraph {
        PyRelatednessGraph {
            g: Graph::with_vertices(n),
        }
    }

    #[staticmethod]
    #[pyo3(signature = (matrix, threshold, tolerance=0.0))]
    fn from_matrix(matrix: Vec<Vec<f64>>, threshold: f64, tolerance: f64) -> PyResult<Self> {
        let m = matrix_from_rows(matrix)?;
        let g = relatedness_graph(&m, threshold, tolerance).map_err(kinship_err)?;
        Ok(PyRelatednessGraph { g })
    }

    fn add_edge(&mut self, s: V, t: V) -> PyResult<()> {
        if s == t || !self.g.contains_vertex(s) || !self.g.contains_vertex(t) {
            return Err(PyValueError::new_err(format!("Invalid edge ({s}, {t})")));
        }
        if !self.g.connected(s, t) {
            self.g.add_edge(s, t);
        }
        Ok(())
    }

    fn num_vertices(&self) -> usize {
        self.g.num_vertices()
    }

    fn num_edges(&self) -> usize {
        self.g.num_edges()
    }

    fn edges(&self) -> Vec<(V, V)> {
        self.g.edge_vec()
    }

    fn neighbors(&self, v: V) -> PyResult<Vec<V>> {
        if !self.g.contains_vertex(v) {
            return Err(PyValueError::new_err(format!("No vertex {v}")));
        }
        Ok(self.g.neighbor_vec(v))
    }

    /// An approximately maximum independent set, optionally containing the
    /// `required` vertices.
    #[pyo3(signature = (required=None))]
    fn independent_set(&self, required: Option<Vec<V>>) -> PyResult<Vec<V>> {
        let finder = IndependentSetFinder::default();
        match required {
            Some(req) => finder
                .find_with(&self.g, &req)
                .map_err(|e| PyValueError::new_err(e.to_string())),
            None => Ok(finder.find(&self.g)),
        }
    }

    fn to_dot(&self, highlight: Vec<V>) -> String {
        self.g.to_dot(&highlight)
    }
}

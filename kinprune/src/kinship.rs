// KinPrune - Rust library for pruning related individuals from a cohort
//            using kinship-based relatedness graphs
// Copyright (C) 2026 - The KinPrune authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Kinship matrices and the relatedness graphs built from them.
//!
//! A kinship matrix is a square, symmetric matrix of real coefficients. Two
//! individuals `i != j` are considered related when `matrix[i][j]` is strictly
//! greater than the threshold. The diagonal is ignored.

use approx::abs_diff_eq;
use ndarray::Array2;
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::graph::{GraphLike, V};
use crate::vec_graph::Graph;

#[derive(Debug, thiserror::Error)]
pub enum KinshipError {
    /// Some row has a different length than the number of rows.
    #[error("Kinship matrix is not square: row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
    /// Entries (i,j) and (j,i) differ by more than the tolerance.
    #[error("Kinship matrix is not symmetric: entry ({i},{j}) is {a} but ({j},{i}) is {b}")]
    Asymmetric { i: usize, j: usize, a: f64, b: f64 },
    /// An off-diagonal entry is NaN or infinite.
    #[error("Kinship matrix has a non-finite entry at ({i},{j})")]
    NonFinite { i: usize, j: usize },
    #[error("Threshold must be a finite number, got {0}")]
    InvalidThreshold(f64),
    #[error("Symmetry tolerance must be a finite non-negative number, got {0}")]
    InvalidTolerance(f64),
    #[error("Could not parse kinship value {value:?} at line {line}, column {column}")]
    Parse {
        line: usize,
        column: usize,
        value: String,
    },
    #[error("Index {index} is out of range for a kinship matrix of {len} individuals")]
    IndexOutOfRange { index: usize, len: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl KinshipError {
    /// True for the errors that mean the matrix itself is unusable.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            KinshipError::NotSquare { .. }
                | KinshipError::Asymmetric { .. }
                | KinshipError::NonFinite { .. }
        )
    }
}

/// A square matrix of kinship coefficients, one row and column per individual.
#[derive(Debug, Clone, PartialEq)]
pub struct KinshipMatrix {
    data: Array2<f64>,
}

impl KinshipMatrix {
    /// Build a matrix from its rows. Every row must have one entry per row.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, KinshipError> {
        let n = rows.len();
        let mut flat = Vec::with_capacity(n * n);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != n {
                return Err(KinshipError::NotSquare {
                    row,
                    len: values.len(),
                    expected: n,
                });
            }
            flat.extend(values);
        }
        let data = Array2::from_shape_vec((n, n), flat).map_err(|_| KinshipError::NotSquare {
            row: 0,
            len: 0,
            expected: n,
        })?;
        Ok(KinshipMatrix { data })
    }

    pub fn from_array(data: Array2<f64>) -> Result<Self, KinshipError> {
        let (rows, cols) = data.dim();
        if rows != cols {
            return Err(KinshipError::NotSquare {
                row: 0,
                len: cols,
                expected: rows,
            });
        }
        Ok(KinshipMatrix { data })
    }

    /// Read a comma separated matrix without header or row names.
    ///
    /// Whitespace around each value is ignored, as are blank lines.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, KinshipError> {
        let mut rows = Vec::new();
        for (lineno, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let row = line
                .split(',')
                .enumerate()
                .map(|(col, cell)| {
                    cell.trim().parse::<f64>().map_err(|_| KinshipError::Parse {
                        line: lineno + 1,
                        column: col + 1,
                        value: cell.trim().to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }
        Self::from_rows(rows)
    }

    pub fn from_csv_file(path: impl AsRef<Path>) -> Result<Self, KinshipError> {
        Self::from_csv_reader(File::open(path)?)
    }

    /// Number of individuals
    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[[i, j]]
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.data
    }

    /// Check that every off-diagonal entry is finite and that the matrix is
    /// symmetric up to `tolerance`. A tolerance of zero demands exact equality.
    pub fn validate(&self, tolerance: f64) -> Result<(), KinshipError> {
        if !(tolerance.is_finite() && tolerance >= 0.0) {
            return Err(KinshipError::InvalidTolerance(tolerance));
        }
        let n = self.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let a = self.data[[i, j]];
                let b = self.data[[j, i]];
                if !a.is_finite() {
                    return Err(KinshipError::NonFinite { i, j });
                }
                if !b.is_finite() {
                    return Err(KinshipError::NonFinite { i: j, j: i });
                }
                if !abs_diff_eq!(a, b, epsilon = tolerance) {
                    return Err(KinshipError::Asymmetric { i, j, a, b });
                }
            }
        }
        Ok(())
    }

    /// The principal submatrix over `indices`, in the given order.
    ///
    /// Row `k` of the result is row `indices[k]` of `self`.
    pub fn restrict(&self, indices: &[usize]) -> Result<Self, KinshipError> {
        if let Some(&index) = indices.iter().find(|&&i| i >= self.len()) {
            return Err(KinshipError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        let k = indices.len();
        let data = Array2::from_shape_fn((k, k), |(a, b)| self.data[[indices[a], indices[b]]]);
        Ok(KinshipMatrix { data })
    }
}

fn check_threshold(threshold: f64) -> Result<(), KinshipError> {
    if threshold.is_finite() {
        Ok(())
    } else {
        Err(KinshipError::InvalidThreshold(threshold))
    }
}

/// Build the relatedness graph of `matrix` into any graph type.
///
/// Vertex `i` of the result is individual `i`; there is an edge between
/// `i != j` iff `matrix[i][j] > threshold`. The matrix must be symmetric up to
/// `tolerance`.
pub fn relatedness_graph<G: GraphLike>(
    matrix: &KinshipMatrix,
    threshold: f64,
    tolerance: f64,
) -> Result<G, KinshipError> {
    check_threshold(threshold)?;
    matrix.validate(tolerance)?;

    let n = matrix.len();
    let data = matrix.as_array();

    // scanning the upper triangle dominates for large cohorts
    let related: Vec<Vec<V>> = (0..n)
        .into_par_iter()
        .map(|i| ((i + 1)..n).filter(|&j| data[[i, j]] > threshold).collect())
        .collect();

    let mut g = G::with_vertices(n);
    for (i, row) in related.into_iter().enumerate() {
        for j in row {
            g.add_edge(i, j);
        }
    }

    log::info!(
        "Relatedness graph: {} individuals, {} related pairs above {}",
        g.num_vertices(),
        g.num_edges(),
        threshold
    );
    Ok(g)
}

/// Build the relatedness graph of an exactly symmetric matrix.
pub fn build_graph(matrix: &KinshipMatrix, threshold: f64) -> Result<Graph, KinshipError> {
    relatedness_graph(matrix, threshold, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash_graph;
    use rstest::{fixture, rstest};

    #[fixture]
    fn three() -> KinshipMatrix {
        KinshipMatrix::from_rows(vec![
            vec![0.0, 0.1, 0.01],
            vec![0.1, 0.0, 0.01],
            vec![0.01, 0.01, 0.0],
        ])
        .unwrap()
    }

    #[rstest]
    fn one_related_pair(three: KinshipMatrix) {
        let g = build_graph(&three, 0.0625).unwrap();
        assert_eq!(g.num_vertices(), 3);
        assert_eq!(g.edge_vec(), vec![(0, 1)]);
        assert_eq!(g.isolated_vertices(), vec![2]);
    }

    #[rstest]
    fn generic_graph_type(three: KinshipMatrix) {
        let g: hash_graph::Graph = relatedness_graph(&three, 0.0625, 0.0).unwrap();
        assert_eq!(g.edge_vec(), vec![(0, 1)]);
    }

    #[rstest]
    #[case(0.1, vec![])]
    #[case(0.0999, vec![(0, 1)])]
    #[case(0.01, vec![(0, 1)])]
    #[case(0.0, vec![(0, 1), (0, 2), (1, 2)])]
    fn threshold_is_strict(three: KinshipMatrix, #[case] threshold: f64, #[case] edges: Vec<(V, V)>) {
        let g = build_graph(&three, threshold).unwrap();
        assert_eq!(g.edge_vec(), edges);
    }

    #[test]
    fn diagonal_is_ignored() {
        let m = KinshipMatrix::from_rows(vec![vec![0.5, 0.0], vec![0.0, f64::NAN]]).unwrap();
        let g = build_graph(&m, 0.1).unwrap();
        assert_eq!(g.num_vertices(), 2);
        assert_eq!(g.num_edges(), 0);
    }

    #[test]
    fn empty_matrix() {
        let m = KinshipMatrix::from_rows(vec![]).unwrap();
        assert!(m.is_empty());
        let g = build_graph(&m, 0.1).unwrap();
        assert_eq!(g.num_vertices(), 0);
    }

    #[test]
    fn not_square() {
        let err = KinshipMatrix::from_rows(vec![vec![0.0, 0.1], vec![0.1]]).unwrap_err();
        assert!(matches!(
            err,
            KinshipError::NotSquare {
                row: 1,
                len: 1,
                expected: 2
            }
        ));
        assert!(err.is_malformed());

        let err = KinshipMatrix::from_array(Array2::zeros((2, 3))).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn asymmetric() {
        let m = KinshipMatrix::from_rows(vec![vec![0.0, 0.1], vec![0.1000001, 0.0]]).unwrap();
        let err = build_graph(&m, 0.05).unwrap_err();
        assert!(matches!(err, KinshipError::Asymmetric { i: 0, j: 1, .. }));
        assert!(err.is_malformed());

        // accepted once a tolerance is supplied
        let g: Graph = relatedness_graph(&m, 0.05, 1e-3).unwrap();
        assert_eq!(g.num_edges(), 1);
    }

    #[test]
    fn non_finite_entry() {
        let m = KinshipMatrix::from_rows(vec![vec![0.0, f64::INFINITY], vec![f64::INFINITY, 0.0]])
            .unwrap();
        assert!(matches!(
            build_graph(&m, 0.05),
            Err(KinshipError::NonFinite { i: 0, j: 1 })
        ));
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    fn invalid_threshold(three: KinshipMatrix, #[case] threshold: f64) {
        let err = build_graph(&three, threshold).unwrap_err();
        assert!(matches!(err, KinshipError::InvalidThreshold(_)));
        assert!(!err.is_malformed());
    }

    #[rstest]
    #[case(-1e-9)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn invalid_tolerance(three: KinshipMatrix, #[case] tolerance: f64) {
        let err = three.validate(tolerance).unwrap_err();
        assert!(matches!(err, KinshipError::InvalidTolerance(_)));
        assert!(!err.is_malformed());
        assert!(matches!(
            relatedness_graph::<Graph>(&three, 0.05, tolerance),
            Err(KinshipError::InvalidTolerance(_))
        ));
    }

    #[test]
    fn read_csv() {
        let csv = "0, 0.1,0.01\n0.1,0 ,0.01\n 0.01,0.01,0\n\n";
        let m = KinshipMatrix::from_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(m.len(), 3);
        assert_eq!(m.get(0, 1), 0.1);
        assert_eq!(m.get(2, 0), 0.01);
    }

    #[test]
    fn read_csv_bad_cell() {
        let csv = "0,0.1\n0.1,abc\n";
        let err = KinshipMatrix::from_csv_reader(csv.as_bytes()).unwrap_err();
        match err {
            KinshipError::Parse {
                line,
                column,
                value,
            } => {
                assert_eq!((line, column), (2, 2));
                assert_eq!(value, "abc");
            }
            e => panic!("unexpected error: {e}"),
        }
    }

    #[test]
    fn read_csv_ragged() {
        let csv = "0,0.1,0.2\n0.1,0\n";
        let err = KinshipMatrix::from_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, KinshipError::NotSquare { .. }));
    }

    #[rstest]
    fn restrict_to_subset(three: KinshipMatrix) {
        let sub = three.restrict(&[2, 0]).unwrap();
        assert_eq!(sub.len(), 2);
        assert_eq!(sub.get(0, 1), 0.01);
        assert_eq!(sub.get(1, 0), 0.01);

        let err = three.restrict(&[0, 3]).unwrap_err();
        assert!(matches!(err, KinshipError::IndexOutOfRange { index: 3, len: 3 }));
    }
}

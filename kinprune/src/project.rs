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

//! Mapping kept graph vertices back to the individuals they stand for.

use crate::graph::V;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Vertex {vertex} has no original index, the map covers {len} vertices")]
pub struct IndexMapError {
    pub vertex: V,
    pub len: usize,
}

/// Original individual index for each working vertex id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexMap {
    len: usize,
    // None means vertex `v` is individual `v`
    original: Option<Vec<usize>>,
}

impl IndexMap {
    /// Vertex `v` is individual `v`, for `v < n`.
    pub fn identity(n: usize) -> Self {
        IndexMap {
            len: n,
            original: None,
        }
    }

    /// Vertex `v` is individual `original[v]`.
    pub fn from_original(original: Vec<usize>) -> Self {
        IndexMap {
            len: original.len(),
            original: Some(original),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn original(&self, v: V) -> Result<usize, IndexMapError> {
        if v >= self.len {
            return Err(IndexMapError {
                vertex: v,
                len: self.len,
            });
        }
        Ok(match &self.original {
            Some(original) => original[v],
            None => v,
        })
    }
}

/// Original indices of the `kept` vertices, ascending and without repeats.
pub fn project(kept: &[V], map: &IndexMap) -> Result<Vec<usize>, IndexMapError> {
    let mut out = kept
        .iter()
        .map(|&v| map.original(v))
        .collect::<Result<Vec<_>, _>>()?;
    out.sort_unstable();
    out.dedup();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_sorts() {
        let map = IndexMap::identity(5);
        assert_eq!(project(&[4, 0, 2], &map), Ok(vec![0, 2, 4]));
        assert_eq!(project(&[], &map), Ok(vec![]));
    }

    #[test]
    fn renumbered_vertices() {
        // individuals 3 and 7 were dropped before the graph was built
        let map = IndexMap::from_original(vec![0, 1, 2, 4, 5, 6, 8]);
        assert_eq!(project(&[6, 3, 0], &map), Ok(vec![0, 4, 8]));
    }

    #[test]
    fn unknown_vertex() {
        let map = IndexMap::from_original(vec![10, 20]);
        assert_eq!(
            project(&[0, 2], &map),
            Err(IndexMapError { vertex: 2, len: 2 })
        );
        assert_eq!(
            IndexMap::identity(0).original(0),
            Err(IndexMapError { vertex: 0, len: 0 })
        );
    }
}

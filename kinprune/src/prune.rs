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

//! From a kinship matrix to the list of individuals to keep.
//!
//! An optional include list names individuals that should be kept if at all
//! possible. It is first pruned on its own, and whatever survives is then
//! forced into the final set.

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::independent_set::{IndependentSetError, IndependentSetFinder};
use crate::kinship::{relatedness_graph, KinshipError, KinshipMatrix};
use crate::project::{project, IndexMap, IndexMapError};
use crate::vec_graph::Graph;

/// Kinship above this marks pairs closer than first cousins.
pub const DEFAULT_THRESHOLD: f64 = 0.0625;

#[derive(Debug, thiserror::Error)]
pub enum PruneError {
    #[error(transparent)]
    Kinship(#[from] KinshipError),
    #[error(transparent)]
    IndependentSet(#[from] IndependentSetError),
    #[error(transparent)]
    IndexMap(#[from] IndexMapError),
    #[error("Include list names individual {index}, but the matrix only has {len}")]
    IncludeOutOfRange { index: usize, len: usize },
    #[error("Include list names individual {0} more than once")]
    DuplicateInclude(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PruneResult {
    /// Individuals to keep, ascending.
    pub kept: Vec<usize>,
    /// Survivors of the include list, ascending, if one was given.
    pub kept_include: Option<Vec<usize>>,
    /// Size of the include list, if one was given.
    pub include_len: Option<usize>,
    /// Number of individuals in the matrix.
    pub total: usize,
}

impl PruneResult {
    /// How many include-list individuals had to be dropped.
    pub fn removed_include(&self) -> Option<usize> {
        match (&self.kept_include, self.include_len) {
            (Some(kept), Some(len)) => Some(len - kept.len()),
            _ => None,
        }
    }
}

/// Pruning settings.
#[derive(Debug, Clone)]
pub struct Pruner {
    threshold: f64,
    tolerance: f64,
    include: Option<Vec<usize>>,
    finder: IndependentSetFinder,
}

impl Default for Pruner {
    fn default() -> Self {
        Pruner {
            threshold: DEFAULT_THRESHOLD,
            tolerance: 0.0,
            include: None,
            finder: IndependentSetFinder::default(),
        }
    }
}

impl Pruner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(&mut self, threshold: f64) -> &mut Self {
        self.threshold = threshold;
        self
    }

    /// Largest accepted difference between `m[i][j]` and `m[j][i]`.
    pub fn with_tolerance(&mut self, tolerance: f64) -> &mut Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_include(&mut self, include: Option<Vec<usize>>) -> &mut Self {
        self.include = include;
        self
    }

    pub fn with_finder(&mut self, finder: IndependentSetFinder) -> &mut Self {
        self.finder = finder;
        self
    }

    pub fn prune(&self, matrix: &KinshipMatrix) -> Result<PruneResult, PruneError> {
        let n = matrix.len();
        let g: Graph = relatedness_graph(matrix, self.threshold, self.tolerance)?;

        let kept_include = match &self.include {
            Some(include) => Some(self.prune_include(matrix, include)?),
            None => None,
        };

        let kept = match &kept_include {
            Some(required) => self.finder.find_with(&g, required)?,
            None => self.finder.find(&g),
        };
        let kept = project(&kept, &IndexMap::identity(n))?;

        log::info!("After pruning, {} out of {} individuals are remaining", kept.len(), n);

        Ok(PruneResult {
            kept,
            kept_include,
            include_len: self.include.as_ref().map(Vec::len),
            total: n,
        })
    }

    fn prune_include(
        &self,
        matrix: &KinshipMatrix,
        include: &[usize],
    ) -> Result<Vec<usize>, PruneError> {
        let mut seen = FxHashSet::default();
        for &index in include {
            if index >= matrix.len() {
                return Err(PruneError::IncludeOutOfRange {
                    index,
                    len: matrix.len(),
                });
            }
            if !seen.insert(index) {
                return Err(PruneError::DuplicateInclude(index));
            }
        }

        let sub = matrix.restrict(include)?;
        let g: Graph = relatedness_graph(&sub, self.threshold, self.tolerance)?;
        let kept = self.finder.find(&g);
        let kept = project(&kept, &IndexMap::from_original(include.to_vec()))?;

        log::info!(
            "In the include list, {} out of {} individuals were removed",
            include.len() - kept.len(),
            include.len()
        );
        Ok(kept)
    }
}

/// Prune with default settings apart from the threshold and include list.
pub fn prune_related(
    matrix: &KinshipMatrix,
    threshold: f64,
    include: Option<Vec<usize>>,
) -> Result<PruneResult, PruneError> {
    Pruner::new()
        .with_threshold(threshold)
        .with_include(include)
        .prune(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphLike;
    use crate::kinship::build_graph;
    use crate::random_graph::RandomKinshipBuilder;
    use rstest::{fixture, rstest};

    #[fixture]
    fn cohort() -> KinshipMatrix {
        // pairs {0,1} and {2,3} are related, 4 is unrelated to everyone
        KinshipMatrix::from_rows(vec![
            vec![0.5, 0.25, 0.01, 0.0, 0.0],
            vec![0.25, 0.5, 0.0, 0.02, 0.01],
            vec![0.01, 0.0, 0.5, 0.3, 0.0],
            vec![0.0, 0.02, 0.3, 0.5, 0.03],
            vec![0.0, 0.01, 0.0, 0.03, 0.5],
        ])
        .unwrap()
    }

    #[rstest]
    fn without_include(cohort: KinshipMatrix) {
        let res = prune_related(&cohort, 0.0625, None).unwrap();
        assert_eq!(res.kept, vec![0, 2, 4]);
        assert_eq!(res.total, 5);
        assert_eq!(res.kept_include, None);
        assert_eq!(res.removed_include(), None);
    }

    #[rstest]
    fn include_steers_the_choice(cohort: KinshipMatrix) {
        let res = prune_related(&cohort, 0.0625, Some(vec![3, 1])).unwrap();
        assert_eq!(res.kept_include, Some(vec![1, 3]));
        assert_eq!(res.kept, vec![1, 3, 4]);
        assert_eq!(res.removed_include(), Some(0));
    }

    #[rstest]
    fn related_include_entries_are_pruned(cohort: KinshipMatrix) {
        let res = prune_related(&cohort, 0.0625, Some(vec![2, 3, 1])).unwrap();
        let kept_include = res.kept_include.clone().unwrap();
        assert_eq!(kept_include.len(), 2);
        assert!(kept_include.contains(&1));
        assert_eq!(res.removed_include(), Some(1));
        for v in kept_include {
            assert!(res.kept.contains(&v));
        }
    }

    #[rstest]
    fn bad_include(cohort: KinshipMatrix) {
        assert!(matches!(
            prune_related(&cohort, 0.0625, Some(vec![0, 5])),
            Err(PruneError::IncludeOutOfRange { index: 5, len: 5 })
        ));
        assert!(matches!(
            prune_related(&cohort, 0.0625, Some(vec![4, 4])),
            Err(PruneError::DuplicateInclude(4))
        ));
    }

    #[rstest]
    fn invalid_threshold(cohort: KinshipMatrix) {
        assert!(matches!(
            prune_related(&cohort, f64::NAN, None),
            Err(PruneError::Kinship(KinshipError::InvalidThreshold(_)))
        ));
    }

    #[test]
    fn tolerance_accepts_rounding_noise() {
        let m = KinshipMatrix::from_rows(vec![vec![0.5, 0.1], vec![0.1 + 1e-12, 0.5]]).unwrap();
        assert!(matches!(
            Pruner::new().prune(&m),
            Err(PruneError::Kinship(KinshipError::Asymmetric { .. }))
        ));
        let res = Pruner::new().with_tolerance(1e-9).prune(&m).unwrap();
        assert_eq!(res.kept, vec![0]);
    }

    #[rstest]
    fn negative_tolerance_is_rejected(cohort: KinshipMatrix) {
        assert!(matches!(
            Pruner::new().with_tolerance(-0.5).prune(&cohort),
            Err(PruneError::Kinship(KinshipError::InvalidTolerance(_)))
        ));
    }

    #[rstest]
    fn finder_settings_are_used(cohort: KinshipMatrix) {
        let finder = *IndependentSetFinder::new()
            .with_split_components(false)
            .with_maximal(false);
        let res = Pruner::new().with_finder(finder).prune(&cohort).unwrap();
        assert_eq!(res.kept, vec![0, 2, 4]);
    }

    #[test]
    fn random_cohort_with_include() {
        let m = RandomKinshipBuilder::new()
            .seed(21)
            .individuals(80)
            .families(15)
            .family_size(3)
            .build();
        let include: Vec<usize> = (0..80).step_by(7).collect();
        let res = prune_related(&m, DEFAULT_THRESHOLD, Some(include.clone())).unwrap();
        let g = build_graph(&m, DEFAULT_THRESHOLD).unwrap();
        assert!(g.is_independent_set(&res.kept));
        for v in res.kept_include.unwrap() {
            assert!(include.contains(&v));
            assert!(res.kept.contains(&v));
        }
    }

    #[rstest]
    fn serializes(cohort: KinshipMatrix) {
        let res = prune_related(&cohort, 0.0625, None).unwrap();
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["kept"], serde_json::json!([0, 2, 4]));
        assert_eq!(json["total"], 5);
    }
}

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

//! Approximate maximum independent sets by repeated clique removal.
//!
//! Each round runs the [Ramsey partitioner](crate::ramsey) on what is left of
//! the graph, keeps the independent set it found and retires the clique
//! together with the kept vertices and their neighbours. Every round removes
//! at least one vertex, so the graph is drained after at most `|V|` rounds.

use itertools::Itertools;
use rustc_hash::FxHashSet;

use crate::graph::{GraphLike, V};
use crate::ramsey::partition_subset;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndependentSetError {
    #[error("Required vertices {0} and {1} are adjacent")]
    RequiredNotIndependent(V, V),
    #[error("Required vertex {0} is not in the graph")]
    UnknownVertex(V),
}

/// What a run of clique removal produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliqueRemoval {
    /// The accumulated independent set, sorted.
    pub independent_set: Vec<V>,
    /// Cliques retired by each round, in order. Isolated vertices taken up
    /// front do not appear here.
    pub cliques: Vec<Vec<V>>,
}

/// Drain `g` by clique removal.
///
/// Isolated vertices are taken first. Afterwards `g` has no vertices left.
pub fn clique_removal<G: GraphLike>(g: &mut G) -> CliqueRemoval {
    drain(g, false)
}

fn drain<G: GraphLike>(g: &mut G, split_components: bool) -> CliqueRemoval {
    let mut result = CliqueRemoval::default();

    for v in g.isolated_vertices() {
        g.remove_vertex(v);
        result.independent_set.push(v);
    }

    let groups = if split_components {
        g.component_vertices()
    } else {
        vec![g.vertex_vec()]
    };

    for alive in groups {
        drain_vertices(g, alive, &mut result);
    }

    result.independent_set.sort_unstable();
    result
}

/// Runs clique removal restricted to `alive`, which must contain every
/// neighbour in `g` of its own members.
fn drain_vertices<G: GraphLike>(g: &mut G, mut alive: Vec<V>, result: &mut CliqueRemoval) {
    while !alive.is_empty() {
        let part = partition_subset(&*g, alive.iter().copied());

        // the clique and the independent set may share the pivot
        let mut retired: FxHashSet<V> = part.clique.iter().copied().collect();
        for &v in &part.independent_set {
            retired.insert(v);
            retired.extend(g.neighbors(v));
        }
        for &v in retired.iter().sorted() {
            g.remove_vertex(v);
        }
        alive.retain(|v| !retired.contains(v));

        log::debug!(
            "Clique removal round: clique {}, independent set {}, {} vertices left",
            part.clique.len(),
            part.independent_set.len(),
            alive.len()
        );

        result.independent_set.extend(part.independent_set);
        result.cliques.push(part.clique);
    }
}

/// True if `vs` is independent in `g` and no other vertex can be added.
pub fn is_maximal<G: GraphLike>(g: &G, vs: &[V]) -> bool {
    let set: FxHashSet<V> = vs.iter().copied().collect();
    g.is_independent_set(vs)
        && g
            .vertices()
            .all(|v| set.contains(&v) || g.neighbors(v).any(|w| set.contains(&w)))
}

/// Configurable entry point for the approximation.
///
/// With `split_components` the driver runs separately on each connected
/// component, which keeps the partitioner's candidate sets small on sparse
/// relatedness graphs. With `maximal` a final greedy pass adds every vertex
/// that has no neighbour in the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndependentSetFinder {
    split_components: bool,
    maximal: bool,
}

impl Default for IndependentSetFinder {
    fn default() -> Self {
        IndependentSetFinder {
            split_components: true,
            maximal: true,
        }
    }
}

impl IndependentSetFinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_split_components(&mut self, b: bool) -> &mut Self {
        self.split_components = b;
        self
    }

    pub fn with_maximal(&mut self, b: bool) -> &mut Self {
        self.maximal = b;
        self
    }

    /// An independent set of `g`, sorted ascending. `g` is not modified.
    pub fn find<G: GraphLike>(&self, g: &G) -> Vec<V> {
        let mut working = g.clone();
        let mut kept = drain(&mut working, self.split_components).independent_set;
        if self.maximal {
            self.extend_to_maximal(g, &mut kept);
        }
        log::info!(
            "Kept {} of {} vertices",
            kept.len(),
            g.num_vertices()
        );
        kept
    }

    /// An independent set of `g` containing every vertex of `required`.
    pub fn find_with<G: GraphLike>(
        &self,
        g: &G,
        required: &[V],
    ) -> Result<Vec<V>, IndependentSetError> {
        let required: Vec<V> = required.iter().copied().sorted().dedup().collect();
        if let Some(&v) = required.iter().find(|&&v| !g.contains_vertex(v)) {
            return Err(IndependentSetError::UnknownVertex(v));
        }
        let req_set: FxHashSet<V> = required.iter().copied().collect();
        for &s in &required {
            if let Some(t) = g.neighbors(s).filter(|t| req_set.contains(t)).min() {
                return Err(IndependentSetError::RequiredNotIndependent(s.min(t), s.max(t)));
            }
        }

        let mut working = g.clone();
        let mut blocked: FxHashSet<V> = req_set.clone();
        for &s in &required {
            blocked.extend(g.neighbors(s));
        }
        for &v in blocked.iter().sorted() {
            working.remove_vertex(v);
        }

        let mut kept = drain(&mut working, self.split_components).independent_set;
        kept.extend(required);
        kept.sort_unstable();
        if self.maximal {
            self.extend_to_maximal(g, &mut kept);
        }
        log::info!(
            "Kept {} of {} vertices, {} of them required",
            kept.len(),
            g.num_vertices(),
            req_set.len()
        );
        Ok(kept)
    }

    fn extend_to_maximal<G: GraphLike>(&self, g: &G, kept: &mut Vec<V>) {
        let mut set: FxHashSet<V> = kept.iter().copied().collect();
        let before = kept.len();
        for v in g.vertex_vec() {
            if !set.contains(&v) && !g.neighbors(v).any(|w| set.contains(&w)) {
                set.insert(v);
                kept.push(v);
            }
        }
        if kept.len() > before {
            log::debug!("Maximality pass added {} vertices", kept.len() - before);
            kept.sort_unstable();
        }
    }
}

/// Approximate a maximum independent set of `g` with the default settings.
///
/// The result is sorted ascending.
pub fn approximate_independent_set<G: GraphLike>(g: &G) -> Vec<V> {
    IndependentSetFinder::default().find(g)
}

/// Like [`approximate_independent_set`], but the result contains `required`.
pub fn approximate_independent_set_with<G: GraphLike>(
    g: &G,
    required: &[V],
) -> Result<Vec<V>, IndependentSetError> {
    IndependentSetFinder::default().find_with(g, required)
}

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

//! The Ramsey partitioner of Boppana and Halldórsson.
//!
//! Given a set of candidate vertices, pick a pivot `v` and split the remaining
//! candidates into neighbours and non-neighbours of `v`. A clique found among
//! the neighbours extends with `v`, and so does an independent set found among
//! the non-neighbours. Keeping the larger option on each side yields a clique
//! and an independent set with `|clique| + |independent set| >= log2(n + 1)`.
//!
//! The recursion can be as deep as the number of candidates, so it runs on an
//! explicit work stack rather than the call stack.

use crate::graph::{GraphLike, V};

/// One clique and one independent set found inside the same candidate set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub clique: Vec<V>,
    pub independent_set: Vec<V>,
}

enum Frame {
    /// Partition this (sorted) candidate set and leave the result on the
    /// result stack.
    Expand(Vec<V>),
    /// The results for the neighbours and the non-neighbours of the pivot are
    /// the top two entries of the result stack, non-neighbours on top.
    Combine(V),
}

/// Run the partitioner on every vertex of `g`.
pub fn partition<G: GraphLike>(g: &G) -> Partition {
    partition_subset(g, g.vertices())
}

/// Run the partitioner on the subgraph of `g` induced by `candidates`.
///
/// The pivot is always the smallest remaining id. On equal sizes the clique
/// through the pivot and the independent set through the pivot are preferred.
/// Both returned sets are sorted.
pub fn partition_subset<G: GraphLike>(g: &G, candidates: impl IntoIterator<Item = V>) -> Partition {
    let mut root: Vec<V> = candidates.into_iter().collect();
    root.sort_unstable();
    root.dedup();

    let mut work = vec![Frame::Expand(root)];
    let mut results: Vec<Partition> = Vec::new();

    while let Some(frame) = work.pop() {
        match frame {
            Frame::Expand(cands) => {
                let Some((&v, rest)) = cands.split_first() else {
                    results.push(Partition::default());
                    continue;
                };
                let (nbrs, non_nbrs): (Vec<V>, Vec<V>) =
                    rest.iter().copied().partition(|&u| g.connected(v, u));

                work.push(Frame::Combine(v));
                work.push(Frame::Expand(non_nbrs));
                work.push(Frame::Expand(nbrs));
            }
            Frame::Combine(v) => {
                let outside = results.pop().expect("Missing non-neighbour result");
                let inside = results.pop().expect("Missing neighbour result");
                results.push(combine(v, inside, outside));
            }
        }
    }

    let mut part = results.pop().unwrap_or_default();
    part.clique.sort_unstable();
    part.independent_set.sort_unstable();
    part
}

/// `inside` was found among the neighbours of `v`, `outside` among its
/// non-neighbours.
fn combine(v: V, inside: Partition, outside: Partition) -> Partition {
    let Partition {
        clique: mut c1,
        independent_set: i1,
    } = inside;
    let Partition {
        clique: c2,
        independent_set: mut i2,
    } = outside;

    c1.push(v);
    i2.push(v);

    Partition {
        clique: if c1.len() >= c2.len() { c1 } else { c2 },
        independent_set: if i2.len() >= i1.len() { i2 } else { i1 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash_graph;
    use crate::kinship::build_graph;
    use crate::random_graph::RandomKinshipBuilder;
    use crate::vec_graph::Graph;
    use rstest::rstest;

    fn log2_bound(n: usize) -> usize {
        // ceil(log2(n + 1)) is the bit length of n
        (usize::BITS - n.leading_zeros()) as usize
    }

    #[test]
    fn empty_graph() {
        let g = Graph::new();
        assert_eq!(partition(&g), Partition::default());
    }

    #[test]
    fn single_vertex() {
        let g = Graph::with_vertices(1);
        let p = partition(&g);
        assert_eq!(p.clique, vec![0]);
        assert_eq!(p.independent_set, vec![0]);
    }

    #[test]
    fn complete_graph() {
        let mut g = Graph::with_vertices(5);
        for s in 0..5 {
            for t in (s + 1)..5 {
                g.add_edge(s, t);
            }
        }
        let p = partition(&g);
        assert_eq!(p.clique, vec![0, 1, 2, 3, 4]);
        assert_eq!(p.independent_set.len(), 1);
    }

    #[test]
    fn edgeless_graph() {
        let g = Graph::with_vertices(4);
        let p = partition(&g);
        assert_eq!(p.independent_set, vec![0, 1, 2, 3]);
        assert_eq!(p.clique.len(), 1);
    }

    #[test]
    fn path_tie_breaks() {
        // 0 - 1 - 2
        let mut g = Graph::with_vertices(3);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        let p = partition(&g);
        assert_eq!(p.clique, vec![0, 1]);
        assert_eq!(p.independent_set, vec![0, 2]);
    }

    #[test]
    fn two_pairs() {
        let mut g = Graph::with_vertices(4);
        g.add_edge(0, 1);
        g.add_edge(2, 3);
        let p = partition(&g);
        assert_eq!(p.clique, vec![0, 1]);
        assert_eq!(p.independent_set, vec![0, 2]);
    }

    #[test]
    fn subset_only_uses_candidates() {
        let mut g = Graph::with_vertices(4);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        g.add_edge(2, 3);
        let p = partition_subset(&g, [3, 1, 2]);
        assert!(p.clique.iter().all(|v| [1, 2, 3].contains(v)));
        assert!(p.independent_set.iter().all(|v| [1, 2, 3].contains(v)));
        assert_eq!(p.independent_set, vec![1, 3]);
    }

    #[test]
    fn deep_recursion_does_not_overflow() {
        // every pivot has no neighbours, so each level passes all but one
        // vertex down a single branch
        let g = Graph::with_vertices(10_000);
        let p = partition(&g);
        assert_eq!(p.independent_set.len(), 10_000);
        assert_eq!(p.clique.len(), 1);
    }

    #[rstest]
    fn ramsey_guarantee_on_random_matrices(#[values(1, 2, 3, 4, 5, 6, 7, 8)] seed: u64) {
        let m = RandomKinshipBuilder::new()
            .seed(seed)
            .individuals(40)
            .families(6)
            .build();
        for threshold in [0.05, 0.1, 0.2, 0.3] {
            let g = build_graph(&m, threshold).unwrap();
            let p = partition(&g);
            assert!(g.is_clique(&p.clique));
            assert!(g.is_independent_set(&p.independent_set));
            assert!(p.clique.len() + p.independent_set.len() >= log2_bound(g.num_vertices()));
        }
    }

    #[test]
    fn same_result_on_both_graph_types() {
        let m = RandomKinshipBuilder::new().seed(11).individuals(30).build();
        let g1: Graph = build_graph(&m, 0.1).unwrap();
        let g2: hash_graph::Graph = crate::kinship::relatedness_graph(&m, 0.1, 0.0).unwrap();
        assert_eq!(partition(&g1), partition(&g2));
    }
}

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

use rustc_hash::FxHashSet;

pub type V = usize;

/// An undirected simple graph. Vertices are plain integer ids, edges carry no
/// data; only adjacency matters to the algorithms in this crate.
pub trait GraphLike: Clone + Sized + Send + Sync + std::fmt::Debug {
    /// Initialise a new empty graph
    fn new() -> Self;

    /// A graph with `n` isolated vertices, numbered `0..n`
    fn with_vertices(n: usize) -> Self {
        let mut g = Self::new();
        for _ in 0..n {
            g.add_vertex();
        }
        g
    }

    /// Next fresh vertex index
    fn vindex(&self) -> V;

    /// Number of vertices
    fn num_vertices(&self) -> usize;

    /// Number of edges
    fn num_edges(&self) -> usize;

    /// Get iterator over all vertices
    fn vertices(&self) -> impl Iterator<Item = V>;

    /// Get iterator over all edges
    ///
    /// An edge is a pair (s, t) with s < t, so each edge is returned once.
    fn edges(&self) -> impl Iterator<Item = (V, V)>;

    /// Add a fresh vertex and return its id
    fn add_vertex(&mut self) -> V;

    /// Remove a vertex and all of its incident edges
    ///
    /// Panics if the vertex is not in the graph.
    fn remove_vertex(&mut self, v: V);

    /// Add an edge between two distinct vertices
    ///
    /// Panics on self-loops, parallel edges or missing vertices.
    fn add_edge(&mut self, s: V, t: V);

    /// Remove an edge from a graph
    ///
    /// Panics if there is no edge between s and t.
    fn remove_edge(&mut self, s: V, t: V);

    fn neighbors(&self, v: V) -> impl Iterator<Item = V>;
    fn degree(&self, v: V) -> usize;
    fn connected(&self, v0: V, v1: V) -> bool;
    fn contains_vertex(&self, v: V) -> bool;

    /// All vertices in ascending order
    fn vertex_vec(&self) -> Vec<V> {
        let mut vs: Vec<V> = self.vertices().collect();
        vs.sort_unstable();
        vs
    }

    /// All edges, sorted
    fn edge_vec(&self) -> Vec<(V, V)> {
        let mut es: Vec<(V, V)> = self.edges().collect();
        es.sort_unstable();
        es
    }

    /// Neighbours of `v` in ascending order
    fn neighbor_vec(&self, v: V) -> Vec<V> {
        let mut ns: Vec<V> = self.neighbors(v).collect();
        ns.sort_unstable();
        ns
    }

    /// Vertices of degree 0, ascending
    fn isolated_vertices(&self) -> Vec<V> {
        self.vertex_vec()
            .into_iter()
            .filter(|&v| self.degree(v) == 0)
            .collect()
    }

    /// True if every pair of distinct vertices in `vs` is adjacent
    fn is_clique(&self, vs: &[V]) -> bool {
        vs.iter().enumerate().all(|(i, &s)| {
            vs[i + 1..]
                .iter()
                .all(|&t| s == t || self.connected(s, t))
        })
    }

    /// True if no pair of vertices in `vs` is adjacent
    fn is_independent_set(&self, vs: &[V]) -> bool {
        vs.iter()
            .enumerate()
            .all(|(i, &s)| vs[i + 1..].iter().all(|&t| !self.connected(s, t)))
    }

    /// Returns vertices in the components of g
    ///
    /// Components are ordered by their smallest vertex, and each component is
    /// sorted.
    fn component_vertices(&self) -> Vec<Vec<V>> {
        let mut comps = vec![];

        // set of vertices left to visit
        let mut vset: FxHashSet<V> = self.vertices().collect();

        // stack used in the DFS
        let mut stack = vec![];

        for v in self.vertex_vec() {
            if !vset.remove(&v) {
                continue;
            }

            let mut comp = vec![];
            stack.push(v);
            while let Some(v) = stack.pop() {
                comp.push(v);
                for w in self.neighbors(v) {
                    if vset.remove(&w) {
                        stack.push(w);
                    }
                }
            }
            comp.sort_unstable();
            comps.push(comp);
        }

        comps
    }

    /// Return a graphviz-friendly string representation of the graph
    ///
    /// Vertices listed in `highlight` are filled, which is how the kept
    /// individuals are marked by the CLI.
    fn to_dot(&self, highlight: &[V]) -> String {
        let marked: FxHashSet<V> = highlight.iter().copied().collect();
        let mut dot = String::from("graph {\n");
        for v in self.vertex_vec() {
            if marked.contains(&v) {
                dot += &format!("  {v} [style=filled, fillcolor=green]\n");
            } else {
                dot += &format!("  {v}\n");
            }
        }

        dot += "\n";

        for (s, t) in self.edge_vec() {
            dot += &format!("  {s} -- {t}\n");
        }

        dot += "}\n";

        dot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash_graph;
    use crate::vec_graph;
    use rstest::rstest;

    fn triangle_and_tail<G: GraphLike>() -> G {
        // 0 - 1 - 3    4
        //  \  |
        //    2
        let mut g = G::with_vertices(5);
        g.add_edge(0, 1);
        g.add_edge(0, 2);
        g.add_edge(1, 2);
        g.add_edge(1, 3);
        g
    }

    fn check_cliques_and_sets<G: GraphLike>() {
        let g: G = triangle_and_tail();
        assert!(g.is_clique(&[0, 1, 2]));
        assert!(!g.is_clique(&[0, 1, 3]));
        assert!(g.is_clique(&[]));
        assert!(g.is_clique(&[4]));
        assert!(g.is_independent_set(&[0, 3, 4]));
        assert!(!g.is_independent_set(&[2, 1]));
        assert!(g.is_independent_set(&[]));
    }

    fn check_components<G: GraphLike>() {
        let g: G = triangle_and_tail();
        assert_eq!(g.component_vertices(), vec![vec![0, 1, 2, 3], vec![4]]);
        assert_eq!(g.isolated_vertices(), vec![4]);
    }

    #[rstest]
    fn cliques_and_sets_vec() {
        check_cliques_and_sets::<vec_graph::Graph>();
    }

    #[rstest]
    fn cliques_and_sets_hash() {
        check_cliques_and_sets::<hash_graph::Graph>();
    }

    #[rstest]
    fn components_vec() {
        check_components::<vec_graph::Graph>();
    }

    #[rstest]
    fn components_hash() {
        check_components::<hash_graph::Graph>();
    }

    #[test]
    fn dot_marks_highlighted_vertices() {
        let g: vec_graph::Graph = triangle_and_tail();
        let dot = g.to_dot(&[3]);
        assert!(dot.starts_with("graph {\n"));
        assert!(dot.contains("  3 [style=filled, fillcolor=green]\n"));
        assert!(dot.contains("  0 -- 1\n"));
        assert!(dot.contains("  1 -- 3\n"));
        assert!(!dot.contains("  0 -- 3\n"));
    }
}

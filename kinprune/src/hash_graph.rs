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

pub use crate::graph::*;
use rustc_hash::{FxHashMap, FxHashSet};

pub type VTab<T> = FxHashMap<V, T>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    edata: VTab<FxHashSet<V>>,
    nume: usize,
    freshv: V,
}

impl Graph {
    /// Removes vertex 't' from the adjacency set of 's'. This private method
    /// is used by remove_edge and remove_vertex to make the latter slightly
    /// more efficient.
    fn remove_half_edge(&mut self, s: V, t: V) -> bool {
        self.edata.get_mut(&s).is_some_and(|nhd| nhd.remove(&t))
    }
}

impl GraphLike for Graph {
    fn new() -> Graph {
        Graph {
            edata: FxHashMap::default(),
            nume: 0,
            freshv: 0,
        }
    }

    fn vindex(&self) -> V {
        self.freshv
    }

    fn num_vertices(&self) -> usize {
        self.edata.len()
    }

    fn num_edges(&self) -> usize {
        self.nume
    }

    fn vertices(&self) -> impl Iterator<Item = V> {
        self.edata.keys().copied()
    }

    fn edges(&self) -> impl Iterator<Item = (V, V)> {
        self.edata.iter().flat_map(|(&s, nhd)| {
            nhd.iter()
                .filter(move |&&t| s < t)
                .map(move |&t| (s, t))
        })
    }

    fn add_vertex(&mut self) -> V {
        let v = self.freshv;
        self.freshv += 1;
        self.edata.insert(v, FxHashSet::default());
        v
    }

    fn remove_vertex(&mut self, v: V) {
        let adj = self.edata.remove(&v).expect("Vertex not found");
        for v1 in adj {
            self.nume -= 1;
            self.remove_half_edge(v1, v);
        }
    }

    fn add_edge(&mut self, s: V, t: V) {
        assert_ne!(s, t, "Self-loops are not allowed");
        assert!(self.edata.contains_key(&t), "Target vertex not found");

        let inserted = self
            .edata
            .get_mut(&s)
            .expect("Source vertex not found")
            .insert(t);
        assert!(inserted, "Introducing parallel edge");

        if let Some(nhd) = self.edata.get_mut(&t) {
            nhd.insert(s);
        }
        self.nume += 1;
    }

    fn remove_edge(&mut self, s: V, t: V) {
        assert!(self.remove_half_edge(s, t), "Edge not found");
        self.remove_half_edge(t, s);
        self.nume -= 1;
    }

    fn neighbors(&self, v: V) -> impl Iterator<Item = V> {
        self.edata
            .get(&v)
            .expect("Vertex not found")
            .iter()
            .copied()
    }

    fn degree(&self, v: V) -> usize {
        self.edata.get(&v).expect("Vertex not found").len()
    }

    fn connected(&self, v0: V, v1: V) -> bool {
        self.edata.get(&v0).is_some_and(|nhd| nhd.contains(&v1))
    }

    fn contains_vertex(&self, v: V) -> bool {
        self.edata.contains_key(&v)
    }
}

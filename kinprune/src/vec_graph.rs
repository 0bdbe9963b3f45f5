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

//! Index-stable graph backed by a vector of adjacency sets.
//!
//! Removing a vertex leaves a hole in its slot instead of renumbering the
//! remaining vertices, so vertex ids stay equal to matrix row indices for the
//! whole lifetime of the graph.

pub use crate::graph::*;
use rustc_hash::FxHashSet;
use std::mem;

pub type VTab<T> = Vec<Option<T>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    edata: VTab<FxHashSet<V>>,
    holes: Vec<V>, // places where a vertex has been deleted
    numv: usize,
    nume: usize,
}

impl Graph {
    fn nhd(&self, v: V) -> &FxHashSet<V> {
        match self.edata.get(v) {
            Some(Some(nhd)) => nhd,
            _ => panic!("Vertex not found"),
        }
    }

    /// Removes vertex 't' from the adjacency set of 's'.
    fn remove_half_edge(&mut self, s: V, t: V) -> bool {
        if let Some(Some(nhd)) = self.edata.get_mut(s) {
            nhd.remove(&t)
        } else {
            false
        }
    }
}

impl GraphLike for Graph {
    fn new() -> Graph {
        Graph {
            edata: Vec::new(),
            holes: Vec::new(),
            numv: 0,
            nume: 0,
        }
    }

    fn with_vertices(n: usize) -> Graph {
        Graph {
            edata: vec![Some(FxHashSet::default()); n],
            holes: Vec::new(),
            numv: n,
            nume: 0,
        }
    }

    fn vindex(&self) -> V {
        self.edata.len()
    }

    fn num_vertices(&self) -> usize {
        self.numv
    }

    fn num_edges(&self) -> usize {
        self.nume
    }

    fn vertices(&self) -> impl Iterator<Item = V> {
        self.edata
            .iter()
            .enumerate()
            .filter_map(|(v, d)| d.as_ref().map(|_| v))
    }

    fn edges(&self) -> impl Iterator<Item = (V, V)> {
        self.edata
            .iter()
            .enumerate()
            .filter_map(|(s, tab)| tab.as_ref().map(|nhd| (s, nhd)))
            .flat_map(|(s, nhd)| nhd.iter().filter(move |&&t| s < t).map(move |&t| (s, t)))
    }

    fn add_vertex(&mut self) -> V {
        self.numv += 1;
        if let Some(v) = self.holes.pop() {
            self.edata[v] = Some(FxHashSet::default());
            v
        } else {
            self.edata.push(Some(FxHashSet::default()));
            self.edata.len() - 1
        }
    }

    fn remove_vertex(&mut self, v: V) {
        let adj = self
            .edata
            .get_mut(v)
            .and_then(mem::take)
            .expect("No such vertex.");
        self.numv -= 1;
        self.holes.push(v);

        for v1 in adj {
            self.nume -= 1;
            self.remove_half_edge(v1, v);
        }
    }

    fn add_edge(&mut self, s: V, t: V) {
        assert_ne!(s, t, "Self-loops are not allowed");
        assert!(self.contains_vertex(t), "Target vertex not found");

        if let Some(Some(nhd)) = self.edata.get_mut(s) {
            assert!(nhd.insert(t), "Introducing parallel edge");
        } else {
            panic!("Source vertex not found");
        }

        if let Some(Some(nhd)) = self.edata.get_mut(t) {
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
        self.nhd(v).iter().copied()
    }

    fn degree(&self, v: V) -> usize {
        self.nhd(v).len()
    }

    fn connected(&self, v0: V, v1: V) -> bool {
        match self.edata.get(v0) {
            Some(Some(nhd)) => nhd.contains(&v1),
            _ => false,
        }
    }

    fn contains_vertex(&self, v: V) -> bool {
        v < self.edata.len() && self.edata[v].is_some()
    }
}

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

pub mod cli;
pub mod graph;
pub mod hash_graph;
pub mod independent_set;
pub mod kinship;
pub mod project;
pub mod prune;
pub mod ramsey;
pub mod random_graph;
pub mod vec_graph;

pub use independent_set::{approximate_independent_set, approximate_independent_set_with};
pub use kinship::{build_graph, KinshipError, KinshipMatrix};
pub use prune::{prune_related, PruneError, PruneResult, Pruner};

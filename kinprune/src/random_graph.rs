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

use crate::kinship::KinshipMatrix;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Builds symmetric kinship matrices for tests and benchmarks.
///
/// Unrelated pairs get a small background coefficient in `[0, background)`.
/// Planted families are disjoint groups of individuals whose pairwise
/// coefficients are drawn from `[0.1, 0.5)`. The diagonal is 0.5.
pub struct RandomKinshipBuilder {
    pub rng: StdRng,
    pub individuals: usize,
    pub families: usize,
    pub family_size: usize,
    pub background: f64,
}

impl Default for RandomKinshipBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomKinshipBuilder {
    pub fn new() -> RandomKinshipBuilder {
        RandomKinshipBuilder {
            rng: StdRng::seed_from_u64(0),
            individuals: 10,
            families: 0,
            family_size: 3,
            background: 0.05,
        }
    }

    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn individuals(&mut self, individuals: usize) -> &mut Self {
        self.individuals = individuals;
        self
    }

    pub fn families(&mut self, families: usize) -> &mut Self {
        self.families = families;
        self
    }

    pub fn family_size(&mut self, family_size: usize) -> &mut Self {
        self.family_size = family_size;
        self
    }

    pub fn background(&mut self, background: f64) -> &mut Self {
        self.background = background;
        self
    }

    pub fn build(&mut self) -> KinshipMatrix {
        let n = self.individuals;
        let mut data = Array2::from_elem((n, n), 0.0);

        for i in 0..n {
            data[[i, i]] = 0.5;
            for j in (i + 1)..n {
                let k = if self.background > 0.0 {
                    self.rng.random_range(0.0..self.background)
                } else {
                    0.0
                };
                data[[i, j]] = k;
                data[[j, i]] = k;
            }
        }

        // families are carved out of a shuffled order, so they never overlap
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(&mut self.rng);
        for family in order.chunks(self.family_size.max(1)).take(self.families) {
            for (a, &i) in family.iter().enumerate() {
                for &j in &family[a + 1..] {
                    let k = self.rng.random_range(0.1..0.5);
                    data[[i, j]] = k;
                    data[[j, i]] = k;
                }
            }
        }

        KinshipMatrix::from_array(data).expect("Generated matrix is square")
    }
}

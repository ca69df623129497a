//! Row sampling applied once before profiling.

use serde::{Deserialize, Serialize};

use super::source::Dataset;

/// How rows are chosen when a dataset is down-sampled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleStrategy {
    /// Keep the first N rows.
    #[default]
    First,
    /// Keep N rows chosen uniformly at random, in their original order.
    Random,
}

/// A sampling decision. `size == 0` disables sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingPolicy {
    pub size: usize,
    pub strategy: SampleStrategy,
    /// Seed for random sampling, so the same policy always picks the same rows.
    pub seed: u64,
}

impl SamplingPolicy {
    /// A policy that keeps every row.
    pub fn none() -> Self {
        Self {
            size: 0,
            strategy: SampleStrategy::First,
            seed: 0,
        }
    }

    pub fn first(size: usize) -> Self {
        Self {
            size,
            strategy: SampleStrategy::First,
            seed: 0,
        }
    }

    pub fn random(size: usize, seed: u64) -> Self {
        Self {
            size,
            strategy: SampleStrategy::Random,
            seed,
        }
    }

    /// Returns true if applying this policy to `row_count` rows would drop any.
    pub fn reduces(&self, row_count: usize) -> bool {
        self.size > 0 && self.size < row_count
    }

    /// Apply the policy, returning a new dataset. The input is never modified.
    ///
    /// Returns `None` when no rows would be dropped.
    pub fn apply(&self, dataset: &Dataset) -> Option<Dataset> {
        let row_count = dataset.row_count();
        if !self.reduces(row_count) {
            return None;
        }

        let indices: Vec<usize> = match self.strategy {
            SampleStrategy::First => (0..self.size).collect(),
            SampleStrategy::Random => {
                let mut rng = fastrand::Rng::with_seed(self.seed);
                // Partial Fisher-Yates: the first `size` slots become the sample
                let mut all: Vec<usize> = (0..row_count).collect();
                for i in 0..self.size {
                    let j = rng.usize(i..row_count);
                    all.swap(i, j);
                }
                let mut picked = all[..self.size].to_vec();
                picked.sort_unstable();
                picked
            }
        };

        Some(dataset.select_rows(&indices))
    }
}

impl Default for SamplingPolicy {
    fn default() -> Self {
        Self::none()
    }
}

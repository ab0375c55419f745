//! Run configuration owned by the front end, and the generate → classify → report pipeline.

use std::io::Write;

use crate::batch::{BatchMode, classify_batch};
use crate::dataset::{SyntheticDataset, seeded_rng};
use crate::error::{KnnError, Result};
use crate::knn::classifier::NeighborSelector;
use crate::report::write_report;

/// The four sizes of a run, plus reproducibility and scheduling knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub n_train: usize,
    pub dim: usize,
    pub n_test: usize,
    pub k: usize,
    pub seed: Option<u64>,
    pub mode: BatchMode,
}

impl RunConfig {
    pub fn new(n_train: usize, dim: usize, n_test: usize, k: usize) -> Self {
        RunConfig { n_train, dim, n_test, k, seed: None, mode: BatchMode::Sequential }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_mode(mut self, mode: BatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// All four sizes must be positive and `k` may not exceed `n_train`.
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("n_train", self.n_train),
            ("d", self.dim),
            ("n_test", self.n_test),
            ("k", self.k),
        ];
        for (name, value) in sizes {
            if value == 0 {
                return Err(KnnError::InvalidConfig {
                    name,
                    reason: "must be a positive integer".to_string(),
                });
            }
        }
        if self.k > self.n_train {
            return Err(KnnError::InsufficientTrainingData {
                k: self.k,
                available: self.n_train,
            });
        }
        Ok(())
    }
}

/// Validates, generates the synthetic dataset, classifies every query and writes the report.
pub fn run<W: Write>(config: &RunConfig, out: &mut W) -> Result<SyntheticDataset> {
    config.validate()?;

    let mut rng = seeded_rng(config.seed);
    let data = SyntheticDataset::generate(config.n_train, config.n_test, config.dim, &mut rng);

    let selector = NeighborSelector::euclidean();
    let results = classify_batch(
        &selector,
        &data.train,
        &data.queries,
        config.k,
        config.dim,
        config.mode,
    )?;

    write_report(out, &data.train, &results)?;
    Ok(data)
}

//! Synthetic dataset provider: uniform features in [0, 1) and fair-coin labels.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common_types::{DataPoint, Label, LabeledPoint};

/// A labeled training set plus unlabeled queries of the same dimensionality.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticDataset {
    pub train: Vec<LabeledPoint<f64>>,
    pub queries: Vec<Vec<f64>>,
}

impl SyntheticDataset {
    /// Draws `n_train` labeled points, then `n_test` queries, all with `d` coordinates.
    ///
    /// The generator is supplied by the caller; a seeded one reproduces the dataset.
    pub fn generate<R: Rng + ?Sized>(n_train: usize, n_test: usize, d: usize, rng: &mut R) -> Self {
        let train = (0..n_train)
            .map(|_| {
                let features = generate_point(d, rng);
                DataPoint::new(features, Label::from(rng.gen_bool(0.5)))
            })
            .collect();
        let queries = (0..n_test).map(|_| generate_point(d, rng)).collect();
        SyntheticDataset { train, queries }
    }
}

/// One feature vector of length `d`, each coordinate uniform on [0, 1).
pub fn generate_point<R: Rng + ?Sized>(d: usize, rng: &mut R) -> Vec<f64> {
    (0..d).map(|_| rng.gen_range(0.0..1.0)).collect()
}

/// `StdRng` from `seed`, or from OS entropy when no seed is given.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

//! Batch driver: classifies every query against one read-only training set.

use num_traits::{AsPrimitive, Float};
use rayon::prelude::*;

use crate::common_types::{DataPoint, LabeledPoint};
use crate::error::Result;
use crate::knn::DistanceMetric;
use crate::knn::classifier::NeighborSelector;

/// How queries of a batch are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchMode {
    #[default]
    Sequential,
    /// Spread queries over the rayon thread pool. Results keep input order.
    Parallel,
}

/// Appends a predicted label to every query.
///
/// A failing query aborts the batch with the error of the lowest-index failure, in
/// both modes; no partial results are produced.
pub fn classify_batch<F, M>(
    selector: &NeighborSelector<M>,
    train: &[LabeledPoint<F>],
    queries: &[Vec<F>],
    k: usize,
    d: usize,
    mode: BatchMode,
) -> Result<Vec<LabeledPoint<F>>>
where
    F: Float + AsPrimitive<f64> + Send + Sync,
    M: DistanceMetric,
{
    let classify_one = |query: &Vec<F>| -> Result<LabeledPoint<F>> {
        let label = selector.predict(train, query, k, d)?;
        Ok(DataPoint::new(query.clone(), label))
    };

    match mode {
        BatchMode::Sequential => queries.iter().map(classify_one).collect(),
        BatchMode::Parallel => {
            // Gather every outcome so the reported failure is the lowest-index one.
            let outcomes: Vec<Result<LabeledPoint<F>>> =
                queries.par_iter().map(classify_one).collect();
            outcomes.into_iter().collect()
        }
    }
}

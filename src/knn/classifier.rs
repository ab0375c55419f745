//! Brute-force k-nearest-neighbor selection and binary majority vote.

use num_traits::{AsPrimitive, Float};

use super::heap_utils::{BoundedNeighborSet, Neighbor};
use super::{DistanceMetric, KnnDistance, check_dimensionality};
use crate::common_types::{Label, LabeledPoint};
use crate::error::{KnnError, Result};

/// Selects the k nearest training points of a query and votes on their labels.
///
/// Holds nothing but the metric: every call allocates its own bounded set and
/// reads the training set without mutating it, so one selector can serve many
/// threads at once.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeighborSelector<M = KnnDistance> {
    metric: M,
}

impl NeighborSelector<KnnDistance> {
    pub fn euclidean() -> Self {
        Self::new(KnnDistance::Euclidean)
    }
}

impl<M: DistanceMetric> NeighborSelector<M> {
    pub fn new(metric: M) -> Self {
        Self { metric }
    }

    /// Returns the `k` nearest neighbors of `query`, ascending by distance then index.
    ///
    /// One pass over `train` in stored order. A candidate enters a full set only when
    /// strictly closer than the current farthest member, so among points tied at the
    /// boundary the first one scanned survives.
    ///
    /// # Errors
    /// - `InvalidK` if `k == 0`
    /// - `InvalidDimension` if `d == 0`
    /// - `InsufficientTrainingData` if `train` holds fewer than `k` points
    /// - `InvalidMetric` if the metric's parameters are unusable
    /// - `DimensionMismatch` if the query or any training point has fewer than `d` coordinates
    pub fn nearest_neighbors<F>(
        &self,
        train: &[LabeledPoint<F>],
        query: &[F],
        k: usize,
        d: usize,
    ) -> Result<Vec<Neighbor>>
    where
        F: Float + AsPrimitive<f64>,
    {
        validate_request(train.len(), k, d)?;
        self.metric.validate()?;
        check_dimensionality(query, d)?;

        let mut best_k = BoundedNeighborSet::new(k);
        for (index, train_sample) in train.iter().enumerate() {
            let distance = self.metric.distance(query, &train_sample.features, d)?;
            best_k.offer(distance, index);
        }
        Ok(best_k.into_sorted_vec())
    }

    /// Predicts the label of `query` by majority vote among its `k` nearest neighbors.
    ///
    /// An even split resolves to [`Label::One`].
    pub fn predict<F>(
        &self,
        train: &[LabeledPoint<F>],
        query: &[F],
        k: usize,
        d: usize,
    ) -> Result<Label>
    where
        F: Float + AsPrimitive<f64>,
    {
        let neighbors = self.nearest_neighbors(train, query, k, d)?;
        majority_vote(train, &neighbors)
    }
}

fn validate_request(available: usize, k: usize, d: usize) -> Result<()> {
    if k == 0 {
        return Err(KnnError::InvalidK);
    }
    if d == 0 {
        return Err(KnnError::InvalidDimension);
    }
    if available < k {
        return Err(KnnError::InsufficientTrainingData { k, available });
    }
    Ok(())
}

/// Signed tally over the neighbors' labels: `Zero` counts -1, `One` counts +1.
/// A tally of zero or more predicts `One`.
///
/// Fails with `NeighborOutOfRange` if a neighbor does not point into `train`.
pub fn majority_vote<F>(train: &[LabeledPoint<F>], neighbors: &[Neighbor]) -> Result<Label> {
    let mut tally: i64 = 0;
    for neighbor in neighbors {
        let Some(point) = train.get(neighbor.index) else {
            return Err(KnnError::NeighborOutOfRange {
                index: neighbor.index,
                len: train.len(),
            });
        };
        tally += point.label.vote();
    }
    Ok(Label::from(tally >= 0))
}

/// Euclidean k-NN prediction for a single query.
pub fn predict<F>(train: &[LabeledPoint<F>], query: &[F], k: usize, d: usize) -> Result<Label>
where
    F: Float + AsPrimitive<f64>,
{
    NeighborSelector::euclidean().predict(train, query, k, d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common_types::DataPoint;
    use proptest::prelude::*;

    fn point(x: f64, label: Label) -> LabeledPoint<f64> {
        DataPoint::new(vec![x], label)
    }

    fn line_train() -> Vec<LabeledPoint<f64>> {
        vec![
            point(0.0, Label::Zero),
            point(1.0, Label::Zero),
            point(10.0, Label::One),
        ]
    }

    #[test]
    fn test_k1_picks_nearest() {
        let train = line_train();
        let neighbors = NeighborSelector::euclidean()
            .nearest_neighbors(&train, &[0.9], 1, 1)
            .unwrap();
        assert_eq!(neighbors.len(), 1);
        assert_eq!(
            neighbors[0].index, 1,
            "Nearest to 0.9 should be the point at 1.0"
        );
        assert_eq!(predict(&train, &[0.9], 1, 1).unwrap(), Label::Zero);
    }

    #[test]
    fn test_k3_majority_zero() {
        // tally = -1 - 1 + 1 = -1
        assert_eq!(predict(&line_train(), &[0.9], 3, 1).unwrap(), Label::Zero);
    }

    #[test]
    fn test_even_split_resolves_to_one() {
        let train = vec![point(0.0, Label::Zero), point(2.0, Label::One)];
        let neighbors = NeighborSelector::euclidean()
            .nearest_neighbors(&train, &[1.0], 2, 1)
            .unwrap();
        assert_eq!(neighbors[0].distance, 1.0);
        assert_eq!(neighbors[1].distance, 1.0);
        assert_eq!(predict(&train, &[1.0], 2, 1).unwrap(), Label::One);
    }

    #[test]
    fn test_unanimous_neighbors() {
        let zeros = vec![
            point(0.0, Label::Zero),
            point(0.1, Label::Zero),
            point(5.0, Label::One),
        ];
        assert_eq!(predict(&zeros, &[0.0], 2, 1).unwrap(), Label::Zero);

        let ones = vec![
            point(0.0, Label::One),
            point(0.1, Label::One),
            point(5.0, Label::Zero),
        ];
        assert_eq!(predict(&ones, &[0.0], 2, 1).unwrap(), Label::One);
    }

    #[test]
    fn test_first_seen_wins_at_boundary() {
        // Both candidates sit at distance 1.0 from the query; k = 1 keeps the first one.
        let train = vec![point(-1.0, Label::Zero), point(1.0, Label::One)];
        assert_eq!(predict(&train, &[0.0], 1, 1).unwrap(), Label::Zero);

        let swapped = vec![point(1.0, Label::One), point(-1.0, Label::Zero)];
        assert_eq!(predict(&swapped, &[0.0], 1, 1).unwrap(), Label::One);
    }

    #[test]
    fn test_majority_vote_rejects_foreign_neighbor() {
        let train = vec![point(0.0, Label::One)];
        let stray = [Neighbor {
            distance: 0.0,
            index: 5,
        }];
        let err = majority_vote(&train, &stray).unwrap_err();
        assert!(
            matches!(err, KnnError::NeighborOutOfRange { index: 5, len: 1 }),
            "An index outside the training set must be an error, got {:?}",
            err
        );

        let own = [Neighbor {
            distance: 0.0,
            index: 0,
        }];
        assert_eq!(majority_vote(&train, &own).unwrap(), Label::One);
    }

    #[test]
    fn test_majority_vote_empty_neighbors_is_tie() {
        let train = line_train();
        assert_eq!(majority_vote(&train, &[]).unwrap(), Label::One);
    }

    #[test]
    fn test_invalid_k() {
        let err = predict(&line_train(), &[0.0], 0, 1).unwrap_err();
        assert!(matches!(err, KnnError::InvalidK));
    }

    #[test]
    fn test_insufficient_training_data() {
        let err = predict(&line_train(), &[0.0], 4, 1).unwrap_err();
        assert!(matches!(
            err,
            KnnError::InsufficientTrainingData { k: 4, available: 3 }
        ));

        let empty: Vec<LabeledPoint<f64>> = Vec::new();
        let err = predict(&empty, &[0.0], 1, 1).unwrap_err();
        assert!(matches!(
            err,
            KnnError::InsufficientTrainingData { k: 1, available: 0 }
        ));
    }

    #[test]
    fn test_invalid_dimension() {
        let err = predict(&line_train(), &[0.0], 1, 0).unwrap_err();
        assert!(matches!(err, KnnError::InvalidDimension));
    }

    #[test]
    fn test_invalid_metric() {
        let selector = NeighborSelector::new(KnnDistance::Minkowski { p: 0 });
        let err = selector.predict(&line_train(), &[0.0], 1, 1).unwrap_err();
        assert!(matches!(err, KnnError::InvalidMetric(_)));
    }

    #[test]
    fn test_dimension_mismatch_propagates() {
        let err = predict(&line_train(), &[0.0], 1, 2).unwrap_err();
        assert!(matches!(
            err,
            KnnError::DimensionMismatch {
                required: 2,
                found: 1
            }
        ));

        let mut train = vec![DataPoint::new(vec![0.0, 0.0], Label::Zero)];
        train.push(DataPoint::new(vec![1.0], Label::One)); // Malformed training point
        let err = predict(&train, &[0.0, 0.0], 1, 2).unwrap_err();
        assert!(
            matches!(
                err,
                KnnError::DimensionMismatch {
                    required: 2,
                    found: 1
                }
            ),
            "A malformed training point must fail the call, got {:?}",
            err
        );
    }

    #[test]
    fn test_uses_only_first_d_coordinates() {
        let train = vec![
            DataPoint::new(vec![0.0, 100.0], Label::Zero),
            DataPoint::new(vec![5.0, 0.0], Label::One),
        ];
        // With d = 1 the second coordinate is ignored.
        assert_eq!(predict(&train, &[0.5, 0.0], 1, 1).unwrap(), Label::Zero);
        assert_eq!(predict(&train, &[0.5, 0.0], 1, 2).unwrap(), Label::One);
    }

    #[test]
    fn test_substituted_metric() {
        let train = vec![
            DataPoint::new(vec![1.0, 0.0], Label::Zero),
            DataPoint::new(vec![10.0, 10.5], Label::One),
        ];
        let query = [2.0, 2.0];
        let euclidean = NeighborSelector::euclidean();
        assert_eq!(
            euclidean.predict(&train, &query, 1, 2).unwrap(),
            Label::Zero
        );
        // Direction matters for cosine, magnitude does not.
        let cosine = NeighborSelector::new(KnnDistance::Cosine);
        assert_eq!(cosine.predict(&train, &query, 1, 2).unwrap(), Label::One);
    }

    #[test]
    fn test_does_not_mutate_inputs() {
        let train = line_train();
        let snapshot = train.clone();
        let query = vec![0.9];
        let first = predict(&train, &query, 3, 1).unwrap();
        let second = predict(&train, &query, 3, 1).unwrap();
        assert_eq!(first, second);
        assert_eq!(train, snapshot);
        assert_eq!(query, vec![0.9]);
    }

    fn brute_force(train: &[LabeledPoint<f64>], query: &[f64], k: usize, d: usize) -> Vec<usize> {
        let mut all: Vec<(f64, usize)> = train
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let dist = KnnDistance::Euclidean
                    .distance(query, &p.features, d)
                    .unwrap();
                (dist, i)
            })
            .collect();
        // Stable sort keeps scan order among equal distances.
        all.sort_by(|a, b| a.0.total_cmp(&b.0));
        all.into_iter().take(k).map(|(_, i)| i).collect()
    }

    fn labeled_points(d: usize) -> impl Strategy<Value = Vec<LabeledPoint<f64>>> {
        // Coarse integer grid so distance ties actually occur.
        let grid_point = (prop::collection::vec(0..4_i32, d), any::<bool>()).prop_map(|(xs, b)| {
            let features = xs.into_iter().map(f64::from).collect();
            DataPoint::new(features, Label::from(b))
        });
        prop::collection::vec(grid_point, 1..40)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_matches_stable_brute_force(
            (train, query, k) in (1usize..4).prop_flat_map(|d| {
                (labeled_points(d), prop::collection::vec(0..4_i32, d))
            }).prop_flat_map(|(train, query)| {
                let n = train.len();
                (Just(train), Just(query), 1..=n)
            })
        ) {
            let d = query.len();
            let query: Vec<f64> = query.into_iter().map(f64::from).collect();
            let got: Vec<usize> = NeighborSelector::euclidean()
                .nearest_neighbors(&train, &query, k, d)
                .unwrap()
                .into_iter()
                .map(|n| n.index)
                .collect();
            prop_assert_eq!(got, brute_force(&train, &query, k, d));
        }

        #[test]
        fn prop_returns_exactly_k(
            (train, k) in labeled_points(2).prop_flat_map(|train| {
                let n = train.len();
                (Just(train), 1..=n)
            })
        ) {
            let neighbors = NeighborSelector::euclidean()
                .nearest_neighbors(&train, &[1.5, 1.5], k, 2)
                .unwrap();
            prop_assert_eq!(neighbors.len(), k);
            prop_assert!(neighbors.windows(2).all(|w| w[0].distance <= w[1].distance));
        }
    }
}

use num_traits::{AsPrimitive, Float};

use crate::error::{KnnError, Result};

pub mod classifier;
pub mod heap_utils;

/// Metrics available to the neighbor selector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KnnDistance {
    #[default]
    Euclidean,
    Manhattan,
    Minkowski { p: u32 }, // p is the order for Minkowski distance, at least 1
    Cosine,
}

/// A dissimilarity between two feature vectors.
///
/// Implementors provide [`DistanceMetric::measure`] over equal-length slices; the
/// provided [`DistanceMetric::distance`] validates the metric and the declared
/// dimensionality, then measures only the first `d` coordinates.
pub trait DistanceMetric: Sync {
    fn measure<F>(&self, a: &[F], b: &[F]) -> f64
    where
        F: Float + AsPrimitive<f64>;

    /// Rejects parameterizations that cannot produce a meaningful distance.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Fails with `DimensionMismatch` if either point has fewer than `d` coordinates.
    fn distance<F>(&self, a: &[F], b: &[F], d: usize) -> Result<f64>
    where
        F: Float + AsPrimitive<f64>,
    {
        self.validate()?;
        check_dimensionality(a, d)?;
        check_dimensionality(b, d)?;
        Ok(self.measure(&a[..d], &b[..d]))
    }
}

pub(crate) fn check_dimensionality<F>(point: &[F], d: usize) -> Result<()> {
    if point.len() < d {
        return Err(KnnError::DimensionMismatch {
            required: d,
            found: point.len(),
        });
    }
    Ok(())
}

impl DistanceMetric for KnnDistance {
    fn measure<F>(&self, a: &[F], b: &[F]) -> f64
    where
        F: Float + AsPrimitive<f64>,
    {
        match *self {
            KnnDistance::Euclidean => euclidean_distance(a, b),
            KnnDistance::Manhattan => minkowski_distance(a, b, 1),
            KnnDistance::Minkowski { p } => minkowski_distance(a, b, p),
            KnnDistance::Cosine => cosine_distance(a, b),
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            KnnDistance::Minkowski { p: 0 } => Err(KnnError::InvalidMetric(
                "Minkowski order p must be at least 1".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// Square root of the sum of squared coordinate differences.
pub fn euclidean_distance<F>(a: &[F], b: &[F]) -> f64
where
    F: Float + AsPrimitive<f64>,
{
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let diff: f64 = (*x - *y).as_();
            diff * diff
        })
        .sum::<f64>()
        .sqrt()
}

/// Lp distance. `p_val` must be at least 1; with 0 every distance is infinite.
pub fn minkowski_distance<F>(a: &[F], b: &[F], p_val: u32) -> f64
where
    F: Float + AsPrimitive<f64>,
{
    let p = f64::from(p_val);
    let sum_of_powers: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let diff_val: f64 = (*x - *y).abs().as_();
            diff_val.powf(p)
        })
        .sum();
    sum_of_powers.powf(1.0 / p)
}

/// Cosine distance = 1 - cosine similarity.
pub fn cosine_distance<F>(a: &[F], b: &[F]) -> f64
where
    F: Float + AsPrimitive<f64>,
{
    let (mut dot, mut norm_a, mut norm_b) = (0.0_f64, 0.0_f64, 0.0_f64);
    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y): (f64, f64) = ((*x).as_(), (*y).as_());
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let (mag_a, mag_b) = (norm_a.sqrt(), norm_b.sqrt());

    if mag_a == 0.0 || mag_b == 0.0 {
        // Two zero vectors coincide; a zero vector against anything else is maximally far.
        return if mag_a == mag_b { 0.0 } else { 1.0 };
    }
    // Clamp against floating point drift outside [-1, 1]
    let similarity = (dot / (mag_a * mag_b)).clamp(-1.0, 1.0);
    1.0 - similarity
}

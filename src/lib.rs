//! Exact binary k-nearest-neighbor classification.
//!
//! [`knn::classifier::NeighborSelector`] scans a labeled training set once per query,
//! keeps the k closest points in a bounded max-heap and predicts by signed majority
//! vote. The surrounding modules supply a synthetic dataset, a batch driver, a text
//! report and the configuration used by the `knn` binary.

pub mod batch;
pub mod common_types;
pub mod config;
pub mod dataset;
pub mod error;
pub mod knn;
pub mod report;

#[cfg(feature = "python")]
mod python;

pub use common_types::{DataPoint, Label, LabeledPoint};
pub use error::{KnnError, Result};
pub use knn::classifier::{majority_vote, predict, NeighborSelector};
pub use knn::heap_utils::{BoundedNeighborSet, Neighbor};
pub use knn::{DistanceMetric, KnnDistance};

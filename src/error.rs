//! Error types shared by the selector, the batch driver and the CLI.

use thiserror::Error;

/// Errors raised while classifying or while preparing a run.
///
/// Selection errors are caller mistakes, not transient conditions: a call that
/// fails never yields a partial prediction.
#[derive(Debug, Error)]
pub enum KnnError {
    #[error("k must be > 0")]
    InvalidK,

    #[error("dimensionality d must be > 0")]
    InvalidDimension,

    #[error("k ({k}) cannot be larger than number of training points ({available})")]
    InsufficientTrainingData { k: usize, available: usize },

    #[error("point has {found} coordinates but dimensionality is {required}")]
    DimensionMismatch { required: usize, found: usize },

    #[error("neighbor index {index} is out of range for {len} training points")]
    NeighborOutOfRange { index: usize, len: usize },

    #[error("invalid metric: {0}")]
    InvalidMetric(String),

    #[error("label must be 0 or 1, got {0}")]
    InvalidLabel(f64),

    #[error("invalid {name}: {reason}")]
    InvalidConfig { name: &'static str, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for k-NN operations
pub type Result<T> = std::result::Result<T, KnnError>;

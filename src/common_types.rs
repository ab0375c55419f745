//! This module contains the data structures shared by the selector, the dataset
//! provider and the batch driver.

use std::fmt;

use crate::error::KnnError;

/// Represents a single data point, with features and a label.
///
/// - `F`: The type of the features (e.g., `f64`, `f32`).
/// - `L`: The type of the label. Training points and classified queries both use [`Label`].
///
/// The label is kept outside `features`, so distance computations never see it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataPoint<F, L> {
    pub features: Vec<F>,
    pub label: L,
}

impl<F, L> DataPoint<F, L> {
    pub fn new(features: Vec<F>, label: L) -> Self {
        DataPoint { features, label }
    }
}

/// A point carrying a binary class label: a training point, or a query after classification.
pub type LabeledPoint<F> = DataPoint<F, Label>;

/// Binary class id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Label {
    Zero,
    One,
}

impl Label {
    /// Contribution to the signed majority tally: -1 for `Zero`, +1 for `One`.
    pub fn vote(self) -> i64 {
        match self {
            Label::Zero => -1,
            Label::One => 1,
        }
    }
}

impl From<bool> for Label {
    fn from(value: bool) -> Self {
        if value { Label::One } else { Label::Zero }
    }
}

impl TryFrom<i64> for Label {
    type Error = KnnError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Label::Zero),
            1 => Ok(Label::One),
            other => Err(KnnError::InvalidLabel(other as f64)),
        }
    }
}

// Labels stored as reals must be exactly 0.0 or 1.0.
impl TryFrom<f64> for Label {
    type Error = KnnError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value == 0.0 {
            Ok(Label::Zero)
        } else if value == 1.0 {
            Ok(Label::One)
        } else {
            Err(KnnError::InvalidLabel(value))
        }
    }
}

impl From<Label> for i64 {
    fn from(label: Label) -> Self {
        match label {
            Label::Zero => 0,
            Label::One => 1,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", i64::from(*self))
    }
}

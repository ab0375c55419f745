//! Python bindings, built with `--features python`.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::common_types::{DataPoint, Label, LabeledPoint};
use crate::error::KnnError;
use crate::knn::classifier::NeighborSelector;
use crate::knn::{self, DistanceMetric, KnnDistance};

impl From<KnnError> for PyErr {
    fn from(err: KnnError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// Cosine distance between two equal-length vectors.
#[pyfunction]
fn cosine_distance(a: Vec<f64>, b: Vec<f64>) -> PyResult<f64> {
    Ok(KnnDistance::Cosine.distance(&a, &b, equal_length(&a, &b)?)?)
}

/// Euclidean distance between two equal-length vectors.
#[pyfunction]
fn euclidean_distance(a: Vec<f64>, b: Vec<f64>) -> PyResult<f64> {
    equal_length(&a, &b)?;
    Ok(knn::euclidean_distance(&a, &b))
}

fn equal_length(a: &[f64], b: &[f64]) -> PyResult<usize> {
    if a.len() != b.len() {
        return Err(PyValueError::new_err("Input vectors must have the same length."));
    }
    Ok(a.len())
}

/// Python-friendly representation of KnnDistance
#[pyclass(name = "KnnDistance")]
#[derive(Clone)]
enum PyKnnDistance {
    Euclidean,
    Manhattan,
    Cosine,
}

impl From<PyKnnDistance> for KnnDistance {
    fn from(val: PyKnnDistance) -> Self {
        match val {
            PyKnnDistance::Euclidean => KnnDistance::Euclidean,
            PyKnnDistance::Manhattan => KnnDistance::Manhattan,
            PyKnnDistance::Cosine => KnnDistance::Cosine,
        }
    }
}

#[pyclass(name = "KnnClassifier")]
struct PyKnnClassifier {
    k: usize,
    selector: NeighborSelector<KnnDistance>,
    training_data: Vec<LabeledPoint<f64>>,
}

#[pymethods]
impl PyKnnClassifier {
    #[new]
    #[pyo3(signature = (k, distance_metric = PyKnnDistance::Euclidean))]
    fn new(k: usize, distance_metric: PyKnnDistance) -> Self {
        PyKnnClassifier {
            k,
            selector: NeighborSelector::new(distance_metric.into()),
            training_data: Vec::new(),
        }
    }

    /// Accepts items shaped like {'features': [...], 'label': 0} or ([...], 1).
    fn fit(&mut self, training_data_py: &Bound<'_, PyList>) -> PyResult<()> {
        let mut training_data = Vec::with_capacity(training_data_py.len());

        for item_py in training_data_py {
            let (features, label) = extract_training_item(&item_py)?;
            training_data.push(DataPoint::new(features, Label::try_from(label)?));
        }

        self.training_data = training_data;
        Ok(())
    }

    fn predict_single(&self, features: Vec<f64>) -> PyResult<i64> {
        let d = self.dimensionality().unwrap_or(features.len());
        let label = self.selector.predict(&self.training_data, &features, self.k, d)?;
        Ok(label.into())
    }

    fn predict(&self, test_data: Vec<Vec<f64>>) -> PyResult<Vec<i64>> {
        test_data
            .iter()
            .map(|features| -> PyResult<i64> {
                let d = self.dimensionality().unwrap_or(features.len());
                let label = self.selector.predict(&self.training_data, features, self.k, d)?;
                Ok(i64::from(label))
            })
            .collect()
    }
}

impl PyKnnClassifier {
    // None before fit; predict then fails on the empty training set.
    fn dimensionality(&self) -> Option<usize> {
        self.training_data.first().map(|dp| dp.features.len())
    }
}

fn extract_training_item(item_py: &Bound<'_, PyAny>) -> PyResult<(Vec<f64>, i64)> {
    let Ok(dict) = item_py.downcast::<PyDict>() else {
        return item_py.extract();
    };
    let features = dict
        .get_item("features")?
        .ok_or_else(|| PyValueError::new_err("Missing 'features' key"))?
        .extract()?;
    let label = dict
        .get_item("label")?
        .ok_or_else(|| PyValueError::new_err("Missing 'label' key"))?
        .extract()?;
    Ok((features, label))
}

#[pymodule]
fn binary_knn(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(euclidean_distance, m)?)?;
    m.add_function(wrap_pyfunction!(cosine_distance, m)?)?;
    m.add_class::<PyKnnDistance>()?;
    m.add_class::<PyKnnClassifier>()?;
    Ok(())
}

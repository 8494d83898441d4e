//! Python bindings for local-polynomial smoothing and statistics

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::filters::{savgol_filter, SavitzkyGolayFilter};
use crate::stats::describe;

/// Smooth a series with a local polynomial fit
///
/// Args:
///     x: Input samples as numpy array
///     window_length: Odd number of points per local fit (default: 11)
///     polyorder: Polynomial degree, less than window_length (default: 2)
///
/// Returns:
///     Smoothed samples, same length as x
#[pyfunction]
#[pyo3(name = "savgol_filter", signature = (x, window_length=11, polyorder=2))]
pub fn py_savgol_filter<'py>(
    py: Python<'py>,
    x: PyReadonlyArray1<f64>,
    window_length: usize,
    polyorder: usize,
) -> PyResult<&'py PyArray1<f64>> {
    let smoothed = savgol_filter(x.as_slice()?, window_length, polyorder)?;
    Ok(PyArray1::from_vec(py, smoothed))
}

/// Descriptive statistics of a raw series
///
/// Returns:
///     dict with max, min, range, mean, median and mode (None if no value repeats)
#[pyfunction]
#[pyo3(name = "describe")]
pub fn py_describe<'py>(py: Python<'py>, x: PyReadonlyArray1<f64>) -> PyResult<&'py PyDict> {
    let stats = describe(x.as_slice()?)?;

    let dict = PyDict::new(py);
    dict.set_item("max", stats.max)?;
    dict.set_item("min", stats.min)?;
    dict.set_item("range", stats.range)?;
    dict.set_item("mean", stats.mean)?;
    dict.set_item("median", stats.median)?;
    dict.set_item("mode", stats.mode)?;
    Ok(dict)
}

/// Reusable smoothing filter exposed to Python
#[pyclass(name = "SavitzkyGolayFilter")]
pub struct PySavitzkyGolayFilter {
    filter: SavitzkyGolayFilter,
}

#[pymethods]
impl PySavitzkyGolayFilter {
    /// Create a new filter
    ///
    /// Args:
    ///     window_length: Odd number of points per local fit
    ///     polyorder: Polynomial degree
    #[new]
    #[pyo3(signature = (window_length=11, polyorder=2))]
    fn new(window_length: usize, polyorder: usize) -> PyResult<Self> {
        Ok(Self {
            filter: SavitzkyGolayFilter::with_params(window_length, polyorder)?,
        })
    }

    /// Smooth a series
    ///
    /// Args:
    ///     x: Input samples as numpy array
    ///
    /// Returns:
    ///     Smoothed samples as numpy array
    fn smooth<'py>(&self, py: Python<'py>, x: PyReadonlyArray1<f64>) -> PyResult<&'py PyArray1<f64>> {
        let smoothed = self.filter.smooth(x.as_slice()?)?;
        Ok(PyArray1::from_vec(py, smoothed))
    }

    /// Get the interior convolution kernel
    fn kernel<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_slice(py, self.filter.kernel())
    }

    #[getter]
    fn window_length(&self) -> usize {
        self.filter.params().window_length
    }

    #[getter]
    fn polyorder(&self) -> usize {
        self.filter.params().polyorder
    }
}

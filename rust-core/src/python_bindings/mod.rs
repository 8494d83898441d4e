//! PyO3 bindings for Python integration
//!
//! Exposes the smoothing engine, spectral analyzer and summary statistics as
//! plain numpy arrays for matplotlib-based rendering.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::error::SignalError;

mod smoothing_bindings;
mod spectrum_bindings;

impl From<SignalError> for PyErr {
    fn from(err: SignalError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// Python module definition
#[pymodule]
fn weather_signal(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<smoothing_bindings::PySavitzkyGolayFilter>()?;
    m.add_class::<spectrum_bindings::PySpectrumAnalyzer>()?;

    m.add_function(wrap_pyfunction!(smoothing_bindings::py_savgol_filter, m)?)?;
    m.add_function(wrap_pyfunction!(smoothing_bindings::py_describe, m)?)?;
    m.add_function(wrap_pyfunction!(spectrum_bindings::py_frequency_axis, m)?)?;

    Ok(())
}

//! Python bindings for spectrum analysis

use numpy::{Complex64, PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::spectrum::{frequency_axis, AnalyzerConfig, SpectrumAnalyzer, WindowType};

/// Spectrum analyzer exposed to Python
#[pyclass(name = "SpectrumAnalyzer")]
pub struct PySpectrumAnalyzer {
    analyzer: SpectrumAnalyzer,
}

#[pymethods]
impl PySpectrumAnalyzer {
    /// Create a new spectrum analyzer
    ///
    /// Args:
    ///     sample_spacing: Time units per sample (default: 1.0, i.e. hourly)
    ///     taper: Optional pre-window: "rectangular", "hann", "hamming" or "blackman"
    #[new]
    #[pyo3(signature = (sample_spacing=1.0, taper="rectangular"))]
    fn new(sample_spacing: f64, taper: &str) -> PyResult<Self> {
        let taper: WindowType = taper.parse().map_err(PyValueError::new_err)?;
        let analyzer = SpectrumAnalyzer::new(AnalyzerConfig {
            sample_spacing,
            taper,
        })?;

        Ok(Self { analyzer })
    }

    /// Analyze a real series
    ///
    /// Args:
    ///     signal: Input samples as numpy array
    ///
    /// Returns:
    ///     Tuple of (complex spectrum, frequency axis), both of length N
    fn analyze<'py>(
        &self,
        py: Python<'py>,
        signal: PyReadonlyArray1<f64>,
    ) -> PyResult<(&'py PyArray1<Complex64>, &'py PyArray1<f64>)> {
        let spectrum = self.analyzer.analyze(signal.as_slice()?)?;

        Ok((
            PyArray1::from_vec(py, spectrum.bins),
            PyArray1::from_vec(py, spectrum.frequencies),
        ))
    }

    /// Get current sample spacing
    fn get_sample_spacing(&self) -> f64 {
        self.analyzer.config().sample_spacing
    }
}

/// Frequency of each DFT bin, negative frequencies in the upper half
///
/// Args:
///     n: Number of bins
///     d: Sample spacing (default: 1.0)
#[pyfunction]
#[pyo3(name = "frequency_axis", signature = (n, d=1.0))]
pub fn py_frequency_axis<'py>(py: Python<'py>, n: usize, d: f64) -> &'py PyArray1<f64> {
    PyArray1::from_vec(py, frequency_axis(n, d))
}

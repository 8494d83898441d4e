//! Spectral analyzer
//!
//! Produces the complex spectrum of a real series together with its frequency
//! axis. Magnitude/phase extraction helpers are provided for plotting.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use super::fft::{frequency_axis, FftEngine};
use super::windowing::{apply_window, WindowType};
use crate::error::{Result, SignalError};
use crate::series::validate_samples;

/// Spectrum analyzer configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Time units per sample (d); hours for the weather feed
    pub sample_spacing: f64,

    /// Caller-requested taper; Rectangular leaves the series untouched
    pub taper: WindowType,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            sample_spacing: 1.0,
            taper: WindowType::Rectangular,
        }
    }
}

impl AnalyzerConfig {
    /// Check that the sample spacing is usable
    pub fn validate(&self) -> Result<()> {
        if !self.sample_spacing.is_finite() || self.sample_spacing <= 0.0 {
            return Err(SignalError::InvalidParameter(format!(
                "sample spacing must be positive and finite (got {})",
                self.sample_spacing
            )));
        }
        Ok(())
    }
}

/// Complex spectrum paired with its frequency axis
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    /// N complex bins, standard DFT ordering
    pub bins: Vec<Complex64>,

    /// Frequency of each bin in cycles per time unit
    pub frequencies: Vec<f64>,

    /// Sample spacing the axis was built with
    pub sample_spacing: f64,
}

impl Spectrum {
    /// Number of bins
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// |X[k]|
    pub fn magnitude(&self) -> Vec<f64> {
        self.bins.iter().map(|c| c.norm()).collect()
    }

    /// arg X[k] in radians
    pub fn phase(&self) -> Vec<f64> {
        self.bins.iter().map(|c| c.arg()).collect()
    }

    /// Bins with non-negative frequency, as (frequency, bin) pairs
    pub fn positive_half(&self) -> Vec<(f64, Complex64)> {
        self.frequencies
            .iter()
            .zip(self.bins.iter())
            .filter(|(&f, _)| f >= 0.0)
            .map(|(&f, &c)| (f, c))
            .collect()
    }

    /// Period of the strongest non-DC positive-frequency component
    ///
    /// # Returns
    /// Period in time units, or None for series too short to have one
    pub fn dominant_period(&self) -> Option<f64> {
        self.positive_half()
            .into_iter()
            .filter(|(f, _)| *f > 0.0)
            .max_by(|(_, a), (_, b)| a.norm().total_cmp(&b.norm()))
            .map(|(f, _)| 1.0 / f)
    }

    /// Reconstruct the time-domain series
    pub fn inverse(&self) -> Result<Vec<f64>> {
        FftEngine::new(self.bins.len())?.inverse(&self.bins)
    }
}

/// Spectral analyzer for uniformly sampled real series
#[derive(Debug, Clone, Default)]
pub struct SpectrumAnalyzer {
    config: AnalyzerConfig,
}

impl SpectrumAnalyzer {
    /// Create new spectrum analyzer
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Compute the spectrum and frequency axis of `signal`
    ///
    /// # Arguments
    /// * `signal` - Finite samples, N >= 1
    ///
    /// # Returns
    /// N complex bins and N frequencies
    pub fn analyze(&self, signal: &[f64]) -> Result<Spectrum> {
        validate_samples(signal)?;

        let engine = FftEngine::new(signal.len())?;
        let bins = match self.config.taper {
            WindowType::Rectangular => engine.forward(signal)?,
            taper => engine.forward(&apply_window(signal, taper))?,
        };

        Ok(Spectrum {
            bins,
            frequencies: frequency_axis(signal.len(), self.config.sample_spacing),
            sample_spacing: self.config.sample_spacing,
        })
    }

    /// Get current configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }
}

/// Spectrum of `x` sampled every `sample_spacing` time units, no tapering
///
/// Input problems (empty, non-finite) are reported before parameter problems.
pub fn spectrum(x: &[f64], sample_spacing: f64) -> Result<Spectrum> {
    validate_samples(x)?;
    SpectrumAnalyzer::new(AnalyzerConfig {
        sample_spacing,
        taper: WindowType::Rectangular,
    })?
    .analyze(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn diurnal(n: usize) -> Vec<f64> {
        (0..n)
            .map(|h| 12.0 + 6.0 * (2.0 * PI * h as f64 / 24.0).sin() + 0.5 * (h as f64 * 1.7).cos())
            .collect()
    }

    #[test]
    fn test_analyzer_basic() {
        let x = diurnal(168);
        let result = spectrum(&x, 1.0).unwrap();

        assert_eq!(result.len(), 168);
        assert_eq!(result.frequencies.len(), 168);
        assert_eq!(result.frequencies[0], 0.0);

        // One cycle per 24 samples
        let period = result.dominant_period().unwrap();
        assert!((period - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_dc_is_sum() {
        let x = diurnal(100);
        let result = spectrum(&x, 1.0).unwrap();
        let sum: f64 = x.iter().sum();

        assert!((result.bins[0].re - sum).abs() < 1e-9);
        assert!(result.bins[0].im.abs() < 1e-9);
    }

    #[test]
    fn test_hermitian_symmetry() {
        for &n in &[1usize, 2, 9, 24, 25] {
            let x: Vec<f64> = (0..n).map(|i| (i as f64 * 0.9).sin() + 0.1 * i as f64).collect();
            let result = spectrum(&x, 1.0).unwrap();

            for k in 0..n {
                let mirror = (n - k) % n;
                let diff = result.bins[k] - result.bins[mirror].conj();
                assert!(diff.norm() < 1e-9, "n={} k={}", n, k);
            }
        }
    }

    #[test]
    fn test_round_trip() {
        let x = diurnal(73);
        let result = spectrum(&x, 1.0).unwrap();
        let back = result.inverse().unwrap();

        for (a, b) in x.iter().zip(back.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_sample_spacing_scales_axis() {
        let x = diurnal(48);
        let hourly = spectrum(&x, 1.0).unwrap();
        let minutes = spectrum(&x, 60.0).unwrap();

        for (h, m) in hourly.frequencies.iter().zip(minutes.frequencies.iter()) {
            assert!((h / 60.0 - m).abs() < 1e-15);
        }
        assert_eq!(hourly.bins, minutes.bins);
    }

    #[test]
    fn test_taper_is_opt_in() {
        let x = diurnal(64);
        let plain = spectrum(&x, 1.0).unwrap();

        let tapered = SpectrumAnalyzer::new(AnalyzerConfig {
            sample_spacing: 1.0,
            taper: WindowType::Hann,
        })
        .unwrap()
        .analyze(&x)
        .unwrap();

        assert!(tapered.bins[0].re < plain.bins[0].re);
    }

    #[test]
    fn test_magnitude_and_phase() {
        let result = spectrum(&[1.0, 0.0, -1.0, 0.0], 1.0).unwrap();
        let mag = result.magnitude();
        let phase = result.phase();

        // X = [0, 2, 0, 2]
        assert!(mag[0].abs() < 1e-12);
        assert!((mag[1] - 2.0).abs() < 1e-12);
        assert!(phase[1].abs() < 1e-12);
        assert_eq!(result.positive_half().len(), 3);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(spectrum(&[], 1.0), Err(SignalError::InvalidInput(_))));
        assert!(matches!(spectrum(&[1.0, f64::NAN], 1.0), Err(SignalError::InvalidInput(_))));
        assert!(matches!(spectrum(&[1.0, 2.0], 0.0), Err(SignalError::InvalidParameter(_))));
    }

    #[test]
    fn test_input_checked_before_spacing() {
        assert!(matches!(spectrum(&[], 0.0), Err(SignalError::InvalidInput(_))));
        assert!(matches!(spectrum(&[f64::INFINITY], -1.0), Err(SignalError::InvalidInput(_))));
    }

    #[test]
    fn test_single_sample() {
        let result = spectrum(&[4.5], 1.0).unwrap();
        assert_eq!(result.len(), 1);
        assert!((result.bins[0].re - 4.5).abs() < 1e-12);
        assert_eq!(result.dominant_period(), None);
    }
}

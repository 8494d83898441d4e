//! FFT engine for real-valued series of arbitrary length
//!
//! The forward transform runs through realfft and the upper half of the
//! spectrum is filled from the Hermitian mirror, so bins k and N-k are exact
//! conjugates. The inverse uses a full complex rustfft plan.

use num_complex::Complex64;
use realfft::{RealFftPlanner, RealToComplex};
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

use crate::error::{Result, SignalError};

/// Forward/inverse DFT engine for one transform size
pub struct FftEngine {
    /// FFT size (number of samples, any positive length)
    fft_size: usize,

    /// Real-to-complex forward plan
    r2c: Arc<dyn RealToComplex<f64>>,

    /// Complex inverse plan
    inverse: Arc<dyn Fft<f64>>,
}

impl FftEngine {
    /// Plan transforms of length `fft_size`
    pub fn new(fft_size: usize) -> Result<Self> {
        if fft_size == 0 {
            return Err(SignalError::InvalidInput(
                "cannot transform an empty series".into(),
            ));
        }

        let r2c = RealFftPlanner::<f64>::new().plan_fft_forward(fft_size);
        let inverse = FftPlanner::<f64>::new().plan_fft_inverse(fft_size);

        Ok(Self {
            fft_size,
            r2c,
            inverse,
        })
    }

    /// Standard forward DFT: X[k] = Σ x[n] e^{-2πikn/N}
    ///
    /// # Arguments
    /// * `signal` - Exactly `fft_size` real samples (no padding or windowing)
    ///
    /// # Returns
    /// All N complex bins
    pub fn forward(&self, signal: &[f64]) -> Result<Vec<Complex64>> {
        self.check_len(signal.len())?;

        let mut input = signal.to_vec();
        let mut half = self.r2c.make_output_vec();
        self.r2c
            .process(&mut input, &mut half)
            .map_err(|e| SignalError::InvalidInput(format!("forward FFT failed: {}", e)))?;

        // Mirror the non-negative half onto the negative frequencies
        let n = self.fft_size;
        let mut bins = Vec::with_capacity(n);
        bins.extend_from_slice(&half);
        for k in half.len()..n {
            bins.push(half[n - k].conj());
        }

        Ok(bins)
    }

    /// Inverse DFT scaled by 1/N, keeping the real part
    ///
    /// # Arguments
    /// * `spectrum` - All N complex bins
    pub fn inverse(&self, spectrum: &[Complex64]) -> Result<Vec<f64>> {
        self.check_len(spectrum.len())?;

        let mut buffer = spectrum.to_vec();
        self.inverse.process(&mut buffer);

        let scale = 1.0 / self.fft_size as f64;
        Ok(buffer.iter().map(|c| c.re * scale).collect())
    }

    fn check_len(&self, len: usize) -> Result<()> {
        if len != self.fft_size {
            return Err(SignalError::InvalidInput(format!(
                "expected {} samples for this FFT plan, got {}",
                self.fft_size, len
            )));
        }
        Ok(())
    }
}

/// Frequency of every DFT bin, negative frequencies in the upper half
///
/// # Arguments
/// * `n` - Number of bins
/// * `sample_spacing` - Time units per sample (d)
///
/// # Returns
/// k/(N·d) for k <= N/2, (k-N)/(N·d) otherwise
pub fn frequency_axis(n: usize, sample_spacing: f64) -> Vec<f64> {
    let span = n as f64 * sample_spacing;
    (0..n)
        .map(|k| {
            let k_signed = if k <= n / 2 {
                k as f64
            } else {
                k as f64 - n as f64
            };
            k_signed / span
        })
        .collect()
}

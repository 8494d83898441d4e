//! Savitzky-Golay smoothing engine
//!
//! Interior positions use one precomputed kernel; the first and last half-window
//! positions evaluate the polynomial of the nearest full window at their own
//! offset, so the output keeps the input length without shrinking windows.

use super::design::{vandermonde, QrDecomposition, WindowParams};
use super::fir::{weighted_sum, FirFilter};
use crate::error::Result;
use crate::series::validate_samples;

/// Local polynomial smoothing filter for one `(window_length, polyorder)` pair
#[derive(Debug, Clone)]
pub struct SavitzkyGolayFilter {
    params: WindowParams,

    /// Interior kernel (fit evaluated at the window center)
    kernel: FirFilter,

    /// Row r evaluates a window's fit at offset r - half
    offset_weights: Vec<Vec<f64>>,

    /// Factorised design matrix, kept for per-window fits
    qr: QrDecomposition,
}

impl SavitzkyGolayFilter {
    /// Precompute the kernel and boundary weights
    ///
    /// # Arguments
    /// * `params` - Validated window parameters
    pub fn new(params: WindowParams) -> Result<Self> {
        let a = vandermonde(&params.scaled_offsets(), params.polyorder);
        let qr = QrDecomposition::new(&a)?;

        let half = params.half_width() as f64;
        let offset_weights: Vec<Vec<f64>> = (0..params.window_length)
            .map(|r| qr.projection_weights(&params.basis_at(r as f64 - half)))
            .collect();

        let kernel = FirFilter::new(offset_weights[params.half_width()].clone());

        Ok(Self {
            params,
            kernel,
            offset_weights,
            qr,
        })
    }

    /// Convenience constructor validating raw parameters
    pub fn with_params(window_length: usize, polyorder: usize) -> Result<Self> {
        Self::new(WindowParams::new(window_length, polyorder)?)
    }

    /// Smooth a complete series
    ///
    /// # Arguments
    /// * `x` - Finite samples, at least `window_length` of them
    ///
    /// # Returns
    /// Smoothed series of the same length
    pub fn smooth(&self, x: &[f64]) -> Result<Vec<f64>> {
        validate_samples(x)?;
        self.params.check_fits(x.len())?;

        let n = x.len();
        let w = self.params.window_length;
        let half = self.params.half_width();
        let mut y = vec![0.0; n];

        // Interior: fixed kernel
        self.kernel.process_interior(x, &mut y);

        // Leading edge: extrapolate the first full window
        let head = &x[..w];
        for (i, out) in y.iter_mut().enumerate().take(half) {
            *out = weighted_sum(&self.offset_weights[i], head);
        }

        // Trailing edge: extrapolate the last full window
        let tail_start = n - w;
        let tail = &x[tail_start..];
        for i in n - half..n {
            y[i] = weighted_sum(&self.offset_weights[i - tail_start], tail);
        }

        Ok(y)
    }

    /// Smooth by solving one least-squares fit per position
    ///
    /// Each window's fit is evaluated through its projection weights, built from
    /// the factorised design matrix for that position's offset and accumulated
    /// with [`weighted_sum`]. Same windows and boundary policy as
    /// [`smooth`](Self::smooth), and bit-identical output; costs
    /// O(N * window_length * polyorder).
    pub fn smooth_by_local_fit(&self, x: &[f64]) -> Result<Vec<f64>> {
        validate_samples(x)?;
        self.params.check_fits(x.len())?;

        let n = x.len();
        let w = self.params.window_length;
        let half = self.params.half_width();

        let y = (0..n)
            .map(|i| {
                // Nearest fully-interior window
                let start = i.saturating_sub(half).min(n - w);
                let offset = i as f64 - (start + half) as f64;
                let weights = self.qr.projection_weights(&self.params.basis_at(offset));
                weighted_sum(&weights, &x[start..start + w])
            })
            .collect();

        Ok(y)
    }

    /// Get the interior smoothing kernel
    pub fn kernel(&self) -> &[f64] {
        self.kernel.coefficients()
    }

    /// Get window parameters
    pub fn params(&self) -> WindowParams {
        self.params
    }
}

/// Smooth `x` with a local polynomial of degree `polyorder` over `window_length` points
///
/// Input problems (empty, non-finite) are reported before parameter problems.
pub fn savgol_filter(x: &[f64], window_length: usize, polyorder: usize) -> Result<Vec<f64>> {
    validate_samples(x)?;
    SavitzkyGolayFilter::with_params(window_length, polyorder)?.smooth(x)
}

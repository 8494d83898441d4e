//! Fixed-kernel FIR filtering over a complete series
//!
//! Applies a centered kernel by direct correlation at every position where the
//! whole kernel fits inside the input. Positions near the edges are left to the
//! caller's boundary policy.

/// Centered FIR filter with a fixed odd-length kernel
#[derive(Debug, Clone)]
pub struct FirFilter {
    /// Filter coefficients h[k] for offsets k - (M-1)/2
    coefficients: Vec<f64>,

    /// Filter length M
    length: usize,
}

impl FirFilter {
    /// Create a new FIR filter with given coefficients
    ///
    /// # Arguments
    /// * `coefficients` - Kernel h[n] for n = 0..M-1, centered on (M-1)/2
    pub fn new(coefficients: Vec<f64>) -> Self {
        let length = coefficients.len();
        Self {
            coefficients,
            length,
        }
    }

    /// Filter every interior position in place into `output`
    ///
    /// Writes output[i] for i in [half, N - half), where half = (M-1)/2.
    /// Other positions of `output` are left untouched.
    pub fn process_interior(&self, input: &[f64], output: &mut [f64]) {
        if self.length == 0 || input.len() < self.length {
            return;
        }

        let half = self.half_width();
        for (start, window) in input.windows(self.length).enumerate() {
            output[start + half] = weighted_sum(&self.coefficients, window);
        }
    }

    /// Get filter coefficients
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Samples on each side of the kernel center
    pub fn half_width(&self) -> usize {
        self.length.saturating_sub(1) / 2
    }
}

/// Dot product of weights and samples, accumulated left to right
#[inline]
pub fn weighted_sum(weights: &[f64], samples: &[f64]) -> f64 {
    weights
        .iter()
        .zip(samples.iter())
        .fold(0.0, |acc, (&w, &x)| acc + w * x)
}

//! Local-polynomial (Savitzky-Golay) kernel design
//!
//! Least-squares fits go through a Householder QR factorisation of the
//! Vandermonde design matrix; the normal equations are never formed. Offsets
//! are scaled onto [-1, 1] before raising them to powers, so wide windows with
//! high polynomial orders stay well conditioned.

use ndarray::{s, Array2};
use crate::error::{Result, SignalError};

/// Window parameters for the local polynomial fit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowParams {
    /// Number of points spanned by each local fit (odd)
    pub window_length: usize,

    /// Degree of the local polynomial
    pub polyorder: usize,
}

impl WindowParams {
    /// Create validated window parameters
    ///
    /// # Arguments
    /// * `window_length` - Positive odd number of points per window
    /// * `polyorder` - Polynomial degree, strictly less than `window_length`
    pub fn new(window_length: usize, polyorder: usize) -> Result<Self> {
        if window_length == 0 || window_length % 2 == 0 {
            return Err(SignalError::InvalidParameter(format!(
                "window_length must be a positive odd integer (got {})",
                window_length
            )));
        }

        if polyorder >= window_length {
            return Err(SignalError::InvalidParameter(format!(
                "polyorder must be less than window_length (got polyorder {} for window_length {})",
                polyorder, window_length
            )));
        }

        Ok(Self {
            window_length,
            polyorder,
        })
    }

    /// Points on each side of the window center
    pub fn half_width(&self) -> usize {
        self.window_length / 2
    }

    /// Check that a full window fits in a series of length `n`
    pub fn check_fits(&self, n: usize) -> Result<()> {
        if self.window_length > n {
            return Err(SignalError::InvalidParameter(format!(
                "window_length {} exceeds series length {}",
                self.window_length, n
            )));
        }
        Ok(())
    }

    /// Divisor mapping window offsets onto [-1, 1]
    pub fn offset_scale(&self) -> f64 {
        offset_scale(self.window_length)
    }

    /// Window offsets -half..=half divided by `offset_scale`
    pub fn scaled_offsets(&self) -> Vec<f64> {
        scaled_offsets(self.window_length)
    }

    /// Monomial basis evaluated at `offset` samples from the window center
    pub fn basis_at(&self, offset: f64) -> Vec<f64> {
        monomials(offset / self.offset_scale(), self.polyorder)
    }
}

impl Default for WindowParams {
    fn default() -> Self {
        Self {
            window_length: 11,
            polyorder: 2,
        }
    }
}

fn offset_scale(len: usize) -> f64 {
    ((len as f64 - 1.0) / 2.0).max(1.0)
}

/// Offsets of `len` points centered on zero, scaled onto [-1, 1]
fn scaled_offsets(len: usize) -> Vec<f64> {
    let center = (len as f64 - 1.0) / 2.0;
    let scale = offset_scale(len);
    (0..len).map(|i| (i as f64 - center) / scale).collect()
}

/// Monomial basis [1, t, t^2, ..., t^polyorder]
pub fn monomials(t: f64, polyorder: usize) -> Vec<f64> {
    let mut basis = Vec::with_capacity(polyorder + 1);
    let mut power = 1.0;
    for _ in 0..=polyorder {
        basis.push(power);
        power *= t;
    }
    basis
}

/// Build the Vandermonde design matrix A[i][j] = offsets[i]^j
pub fn vandermonde(offsets: &[f64], polyorder: usize) -> Array2<f64> {
    Array2::from_shape_fn((offsets.len(), polyorder + 1), |(i, j)| {
        offsets[i].powi(j as i32)
    })
}

/// Evaluate polynomial coefficients (lowest degree first) with Horner's rule
pub fn evaluate_polynomial(coeffs: &[f64], t: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, &c| acc * t + c)
}

/// Thin QR factorisation A = Q R of a tall design matrix
#[derive(Debug, Clone)]
pub struct QrDecomposition {
    /// Orthonormal columns (rows x cols)
    q: Array2<f64>,

    /// Upper triangular factor (cols x cols)
    r: Array2<f64>,
}

impl QrDecomposition {
    /// Factorise `a` with Householder reflections
    ///
    /// # Returns
    /// `InvalidParameter` if `a` is wider than tall or a pivot vanishes
    pub fn new(a: &Array2<f64>) -> Result<Self> {
        let (rows, cols) = a.dim();
        if rows < cols || cols == 0 {
            return Err(SignalError::InvalidParameter(format!(
                "least-squares system needs at least as many points as unknowns ({} < {})",
                rows, cols
            )));
        }

        let mut r = a.clone();
        let mut q = Array2::<f64>::eye(rows);

        for j in 0..cols {
            let norm = (j..rows).map(|i| r[[i, j]] * r[[i, j]]).sum::<f64>().sqrt();
            if norm == 0.0 {
                continue;
            }

            // Reflect column j onto -sign(r_jj) * norm * e_j
            let alpha = if r[[j, j]] > 0.0 { -norm } else { norm };
            let mut v: Vec<f64> = (j..rows).map(|i| r[[i, j]]).collect();
            v[0] -= alpha;

            let v_norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
            if v_norm == 0.0 {
                continue;
            }
            v.iter_mut().for_each(|x| *x /= v_norm);

            // R <- H R
            for col in j..cols {
                let dot: f64 = v
                    .iter()
                    .enumerate()
                    .map(|(k, vk)| vk * r[[j + k, col]])
                    .sum();
                for (k, vk) in v.iter().enumerate() {
                    r[[j + k, col]] -= 2.0 * dot * vk;
                }
            }

            // Q <- Q H
            for row in 0..rows {
                let dot: f64 = v
                    .iter()
                    .enumerate()
                    .map(|(k, vk)| q[[row, j + k]] * vk)
                    .sum();
                for (k, vk) in v.iter().enumerate() {
                    q[[row, j + k]] -= 2.0 * dot * vk;
                }
            }
        }

        if (0..cols).any(|j| r[[j, j]] == 0.0) {
            return Err(SignalError::InvalidParameter(
                "design matrix is rank deficient".into(),
            ));
        }

        Ok(Self {
            q: q.slice(s![.., ..cols]).to_owned(),
            r: r.slice(s![..cols, ..cols]).to_owned(),
        })
    }

    /// Number of rows (fit points)
    pub fn rows(&self) -> usize {
        self.q.nrows()
    }

    /// Number of unknowns (polynomial coefficients)
    pub fn cols(&self) -> usize {
        self.r.ncols()
    }

    /// Solve min ||A c - y|| via R c = Q^T y
    ///
    /// # Arguments
    /// * `y` - Right-hand side, one value per design-matrix row
    pub fn solve_least_squares(&self, y: &[f64]) -> Vec<f64> {
        let cols = self.cols();

        let qty: Vec<f64> = (0..cols)
            .map(|j| y.iter().enumerate().map(|(i, &yi)| self.q[[i, j]] * yi).sum())
            .collect();

        // Back substitution
        let mut c = vec![0.0; cols];
        for j in (0..cols).rev() {
            let tail: f64 = (j + 1..cols).map(|l| self.r[[j, l]] * c[l]).sum();
            c[j] = (qty[j] - tail) / self.r[[j, j]];
        }
        c
    }

    /// Weights w such that w . y equals the least-squares fit evaluated at `basis`
    ///
    /// w = Q R^-T basis, so that basis^T R^-1 Q^T y = w^T y.
    pub fn projection_weights(&self, basis: &[f64]) -> Vec<f64> {
        let cols = self.cols();

        // Forward substitution with R^T (lower triangular)
        let mut z = vec![0.0; cols];
        for j in 0..cols {
            let head: f64 = (0..j).map(|l| self.r[[l, j]] * z[l]).sum();
            z[j] = (basis[j] - head) / self.r[[j, j]];
        }

        (0..self.rows())
            .map(|i| (0..cols).map(|j| self.q[[i, j]] * z[j]).sum())
            .collect()
    }
}

/// Least-squares polynomial fit over a window with offsets centered on zero
///
/// # Arguments
/// * `window` - Samples of the window
/// * `polyorder` - Polynomial degree (must be < window.len())
///
/// # Returns
/// Coefficients c[0..=polyorder], lowest degree first, in unscaled offset units
pub fn fit_polynomial(window: &[f64], polyorder: usize) -> Result<Vec<f64>> {
    if polyorder >= window.len() {
        return Err(SignalError::InvalidParameter(format!(
            "polyorder {} needs more than {} points",
            polyorder,
            window.len()
        )));
    }

    let a = vandermonde(&scaled_offsets(window.len()), polyorder);
    let qr = QrDecomposition::new(&a)?;
    let scale = offset_scale(window.len());

    Ok(qr
        .solve_least_squares(window)
        .into_iter()
        .enumerate()
        .map(|(j, c)| c / scale.powi(j as i32))
        .collect())
}

/// Weights that evaluate the window's local fit at `offset` from its center
pub fn projection_weights(params: &WindowParams, offset: f64) -> Result<Vec<f64>> {
    let a = vandermonde(&params.scaled_offsets(), params.polyorder);
    let qr = QrDecomposition::new(&a)?;
    Ok(qr.projection_weights(&params.basis_at(offset)))
}

/// Design the fixed smoothing kernel (fit evaluated at the window center)
///
/// # Returns
/// Symmetric kernel of length `window_length` summing to 1
pub fn design_savgol_kernel(params: &WindowParams) -> Result<Vec<f64>> {
    projection_weights(params, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_params_validation() {
        assert!(WindowParams::new(11, 2).is_ok());
        assert!(WindowParams::new(1, 0).is_ok());
        assert!(matches!(WindowParams::new(10, 2), Err(SignalError::InvalidParameter(_))));
        assert!(matches!(WindowParams::new(0, 0), Err(SignalError::InvalidParameter(_))));
        assert!(matches!(WindowParams::new(5, 5), Err(SignalError::InvalidParameter(_))));
        assert!(matches!(WindowParams::new(5, 7), Err(SignalError::InvalidParameter(_))));
    }

    #[test]
    fn test_check_fits() {
        let params = WindowParams::new(11, 2).unwrap();
        assert!(params.check_fits(11).is_ok());
        assert!(matches!(params.check_fits(10), Err(SignalError::InvalidParameter(_))));
    }

    #[test]
    fn test_kernel_5_2() {
        // Classic tabulated Savitzky-Golay weights: [-3, 12, 17, 12, -3] / 35
        let params = WindowParams::new(5, 2).unwrap();
        let h = design_savgol_kernel(&params).unwrap();
        let expected = [-3.0, 12.0, 17.0, 12.0, -3.0];

        assert_eq!(h.len(), 5);
        for (i, (&hi, &e)) in h.iter().zip(expected.iter()).enumerate() {
            assert!((hi - e / 35.0).abs() < 1e-12, "Mismatch at {}: {} vs {}", i, hi, e / 35.0);
        }
    }

    #[test]
    fn test_kernel_symmetry_and_unit_gain() {
        for &(w, p) in &[(7, 3), (11, 2), (21, 4), (31, 0)] {
            let params = WindowParams::new(w, p).unwrap();
            let h = design_savgol_kernel(&params).unwrap();

            for i in 0..h.len() / 2 {
                assert!((h[i] - h[h.len() - 1 - i]).abs() < 1e-12);
            }

            let sum: f64 = h.iter().sum();
            assert!((sum - 1.0).abs() < 1e-12, "DC gain {} for ({}, {})", sum, w, p);
        }
    }

    #[test]
    fn test_polyorder_zero_kernel_is_moving_average() {
        let params = WindowParams::new(9, 0).unwrap();
        let h = design_savgol_kernel(&params).unwrap();
        assert!(h.iter().all(|&w| (w - 1.0 / 9.0).abs() < 1e-14));
    }

    #[test]
    fn test_fit_polynomial_exact_quadratic() {
        // y = 1 - 2t + 0.5t^2 over offsets -3..=3
        let window: Vec<f64> = (-3..=3)
            .map(|t| {
                let t = t as f64;
                1.0 - 2.0 * t + 0.5 * t * t
            })
            .collect();
        let c = fit_polynomial(&window, 2).unwrap();

        assert!((c[0] - 1.0).abs() < 1e-12);
        assert!((c[1] + 2.0).abs() < 1e-12);
        assert!((c[2] - 0.5).abs() < 1e-12);
        assert!((evaluate_polynomial(&c, 4.0) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_projection_weights_match_fit() {
        let params = WindowParams::new(7, 2).unwrap();
        let window = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0];
        let c = fit_polynomial(&window, 2).unwrap();

        for &offset in &[-3.0, -1.0, 0.0, 2.0, 3.0] {
            let w = projection_weights(&params, offset).unwrap();
            let via_weights: f64 = w.iter().zip(window.iter()).map(|(a, b)| a * b).sum();
            let via_fit = evaluate_polynomial(&c, offset);
            assert!((via_weights - via_fit).abs() < 1e-10);
        }
    }

    #[test]
    fn test_qr_rejects_underdetermined() {
        let a = vandermonde(&[0.0, 1.0], 3);
        assert!(matches!(QrDecomposition::new(&a), Err(SignalError::InvalidParameter(_))));
    }

    #[test]
    fn test_high_order_wide_windows_factorise() {
        for &(w, p) in &[(101, 10), (169, 12), (31, 20), (31, 30)] {
            let params = WindowParams::new(w, p).unwrap();
            let a = vandermonde(&params.scaled_offsets(), p);
            assert!(a.iter().all(|v| v.abs() <= 1.0));

            let h = design_savgol_kernel(&params).unwrap();
            let sum: f64 = h.iter().sum();
            assert!((sum - 1.0).abs() < 1e-10, "DC gain {} for ({}, {})", sum, w, p);
        }
    }

    #[test]
    fn test_scaled_offsets_span_unit_interval() {
        let params = WindowParams::new(9, 2).unwrap();
        let u = params.scaled_offsets();
        assert_eq!(params.offset_scale(), 4.0);
        assert_eq!(u.first(), Some(&-1.0));
        assert_eq!(u[4], 0.0);
        assert_eq!(u.last(), Some(&1.0));

        let single = WindowParams::new(1, 0).unwrap();
        assert_eq!(single.scaled_offsets(), vec![0.0]);
    }

    #[test]
    fn test_horner() {
        // 2 + 3t + t^2 at t = 2
        assert!((evaluate_polynomial(&[2.0, 3.0, 1.0], 2.0) - 12.0).abs() < 1e-15);
        assert_eq!(monomials(3.0, 3), vec![1.0, 3.0, 9.0, 27.0]);
    }
}

//! Local-polynomial smoothing: kernel design and fixed-kernel filtering

pub mod design;
pub mod fir;
pub mod savgol;

pub use design::{WindowParams, design_savgol_kernel, fit_polynomial, evaluate_polynomial};
pub use fir::FirFilter;
pub use savgol::{SavitzkyGolayFilter, savgol_filter};

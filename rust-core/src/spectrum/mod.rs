//! Spectral analysis with FFT

pub mod fft;
pub mod windowing;
pub mod analysis;

pub use fft::{FftEngine, frequency_axis};
pub use windowing::{WindowType, apply_window};
pub use analysis::{AnalyzerConfig, Spectrum, SpectrumAnalyzer, spectrum};

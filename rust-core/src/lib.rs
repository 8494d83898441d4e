//! Weather Signal - Smoothing and Spectral Analysis Core
//!
//! Local-polynomial smoothing of hourly weather channels and the frequency
//! spectrum of the temperature series, with the data source, statistics and
//! report layers kept as separate collaborators.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod error;
pub mod series;
pub mod filters;
pub mod spectrum;
pub mod stats;
pub mod config;
pub mod source;
pub mod pipeline;
pub mod report;

#[cfg(feature = "python")]
pub mod python_bindings;

pub use error::SignalError;
pub use filters::{SavitzkyGolayFilter, WindowParams, savgol_filter};
pub use spectrum::{Spectrum, SpectrumAnalyzer, spectrum};
pub use series::{Channel, WeatherSeries};
pub use pipeline::{ConditionedWeather, ConditioningPipeline};

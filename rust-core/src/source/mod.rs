//! Data-source collaborators supplying the raw hourly series
//!
//! Sources hand over a complete, gap-free `WeatherSeries`; the numeric core
//! never talks to the network itself.

pub mod open_meteo;

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::error::SignalError;
use crate::series::WeatherSeries;

pub use open_meteo::{parse_forecast, OpenMeteoClient};

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode forecast JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid timestamp '{0}'")]
    Timestamp(String),

    #[error("Timeline is not hourly between index {0} and {}", .0 + 1)]
    IrregularSpacing(usize),

    #[error("Missing {channel} value at index {index}")]
    Gap { channel: &'static str, index: usize },

    #[error(transparent)]
    Series(#[from] SignalError),
}

/// Anything that can supply the three hourly channels
pub trait WeatherSource {
    fn fetch(&self) -> Result<WeatherSeries, SourceError>;
}

/// Reads a previously saved forecast response from disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl WeatherSource for JsonFileSource {
    fn fetch(&self) -> Result<WeatherSeries, SourceError> {
        debug!(path = %self.path.display(), "Reading saved forecast");
        let body = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_forecast(&body)
    }
}

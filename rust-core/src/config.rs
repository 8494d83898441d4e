//! Pipeline configuration loaded from TOML
//!
//! ## Loading Order
//!
//! 1. `WEATHER_SIGNAL_CONFIG` environment variable (path to TOML file)
//! 2. `weather_signal.toml` in the current working directory
//! 3. Built-in defaults (window 11, polynomial order 2, hourly spacing, Berlin)
//!
//! Every section and field is optional in the file; missing values fall back
//! to the defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::filters::WindowParams;
use crate::spectrum::{AnalyzerConfig, WindowType};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "WEATHER_SIGNAL_CONFIG";

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "weather_signal.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Smoothing engine settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    pub window_length: usize,
    pub polyorder: usize,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        let params = WindowParams::default();
        Self {
            window_length: params.window_length,
            polyorder: params.polyorder,
        }
    }
}

/// Spectral analyzer settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectrumConfig {
    /// Hours between consecutive samples
    pub sample_spacing_hours: f64,
    pub taper: WindowType,
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            sample_spacing_hours: 1.0,
            taper: WindowType::Rectangular,
        }
    }
}

impl SpectrumConfig {
    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            sample_spacing: self.sample_spacing_hours,
            taper: self.taper,
        }
    }
}

/// Forecast API settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.open-meteo.com/v1/forecast".to_string(),
            latitude: 52.52,
            longitude: 13.41,
        }
    }
}

/// Full pipeline configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub smoothing: SmoothingConfig,
    pub spectrum: SpectrumConfig,
    pub source: SourceConfig,
}

impl PipelineConfig {
    /// Load using the documented lookup order
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            info!(path = %path, "Loading config from {}", CONFIG_ENV_VAR);
            return Self::from_file(path);
        }

        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            info!(path = %local.display(), "Loading config from working directory");
            return Self::from_file(local);
        }

        info!("No config file found, using built-in defaults");
        Ok(Self::default())
    }

    /// Load and validate one TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Check parameter constraints that do not depend on the data
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.window_params()?;

        self.spectrum
            .analyzer_config()
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if !(-90.0..=90.0).contains(&self.source.latitude)
            || !(-180.0..=180.0).contains(&self.source.longitude)
        {
            return Err(ConfigError::Invalid(format!(
                "coordinates out of range ({}, {})",
                self.source.latitude, self.source.longitude
            )));
        }

        if self.smoothing.window_length > 24 * 16 {
            warn!(
                window_length = self.smoothing.window_length,
                "Window spans more than the 16-day forecast horizon"
            );
        }

        Ok(())
    }

    /// Validated smoothing window parameters
    pub fn window_params(&self) -> Result<WindowParams, ConfigError> {
        WindowParams::new(self.smoothing.window_length, self.smoothing.polyorder)
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

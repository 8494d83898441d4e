//! Signal-conditioning pipeline
//!
//! Smooths each channel independently and computes the temperature spectrum.
//! Either every output is produced or the run fails as a whole.

use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::error::{Result, SignalError};
use crate::filters::{SavitzkyGolayFilter, WindowParams};
use crate::series::{Channel, WeatherSeries};
use crate::spectrum::{Spectrum, SpectrumAnalyzer};

/// Pipeline outputs handed to the presentation layer
#[derive(Debug, Clone)]
pub struct ConditionedWeather {
    pub temperature: Vec<f64>,
    pub humidity: Vec<f64>,
    pub wind_speed: Vec<f64>,
    pub temperature_spectrum: Spectrum,
}

impl ConditionedWeather {
    /// Smoothed samples of one channel
    pub fn smoothed(&self, channel: Channel) -> &[f64] {
        match channel {
            Channel::Temperature => &self.temperature,
            Channel::Humidity => &self.humidity,
            Channel::WindSpeed => &self.wind_speed,
        }
    }
}

/// Smoothing engine + spectral analyzer configured once, run per series
pub struct ConditioningPipeline {
    filter: SavitzkyGolayFilter,
    analyzer: SpectrumAnalyzer,
}

impl ConditioningPipeline {
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        let params = WindowParams::new(config.smoothing.window_length, config.smoothing.polyorder)?;

        Ok(Self {
            filter: SavitzkyGolayFilter::new(params)?,
            analyzer: SpectrumAnalyzer::new(config.spectrum.analyzer_config())?,
        })
    }

    /// Condition all three channels
    pub fn run(&self, series: &WeatherSeries) -> Result<ConditionedWeather> {
        let params = self.filter.params();
        info!(
            samples = series.len(),
            window_length = params.window_length,
            polyorder = params.polyorder,
            "Conditioning weather series"
        );

        // Channels are independent; each call owns its output
        let smoothed = Channel::ALL
            .par_iter()
            .map(|&channel| {
                debug!(channel = channel.label(), "Smoothing channel");
                self.filter.smooth(series.channel(channel))
            })
            .collect::<Result<Vec<Vec<f64>>>>()?;

        let temperature_spectrum = self.analyzer.analyze(&series.temperature)?;
        if let Some(period) = temperature_spectrum.dominant_period() {
            debug!(period_hours = period, "Dominant temperature period");
        }

        // Order follows Channel::ALL
        let [temperature, humidity, wind_speed]: [Vec<f64>; 3] =
            smoothed.try_into().map_err(|_| {
                SignalError::InvalidInput("channel count changed during smoothing".into())
            })?;

        Ok(ConditionedWeather {
            temperature,
            humidity,
            wind_speed,
            temperature_spectrum,
        })
    }
}

//! Sample series contract shared by the smoothing engine and spectral analyzer
//!
//! Holds the three hourly weather channels on a common timeline.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SignalError};

/// Measured weather channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Temperature,
    Humidity,
    WindSpeed,
}

impl Channel {
    /// All channels in reporting order
    pub const ALL: [Channel; 3] = [Channel::Temperature, Channel::Humidity, Channel::WindSpeed];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Channel::Temperature => "Temperature",
            Channel::Humidity => "Humidity",
            Channel::WindSpeed => "Wind Speed",
        }
    }

    /// Measurement unit as reported by the forecast API
    pub fn unit(&self) -> &'static str {
        match self {
            Channel::Temperature => "°C",
            Channel::Humidity => "%",
            Channel::WindSpeed => "km/h",
        }
    }
}

/// Three equal-length hourly series on one timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSeries {
    pub times: Vec<NaiveDateTime>,
    pub temperature: Vec<f64>,
    pub humidity: Vec<f64>,
    pub wind_speed: Vec<f64>,
}

impl WeatherSeries {
    /// Build a series, checking that every channel shares the timeline length
    pub fn new(
        times: Vec<NaiveDateTime>,
        temperature: Vec<f64>,
        humidity: Vec<f64>,
        wind_speed: Vec<f64>,
    ) -> Result<Self> {
        let n = times.len();
        for (channel, len) in [
            (Channel::Temperature, temperature.len()),
            (Channel::Humidity, humidity.len()),
            (Channel::WindSpeed, wind_speed.len()),
        ] {
            if len != n {
                return Err(SignalError::InvalidInput(format!(
                    "{} has {} samples but the timeline has {}",
                    channel.label(),
                    len,
                    n
                )));
            }
        }

        Ok(Self {
            times,
            temperature,
            humidity,
            wind_speed,
        })
    }

    /// Samples of one channel
    pub fn channel(&self, channel: Channel) -> &[f64] {
        match channel {
            Channel::Temperature => &self.temperature,
            Channel::Humidity => &self.humidity,
            Channel::WindSpeed => &self.wind_speed,
        }
    }

    /// Number of time steps
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

/// Reject empty series and non-finite samples
pub fn validate_samples(x: &[f64]) -> Result<()> {
    if x.is_empty() {
        return Err(SignalError::InvalidInput("sample series is empty".into()));
    }

    if let Some((idx, value)) = x.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(SignalError::InvalidInput(format!(
            "non-finite sample {} at index {}",
            value, idx
        )));
    }

    Ok(())
}

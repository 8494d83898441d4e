//! Open-Meteo hourly forecast client
//!
//! Requests temperature, relative humidity and wind speed for one location and
//! decodes the `hourly` block into a `WeatherSeries`.

use chrono::{Duration, NaiveDateTime};
use serde::Deserialize;
use tracing::{debug, info};

use super::{SourceError, WeatherSource};
use crate::config::SourceConfig;
use crate::series::{Channel, WeatherSeries};

/// Hourly variables requested from the API
pub const HOURLY_FIELDS: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: HourlyBlock,
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    time: Vec<String>,
    temperature_2m: Vec<Option<f64>>,
    relative_humidity_2m: Vec<Option<f64>>,
    wind_speed_10m: Vec<Option<f64>>,
}

/// Blocking Open-Meteo client
pub struct OpenMeteoClient {
    client: reqwest::blocking::Client,
    config: SourceConfig,
}

impl OpenMeteoClient {
    pub fn new(config: SourceConfig) -> Result<Self, SourceError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("weather-signal/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, config })
    }
}

impl WeatherSource for OpenMeteoClient {
    fn fetch(&self) -> Result<WeatherSeries, SourceError> {
        info!(
            url = %self.config.base_url,
            latitude = self.config.latitude,
            longitude = self.config.longitude,
            "Fetching hourly forecast"
        );

        let body = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("latitude", self.config.latitude.to_string()),
                ("longitude", self.config.longitude.to_string()),
                ("hourly", HOURLY_FIELDS.to_string()),
            ])
            .send()?
            .error_for_status()?
            .text()?;

        let series = parse_forecast(&body)?;
        debug!(samples = series.len(), "Forecast decoded");
        Ok(series)
    }
}

fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, SourceError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| SourceError::Timestamp(raw.to_string()))
}

/// Replace Option samples with values, failing on the first null
fn fill(channel: Channel, raw: Vec<Option<f64>>) -> Result<Vec<f64>, SourceError> {
    raw.into_iter()
        .enumerate()
        .map(|(index, v)| {
            v.ok_or(SourceError::Gap {
                channel: channel.label(),
                index,
            })
        })
        .collect()
}

/// Decode a forecast response body
///
/// Rejects null samples, unparsable timestamps, channels whose length differs
/// from the timeline, and timelines that are not strictly hourly.
pub fn parse_forecast(body: &str) -> Result<WeatherSeries, SourceError> {
    let response: ForecastResponse = serde_json::from_str(body)?;
    let hourly = response.hourly;

    let times = hourly
        .time
        .iter()
        .map(|t| parse_timestamp(t))
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(index) = times
        .windows(2)
        .position(|pair| pair[1] - pair[0] != Duration::hours(1))
    {
        return Err(SourceError::IrregularSpacing(index));
    }

    let series = WeatherSeries::new(
        times,
        fill(Channel::Temperature, hourly.temperature_2m)?,
        fill(Channel::Humidity, hourly.relative_humidity_2m)?,
        fill(Channel::WindSpeed, hourly.wind_speed_10m)?,
    )?;

    Ok(series)
}

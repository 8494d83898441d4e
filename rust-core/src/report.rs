//! Text and CSV output for external plotting
//!
//! Rendering lives outside the core; this module only lays the arrays out as a
//! summary table and CSV files that a plotting tool can read.

use std::io::{self, Write};

use crate::error::Result;
use crate::pipeline::ConditionedWeather;
use crate::series::{Channel, WeatherSeries};
use crate::spectrum::Spectrum;
use crate::stats::{monthly_means, SummaryStats};

/// Side-by-side statistics table, one column per named series
pub fn summary_table(columns: &[(&str, SummaryStats)]) -> String {
    let rows: [(&str, fn(&SummaryStats) -> Option<f64>); 6] = [
        ("Max", |s| Some(s.max)),
        ("Min", |s| Some(s.min)),
        ("Range", |s| Some(s.range)),
        ("Mean", |s| Some(s.mean)),
        ("Median", |s| Some(s.median)),
        ("Mode", |s| s.mode),
    ];

    let width = columns.iter().map(|(name, _)| name.len()).max().unwrap_or(0).max(10);

    let mut out = format!("{:<8}", "");
    for (name, _) in columns {
        out.push_str(&format!(" {:>width$}", name, width = width));
    }
    out.push('\n');

    for (label, get) in rows {
        out.push_str(&format!("{:<8}", label));
        for (_, stats) in columns {
            let cell = match get(stats) {
                Some(v) => format!("{:.2}", v),
                None => "-".to_string(),
            };
            out.push_str(&format!(" {:>width$}", cell, width = width));
        }
        out.push('\n');
    }

    out
}

/// Monthly means of temperature and wind speed, keyed by (year, month)
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyClimate {
    pub month: (i32, u32),
    pub temperature: f64,
    pub wind_speed: f64,
}

/// Temperature and wind-speed means per calendar month of the raw series
pub fn monthly_climate(series: &WeatherSeries) -> Result<Vec<MonthlyClimate>> {
    let temperature = monthly_means(&series.times, &series.temperature)?;
    let wind_speed = monthly_means(&series.times, &series.wind_speed)?;

    // Both channels share the timeline, so the month keys line up
    Ok(temperature
        .into_iter()
        .zip(wind_speed)
        .map(|((month, t), (_, w))| MonthlyClimate {
            month,
            temperature: t,
            wind_speed: w,
        })
        .collect())
}

/// One row per month: month, mean temperature, mean wind speed
pub fn write_monthly_csv<W: Write>(writer: &mut W, months: &[MonthlyClimate]) -> io::Result<()> {
    writeln!(writer, "month,temperature_mean,wind_speed_mean")?;
    for m in months {
        let (year, month) = m.month;
        writeln!(writer, "{:04}-{:02},{},{}", year, month, m.temperature, m.wind_speed)?;
    }
    Ok(())
}

/// Raw and smoothed samples per timestamp
pub fn write_series_csv<W: Write>(
    writer: &mut W,
    series: &WeatherSeries,
    conditioned: &ConditionedWeather,
) -> io::Result<()> {
    write!(writer, "time")?;
    for channel in Channel::ALL {
        let key = channel.label().to_lowercase().replace(' ', "_");
        write!(writer, ",{key},{key}_smooth")?;
    }
    writeln!(writer)?;

    for (i, t) in series.times.iter().enumerate() {
        write!(writer, "{}", t.format("%Y-%m-%dT%H:%M"))?;
        for channel in Channel::ALL {
            write!(
                writer,
                ",{},{}",
                series.channel(channel)[i],
                conditioned.smoothed(channel)[i]
            )?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

/// One row per bin: frequency, real, imaginary, magnitude, phase
pub fn write_spectrum_csv<W: Write>(writer: &mut W, spectrum: &Spectrum) -> io::Result<()> {
    writeln!(writer, "frequency,re,im,magnitude,phase")?;
    let magnitude = spectrum.magnitude();
    let phase = spectrum.phase();
    for (k, (f, c)) in spectrum.frequencies.iter().zip(spectrum.bins.iter()).enumerate() {
        writeln!(writer, "{},{},{},{},{}", f, c.re, c.im, magnitude[k], phase[k])?;
    }
    Ok(())
}

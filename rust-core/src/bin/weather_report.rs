//! Weather report: fetch, condition and summarise an hourly forecast.
//!
//! Usage:
//!   cargo run --bin weather-report -- --out-dir out
//!   cargo run --bin weather-report -- --input forecast.json --window-length 25 --polyorder 3

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use weather_signal::config::PipelineConfig;
use weather_signal::report::{
    monthly_climate, summary_table, write_monthly_csv, write_series_csv, write_spectrum_csv,
};
use weather_signal::series::Channel;
use weather_signal::source::{JsonFileSource, OpenMeteoClient, WeatherSource};
use weather_signal::spectrum::WindowType;
use weather_signal::stats::{daily_ranges, describe};
use weather_signal::ConditioningPipeline;

/// Smooth hourly weather channels and analyse the temperature spectrum.
#[derive(Parser)]
#[command(name = "weather-report")]
struct Args {
    /// TOML config file (overrides WEATHER_SIGNAL_CONFIG and ./weather_signal.toml).
    #[arg(long, env = "WEATHER_SIGNAL_CONFIG")]
    config: Option<PathBuf>,

    /// Saved Open-Meteo response to read instead of fetching.
    #[arg(long)]
    input: Option<PathBuf>,

    #[arg(long, allow_hyphen_values = true)]
    latitude: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    longitude: Option<f64>,

    /// Points per local polynomial fit (odd).
    #[arg(long)]
    window_length: Option<usize>,

    /// Degree of the local polynomial.
    #[arg(long)]
    polyorder: Option<usize>,

    /// Optional taper before the FFT (rectangular, hann, hamming, blackman).
    #[arg(long)]
    taper: Option<WindowType>,

    /// Directory for series.csv, spectrum.csv and monthly.csv.
    #[arg(long, short, default_value = ".")]
    out_dir: PathBuf,
}

fn load_config(args: &Args) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_file(path)?,
        None => PipelineConfig::load()?,
    };

    if let Some(latitude) = args.latitude {
        config.source.latitude = latitude;
    }
    if let Some(longitude) = args.longitude {
        config.source.longitude = longitude;
    }
    if let Some(window_length) = args.window_length {
        config.smoothing.window_length = window_length;
    }
    if let Some(polyorder) = args.polyorder {
        config.smoothing.polyorder = polyorder;
    }
    if let Some(taper) = args.taper {
        config.spectrum.taper = taper;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let source: Box<dyn WeatherSource> = match &args.input {
        Some(path) => Box::new(JsonFileSource::new(path)),
        None => Box::new(OpenMeteoClient::new(config.source.clone())?),
    };
    let series = source.fetch().context("Failed to obtain weather series")?;
    info!(samples = series.len(), "Weather series loaded");

    let pipeline = ConditioningPipeline::new(&config)?;
    let conditioned = pipeline.run(&series)?;

    // Statistics on the raw series
    let temperature_stats = describe(&series.temperature)?;
    let wind_stats = describe(&series.wind_speed)?;

    println!();
    println!(
        "{}",
        summary_table(&[
            (Channel::Temperature.label(), temperature_stats),
            (Channel::WindSpeed.label(), wind_stats),
        ])
    );

    println!("Daily wind speed range ({}):", Channel::WindSpeed.unit());
    for (day, range) in daily_ranges(&series.times, &series.wind_speed)? {
        println!("  {}  {:>6.2}", day, range);
    }

    let months = monthly_climate(&series)?;
    println!();
    println!(
        "Monthly means ({}, {}):",
        Channel::Temperature.unit(),
        Channel::WindSpeed.unit()
    );
    for m in &months {
        let (year, month) = m.month;
        println!(
            "  {:04}-{:02}  {:>6.2}  {:>6.2}",
            year, month, m.temperature, m.wind_speed
        );
    }

    if let Some(period) = conditioned.temperature_spectrum.dominant_period() {
        println!();
        println!("Dominant temperature period: {:.1} h", period);
    }

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create {}", args.out_dir.display()))?;

    let series_path = args.out_dir.join("series.csv");
    let mut writer = BufWriter::new(
        File::create(&series_path)
            .with_context(|| format!("Failed to create {}", series_path.display()))?,
    );
    write_series_csv(&mut writer, &series, &conditioned)?;

    let spectrum_path = args.out_dir.join("spectrum.csv");
    let mut writer = BufWriter::new(
        File::create(&spectrum_path)
            .with_context(|| format!("Failed to create {}", spectrum_path.display()))?,
    );
    write_spectrum_csv(&mut writer, &conditioned.temperature_spectrum)?;

    let monthly_path = args.out_dir.join("monthly.csv");
    let mut writer = BufWriter::new(
        File::create(&monthly_path)
            .with_context(|| format!("Failed to create {}", monthly_path.display()))?,
    );
    write_monthly_csv(&mut writer, &months)?;

    info!(
        series = %series_path.display(),
        spectrum = %spectrum_path.display(),
        monthly = %monthly_path.display(),
        "Wrote CSV output"
    );

    Ok(())
}

//! End-to-end conditioning of a saved forecast, no network access

use std::f64::consts::PI;

use weather_signal::config::PipelineConfig;
use weather_signal::report::{monthly_climate, write_monthly_csv, write_spectrum_csv};
use weather_signal::source::{parse_forecast, JsonFileSource, WeatherSource};
use weather_signal::spectrum::FftEngine;
use weather_signal::{savgol_filter, spectrum, Channel, ConditioningPipeline, SignalError};

/// Seven days of hourly data in the Open-Meteo response layout
fn forecast_json(hours: usize) -> String {
    let start = chrono::NaiveDate::from_ymd_opt(2024, 10, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    let times: Vec<String> = (0..hours)
        .map(|h| {
            (start + chrono::Duration::hours(h as i64))
                .format("\"%Y-%m-%dT%H:%M\"")
                .to_string()
        })
        .collect();
    let series = |f: &dyn Fn(f64) -> f64| -> String {
        (0..hours)
            .map(|h| format!("{:.1}", f(h as f64)))
            .collect::<Vec<_>>()
            .join(",")
    };

    format!(
        r#"{{"latitude": 52.52, "longitude": 13.41, "hourly": {{
            "time": [{}],
            "temperature_2m": [{}],
            "relative_humidity_2m": [{}],
            "wind_speed_10m": [{}]
        }}}}"#,
        times.join(","),
        series(&|h| 11.0 + 4.0 * (2.0 * PI * (h - 9.0) / 24.0).sin() + 0.6 * (h * 1.3).sin()),
        series(&|h| 75.0 - 12.0 * (2.0 * PI * (h - 9.0) / 24.0).sin()),
        series(&|h| 9.0 + 2.5 * (h * 0.45).cos() + 1.5 * (h * 2.1).sin()),
    )
}

#[test]
fn test_saved_forecast_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("forecast.json");
    std::fs::write(&path, forecast_json(168)).unwrap();

    let series = JsonFileSource::new(&path).fetch().unwrap();
    let pipeline = ConditioningPipeline::new(&PipelineConfig::default()).unwrap();
    let conditioned = pipeline.run(&series).unwrap();

    for channel in Channel::ALL {
        let raw = series.channel(channel);
        let smooth = conditioned.smoothed(channel);
        assert_eq!(raw.len(), smooth.len());

        // Smoothing removes high-frequency energy
        let roughness = |x: &[f64]| x.windows(2).map(|w| (w[1] - w[0]).powi(2)).sum::<f64>();
        assert!(roughness(smooth) < roughness(raw), "{} not smoother", channel.label());
    }

    let spectrum = &conditioned.temperature_spectrum;
    assert_eq!(spectrum.len(), 168);
    assert!((spectrum.dominant_period().unwrap() - 24.0).abs() < 1e-9);

    let mut csv = Vec::new();
    write_spectrum_csv(&mut csv, spectrum).unwrap();
    assert_eq!(String::from_utf8(csv).unwrap().lines().count(), 169);
}

#[test]
fn test_monthly_view_across_month_boundary() {
    // 2024-10-01 00:00 plus 800 hours reaches 2024-11-03
    let series = parse_forecast(&forecast_json(800)).unwrap();
    let months = monthly_climate(&series).unwrap();

    assert_eq!(months.len(), 2);
    assert_eq!(months[0].month, (2024, 10));
    assert_eq!(months[1].month, (2024, 11));

    let october = 31 * 24;
    let mean = |x: &[f64]| x.iter().sum::<f64>() / x.len() as f64;
    assert!((months[0].temperature - mean(&series.temperature[..october])).abs() < 1e-9);
    assert!((months[1].wind_speed - mean(&series.wind_speed[october..])).abs() < 1e-9);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("monthly.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    write_monthly_csv(&mut file, &months).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "month,temperature_mean,wind_speed_mean");
    assert!(lines[1].starts_with("2024-10,") && lines[2].starts_with("2024-11,"));
}

#[test]
fn test_spectrum_properties_on_forecast() {
    let series = parse_forecast(&forecast_json(100)).unwrap();
    let x = &series.temperature;
    let result = spectrum(x, 1.0).unwrap();
    let n = x.len();

    let total: f64 = x.iter().sum();
    assert!((result.bins[0].re - total).abs() < 1e-8);

    for k in 1..n {
        assert!((result.bins[k] - result.bins[n - k].conj()).norm() < 1e-9);
    }

    let back = FftEngine::new(n).unwrap().inverse(&result.bins).unwrap();
    for (a, b) in x.iter().zip(back.iter()) {
        assert!((a - b).abs() < 1e-9);
    }
}

#[test]
fn test_error_scenarios() {
    let x: Vec<f64> = (0..20).map(|i| i as f64).collect();

    assert!(matches!(savgol_filter(&x, 10, 2), Err(SignalError::InvalidParameter(_))));
    assert!(matches!(savgol_filter(&x, 5, 5), Err(SignalError::InvalidParameter(_))));
    assert!(matches!(savgol_filter(&[], 11, 2), Err(SignalError::InvalidInput(_))));
    assert!(matches!(spectrum(&[], 1.0), Err(SignalError::InvalidInput(_))));
    assert!(matches!(spectrum(&[], 0.0), Err(SignalError::InvalidInput(_))));
}

//! Descriptive statistics over raw (unsmoothed) series
//!
//! Independent of the smoothing engine: these are computed on the data as
//! fetched, for the tabular summary and the daily/monthly views.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::error::{Result, SignalError};
use crate::series::validate_samples;

/// Summary statistics of one series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    pub max: f64,
    pub min: f64,
    /// max - min
    pub range: f64,
    pub mean: f64,
    pub median: f64,
    /// Most frequent value; None when every value occurs once
    pub mode: Option<f64>,
}

/// Compute summary statistics
pub fn describe(x: &[f64]) -> Result<SummaryStats> {
    validate_samples(x)?;

    let mut sorted = x.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let min = sorted[0];
    let max = sorted[n - 1];
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 1 {
        sorted[n / 2]
    } else {
        0.5 * (sorted[n / 2 - 1] + sorted[n / 2])
    };

    Ok(SummaryStats {
        max,
        min,
        range: max - min,
        mean,
        median,
        mode: mode(&sorted),
    })
}

/// Most frequent exact value, smallest value on ties
fn mode(x: &[f64]) -> Option<f64> {
    let mut counts: HashMap<u64, (f64, usize)> = HashMap::new();
    for &v in x {
        // -0.0 and 0.0 count as the same reading
        let v = if v == 0.0 { 0.0 } else { v };
        counts.entry(v.to_bits()).or_insert((v, 0)).1 += 1;
    }

    counts
        .into_values()
        .filter(|&(_, count)| count > 1)
        .max_by(|(va, ca), (vb, cb)| ca.cmp(cb).then_with(|| vb.total_cmp(va)))
        .map(|(v, _)| v)
}

fn check_aligned(times: &[NaiveDateTime], values: &[f64]) -> Result<()> {
    if times.len() != values.len() {
        return Err(SignalError::InvalidInput(format!(
            "{} timestamps for {} values",
            times.len(),
            values.len()
        )));
    }
    validate_samples(values)
}

/// Max - min per calendar day
pub fn daily_ranges(times: &[NaiveDateTime], values: &[f64]) -> Result<Vec<(NaiveDate, f64)>> {
    check_aligned(times, values)?;

    let mut days: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
    for (t, &v) in times.iter().zip(values.iter()) {
        let entry = days.entry(t.date()).or_insert((v, v));
        entry.0 = entry.0.min(v);
        entry.1 = entry.1.max(v);
    }

    Ok(days
        .into_iter()
        .map(|(day, (lo, hi))| (day, hi - lo))
        .collect())
}

/// Mean per calendar month, keyed by (year, month)
pub fn monthly_means(times: &[NaiveDateTime], values: &[f64]) -> Result<Vec<((i32, u32), f64)>> {
    check_aligned(times, values)?;

    let mut months: BTreeMap<(i32, u32), (f64, usize)> = BTreeMap::new();
    for (t, &v) in times.iter().zip(values.iter()) {
        let entry = months.entry((t.year(), t.month())).or_insert((0.0, 0));
        entry.0 += v;
        entry.1 += 1;
    }

    Ok(months
        .into_iter()
        .map(|(month, (sum, count))| (month, sum / count as f64))
        .collect())
}

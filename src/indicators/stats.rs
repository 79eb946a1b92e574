//! Descriptive statistics over price and return series

use super::MetricError;
use crate::provider::PriceSeries;
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::cmp::Ordering;

/// Minimum observations for a sample variance or covariance
pub const MIN_SAMPLE: usize = 2;

/// Simple return between two consecutive closes, keyed by the later date
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyReturn {
    pub date: NaiveDate,
    pub value: f64,
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let sum: Decimal = values.iter().sum();
    Some(sum / Decimal::from(values.len()))
}

/// Median, averaging the middle pair for even lengths
pub fn median(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort();

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / Decimal::TWO)
    } else {
        Some(sorted[mid])
    }
}

/// Day-over-day simple returns `close[t] / close[t-1] - 1`
///
/// The leading (undefined) return is dropped, so `n` closes yield `n - 1`
/// returns.
pub fn daily_returns(series: &PriceSeries) -> Result<Vec<DailyReturn>, MetricError> {
    series
        .points
        .windows(2)
        .map(|pair| {
            let prev = pair[0].close.to_f64().unwrap_or(0.0);
            let curr = pair[1].close.to_f64().unwrap_or(0.0);
            if prev == 0.0 {
                return Err(MetricError::undefined(format!(
                    "{} close on {}",
                    series.symbol, pair[0].date
                )));
            }
            Ok(DailyReturn {
                date: pair[1].date,
                value: curr / prev - 1.0,
            })
        })
        .collect()
}

/// Inner-join two date-ordered return series on date
pub fn align_returns(a: &[DailyReturn], b: &[DailyReturn]) -> (Vec<f64>, Vec<f64>) {
    let mut left = Vec::with_capacity(a.len().min(b.len()));
    let mut right = Vec::with_capacity(a.len().min(b.len()));

    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].date.cmp(&b[j].date) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                left.push(a[i].value);
                right.push(b[j].value);
                i += 1;
                j += 1;
            }
        }
    }

    (left, right)
}

/// Sample covariance (n - 1 denominator)
///
/// Single-pass co-moment update: a constant series contributes exactly zero,
/// and scaling one input by a power of two scales the result exactly.
pub fn sample_covariance(x: &[f64], y: &[f64]) -> Result<f64, MetricError> {
    let n = x.len().min(y.len());
    if n < MIN_SAMPLE {
        return Err(MetricError::InsufficientData {
            required: MIN_SAMPLE,
            actual: n,
        });
    }

    let (mut mean_x, mut mean_y, mut co_moment) = (0.0_f64, 0.0_f64, 0.0_f64);
    for (k, (&xi, &yi)) in x.iter().zip(y).enumerate() {
        let count = (k + 1) as f64;
        let dx = xi - mean_x;
        mean_x += dx / count;
        mean_y += (yi - mean_y) / count;
        co_moment += dx * (yi - mean_y);
    }

    Ok(co_moment / (n - 1) as f64)
}

/// Sample variance (n - 1 denominator)
pub fn sample_variance(values: &[f64]) -> Result<f64, MetricError> {
    sample_covariance(values, values)
}

/// Sample standard deviation
pub fn sample_std_dev(values: &[f64]) -> Result<f64, MetricError> {
    // Rounding can leave a tiny negative co-moment
    Ok(sample_variance(values)?.max(0.0).sqrt())
}

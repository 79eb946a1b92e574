//! Indicator types

use crate::provider::ProviderError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Indicator errors
///
/// Every variant is rendered as an unavailable readout; none of them ends a
/// session.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MetricError {
    /// Provider failed or returned an empty series
    #[error("data unavailable for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },
    /// Series too short for the statistic
    #[error("insufficient data: need {required} observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },
    /// Zero or missing denominator
    #[error("undefined ratio: {quantity} is zero or missing")]
    UndefinedRatio { quantity: String },
}

impl MetricError {
    pub fn unavailable(symbol: &str, reason: impl Into<String>) -> Self {
        MetricError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: reason.into(),
        }
    }

    pub fn undefined(quantity: impl Into<String>) -> Self {
        MetricError::UndefinedRatio {
            quantity: quantity.into(),
        }
    }

    /// Wrap a provider failure for `symbol`
    pub fn from_provider(symbol: &str, err: ProviderError) -> Self {
        Self::unavailable(symbol, err.to_string())
    }
}

/// 5-year price statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceStatistics {
    pub mean: Decimal,
    pub median: Decimal,
    /// Number of closes the statistics were computed from
    pub observations: usize,
}

/// 1-year risk and dividend metrics
///
/// Each readout depends on its own inputs only: a benchmark outage leaves
/// volatility and dividends intact, a dividend outage leaves beta intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    /// Cov(asset, benchmark) / Var(benchmark) of daily returns
    pub beta: Metric<f64>,
    /// Annualized standard deviation of daily returns
    pub volatility: Metric<f64>,
    /// Sum of the most recent dividend payments
    pub dividend_sum: Metric<Decimal>,
    /// `dividend_sum / latest price`
    pub dividend_yield: Metric<Decimal>,
}

/// A readout that is either computed or unavailable with a reason
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric<T> {
    Available(T),
    Unavailable(MetricError),
}

impl<T> Metric<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Metric::Available(v) => Some(v),
            Metric::Unavailable(_) => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Metric::Available(_))
    }

    /// Reason the readout is missing
    pub fn error(&self) -> Option<&MetricError> {
        match self {
            Metric::Available(_) => None,
            Metric::Unavailable(e) => Some(e),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Metric<U> {
        match self {
            Metric::Available(v) => Metric::Available(f(v)),
            Metric::Unavailable(e) => Metric::Unavailable(e),
        }
    }

    /// Derive a dependent readout, keeping the original reason when this one
    /// is unavailable
    pub fn and_then<U>(&self, f: impl FnOnce(&T) -> Result<U, MetricError>) -> Metric<U> {
        match self {
            Metric::Available(v) => f(v).into(),
            Metric::Unavailable(e) => Metric::Unavailable(e.clone()),
        }
    }
}

impl<T> From<Result<T, MetricError>> for Metric<T> {
    fn from(result: Result<T, MetricError>) -> Self {
        match result {
            Ok(v) => Metric::Available(v),
            Err(e) => Metric::Unavailable(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_metric_from_result() {
        let ok: Metric<i32> = Ok(5).into();
        assert_eq!(ok.value(), Some(&5));
        assert!(ok.is_available());

        let err: Metric<i32> = Err(MetricError::undefined("price")).into();
        assert!(err.value().is_none());
        assert!(!err.is_available());
    }

    #[test]
    fn test_metric_map() {
        let m = Metric::Available(dec!(2)).map(|v| v * dec!(3));
        assert_eq!(m, Metric::Available(dec!(6)));

        let e: Metric<Decimal> = Metric::Unavailable(MetricError::undefined("x"));
        assert!(!e.map(|v| v + dec!(1)).is_available());
    }

    #[test]
    fn test_metric_and_then_keeps_upstream_reason() {
        let sum = Metric::Available(dec!(3));
        let ceiling = sum.and_then(|s| Ok(*s / dec!(0.06)));
        assert_eq!(ceiling, Metric::Available(dec!(50)));

        let upstream = MetricError::unavailable("FOO", "HTTP 503: down");
        let missing: Metric<Decimal> = Metric::Unavailable(upstream.clone());
        let derived: Metric<Decimal> = missing.and_then(|s| Ok(*s));
        assert_eq!(derived.error(), Some(&upstream));
    }

    #[test]
    fn test_metric_error_display() {
        let err = MetricError::InsufficientData {
            required: 2,
            actual: 1,
        };
        assert_eq!(
            err.to_string(),
            "insufficient data: need 2 observations, got 1"
        );

        let err = MetricError::unavailable("FOO", "empty series");
        assert_eq!(err.to_string(), "data unavailable for FOO: empty series");
    }

    #[test]
    fn test_provider_error_becomes_data_unavailable() {
        let err = MetricError::from_provider(
            "FOO",
            ProviderError::Malformed("chart result is empty".to_string()),
        );
        assert!(matches!(err, MetricError::DataUnavailable { ref symbol, .. } if symbol == "FOO"));
    }

    #[test]
    fn test_metric_serializes_tagged() {
        let ok: Metric<u32> = Metric::Available(7);
        assert_eq!(serde_json::to_string(&ok).unwrap(), r#"{"available":7}"#);

        let err: Metric<u32> = Metric::Unavailable(MetricError::undefined("price"));
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["unavailable"]["kind"], "undefined_ratio");
        assert_eq!(json["unavailable"]["quantity"], "price");
    }
}

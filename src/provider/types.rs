//! Provider data types

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Requested history window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lookback {
    OneDay,
    OneYear,
    FiveYears,
    Max,
}

impl Lookback {
    /// Range string understood by the chart API
    pub fn as_range(&self) -> &'static str {
        match self {
            Lookback::OneDay => "1d",
            Lookback::OneYear => "1y",
            Lookback::FiveYears => "5y",
            Lookback::Max => "max",
        }
    }
}

impl std::fmt::Display for Lookback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_range())
    }
}

/// A single daily close
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: Decimal,
}

/// Daily closes ordered by date ascending
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: String,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series, sorting points by date
    pub fn new(symbol: impl Into<String>, mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        Self {
            symbol: symbol.into(),
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Closing prices in date order
    pub fn closes(&self) -> Vec<Decimal> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Most recent close
    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.last()
    }
}

/// A single dividend payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DividendPoint {
    pub date: NaiveDate,
    pub amount: Decimal,
}

/// Dividend payments ordered by date ascending
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DividendSeries {
    pub symbol: String,
    pub payments: Vec<DividendPoint>,
}

impl DividendSeries {
    /// Build a series, sorting payments by date
    pub fn new(symbol: impl Into<String>, mut payments: Vec<DividendPoint>) -> Self {
        payments.sort_by_key(|p| p.date);
        Self {
            symbol: symbol.into(),
            payments,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }

    /// Sum of the `count` most recent payments
    pub fn trailing_sum(&self, count: usize) -> Decimal {
        let start = self.payments.len().saturating_sub(count);
        self.payments[start..].iter().map(|p| p.amount).sum()
    }
}

/// Market data provider errors
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level failure (DNS, TLS, timeout, body decode)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-success HTTP status without a structured API error
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    /// Structured error reported by the API
    #[error("{code}: {description}")]
    Api { code: String, description: String },
    /// Response did not have the expected shape
    #[error("Malformed response: {0}")]
    Malformed(String),
    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

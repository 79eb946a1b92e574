//! Indicator module
//!
//! Price statistics, beta, volatility, dividend yield and fair value
//! heuristics for a single ticker

mod calculator;
pub mod risk;
pub mod stats;
mod types;
pub mod valuation;

pub use calculator::{AnalysisRequest, MetricCalculator};
pub use types::{Metric, MetricError, PriceStatistics, RiskMetrics};
pub use valuation::{DEFAULT_CEILING_YIELD, DEFAULT_GRAHAM_MULTIPLIER};

//! Per-ticker metric calculator
//!
//! Fetches the series one analysis needs and derives every readout. Each call
//! is independent: nothing is cached between invocations.

use super::risk::{annualized_volatility, beta};
use super::stats::{align_returns, daily_returns, mean, median, DailyReturn};
use super::valuation::{ceiling_price, dividend_yield, graham_fair_value};
use super::{Metric, MetricError, PriceStatistics, RiskMetrics};
use crate::config::IndicatorConfig;
use crate::provider::{Lookback, MarketDataProvider, PriceSeries};
use crate::report::TickerReport;
use chrono::Utc;
use rust_decimal::Decimal;

/// One analysis request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisRequest {
    pub ticker: String,
    /// Overrides the configured benchmark
    pub benchmark: Option<String>,
    /// Earnings per share for the Graham estimate
    pub eps: Option<Decimal>,
    /// Book value per share for the Graham estimate
    pub bvps: Option<Decimal>,
}

impl AnalysisRequest {
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            ..Default::default()
        }
    }

    pub fn with_benchmark(mut self, benchmark: impl Into<String>) -> Self {
        self.benchmark = Some(benchmark.into());
        self
    }

    pub fn with_fundamentals(mut self, eps: Decimal, bvps: Decimal) -> Self {
        self.eps = Some(eps);
        self.bvps = Some(bvps);
        self
    }
}

/// Derives price, risk and valuation metrics from a market data provider
pub struct MetricCalculator<P> {
    provider: P,
    config: IndicatorConfig,
}

impl<P: MarketDataProvider> MetricCalculator<P> {
    pub fn new(provider: P, config: IndicatorConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    async fn fetch_closes(
        &self,
        symbol: &str,
        lookback: Lookback,
    ) -> Result<PriceSeries, MetricError> {
        self.provider
            .daily_closes(symbol, lookback)
            .await
            .map_err(|e| {
                tracing::warn!(symbol, lookback = %lookback, error = %e, "Price fetch failed");
                MetricError::from_provider(symbol, e)
            })
    }

    /// Most recent close from a 1-day fetch
    ///
    /// `Ok(None)` when the provider returns no session.
    pub async fn latest_price(&self, ticker: &str) -> Result<Option<Decimal>, MetricError> {
        let series = self.fetch_closes(ticker, Lookback::OneDay).await?;
        Ok(series.latest().map(|p| p.close))
    }

    /// Mean and median of 5 years of daily closes
    pub async fn price_statistics(&self, ticker: &str) -> Result<PriceStatistics, MetricError> {
        let series = self.fetch_closes(ticker, Lookback::FiveYears).await?;
        let closes = series.closes();

        match (mean(&closes), median(&closes)) {
            (Some(mean), Some(median)) => Ok(PriceStatistics {
                mean,
                median,
                observations: closes.len(),
            }),
            _ => Err(MetricError::unavailable(ticker, "empty 5y price series")),
        }
    }

    /// Beta, volatility and trailing dividends over 1 year
    ///
    /// Each readout fails on its own: an unreachable benchmark only costs
    /// beta, missing dividend history only costs the dividend readouts.
    pub async fn risk_metrics(&self, ticker: &str, benchmark: &str) -> RiskMetrics {
        let latest = match self.latest_price(ticker).await {
            Ok(price) => price,
            Err(e) => {
                tracing::warn!(ticker, error = %e, "Latest price unavailable, skipping dividend yield");
                None
            }
        };
        self.risk_metrics_at(ticker, benchmark, latest).await
    }

    async fn risk_metrics_at(
        &self,
        ticker: &str,
        benchmark: &str,
        latest_price: Option<Decimal>,
    ) -> RiskMetrics {
        let asset_returns = self.one_year_returns(ticker).await;

        let volatility: Metric<f64> = match &asset_returns {
            Ok(returns) => {
                let values: Vec<f64> = returns.iter().map(|r| r.value).collect();
                annualized_volatility(&values, self.config.trading_days_per_year).into()
            }
            Err(e) => Metric::Unavailable(e.clone()),
        };

        let beta: Metric<f64> = match &asset_returns {
            Ok(returns) => self.beta_against(ticker, returns, benchmark).await.into(),
            Err(e) => Metric::Unavailable(e.clone()),
        };

        let dividend_sum: Metric<Decimal> = self.trailing_dividends(ticker).await.into();
        let dividend_yield = dividend_sum.and_then(|&sum| {
            dividend_yield(sum, latest_price).ok_or_else(|| MetricError::undefined("latest price"))
        });

        RiskMetrics {
            beta,
            volatility,
            dividend_sum,
            dividend_yield,
        }
    }

    async fn one_year_returns(&self, symbol: &str) -> Result<Vec<DailyReturn>, MetricError> {
        let series = self.fetch_closes(symbol, Lookback::OneYear).await?;
        daily_returns(&series)
    }

    async fn beta_against(
        &self,
        ticker: &str,
        asset_returns: &[DailyReturn],
        benchmark: &str,
    ) -> Result<f64, MetricError> {
        let index_returns = self.one_year_returns(benchmark).await?;
        let (aligned_asset, aligned_index) = align_returns(asset_returns, &index_returns);

        tracing::debug!(
            ticker,
            benchmark,
            asset_returns = asset_returns.len(),
            benchmark_returns = index_returns.len(),
            aligned = aligned_asset.len(),
            "Computed daily returns"
        );

        beta(&aligned_asset, &aligned_index)
    }

    async fn trailing_dividends(&self, ticker: &str) -> Result<Decimal, MetricError> {
        let dividends = self.provider.dividends(ticker).await.map_err(|e| {
            tracing::warn!(ticker, error = %e, "Dividend fetch failed");
            MetricError::from_provider(ticker, e)
        })?;
        Ok(dividends.trailing_sum(self.config.dividend_payments))
    }

    /// Trailing dividends divided by the configured ceiling yield
    pub fn ceiling_price(&self, dividend_sum: Decimal) -> Option<Decimal> {
        ceiling_price(dividend_sum, self.config.ceiling_yield)
    }

    /// Graham fair value with the configured multiplier
    pub fn graham_fair_value(&self, eps: Decimal, bvps: Decimal) -> Option<Decimal> {
        graham_fair_value(eps, bvps, self.config.graham_multiplier)
    }

    /// Run every metric for one request
    ///
    /// A failing section is reported as unavailable; the others are still
    /// computed.
    pub async fn analyze(&self, request: &AnalysisRequest) -> TickerReport {
        let ticker = request.ticker.as_str();
        let benchmark = request
            .benchmark
            .clone()
            .unwrap_or_else(|| self.config.benchmark.clone());

        tracing::info!(ticker, benchmark = %benchmark, "Analyzing ticker");

        let latest = self.latest_price(ticker).await;
        let current_price: Metric<Decimal> = match &latest {
            Ok(Some(price)) => Metric::Available(*price),
            Ok(None) => Metric::Unavailable(MetricError::unavailable(ticker, "no recent close")),
            Err(e) => Metric::Unavailable(e.clone()),
        };

        let price_statistics: Metric<PriceStatistics> = self.price_statistics(ticker).await.into();

        let risk = self
            .risk_metrics_at(ticker, &benchmark, latest.ok().flatten())
            .await;

        let ceiling = risk.dividend_sum.and_then(|&sum| {
            self.ceiling_price(sum)
                .ok_or_else(|| MetricError::undefined("trailing dividends"))
        });

        let graham = match (request.eps, request.bvps) {
            (Some(eps), Some(bvps)) => self.graham_fair_value(eps, bvps),
            _ => None,
        };

        TickerReport {
            ticker: request.ticker.clone(),
            benchmark,
            generated_at: Utc::now(),
            current_price,
            price_statistics,
            risk,
            ceiling_price: ceiling,
            graham_fair_value: graham,
        }
    }
}

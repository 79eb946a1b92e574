//! Yahoo Finance chart API client
//!
//! Daily closes and dividend events come from the v8 chart endpoint:
//! `GET /v8/finance/chart/{symbol}?range=5y&interval=1d&events=div`.
//! Timestamps are session opens in UTC; the exchange's `gmtoffset` from the
//! response metadata is applied before taking the calendar date.

use super::{
    DividendPoint, DividendSeries, Lookback, MarketDataProvider, PricePoint, PriceSeries,
    ProviderError,
};
use crate::config::ProviderConfig;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use reqwest::{Client, Url};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Yahoo Finance API base URL
pub const YAHOO_API_URL: &str = "https://query1.finance.yahoo.com";

/// Configuration for the Yahoo client
#[derive(Debug, Clone)]
pub struct YahooConfig {
    /// Base URL for the chart API
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User-Agent header; the API rejects requests without one
    pub user_agent: String,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: YAHOO_API_URL.to_string(),
            timeout: Duration::from_secs(10),
            user_agent: concat!("ticker-metrics/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl From<&ProviderConfig> for YahooConfig {
    fn from(config: &ProviderConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// Client for the Yahoo Finance chart API
pub struct YahooClient {
    base_url: Url,
    client: Client,
}

impl YahooClient {
    /// Create a client with default configuration
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_config(YahooConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: YahooConfig) -> Result<Self, ProviderError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ProviderError::ClientBuild(format!("invalid base URL {}: {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ProviderError::ClientBuild(format!(
                "base URL {} cannot carry a path",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| ProviderError::ClientBuild(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    /// Build the chart URL for a symbol
    fn chart_url(&self, symbol: &str) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in with_config
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v8", "finance", "chart", symbol]);
        }
        url
    }

    /// Fetch and decode one chart response
    async fn fetch_chart(
        &self,
        symbol: &str,
        range: &str,
        interval: &str,
    ) -> Result<ChartResult, ProviderError> {
        let url = self.chart_url(symbol);

        tracing::debug!(url = %url, range, interval, "Fetching chart");

        let response = self
            .client
            .get(url)
            .query(&[("range", range), ("interval", interval), ("events", "div")])
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        parse_chart(status, &body)
    }
}

#[async_trait]
impl MarketDataProvider for YahooClient {
    async fn daily_closes(
        &self,
        symbol: &str,
        lookback: Lookback,
    ) -> Result<PriceSeries, ProviderError> {
        let chart = self.fetch_chart(symbol, lookback.as_range(), "1d").await?;
        let series = chart.price_series(symbol)?;

        tracing::debug!(
            symbol,
            lookback = %lookback,
            points = series.len(),
            "Fetched daily closes"
        );

        Ok(series)
    }

    async fn dividends(&self, symbol: &str) -> Result<DividendSeries, ProviderError> {
        // Monthly bars keep the payload small; dividend events are unaffected
        let chart = self
            .fetch_chart(symbol, Lookback::Max.as_range(), "1mo")
            .await?;
        let series = chart.dividend_series(symbol)?;

        tracing::debug!(
            symbol,
            payments = series.payments.len(),
            "Fetched dividend history"
        );

        Ok(series)
    }
}

/// Decode a chart response body, mapping API and HTTP errors
fn parse_chart(status: u16, body: &str) -> Result<ChartResult, ProviderError> {
    let envelope: ChartEnvelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) if (200..300).contains(&status) => {
            return Err(ProviderError::Malformed(e.to_string()));
        }
        Err(_) => {
            return Err(ProviderError::Status {
                status,
                body: truncate(body, 256),
            });
        }
    };

    if let Some(error) = envelope.chart.error {
        return Err(ProviderError::Api {
            code: error.code,
            description: error.description.unwrap_or_default(),
        });
    }

    if !(200..300).contains(&status) {
        return Err(ProviderError::Status {
            status,
            body: truncate(body, 256),
        });
    }

    envelope
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| ProviderError::Malformed("chart result is empty".to_string()))
}

fn truncate(body: &str, max_chars: usize) -> String {
    body.chars().take(max_chars).collect()
}

/// Calendar date of a UTC timestamp shifted by the exchange offset
fn exchange_date(timestamp: i64, gmt_offset: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp + gmt_offset, 0).map(|dt| dt.date_naive())
}

/// Top-level chart response
#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: Option<String>,
}

/// One symbol's chart data
#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: ChartMeta,
    /// Absent when the range holds no sessions
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
    #[serde(default)]
    events: Option<Events>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    /// Null for sessions without a print
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct Events {
    /// Keyed by payment timestamp as a string
    #[serde(default)]
    dividends: HashMap<String, DividendEvent>,
}

#[derive(Debug, Deserialize)]
struct DividendEvent {
    amount: f64,
    date: i64,
}

impl ChartResult {
    fn price_series(&self, symbol: &str) -> Result<PriceSeries, ProviderError> {
        let closes = self
            .indicators
            .quote
            .first()
            .map(|q| q.close.as_slice())
            .unwrap_or_default();

        if closes.len() != self.timestamp.len() && !closes.is_empty() {
            return Err(ProviderError::Malformed(format!(
                "{} timestamps but {} closes",
                self.timestamp.len(),
                closes.len()
            )));
        }

        let mut points = Vec::with_capacity(closes.len());
        for (ts, close) in self.timestamp.iter().zip(closes) {
            let Some(close) = close else { continue };
            let date = exchange_date(*ts, self.meta.gmtoffset)
                .ok_or_else(|| ProviderError::Malformed(format!("bad timestamp {}", ts)))?;
            let close = Decimal::try_from(*close)
                .map_err(|e| ProviderError::Malformed(format!("bad close {}: {}", close, e)))?;
            points.push(PricePoint { date, close });
        }

        Ok(PriceSeries::new(symbol, points))
    }

    fn dividend_series(&self, symbol: &str) -> Result<DividendSeries, ProviderError> {
        let Some(events) = &self.events else {
            return Ok(DividendSeries::new(symbol, vec![]));
        };

        let payments = events
            .dividends
            .values()
            .map(|event| {
                let date = exchange_date(event.date, self.meta.gmtoffset).ok_or_else(|| {
                    ProviderError::Malformed(format!("bad dividend date {}", event.date))
                })?;
                let amount = Decimal::try_from(event.amount).map_err(|e| {
                    ProviderError::Malformed(format!("bad dividend {}: {}", event.amount, e))
                })?;
                Ok(DividendPoint { date, amount })
            })
            .collect::<Result<Vec<_>, ProviderError>>()?;

        Ok(DividendSeries::new(symbol, payments))
    }
}

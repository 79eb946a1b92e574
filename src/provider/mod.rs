//! Market data provider module
//!
//! Daily closing prices and dividend history for a symbol

mod types;
mod yahoo;

pub use types::{DividendPoint, DividendSeries, Lookback, PricePoint, PriceSeries, ProviderError};
pub use yahoo::{YahooClient, YahooConfig, YAHOO_API_URL};

use async_trait::async_trait;

/// Trait for market data provider implementations
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch daily closing prices for `symbol` over `lookback`
    async fn daily_closes(
        &self,
        symbol: &str,
        lookback: Lookback,
    ) -> Result<PriceSeries, ProviderError>;

    /// Fetch the full dividend payment history for `symbol`
    async fn dividends(&self, symbol: &str) -> Result<DividendSeries, ProviderError>;
}

#[async_trait]
impl<P: MarketDataProvider + ?Sized> MarketDataProvider for std::sync::Arc<P> {
    async fn daily_closes(
        &self,
        symbol: &str,
        lookback: Lookback,
    ) -> Result<PriceSeries, ProviderError> {
        (**self).daily_closes(symbol, lookback).await
    }

    async fn dividends(&self, symbol: &str) -> Result<DividendSeries, ProviderError> {
        (**self).dividends(symbol).await
    }
}

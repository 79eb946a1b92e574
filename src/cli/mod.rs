//! CLI interface for ticker-metrics
//!
//! Provides subcommands for:
//! - `analyze`: Compute every indicator for one ticker
//! - `interactive`: Read tickers from stdin, one report per line
//! - `graham`: Graham fair value from EPS and BVPS
//! - `config`: Show the effective configuration

mod analyze;
mod graham;
mod interactive;

pub use analyze::{AnalyzeArgs, OutputFormat};
pub use graham::GrahamArgs;
pub use interactive::{parse_query, InteractiveArgs, Query};

use crate::config::Config;
use crate::indicators::MetricCalculator;
use crate::provider::{YahooClient, YahooConfig};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ticker-metrics")]
#[command(about = "Price statistics, beta, volatility, dividend yield and fair value for a stock ticker")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,
}

/// Config file read when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute every indicator for one ticker
    Analyze(AnalyzeArgs),
    /// Read tickers from stdin and print a report for each
    Interactive(InteractiveArgs),
    /// Graham fair value from EPS and BVPS (no network)
    Graham(GrahamArgs),
    /// Show the effective configuration
    Config,
}

/// Trim and upper-case a ticker, `None` if blank
pub fn normalize_ticker(raw: &str) -> Option<String> {
    let ticker = raw.trim();
    if ticker.is_empty() {
        None
    } else {
        Some(ticker.to_uppercase())
    }
}

/// Calculator backed by the configured Yahoo endpoint
pub fn build_calculator(config: &Config) -> anyhow::Result<MetricCalculator<YahooClient>> {
    let client = YahooClient::with_config(YahooConfig::from(&config.provider))?;
    Ok(MetricCalculator::new(client, config.indicators.clone()))
}

//! Configuration types for ticker-metrics

use crate::indicators::{DEFAULT_CEILING_YIELD, DEFAULT_GRAHAM_MULTIPLIER};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub indicators: IndicatorConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Market data provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Base URL of the chart API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    crate::provider::YAHOO_API_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_user_agent() -> String {
    concat!("ticker-metrics/", env!("CARGO_PKG_VERSION")).to_string()
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Indicator constants
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndicatorConfig {
    /// Benchmark index used for beta
    #[serde(default = "default_benchmark")]
    pub benchmark: String,

    /// Trading days per year, used to annualize volatility
    #[serde(default = "default_trading_days")]
    pub trading_days_per_year: u32,

    /// Number of most recent dividend payments summed as "trailing" dividends
    #[serde(default = "default_dividend_payments")]
    pub dividend_payments: usize,

    /// Fixed yield implied by the ceiling price
    #[serde(default = "default_ceiling_yield")]
    pub ceiling_yield: Decimal,

    /// Graham fair value constant
    #[serde(default = "default_graham_multiplier")]
    pub graham_multiplier: Decimal,
}

fn default_benchmark() -> String {
    "^BVSP".to_string()
}
fn default_trading_days() -> u32 {
    252
}
fn default_dividend_payments() -> usize {
    252
}
fn default_ceiling_yield() -> Decimal {
    DEFAULT_CEILING_YIELD
}
fn default_graham_multiplier() -> Decimal {
    DEFAULT_GRAHAM_MULTIPLIER
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            benchmark: default_benchmark(),
            trading_days_per_year: 252,
            dividend_payments: 252,
            ceiling_yield: DEFAULT_CEILING_YIELD,
            graham_multiplier: DEFAULT_GRAHAM_MULTIPLIER,
        }
    }
}

/// Report rendering configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Prefix for currency readouts
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "R$".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            [provider]
            base_url = "http://localhost:8080"
            timeout_secs = 3
            user_agent = "test-agent"

            [indicators]
            benchmark = "^GSPC"
            trading_days_per_year = 250
            dividend_payments = 4
            ceiling_yield = 0.05
            graham_multiplier = 22.5

            [display]
            currency = "$"

            [telemetry]
            log_level = "debug"
            log_format = "json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.provider.base_url, "http://localhost:8080");
        assert_eq!(config.provider.timeout(), Duration::from_secs(3));
        assert_eq!(config.indicators.benchmark, "^GSPC");
        assert_eq!(config.indicators.trading_days_per_year, 250);
        assert_eq!(config.indicators.dividend_payments, 4);
        assert_eq!(config.indicators.ceiling_yield, dec!(0.05));
        assert_eq!(config.display.currency, "$");
        assert_eq!(config.telemetry.log_format, LogFormat::Json);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.indicators.benchmark, "^BVSP");
        assert_eq!(config.indicators.trading_days_per_year, 252);
        assert_eq!(config.indicators.dividend_payments, 252);
        assert_eq!(config.indicators.ceiling_yield, dec!(0.06));
        assert_eq!(config.indicators.graham_multiplier, dec!(22.5));
        assert_eq!(config.display.currency, "R$");
        assert_eq!(config.telemetry.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_partial_section_fills_defaults() {
        let toml = r#"
            [indicators]
            benchmark = "^GSPC"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.indicators.benchmark, "^GSPC");
        assert_eq!(config.indicators.ceiling_yield, dec!(0.06));
        assert_eq!(config.provider.timeout_secs, 10);
    }

    #[test]
    fn test_serde_defaults_match_default_impl() {
        let parsed: IndicatorConfig = toml::from_str("").unwrap();
        let built = IndicatorConfig::default();
        assert_eq!(parsed.benchmark, built.benchmark);
        assert_eq!(parsed.trading_days_per_year, built.trading_days_per_year);
        assert_eq!(parsed.dividend_payments, built.dividend_payments);
        assert_eq!(parsed.ceiling_yield, built.ceiling_yield);
        assert_eq!(parsed.graham_multiplier, built.graham_multiplier);
    }

    #[test]
    fn test_config_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[display]\ncurrency = \"US$\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.display.currency, "US$");
    }

    #[test]
    fn test_config_load_nonexistent() {
        let result = Config::load("/nonexistent/path/config.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_log_format_rejected() {
        let result: Result<Config, _> = toml::from_str("[telemetry]\nlog_format = \"xml\"");
        assert!(result.is_err());
    }
}

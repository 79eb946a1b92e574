//! Configuration integration tests

use rust_decimal_macros::dec;
use ticker_metrics::config::{Config, LogFormat};

#[test]
fn test_config_example_parses() {
    let config: Config = toml::from_str(include_str!("../config.toml.example")).unwrap();
    assert_eq!(config.provider.base_url, "https://query1.finance.yahoo.com");
    assert_eq!(config.indicators.benchmark, "^BVSP");
    assert_eq!(config.indicators.trading_days_per_year, 252);
    assert_eq!(config.indicators.dividend_payments, 252);
    assert_eq!(config.indicators.ceiling_yield, dec!(0.06));
    assert_eq!(config.indicators.graham_multiplier, dec!(22.5));
    assert_eq!(config.display.currency, "R$");
    assert_eq!(config.telemetry.log_format, LogFormat::Pretty);
}

#[test]
fn test_config_round_trips_through_toml() {
    let config: Config = toml::from_str(include_str!("../config.toml.example")).unwrap();
    let rendered = toml::to_string_pretty(&config).unwrap();
    let reparsed: Config = toml::from_str(&rendered).unwrap();
    assert_eq!(reparsed.indicators.ceiling_yield, config.indicators.ceiling_yield);
    assert_eq!(reparsed.provider.timeout_secs, config.provider.timeout_secs);
}

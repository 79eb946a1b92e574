//! Analyze command implementation

use super::{build_calculator, normalize_ticker};
use crate::config::Config;
use crate::indicators::AnalysisRequest;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Ticker symbol (e.g. PETR4.SA)
    pub ticker: String,

    /// Benchmark index for beta (defaults to the configured benchmark)
    #[arg(short, long)]
    pub benchmark: Option<String>,

    /// Earnings per share, enables the Graham estimate
    #[arg(long, requires = "bvps", allow_negative_numbers = true)]
    pub eps: Option<Decimal>,

    /// Book value per share, enables the Graham estimate
    #[arg(long, requires = "eps", allow_negative_numbers = true)]
    pub bvps: Option<Decimal>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl AnalyzeArgs {
    /// Build the calculator request from the arguments
    pub fn request(&self) -> anyhow::Result<AnalysisRequest> {
        let ticker = normalize_ticker(&self.ticker)
            .ok_or_else(|| anyhow::anyhow!("Ticker must not be empty"))?;

        Ok(AnalysisRequest {
            ticker,
            benchmark: self.benchmark.as_deref().and_then(normalize_ticker),
            eps: self.eps,
            bvps: self.bvps,
        })
    }

    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let request = self.request()?;
        let calculator = build_calculator(config)?;

        let report = calculator.analyze(&request).await;

        match self.format {
            OutputFormat::Table => print!("{}", report.format_table(&config.display.currency)),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn args(ticker: &str) -> AnalyzeArgs {
        AnalyzeArgs {
            ticker: ticker.to_string(),
            benchmark: Some(" ^gspc ".to_string()),
            eps: Some(dec!(1.5)),
            bvps: Some(dec!(12)),
            format: OutputFormat::Table,
        }
    }

    #[test]
    fn test_request_normalizes_symbols() {
        let request = args(" itub4.sa").request().unwrap();
        assert_eq!(request.ticker, "ITUB4.SA");
        assert_eq!(request.benchmark.as_deref(), Some("^GSPC"));
        assert_eq!(request.eps, Some(dec!(1.5)));
        assert_eq!(request.bvps, Some(dec!(12)));
    }

    #[test]
    fn test_request_rejects_blank_ticker() {
        assert!(args("  ").request().is_err());
    }
}

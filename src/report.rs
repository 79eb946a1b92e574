//! Ticker report and terminal rendering

use crate::indicators::{Metric, PriceStatistics, RiskMetrics};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Readout shown for anything that could not be computed
pub const NOT_AVAILABLE: &str = "N/A";

/// Every readout for one analyzed ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerReport {
    pub ticker: String,
    pub benchmark: String,
    pub generated_at: DateTime<Utc>,
    pub current_price: Metric<Decimal>,
    pub price_statistics: Metric<PriceStatistics>,
    pub risk: RiskMetrics,
    pub ceiling_price: Metric<Decimal>,
    /// Only present when EPS and BVPS were both positive
    pub graham_fair_value: Option<Decimal>,
}

/// `R$ 12.34`
pub fn format_currency(currency: &str, value: Decimal) -> String {
    format!("{} {:.2}", currency, value)
}

/// `12.34%` from a fraction
pub fn format_percent(fraction: Decimal) -> String {
    format!("{:.2}%", fraction * dec!(100))
}

fn format_percent_f64(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

fn or_na(value: Option<String>) -> String {
    value.unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

impl TickerReport {
    /// Format as table for CLI output
    pub fn format_table(&self, currency: &str) -> String {
        let money = |v: Option<Decimal>| or_na(v.map(|v| format_currency(currency, v)));

        let stats = self.price_statistics.value();
        let risk = &self.risk;

        let mut out = format!(
            r#"
══════════════════════════════════════════════════════
 {} (benchmark {})
══════════════════════════════════════════════════════

PRICE
───────────────────────────────────────────────────────
Current Price:      {}
Mean (5y):          {}
Median (5y):        {}

RISK
───────────────────────────────────────────────────────
Beta (1y):          {}
Volatility (1y):    {}
Dividend Yield:     {}

DIVIDENDS
───────────────────────────────────────────────────────
Dividends (12m):    {}
Ceiling Price:      {}
"#,
            self.ticker,
            self.benchmark,
            money(self.current_price.value().copied()),
            money(stats.map(|s| s.mean)),
            money(stats.map(|s| s.median)),
            or_na(risk.beta.value().map(|b| format!("{:.2}", b))),
            or_na(risk.volatility.value().copied().map(format_percent_f64)),
            or_na(risk.dividend_yield.value().copied().map(format_percent)),
            money(risk.dividend_sum.value().copied()),
            money(self.ceiling_price.value().copied()),
        );

        if let Some(fair_value) = self.graham_fair_value {
            out.push_str(&format!(
                r#"
GRAHAM
───────────────────────────────────────────────────────
Fair Value:         {}
"#,
                format_currency(currency, fair_value)
            ));
        }

        let notes = self.unavailable_reasons();
        if !notes.is_empty() {
            out.push_str("\nNOTES\n───────────────────────────────────────────────────────\n");
            for note in notes {
                out.push_str(&format!("- {}\n", note));
            }
        }

        out.push_str("══════════════════════════════════════════════════════\n");
        out
    }

    /// Distinct reasons behind unavailable readouts, in display order
    pub fn unavailable_reasons(&self) -> Vec<String> {
        let errors = [
            unavailable(&self.current_price),
            unavailable(&self.price_statistics),
            unavailable(&self.risk.beta),
            unavailable(&self.risk.volatility),
            unavailable(&self.risk.dividend_yield),
            unavailable(&self.risk.dividend_sum),
            unavailable(&self.ceiling_price),
        ];

        let mut reasons: Vec<String> = Vec::new();
        for reason in errors.into_iter().flatten() {
            if !reasons.contains(&reason) {
                reasons.push(reason);
            }
        }
        reasons
    }
}

fn unavailable<T>(metric: &Metric<T>) -> Option<String> {
    metric.error().map(|e| e.to_string())
}

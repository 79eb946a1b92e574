//! Graham command implementation

use crate::config::Config;
use crate::indicators::valuation::graham_fair_value;
use crate::report::{format_currency, NOT_AVAILABLE};
use clap::Args;
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct GrahamArgs {
    /// Earnings per share
    #[arg(long, allow_negative_numbers = true)]
    pub eps: Decimal,

    /// Book value per share
    #[arg(long, allow_negative_numbers = true)]
    pub bvps: Decimal,
}

impl GrahamArgs {
    /// Rendered fair value line
    pub fn render(&self, config: &Config) -> String {
        let positive = self.eps > Decimal::ZERO && self.bvps > Decimal::ZERO;
        let reason = if positive {
            "result out of range"
        } else {
            "EPS and BVPS must both be positive"
        };

        match graham_fair_value(self.eps, self.bvps, config.indicators.graham_multiplier) {
            Some(value) => format!(
                "Graham Fair Value: {}",
                format_currency(&config.display.currency, value)
            ),
            None => format!("Graham Fair Value: {} ({})", NOT_AVAILABLE, reason),
        }
    }

    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        tracing::debug!(eps = %self.eps, bvps = %self.bvps, "Computing Graham fair value");
        println!("{}", self.render(config));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_render_value() {
        let args = GrahamArgs {
            eps: dec!(10),
            bvps: dec!(10),
        };
        assert_eq!(args.render(&Config::default()), "Graham Fair Value: R$ 47.43");
    }

    #[test]
    fn test_render_unavailable() {
        let args = GrahamArgs {
            eps: dec!(0),
            bvps: dec!(10),
        };
        assert_eq!(
            args.render(&Config::default()),
            "Graham Fair Value: N/A (EPS and BVPS must both be positive)"
        );
    }

    #[test]
    fn test_render_huge_inputs() {
        let huge = Decimal::from_i128_with_scale(4 * 10i128.pow(28), 0);
        let args = GrahamArgs {
            eps: huge,
            bvps: huge,
        };
        assert_eq!(
            args.render(&Config::default()),
            "Graham Fair Value: N/A (result out of range)"
        );

        let big = Decimal::from_i128_with_scale(10i128.pow(20), 0);
        let args = GrahamArgs {
            eps: big,
            bvps: big,
        };
        let line = args.render(&Config::default());
        assert!(line.starts_with("Graham Fair Value: R$ "));
        assert!(!line.contains("N/A"));
    }
}

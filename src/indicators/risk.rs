//! Beta and annualized volatility

use super::stats::{sample_covariance, sample_std_dev, sample_variance};
use super::MetricError;

/// Beta of asset returns against benchmark returns
///
/// `Cov(asset, benchmark) / Var(benchmark)`, both sample estimates. Inputs
/// must be aligned day by day.
pub fn beta(asset: &[f64], benchmark: &[f64]) -> Result<f64, MetricError> {
    let variance = sample_variance(benchmark)?;
    if variance == 0.0 || !variance.is_finite() {
        return Err(MetricError::undefined("benchmark variance"));
    }

    let beta = sample_covariance(asset, benchmark)? / variance;
    if !beta.is_finite() {
        return Err(MetricError::undefined("beta"));
    }
    Ok(beta)
}

/// Annualized volatility: `stdev(returns) * sqrt(trading_days_per_year)`
pub fn annualized_volatility(
    returns: &[f64],
    trading_days_per_year: u32,
) -> Result<f64, MetricError> {
    let volatility = sample_std_dev(returns)? * f64::from(trading_days_per_year).sqrt();
    if !volatility.is_finite() {
        return Err(MetricError::undefined("volatility"));
    }
    Ok(volatility)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn benchmark_returns() -> Vec<f64> {
        vec![0.012, -0.004, 0.0075, -0.0135, 0.002, 0.0091, -0.006, 0.0033]
    }

    #[test]
    fn test_beta_of_doubled_returns_is_two() {
        let bench = benchmark_returns();
        let asset: Vec<f64> = bench.iter().map(|r| r * 2.0).collect();
        assert_eq!(beta(&asset, &bench).unwrap(), 2.0);
    }

    #[test]
    fn test_beta_against_itself_is_one() {
        let bench = benchmark_returns();
        assert_eq!(beta(&bench, &bench).unwrap(), 1.0);
    }

    #[test]
    fn test_beta_negative_correlation() {
        let bench = benchmark_returns();
        let asset: Vec<f64> = bench.iter().map(|r| -r * 0.5).collect();
        assert!((beta(&asset, &bench).unwrap() + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_beta_flat_benchmark_undefined() {
        let bench = vec![0.001; 10];
        let asset = benchmark_returns();
        assert!(matches!(
            beta(&asset, &bench),
            Err(MetricError::UndefinedRatio { .. })
        ));
    }

    #[test]
    fn test_beta_insufficient_data() {
        assert!(matches!(
            beta(&[0.01], &[0.02]),
            Err(MetricError::InsufficientData { actual: 1, .. })
        ));
    }

    #[test]
    fn test_constant_returns_zero_volatility() {
        let returns = vec![0.0042; 251];
        assert_eq!(annualized_volatility(&returns, 252).unwrap(), 0.0);
    }

    #[test]
    fn test_volatility_annualization() {
        // stdev([0.01, -0.01]) = sqrt(0.0002)
        let vol = annualized_volatility(&[0.01, -0.01], 252).unwrap();
        let expected = 0.0002_f64.sqrt() * 252.0_f64.sqrt();
        assert!((vol - expected).abs() < 1e-12);
    }

    #[test]
    fn test_volatility_scales_with_trading_days() {
        let returns = benchmark_returns();
        let daily = annualized_volatility(&returns, 1).unwrap();
        let annual = annualized_volatility(&returns, 252).unwrap();
        assert!((annual / daily - 252.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_volatility_insufficient_data() {
        assert!(annualized_volatility(&[], 252).is_err());
    }
}

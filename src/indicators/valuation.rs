//! Dividend yield and fair value heuristics

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

/// Yield implied by the ceiling price (6%)
pub const DEFAULT_CEILING_YIELD: Decimal = dec!(0.06);

/// Graham constant: 15x earnings times 1.5x book
pub const DEFAULT_GRAHAM_MULTIPLIER: Decimal = dec!(22.5);

/// Trailing dividend yield, `None` without a positive price
pub fn dividend_yield(dividend_sum: Decimal, latest_price: Option<Decimal>) -> Option<Decimal> {
    match latest_price {
        Some(price) if price > Decimal::ZERO => Some(dividend_sum / price),
        _ => None,
    }
}

/// Price at which trailing dividends yield exactly `target_yield`
pub fn ceiling_price(dividend_sum: Decimal, target_yield: Decimal) -> Option<Decimal> {
    if dividend_sum <= Decimal::ZERO || target_yield <= Decimal::ZERO {
        return None;
    }
    Some(dividend_sum / target_yield)
}

/// Graham fair value `sqrt(multiplier * eps * bvps)`
///
/// `None` unless both EPS and BVPS are strictly positive.
pub fn graham_fair_value(eps: Decimal, bvps: Decimal, multiplier: Decimal) -> Option<Decimal> {
    if eps <= Decimal::ZERO || bvps <= Decimal::ZERO {
        return None;
    }
    match multiplier.checked_mul(eps).and_then(|v| v.checked_mul(bvps)) {
        Some(product) => product.sqrt(),
        // Product past Decimal::MAX; factor the root instead
        None => multiplier
            .sqrt()?
            .checked_mul(eps.sqrt()?)?
            .checked_mul(bvps.sqrt()?),
    }
}

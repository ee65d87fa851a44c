//! Fixed-precision arithmetic helpers shared by both scanners.
//!
//! All price/size/profit arithmetic goes through `Decimal` (28-digit
//! precision); `f64` is reserved for `confidence`, a bounded [0,1] scalar,
//! per spec.md §9.

use rust_decimal::{Decimal, RoundingStrategy};

/// `x * 10_000`, converting a ratio into basis points.
pub fn bps(x: Decimal) -> Decimal {
    x * Decimal::from(10_000)
}

/// Quantize `x` down to `step` using ROUND_DOWN (truncation toward zero).
/// A non-positive `step` is treated as "no quantization".
pub fn quantize_down(x: Decimal, step: Decimal) -> Decimal {
    if step <= Decimal::ZERO {
        return x;
    }
    let units = (x / step).round_dp_with_strategy(0, RoundingStrategy::ToZero);
    units * step
}

/// Quantize down to 1e-8, the venue step spec.md §4.2 uses for direct-arb qty.
pub fn quantize_qty(x: Decimal) -> Decimal {
    quantize_down(x, Decimal::new(1, 8))
}

/// `raw_bps - fee_buy_bps - fee_sell_bps - slippage_bps` (spec.md §4.2, §8
/// "fee additivity").
pub fn net_bps_direct(
    bid: Decimal,
    ask: Decimal,
    fee_buy_bps: u32,
    fee_sell_bps: u32,
    slippage_bps: Decimal,
) -> Decimal {
    let raw = bps((bid - ask) / ask);
    raw - Decimal::from(fee_buy_bps) - Decimal::from(fee_sell_bps) - slippage_bps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bps_converts_ratio() {
        assert_eq!(bps(Decimal::new(3, 3)), Decimal::from(30)); // 0.003 -> 30bps
    }

    #[test]
    fn quantize_down_truncates() {
        let x = Decimal::new(123_456_789, 8); // 1.23456789
        assert_eq!(quantize_qty(x), Decimal::new(123_456_789, 8));
        let y = Decimal::new(1_234_567_891, 9); // 1.234567891
        assert_eq!(quantize_qty(y), Decimal::new(123_456_789, 8));
    }

    #[test]
    fn quantize_down_zero_step_is_identity() {
        let x = Decimal::new(1, 1);
        assert_eq!(quantize_down(x, Decimal::ZERO), x);
    }

    #[test]
    fn net_bps_direct_matches_fee_additivity() {
        let bid = Decimal::from(100_300);
        let ask = Decimal::from(100_000);
        let n = net_bps_direct(bid, ask, 10, 10, Decimal::ZERO);
        assert_eq!(n, Decimal::from(10)); // raw 30bps - 10 - 10 = 10
    }
}

//! Direct-arb scanner - cross-venue (ask, bid) pairings on a single pair.
//!
//! Implements spec.md §4.2 exactly: for every fresh ask on exchange A and
//! fresh bid on exchange B (A != B), compute fee/slippage-adjusted net bps,
//! depth-capped size, and a depth+time confidence score; emit whatever
//! clears both thresholds. All qualifying pairings are emitted, not just
//! the best (spec.md §4.2 "Tie-breaks").

use rust_decimal::Decimal;

use crate::cache::QuoteCache;
use crate::core::{Opportunity, RuntimeConfig, Scanner};
use crate::decimal::{bps, net_bps_direct, quantize_qty};
use crate::fees::FeeTable;

pub struct DirectScanner<'a> {
    pub cache: &'a QuoteCache,
    pub config: &'a RuntimeConfig,
    pub fees: &'a FeeTable,
    pub now: f64,
}

impl<'a> DirectScanner<'a> {
    pub fn new(cache: &'a QuoteCache, config: &'a RuntimeConfig, fees: &'a FeeTable, now: f64) -> Self {
        Self { cache, config, fees, now }
    }

    /// Scan one pair for cross-venue opportunities.
    pub fn scan_pair(&self, pair: &str) -> Vec<Opportunity> {
        let fresh = self.cache.fresh_for_pair(pair, self.now, self.config.stale_ms);
        if fresh.is_empty() {
            return Vec::new();
        }

        let mut out = Vec::new();
        for (a_ex, a_quote) in &fresh {
            if a_quote.ask <= Decimal::ZERO {
                continue;
            }
            for (b_ex, b_quote) in &fresh {
                if a_ex == b_ex {
                    continue;
                }

                let net_bps = net_bps_direct(
                    b_quote.bid,
                    a_quote.ask,
                    self.fees.taker_bps(a_ex),
                    self.fees.taker_bps(b_ex),
                    self.config.slippage_bps_buffer,
                );
                if net_bps < self.config.min_profit_bps_after_fees {
                    continue;
                }

                let aud_cap_qty = quantize_qty(self.config.max_trade_aud / a_quote.ask);
                let qty = quantize_qty(a_quote.ask_size.min(b_quote.bid_size).min(aud_cap_qty));
                if qty <= Decimal::ZERO {
                    continue;
                }

                let age_s = self.now - a_quote.ts.max(b_quote.ts);
                let age_s = age_s.max(0.0);

                let confidence = confidence_score(a_quote.ask_size, b_quote.bid_size, qty, age_s);
                if confidence < self.config.min_confidence {
                    continue;
                }

                let raw_bps = bps((b_quote.bid - a_quote.ask) / a_quote.ask);

                out.push(Opportunity {
                    ts: self.now,
                    pair: pair.to_string(),
                    buy_ex: (*a_ex).to_string(),
                    sell_ex: (*b_ex).to_string(),
                    buy_price: a_quote.ask,
                    sell_price: b_quote.bid,
                    qty,
                    raw_bps,
                    net_bps,
                    profit_quote: (b_quote.bid - a_quote.ask) * qty,
                    confidence,
                    latency_ms: (age_s * 1000.0).floor() as i64,
                });
            }
        }
        out
    }
}

impl<'a> Scanner for DirectScanner<'a> {
    type Key = &'a str;
    type Output = Opportunity;

    fn scan(&self, pair: &'a str) -> Vec<Opportunity> {
        self.scan_pair(pair)
    }
}

/// `0.5*depth_score + 0.5*time_score` (spec.md §4.2).
fn confidence_score(ask_size: Decimal, bid_size: Decimal, qty: Decimal, age_s: f64) -> f64 {
    let qty_guard = if qty > Decimal::ZERO { qty } else { Decimal::new(1, 9) };
    let depth_ratio = (ask_size.min(bid_size) / qty_guard).max(Decimal::ZERO).min(Decimal::ONE);
    let depth_score = decimal_to_f64(depth_ratio);

    let time_score = if age_s <= 0.2 {
        1.0
    } else {
        (1.0 - (age_s - 0.2)).max(0.0)
    };

    0.5 * depth_score + 0.5 * time_score
}

fn decimal_to_f64(d: Decimal) -> f64 {
    use rust_decimal::prelude::ToPrimitive;
    d.to_f64().unwrap_or(0.0)
}

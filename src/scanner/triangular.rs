//! Triangular scanner - per-exchange currency graph, AUD-rooted 3-cycles,
//! capacity-bounded notional propagation (spec.md §4.3).

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;

use crate::cache::QuoteCache;
use crate::core::{Leg, RuntimeConfig, Scanner, Side, TriOpportunity};
use crate::decimal::bps;
use crate::fees::FeeTable;

const AUD: &str = "AUD";

/// A directed, ephemeral currency edge rebuilt on every scan. Not cached
/// across scans (spec.md §3 "Edge (derived, ephemeral)").
#[derive(Debug, Clone)]
struct Edge {
    rate: Decimal,
    max_in: Decimal,
    pair: String,
    side: Side,
    price: Decimal,
    age_s: f64,
}

pub struct TriangularScanner<'a> {
    pub cache: &'a QuoteCache,
    pub config: &'a RuntimeConfig,
    pub fees: &'a FeeTable,
    pub now: f64,
}

impl<'a> TriangularScanner<'a> {
    pub fn new(cache: &'a QuoteCache, config: &'a RuntimeConfig, fees: &'a FeeTable, now: f64) -> Self {
        Self { cache, config, fees, now }
    }

    /// Scan one exchange for AUD-rooted triangular cycles.
    pub fn scan_exchange(&self, exchange_id: &str) -> Vec<TriOpportunity> {
        let (edges, currencies) = self.build_edges(exchange_id);
        if !currencies.contains(AUD) {
            return Vec::new();
        }

        let mut out = Vec::new();
        for x in &currencies {
            if x == AUD {
                continue;
            }
            let Some(e1) = edges.get(&(AUD.to_string(), x.clone())) else { continue };

            for y in &currencies {
                if y == AUD || y == x {
                    continue;
                }
                let Some(e2) = edges.get(&(x.clone(), y.clone())) else { continue };
                let Some(e3) = edges.get(&(y.clone(), AUD.to_string())) else { continue };

                if let Some(opp) = self.evaluate_triangle(exchange_id, x, y, e1, e2, e3) {
                    out.push(opp);
                }
            }
        }
        out
    }

    /// Build the directed currency graph for one exchange from its fresh
    /// quotes. Malformed pair strings (no `/`) are skipped (spec.md §7).
    fn build_edges(&self, exchange_id: &str) -> (BTreeMap<(String, String), Edge>, BTreeSet<String>) {
        let stale_s_ms = self.config.stale_ms;
        let fresh = self.cache.fresh_for_exchange(exchange_id, self.now, stale_s_ms);

        let fee_bps = self.fees.taker_bps(exchange_id);
        let fee_k = (Decimal::from(10_000) - Decimal::from(fee_bps) - self.config.slippage_bps_buffer)
            / Decimal::from(10_000);

        let mut edges: BTreeMap<(String, String), Edge> = BTreeMap::new();
        let mut currencies = BTreeSet::new();

        for (pair, quote) in fresh {
            let Some((base, quote_ccy)) = pair.split_once('/') else { continue };
            let (base, quote_ccy) = (base.to_string(), quote_ccy.to_string());
            currencies.insert(base.clone());
            currencies.insert(quote_ccy.clone());

            let age_s = quote.age_s(self.now);

            if quote.ask > Decimal::ZERO && quote.ask_size > Decimal::ZERO {
                edges.insert(
                    (quote_ccy.clone(), base.clone()),
                    Edge {
                        rate: fee_k / quote.ask,
                        max_in: quote.ask_size * quote.ask,
                        pair: pair.to_string(),
                        side: Side::Buy,
                        price: quote.ask,
                        age_s,
                    },
                );
            }
            if quote.bid > Decimal::ZERO && quote.bid_size > Decimal::ZERO {
                edges.insert(
                    (base.clone(), quote_ccy.clone()),
                    Edge {
                        rate: fee_k * quote.bid,
                        max_in: quote.bid_size,
                        pair: pair.to_string(),
                        side: Side::Sell,
                        price: quote.bid,
                        age_s,
                    },
                );
            }
        }

        (edges, currencies)
    }

    fn evaluate_triangle(
        &self,
        exchange_id: &str,
        x: &str,
        y: &str,
        e1: &Edge,
        e2: &Edge,
        e3: &Edge,
    ) -> Option<TriOpportunity> {
        let start = self.config.tri_start_aud;

        let amount1 = propagate(start, e1);
        if amount1 <= Decimal::ZERO {
            return None;
        }
        let amount2 = propagate(amount1, e2);
        if amount2 <= Decimal::ZERO {
            return None;
        }
        let end = propagate(amount2, e3);
        if end <= Decimal::ZERO {
            return None;
        }

        let net_bps = bps((end - start) / start);
        if net_bps < self.config.min_profit_bps_after_fees {
            return None;
        }

        let latency_ms = (1000.0 * e1.age_s.max(e2.age_s).max(e3.age_s)).floor() as i64;

        let conf_depth = (depth_score(start, e1) + depth_score(amount1, e2) + depth_score(amount2, e3)) / 3.0;
        let conf_time = if latency_ms <= 200 {
            1.0
        } else {
            (1.0 - (latency_ms as f64 - 200.0) / 800.0).max(0.0)
        };
        let confidence = 0.5 * conf_depth + 0.5 * conf_time;
        if confidence < self.config.min_confidence {
            return None;
        }

        Some(TriOpportunity {
            ts: self.now,
            exchange: exchange_id.to_string(),
            path: [AUD.to_string(), x.to_string(), y.to_string(), AUD.to_string()],
            start_aud: start,
            end_aud: end,
            net_bps,
            profit_aud: end - start,
            confidence,
            latency_ms,
            legs: [leg(e1), leg(e2), leg(e3)],
        })
    }
}

impl<'a> Scanner for TriangularScanner<'a> {
    type Key = &'a str;
    type Output = TriOpportunity;

    fn scan(&self, exchange_id: &'a str) -> Vec<TriOpportunity> {
        self.scan_exchange(exchange_id)
    }
}

/// `usable = min(amount_in, max_in); amount_out = usable * rate` (spec.md §4.3).
fn propagate(amount_in: Decimal, edge: &Edge) -> Decimal {
    let usable = amount_in.min(edge.max_in);
    usable * edge.rate
}

/// `1.0` if at most half the edge's capacity was used, else linearly
/// degrading to `0.0` at full capacity (spec.md §4.3).
fn depth_score(amount_in: Decimal, edge: &Edge) -> f64 {
    if edge.max_in <= Decimal::ZERO {
        return 0.0;
    }
    let ratio = decimal_to_f64(amount_in / edge.max_in);
    if ratio <= 0.5 {
        1.0
    } else {
        (1.0 - 2.0 * (ratio - 0.5)).max(0.0)
    }
}

fn leg(edge: &Edge) -> Leg {
    Leg {
        pair: edge.pair.clone(),
        side: edge.side,
        price: edge.price,
        max_in: edge.max_in,
        age_s: round_dp3(edge.age_s),
    }
}

fn round_dp3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

fn decimal_to_f64(d: Decimal) -> f64 {
    use rust_decimal::prelude::ToPrimitive;
    d.to_f64().unwrap_or(0.0)
}

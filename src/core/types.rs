//! Core types - quotes, opportunities, and the values that flow between them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Top-of-book snapshot for one (exchange, pair).
///
/// Invariants: `bid > 0`, `ask > 0`, sizes >= 0. Inverted books (`bid > ask`
/// on the same venue) are permissible inputs; they simply cannot be
/// profitable against themselves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Unix seconds, fractional.
    pub ts: f64,
    pub bid: Decimal,
    pub bid_size: Decimal,
    pub ask: Decimal,
    pub ask_size: Decimal,
}

impl Quote {
    pub fn age_s(&self, now: f64) -> f64 {
        (now - self.ts).max(0.0)
    }

    pub fn is_stale(&self, now: f64, stale_ms: u64) -> bool {
        (now - self.ts) > (stale_ms as f64 / 1000.0)
    }
}

/// A quote tagged with the venue and canonicalized `BASE/QUOTE` pair it
/// was captured on. This is the sole inbound event the core accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestBook {
    pub exchange_id: String,
    pub pair: String,
    pub quote: Quote,
}

/// Which side of the book a leg trades against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

/// Cross-exchange direct arbitrage opportunity: buy at `buy_ex`, sell at
/// `sell_ex`, same pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub ts: f64,
    pub pair: String,
    pub buy_ex: String,
    pub sell_ex: String,
    pub buy_price: Decimal,
    pub sell_price: Decimal,
    pub qty: Decimal,
    pub raw_bps: Decimal,
    pub net_bps: Decimal,
    /// (sell_price - buy_price) * qty, in the pair's quote currency. Named
    /// `profit_quote` rather than `profit_aud` — see DESIGN.md's resolution
    /// of spec.md's open question on this field.
    pub profit_quote: Decimal,
    pub confidence: f64,
    pub latency_ms: i64,
}

/// One hop of a triangular cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub pair: String,
    pub side: Side,
    pub price: Decimal,
    pub max_in: Decimal,
    pub age_s: f64,
}

/// Single-exchange triangular arbitrage opportunity through a 3-hop cycle
/// rooted at AUD: `path = [AUD, X, Y, AUD]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriOpportunity {
    pub ts: f64,
    pub exchange: String,
    pub path: [String; 4],
    pub start_aud: Decimal,
    pub end_aud: Decimal,
    pub net_bps: Decimal,
    pub profit_aud: Decimal,
    pub confidence: f64,
    pub latency_ms: i64,
    pub legs: [Leg; 3],
}

/// A detected opportunity from either scanner, tagged for serialization.
///
/// The `kind` field only exists at this sum-type boundary (CSV rows,
/// broadcast JSON); core APIs stay statically typed over `Opportunity` and
/// `TriOpportunity` (see `crate::sink::Sink`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum DetectedOpportunity {
    #[serde(rename = "cex")]
    Direct(Opportunity),
    #[serde(rename = "tri")]
    Triangular(TriOpportunity),
}

impl DetectedOpportunity {
    pub fn kind(&self) -> &'static str {
        match self {
            DetectedOpportunity::Direct(_) => "cex",
            DetectedOpportunity::Triangular(_) => "tri",
        }
    }
}

//! Broadcast sink - fan out detected opportunities to live subscribers
//! (dashboard, paper-trading engine, etc.) over a bounded channel.
//!
//! Capacity 100, drop-when-full, matching spec.md §5 and grounded in
//! `strongca22-cpu-dexarb/.../paper_trading/engine.rs`'s use of
//! `tokio::sync::broadcast` for the same purpose. A slow or absent receiver
//! never blocks the dispatcher: `tokio::sync::broadcast::Sender::send`
//! returns an error only when there are zero receivers, which we ignore,
//! and otherwise lags the slow receiver rather than applying backpressure.

use tokio::sync::broadcast::{self, Receiver, Sender};
use tracing::trace;

use super::Sink;
use crate::core::{DetectedOpportunity, Opportunity, TriOpportunity};

pub const CHANNEL_CAPACITY: usize = 100;

pub struct BroadcastSink {
    tx: Sender<DetectedOpportunity>,
}

impl BroadcastSink {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> Receiver<DetectedOpportunity> {
        self.tx.subscribe()
    }
}

impl Default for BroadcastSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for BroadcastSink {
    fn publish_direct(&self, opp: &Opportunity) {
        if self.tx.send(DetectedOpportunity::Direct(opp.clone())).is_err() {
            trace!("broadcast sink: no subscribers for direct opportunity");
        }
    }

    fn publish_tri(&self, opp: &TriOpportunity) {
        if self.tx.send(DetectedOpportunity::Triangular(opp.clone())).is_err() {
            trace!("broadcast sink: no subscribers for triangular opportunity");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn sample_direct() -> Opportunity {
        Opportunity {
            ts: 1.0,
            pair: "BTC/AUD".into(),
            buy_ex: "A".into(),
            sell_ex: "B".into(),
            buy_price: Decimal::from(100_000),
            sell_price: Decimal::from(100_300),
            qty: Decimal::new(1, 1),
            raw_bps: Decimal::from(30),
            net_bps: Decimal::from(10),
            profit_quote: Decimal::new(3000, 2),
            confidence: 0.9,
            latency_ms: 0,
        }
    }

    #[tokio::test]
    async fn subscriber_receives_published_opportunity() {
        let sink = BroadcastSink::new();
        let mut rx = sink.subscribe();

        sink.publish_direct(&sample_direct());

        let received = rx.recv().await.unwrap();
        assert_eq!(received.kind(), "cex");
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let sink = BroadcastSink::new();
        sink.publish_direct(&sample_direct());
    }
}

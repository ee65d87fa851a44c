//! REST market-data adapter - polls a Binance-compatible book-ticker
//! endpoint and pushes `BestBook` values into the dispatcher.
//!
//! Grounded in two places: the request/parse shape follows the teacher's
//! `BinanceAdapter::fetch_ticker` (`reqwest` + manual `serde_json::Value`
//! field pulls, `Decimal` parsed from the string fields venues return), and
//! the poll-forever-per-pair loop follows
//! `original_source/md/rest_client.py`'s `run_rest_exchange`. Gated behind
//! the `live-adapters` feature so default builds and tests never reach the
//! network (spec.md §5).

use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::warn;

use crate::core::{BestBook, Error, MarketDataAdapter, Quote, Result};
use crate::symbol;

/// Polls `GET {rest_url}/api/v3/ticker/bookTicker?symbol=...` once per
/// `poll_ms` for each configured pair, on a Binance-shaped REST API.
pub struct RestPollAdapter {
    exchange_id: String,
    rest_url: String,
    pairs: Vec<String>,
    poll_ms: u64,
    client: reqwest::Client,
}

impl RestPollAdapter {
    pub fn new(exchange_id: impl Into<String>, rest_url: impl Into<String>, pairs: Vec<String>, poll_ms: u64) -> Self {
        Self {
            exchange_id: exchange_id.into(),
            rest_url: rest_url.into(),
            pairs,
            poll_ms,
            client: reqwest::Client::new(),
        }
    }

    async fn poll_once(&self, pair: &str) -> Result<BestBook> {
        let venue_symbol = pair.replace('/', "");
        let url = format!("{}/api/v3/ticker/bookTicker?symbol={}", self.rest_url, venue_symbol);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(Error::Network)?
            .json::<serde_json::Value>()
            .await
            .map_err(Error::Network)?;

        let parse_decimal = |field: &str| -> Result<Decimal> {
            resp[field]
                .as_str()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| Error::Adapter(format!("missing or malformed {field:?} in response: {resp}")))
        };

        Ok(BestBook {
            exchange_id: self.exchange_id.clone(),
            pair: symbol::normalize(pair).to_string(),
            quote: Quote {
                ts: crate::clock::now_s(),
                bid: parse_decimal("bidPrice")?,
                bid_size: parse_decimal("bidQty")?,
                ask: parse_decimal("askPrice")?,
                ask_size: parse_decimal("askQty")?,
            },
        })
    }
}

#[async_trait]
impl MarketDataAdapter for RestPollAdapter {
    fn exchange_id(&self) -> &str {
        &self.exchange_id
    }

    async fn run(&self, on_book: &(dyn Fn(BestBook) + Send + Sync)) -> Result<()> {
        loop {
            for pair in &self.pairs {
                match self.poll_once(pair).await {
                    Ok(book) => on_book(book),
                    Err(e) => warn!(exchange = %self.exchange_id, pair, error = %e, "poll failed"),
                }
            }
            tokio::time::sleep(Duration::from_millis(self.poll_ms)).await;
        }
    }
}

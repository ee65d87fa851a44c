//! Quote cache - latest top-of-book per (exchange, pair).
//!
//! Latest-wins on update; no history retained. Written only by the
//! dispatcher, read by both scanners. The process is single-threaded
//! cooperative (spec.md §5), so no lock is required.

use std::collections::HashMap;

use crate::core::Quote;

#[derive(Debug, Clone, Default)]
pub struct QuoteCache {
    books: HashMap<(String, String), Quote>,
}

impl QuoteCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, exchange_id: &str, pair: &str, quote: Quote) {
        self.books
            .insert((exchange_id.to_string(), pair.to_string()), quote);
    }

    pub fn get(&self, exchange_id: &str, pair: &str) -> Option<&Quote> {
        self.books.get(&(exchange_id.to_string(), pair.to_string()))
    }

    /// Every fresh `(exchange, quote)` entry for one pair.
    pub fn fresh_for_pair(&self, pair: &str, now: f64, stale_ms: u64) -> Vec<(&str, &Quote)> {
        self.books
            .iter()
            .filter(|((_, p), q)| p == pair && !q.is_stale(now, stale_ms))
            .map(|((ex, _), q)| (ex.as_str(), q))
            .collect()
    }

    /// Every fresh `(pair, quote)` entry for one exchange.
    pub fn fresh_for_exchange(&self, exchange_id: &str, now: f64, stale_ms: u64) -> Vec<(&str, &Quote)> {
        self.books
            .iter()
            .filter(|((ex, _), q)| ex == exchange_id && !q.is_stale(now, stale_ms))
            .map(|((_, p), q)| (p.as_str(), q))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

//! Dispatcher - the single inbound seam (spec.md §4.1).
//!
//! `on_book` is synchronous and non-suspending: it updates the quote cache,
//! runs the direct scan for the affected pair, then the triangular scan for
//! the affected exchange, and forwards every emission to the sink in that
//! order. No `await` point exists inside `on_book` — adapters are the only
//! part of the system that suspends.

use std::sync::Arc;

use crate::cache::QuoteCache;
use crate::clock::{now_s, Clock};
use crate::core::{BestBook, RuntimeConfig};
use crate::fees::FeeTable;
use crate::scanner::{DirectScanner, TriangularScanner};
use crate::sink::{Sink, TobSink};

pub struct Dispatcher {
    cache: QuoteCache,
    config: RuntimeConfig,
    fees: FeeTable,
    sink: Arc<dyn Sink>,
    tob_sink: Option<Arc<dyn TobSink>>,
    clock: Clock,
}

impl Dispatcher {
    pub fn new(config: RuntimeConfig, fees: FeeTable, sink: Arc<dyn Sink>) -> Self {
        Self {
            cache: QuoteCache::new(),
            config,
            fees,
            sink,
            tob_sink: None,
            clock: Box::new(now_s),
        }
    }

    /// Override the clock, for deterministic replay in tests.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Record every inbound book to a `tob_snapshots.csv`-shaped sink,
    /// independent of the opportunity `Sink` (spec.md §6).
    pub fn with_tob_sink(mut self, tob_sink: Arc<dyn TobSink>) -> Self {
        self.tob_sink = Some(tob_sink);
        self
    }

    /// Route one inbound quote: cache update, then direct scan, then
    /// triangular scan, emitting to the sink in that order (spec.md §4.1).
    pub fn on_book(&mut self, book: BestBook) {
        if let Some(tob_sink) = &self.tob_sink {
            tob_sink.record_tob(&book);
        }
        self.cache.update(&book.exchange_id, &book.pair, book.quote);
        let now = (self.clock)();

        let direct = DirectScanner::new(&self.cache, &self.config, &self.fees, now).scan_pair(&book.pair);
        for opp in &direct {
            self.sink.publish_direct(opp);
        }

        let tri = TriangularScanner::new(&self.cache, &self.config, &self.fees, now).scan_exchange(&book.exchange_id);
        for opp in &tri {
            self.sink.publish_tri(opp);
        }
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

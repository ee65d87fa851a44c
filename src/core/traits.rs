//! Core traits - the seams between the detection engine and the host.

use async_trait::async_trait;

use crate::core::{BestBook, Result};

/// A pure, non-suspending scan over the quote cache. Implemented by both
/// the direct-arb and triangular scanners.
///
/// Per spec.md §7, "no exception is allowed to cross the scanner
/// boundary" — scanners are total functions over their cache view, so this
/// trait has no fallible method.
pub trait Scanner {
    /// What identifies one scan target: a pair for the direct scanner, an
    /// exchange id for the triangular scanner.
    type Key;
    /// What the scan emits.
    type Output;

    /// Run the scan and return every qualifying opportunity, in detection
    /// order. Iteration order over candidate pairings is otherwise
    /// unspecified (spec.md §4.2) — all qualifying pairings are returned,
    /// not just the best.
    fn scan(&self, key: Self::Key) -> Vec<Self::Output>;
}

/// Market-data adapter contract (spec.md §6, inbound).
///
/// Adapters are responsible for symbol normalization (see
/// `crate::symbol::normalize`) before calling `on_book`. Adapter lifecycle
/// and transport choice are opaque to the core; this trait is the only
/// seam the dispatcher needs.
#[async_trait]
pub trait MarketDataAdapter: Send + Sync {
    /// Stable, opaque exchange identifier this adapter publishes under.
    fn exchange_id(&self) -> &str;

    /// Run until cancelled, pushing `BestBook` values to `on_book`.
    /// Adapters suspend at I/O boundaries (socket read, HTTP fetch, timer
    /// wait); they must never block the caller outside of those
    /// suspension points.
    async fn run(&self, on_book: &(dyn Fn(BestBook) + Send + Sync)) -> Result<()>;
}

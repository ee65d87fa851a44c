//! Opportunity sink - outbound interface (spec.md §6).
//!
//! The dispatcher owns a single `Arc<dyn Sink>`; per spec.md §9's "avoid
//! mutable rebinding of emit callbacks" design note, the sink is never
//! rebound after construction. Composition (CSV + broadcast, etc.) is done
//! via `TeeSink`, not by swapping the dispatcher's sink reference.

pub mod broadcast;
pub mod csv;

pub use broadcast::BroadcastSink;
pub use csv::CsvSink;

use crate::core::{BestBook, Opportunity, TriOpportunity};

/// Outbound opportunity callbacks. Implementations must not block for more
/// than trivially short durations (spec.md §6) and must never let a write
/// failure propagate back into a scanner (spec.md §7 "Sink write failure").
pub trait Sink: Send + Sync {
    fn publish_direct(&self, opp: &Opportunity);
    fn publish_tri(&self, opp: &TriOpportunity);
}

/// Records raw inbound top-of-book snapshots to `tob_snapshots.csv`
/// (spec.md §6). Kept separate from `Sink`: the original wires this as an
/// independent subscription on book arrivals, upstream of the detector's
/// own publish callbacks (`original_source/io/cli.py`), not as a third
/// `Sink` method.
pub trait TobSink: Send + Sync {
    fn record_tob(&self, book: &BestBook);
}

/// Fan a single publish call out to every composed sink, in order. Mirrors
/// the original implementation's layering of CSV-write + broadcast over one
/// `publish_opp` call (`original_source/io/cli.py`). Takes `Arc<dyn Sink>`
/// rather than `Box` so a sink (e.g. `CsvSink`, which also implements
/// `TobSink`) can be shared with another owner outside the tee.
pub struct TeeSink {
    sinks: Vec<std::sync::Arc<dyn Sink>>,
}

impl TeeSink {
    pub fn new(sinks: Vec<std::sync::Arc<dyn Sink>>) -> Self {
        Self { sinks }
    }
}

impl Sink for TeeSink {
    fn publish_direct(&self, opp: &Opportunity) {
        for s in &self.sinks {
            s.publish_direct(opp);
        }
    }

    fn publish_tri(&self, opp: &TriOpportunity) {
        for s in &self.sinks {
            s.publish_tri(opp);
        }
    }
}

/// A no-op sink, useful for tests that only care about scanner output.
#[derive(Default)]
pub struct NullSink;

impl Sink for NullSink {
    fn publish_direct(&self, _opp: &Opportunity) {}
    fn publish_tri(&self, _opp: &TriOpportunity) {}
}

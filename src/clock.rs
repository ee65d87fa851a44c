//! Wall-clock access, isolated so tests can inject a fixed clock.
//!
//! Mirrors `original_source/core/utils.py`'s `now_s()` helper; the
//! dispatcher takes a `Clock` rather than calling `SystemTime::now()`
//! directly so replaying the same `on_book` sequence is deterministic in
//! tests (spec.md §8, "Determinism").

use std::time::{SystemTime, UNIX_EPOCH};

pub type Clock = Box<dyn Fn() -> f64 + Send + Sync>;

/// Unix seconds, fractional, from the system clock.
pub fn now_s() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

/// A clock that always returns the same instant, for deterministic tests.
pub fn fixed(ts: f64) -> Clock {
    Box::new(move || ts)
}

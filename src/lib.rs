//! Real-time cross-venue and triangular arbitrage detection over spot
//! crypto markets quoted in AUD.
//!
//! `core` holds the detection engine (cache, scanners, dispatcher
//! contract, config, error taxonomy) as pure, deterministic compute; the
//! remaining modules are the ambient host: symbol normalization, fee-table
//! loading, the outbound `Sink`, and (behind `live-adapters`) a concrete
//! REST market-data adapter.

pub mod cache;
pub mod clock;
pub mod core;
pub mod decimal;
pub mod dispatcher;
pub mod fees;
pub mod scanner;
pub mod sink;
pub mod symbol;

#[cfg(feature = "live-adapters")]
pub mod adapter;

pub use core::{Error, Result, RuntimeConfig};
pub use dispatcher::Dispatcher;

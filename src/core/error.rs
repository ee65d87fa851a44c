//! Error handling - hierarchical, thiserror-based

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Crate error hierarchy.
///
/// The scanners are total functions over their cache view and never return
/// `Error` (see core::traits::Scanner) — this type only surfaces at
/// configuration load, sink I/O, and adapter boundaries.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration load/parse errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Sink I/O errors (CSV write, etc). Logged and swallowed by callers, never
    /// propagated back into a scanner.
    #[error("sink error: {0}")]
    Sink(String),

    /// Market-data adapter transport errors
    #[error("adapter error: {0}")]
    Adapter(String),

    /// Network/IO errors
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

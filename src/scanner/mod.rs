//! Scanners - pure, non-suspending compute over the quote cache.

pub mod direct;
pub mod triangular;

pub use direct::DirectScanner;
pub use triangular::TriangularScanner;

//! Version inference from pull request titles.
//!
//! Titles are classified as conventional commits, the strongest impact
//! wins, and the last published tag is bumped accordingly.

/// Next tag computation.
pub mod bump;

/// Title classification and reduction.
pub mod impact;

//! Analysis modules.
//!
//! Aggregation over the in-memory launch table.

pub mod aggregator;

pub use aggregator::*;

//! Portfolio computation - aggregation, valuation, history, and attribution.

pub mod holdings;
pub mod performance;
pub mod snapshot;
pub mod valuation;

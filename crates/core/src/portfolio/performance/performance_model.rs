//! Performance attribution models. Derived views, never persisted.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Performance metrics for a single priced holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingPerformance {
    pub symbol: String,
    pub current_value: Decimal,
    pub cost_basis: Decimal,
    pub unrealized_gain: Decimal,
    pub unrealized_gain_pct: Decimal,
    /// Share of total portfolio value.
    pub weight_pct: Decimal,
    /// Signed share of the portfolio's total move; negative only when this
    /// holding's gain opposes the portfolio's direction.
    pub contribution_pct: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
}

/// Portfolio performance breakdown by holdings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPerformance {
    /// All priced holdings, unrealized gain descending.
    pub holdings: Vec<HoldingPerformance>,

    /// Up to five holdings with the largest positive gain, descending.
    pub top_gainers: Vec<HoldingPerformance>,
    /// Up to five holdings with the most negative gain, most negative first.
    pub top_losers: Vec<HoldingPerformance>,

    pub total_value: Decimal,
    pub total_cost_basis: Decimal,
    pub total_gain: Decimal,
    pub total_gain_pct: Decimal,

    /// Sector -> aggregate return percent over that sector's cost basis.
    pub sector_performance: HashMap<String, Decimal>,
}

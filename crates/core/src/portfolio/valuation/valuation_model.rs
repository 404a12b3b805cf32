//! Valuation models: per-lot market annotations and the portfolio root.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::lots::Lot;
use crate::portfolio::holdings::AggregatedPosition;

/// Day-over-day move of a single lot.
///
/// Requires both a current price and a positive previous close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayChange {
    /// (current price - previous close) x shares.
    pub amount: Decimal,
    /// (current price - previous close) / previous close x 100.
    pub pct: Decimal,
}

/// Market-derived metrics for a single lot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum LotValuation {
    #[serde(rename_all = "camelCase")]
    Priced {
        current_price: Decimal,
        current_value: Decimal,
        unrealized_gain: Decimal,
        /// Zero when the lot's cost basis is zero.
        unrealized_gain_pct: Decimal,
        /// Absent when the quote carried no usable previous close.
        #[serde(skip_serializing_if = "Option::is_none")]
        day_change: Option<DayChange>,
    },
    Unpriced,
}

/// A ledger lot annotated with its own valuation.
///
/// Cost basis is always present; it never depends on a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuedLot {
    pub lot: Lot,
    pub cost_basis: Decimal,
    pub valuation: LotValuation,
}

impl ValuedLot {
    pub fn is_priced(&self) -> bool {
        matches!(self.valuation, LotValuation::Priced { .. })
    }

    pub fn current_value(&self) -> Option<Decimal> {
        match &self.valuation {
            LotValuation::Priced { current_value, .. } => Some(*current_value),
            LotValuation::Unpriced => None,
        }
    }

    pub fn day_change(&self) -> Option<DayChange> {
        match &self.valuation {
            LotValuation::Priced { day_change, .. } => *day_change,
            LotValuation::Unpriced => None,
        }
    }
}

/// Aggregate root for one valuation pass.
///
/// Cost-basis totals cover every lot regardless of pricing; value-derived
/// totals count only priced lots (unpriced ones contribute zero).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub lots: Vec<ValuedLot>,
    /// Aggregated positions sorted by current value descending, unpriced
    /// positions last.
    pub positions: Vec<AggregatedPosition>,

    pub total_cost_basis: Decimal,
    pub total_current_value: Decimal,
    pub total_unrealized_gain: Decimal,
    /// Zero when the total cost basis is zero.
    pub total_unrealized_gain_pct: Decimal,
    pub total_day_change: Decimal,
    /// Normalized against the value before today's move; zero when that
    /// base is not positive.
    pub total_day_change_pct: Decimal,

    pub lot_count: usize,
    pub symbol_count: usize,

    /// Sector -> weight percent, entries only for symbols with both sector
    /// and price data. The map need not sum to 100.
    pub sector_allocation: HashMap<String, Decimal>,

    /// Symbols that could not be priced in this pass. Their positions are
    /// carried as `Unpriced` and excluded from value-derived totals.
    pub unpriced_symbols: Vec<String>,

    pub as_of: DateTime<Utc>,
}

impl Portfolio {
    /// Portfolio of an empty ledger: all totals at their zero defaults.
    pub fn empty() -> Self {
        Self {
            lots: Vec::new(),
            positions: Vec::new(),
            total_cost_basis: Decimal::ZERO,
            total_current_value: Decimal::ZERO,
            total_unrealized_gain: Decimal::ZERO,
            total_unrealized_gain_pct: Decimal::ZERO,
            total_day_change: Decimal::ZERO,
            total_day_change_pct: Decimal::ZERO,
            lot_count: 0,
            symbol_count: 0,
            sector_allocation: HashMap::new(),
            unpriced_symbols: Vec::new(),
            as_of: Utc::now(),
        }
    }
}

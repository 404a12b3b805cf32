//! Aggregated position models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::portfolio::valuation::ValuedLot;

/// Market-derived metrics for an aggregated position.
///
/// A position is `Priced` only when the quote provider supplied a positive
/// current price for its symbol; otherwise it is `Unpriced` and contributes
/// nothing to value-derived totals. Consumers branch on the variant instead
/// of treating missing data as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum PositionPricing {
    #[serde(rename_all = "camelCase")]
    Priced {
        current_price: Decimal,
        current_value: Decimal,
        unrealized_gain: Decimal,
        /// Absent when the position's cost basis is zero.
        #[serde(skip_serializing_if = "Option::is_none")]
        unrealized_gain_pct: Option<Decimal>,
        /// Absent unless the portfolio-wide priced value is positive.
        #[serde(skip_serializing_if = "Option::is_none")]
        weight_pct: Option<Decimal>,
    },
    Unpriced,
}

/// All lots of one symbol reconciled into a single position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedPosition {
    pub symbol: String,
    pub total_shares: Decimal,
    pub total_cost_basis: Decimal,
    pub average_cost: Decimal,
    pub pricing: PositionPricing,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    /// Member lots in ledger order (purchase date ascending).
    pub lots: Vec<ValuedLot>,
}

impl AggregatedPosition {
    pub fn is_priced(&self) -> bool {
        matches!(self.pricing, PositionPricing::Priced { .. })
    }

    pub fn current_value(&self) -> Option<Decimal> {
        match &self.pricing {
            PositionPricing::Priced { current_value, .. } => Some(*current_value),
            PositionPricing::Unpriced => None,
        }
    }

    pub fn unrealized_gain(&self) -> Option<Decimal> {
        match &self.pricing {
            PositionPricing::Priced {
                unrealized_gain, ..
            } => Some(*unrealized_gain),
            PositionPricing::Unpriced => None,
        }
    }

    /// Effective value for ordering only: unpriced positions sort as zero.
    pub fn sort_value(&self) -> Decimal {
        self.current_value().unwrap_or(Decimal::ZERO)
    }
}

//! Snapshot and history models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Immutable record of portfolio totals for exactly one calendar date.
///
/// Created or overwritten once per day by an explicit save; never mutated
/// otherwise and never deleted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    /// Unique key: one snapshot per calendar day.
    pub snapshot_date: NaiveDate,
    pub total_value: Decimal,
    pub total_cost_basis: Decimal,
    pub total_gain: Decimal,
    pub total_gain_pct: Decimal,
    pub lot_count: i32,
    pub created_at: DateTime<Utc>,
}

/// A snapshot's value paired with its date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuePoint {
    pub value: Decimal,
    pub date: NaiveDate,
}

/// Derived statistics over a non-empty snapshot window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    pub earliest_date: NaiveDate,
    pub latest_date: NaiveDate,
    pub starting_value: Decimal,
    pub current_value: Decimal,
    pub total_change: Decimal,
    /// Zero when the starting value is zero.
    pub total_change_pct: Decimal,
    /// Highest-valued snapshot; ties keep the earliest date.
    pub high: ValuePoint,
    /// Lowest-valued snapshot; ties keep the earliest date.
    pub low: ValuePoint,
}

/// Read view over the snapshots inside a trailing window.
///
/// `summary` is absent when the window holds no snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioHistory {
    /// Snapshots ascending by date.
    pub snapshots: Vec<PortfolioSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<HistorySummary>,
}

impl PortfolioHistory {
    pub fn empty() -> Self {
        Self {
            snapshots: Vec::new(),
            summary: None,
        }
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use log::debug;
use rust_decimal::Decimal;

use super::snapshot_model::{HistorySummary, PortfolioHistory, PortfolioSnapshot, ValuePoint};
use super::snapshot_traits::{SnapshotRepositoryTrait, SnapshotServiceTrait};
use crate::portfolio::valuation::Portfolio;
use crate::Result;

/// Maintains the one-snapshot-per-day history and derives trend statistics.
pub struct SnapshotService {
    repository: Arc<dyn SnapshotRepositoryTrait>,
}

impl SnapshotService {
    pub fn new(repository: Arc<dyn SnapshotRepositoryTrait>) -> Self {
        Self { repository }
    }

    /// Derive summary statistics from an ascending snapshot sequence.
    fn summarize(snapshots: &[PortfolioSnapshot]) -> Option<HistorySummary> {
        let first = snapshots.first()?;
        let last = snapshots.last()?;

        let mut high = ValuePoint {
            value: first.total_value,
            date: first.snapshot_date,
        };
        let mut low = high;
        for snapshot in snapshots {
            // Strict comparisons keep the first occurrence on ties.
            if snapshot.total_value > high.value {
                high = ValuePoint {
                    value: snapshot.total_value,
                    date: snapshot.snapshot_date,
                };
            }
            if snapshot.total_value < low.value {
                low = ValuePoint {
                    value: snapshot.total_value,
                    date: snapshot.snapshot_date,
                };
            }
        }

        let total_change = last.total_value - first.total_value;
        let total_change_pct = if first.total_value > Decimal::ZERO {
            total_change / first.total_value * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };

        Some(HistorySummary {
            earliest_date: first.snapshot_date,
            latest_date: last.snapshot_date,
            starting_value: first.total_value,
            current_value: last.total_value,
            total_change,
            total_change_pct,
            high,
            low,
        })
    }
}

#[async_trait]
impl SnapshotServiceTrait for SnapshotService {
    async fn save_snapshot(&self, portfolio: &Portfolio) -> Result<PortfolioSnapshot> {
        let snapshot = PortfolioSnapshot {
            snapshot_date: Utc::now().date_naive(),
            total_value: portfolio.total_current_value,
            total_cost_basis: portfolio.total_cost_basis,
            total_gain: portfolio.total_unrealized_gain,
            total_gain_pct: portfolio.total_unrealized_gain_pct,
            lot_count: portfolio.lot_count as i32,
            created_at: Utc::now(),
        };
        debug!("Saving portfolio snapshot for {}", snapshot.snapshot_date);
        self.repository.upsert_snapshot(snapshot).await
    }

    fn get_history(&self, window_days: u32) -> Result<PortfolioHistory> {
        let cutoff = Utc::now().date_naive() - Duration::days(window_days as i64);
        let snapshots = self.repository.get_snapshots_since(cutoff)?;
        let summary = Self::summarize(&snapshots);
        Ok(PortfolioHistory { snapshots, summary })
    }
}

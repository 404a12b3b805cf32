use async_trait::async_trait;
use chrono::NaiveDate;

use super::snapshot_model::{PortfolioHistory, PortfolioSnapshot};
use crate::portfolio::valuation::Portfolio;
use crate::Result;

/// Contract for snapshot persistence.
#[async_trait]
pub trait SnapshotRepositoryTrait: Send + Sync {
    /// Overwrite-or-insert the snapshot keyed by its date. Writing twice
    /// for the same date replaces the first row entirely.
    async fn upsert_snapshot(&self, snapshot: PortfolioSnapshot) -> Result<PortfolioSnapshot>;

    /// Snapshots with date >= cutoff, ascending by date.
    fn get_snapshots_since(&self, cutoff: NaiveDate) -> Result<Vec<PortfolioSnapshot>>;
}

/// Contract for snapshot history operations.
#[async_trait]
pub trait SnapshotServiceTrait: Send + Sync {
    /// Persist today's snapshot of the given portfolio (upsert by date).
    async fn save_snapshot(&self, portfolio: &Portfolio) -> Result<PortfolioSnapshot>;

    /// History over the trailing `window_days`.
    fn get_history(&self, window_days: u32) -> Result<PortfolioHistory>;
}

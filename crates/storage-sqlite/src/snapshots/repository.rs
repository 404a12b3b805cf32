use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use log::debug;

use lotfolio_core::errors::Result;
use lotfolio_core::portfolio::snapshot::{PortfolioSnapshot, SnapshotRepositoryTrait};

use super::model::PortfolioSnapshotDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::portfolio_snapshots;
use crate::schema::portfolio_snapshots::dsl::*;

pub struct SnapshotRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SnapshotRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl SnapshotRepositoryTrait for SnapshotRepository {
    async fn upsert_snapshot(&self, snapshot: PortfolioSnapshot) -> Result<PortfolioSnapshot> {
        debug!("Upserting snapshot for {}", snapshot.snapshot_date);
        self.writer
            .exec(move |conn| -> Result<PortfolioSnapshot> {
                let row = PortfolioSnapshotDB::from(&snapshot);
                // replace_into overwrites the existing row for the date key,
                // never appends a second one.
                diesel::replace_into(portfolio_snapshots::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(snapshot)
            })
            .await
    }

    fn get_snapshots_since(&self, cutoff: NaiveDate) -> Result<Vec<PortfolioSnapshot>> {
        let mut conn = get_connection(&self.pool)?;
        let cutoff_str = cutoff.format("%Y-%m-%d").to_string();
        let rows = portfolio_snapshots
            .filter(snapshot_date.ge(cutoff_str))
            .order(snapshot_date.asc())
            .load::<PortfolioSnapshotDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(PortfolioSnapshot::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init;
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn repository() -> (SnapshotRepository, TempDir) {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("test.db");
        let (pool, writer) = init(db_path.to_str().unwrap()).unwrap();
        (SnapshotRepository::new(Arc::new(pool), writer), dir)
    }

    fn snapshot(days_ago: i64, value: Decimal) -> PortfolioSnapshot {
        PortfolioSnapshot {
            snapshot_date: (Utc::now() - Duration::days(days_ago)).date_naive(),
            total_value: value,
            total_cost_basis: dec!(1000),
            total_gain: value - dec!(1000),
            total_gain_pct: dec!(5.5),
            lot_count: 4,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_upsert_and_read_back() {
        let (repo, _dir) = repository();

        repo.upsert_snapshot(snapshot(0, dec!(1500))).await.unwrap();

        let cutoff = (Utc::now() - Duration::days(7)).date_naive();
        let rows = repo.get_snapshots_since(cutoff).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_value, dec!(1500));
        assert_eq!(rows[0].total_cost_basis, dec!(1000));
        assert_eq!(rows[0].lot_count, 4);
    }

    #[tokio::test]
    async fn test_same_date_upsert_keeps_one_row_with_latest_values() {
        let (repo, _dir) = repository();

        repo.upsert_snapshot(snapshot(0, dec!(1000))).await.unwrap();
        repo.upsert_snapshot(snapshot(0, dec!(2000))).await.unwrap();

        let cutoff = (Utc::now() - Duration::days(7)).date_naive();
        let rows = repo.get_snapshots_since(cutoff).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_value, dec!(2000));
    }

    #[tokio::test]
    async fn test_cutoff_filters_and_orders_ascending() {
        let (repo, _dir) = repository();

        repo.upsert_snapshot(snapshot(40, dec!(500))).await.unwrap();
        repo.upsert_snapshot(snapshot(2, dec!(1200))).await.unwrap();
        repo.upsert_snapshot(snapshot(10, dec!(900))).await.unwrap();

        let cutoff = (Utc::now() - Duration::days(30)).date_naive();
        let rows = repo.get_snapshots_since(cutoff).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].snapshot_date < rows[1].snapshot_date);
        assert_eq!(rows[0].total_value, dec!(900));
        assert_eq!(rows[1].total_value, dec!(1200));
    }
}

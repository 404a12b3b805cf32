//! Database models for portfolio snapshots.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use lotfolio_core::portfolio::snapshot::PortfolioSnapshot;

use crate::utils::{parse_date, parse_decimal, parse_timestamp};

/// Database model for portfolio snapshots, keyed by calendar date.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::portfolio_snapshots)]
#[diesel(primary_key(snapshot_date))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PortfolioSnapshotDB {
    pub snapshot_date: String,
    pub total_value: String,
    pub total_cost_basis: String,
    pub total_gain: String,
    pub total_gain_pct: String,
    pub lot_count: i32,
    pub created_at: String,
}

impl From<&PortfolioSnapshot> for PortfolioSnapshotDB {
    fn from(domain: &PortfolioSnapshot) -> Self {
        Self {
            snapshot_date: domain.snapshot_date.format("%Y-%m-%d").to_string(),
            total_value: domain.total_value.to_string(),
            total_cost_basis: domain.total_cost_basis.to_string(),
            total_gain: domain.total_gain.to_string(),
            total_gain_pct: domain.total_gain_pct.to_string(),
            lot_count: domain.lot_count,
            created_at: domain.created_at.to_rfc3339(),
        }
    }
}

impl From<PortfolioSnapshotDB> for PortfolioSnapshot {
    fn from(db: PortfolioSnapshotDB) -> Self {
        Self {
            snapshot_date: parse_date(&db.snapshot_date, "snapshot.snapshot_date"),
            total_value: parse_decimal(&db.total_value, "snapshot.total_value"),
            total_cost_basis: parse_decimal(&db.total_cost_basis, "snapshot.total_cost_basis"),
            total_gain: parse_decimal(&db.total_gain, "snapshot.total_gain"),
            total_gain_pct: parse_decimal(&db.total_gain_pct, "snapshot.total_gain_pct"),
            lot_count: db.lot_count,
            created_at: parse_timestamp(&db.created_at, "snapshot.created_at"),
        }
    }
}

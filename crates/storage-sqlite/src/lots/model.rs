//! Database models for lots.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use lotfolio_core::lots::{Lot, NewLot};

use crate::utils::{parse_date, parse_decimal, parse_timestamp};

/// Database model for lots.
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
#[diesel(table_name = crate::schema::lots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LotDB {
    pub id: String,
    pub symbol: String,
    pub shares: String,
    pub purchase_price: String,
    pub purchase_date: String,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl LotDB {
    /// Build the row for a new lot with its assigned identity.
    pub fn from_new_lot(new_lot: &NewLot, lot_id: String, now: DateTime<Utc>) -> Self {
        Self {
            id: lot_id,
            symbol: new_lot.symbol.clone(),
            shares: new_lot.shares.to_string(),
            purchase_price: new_lot.purchase_price.to_string(),
            purchase_date: new_lot.purchase_date.format("%Y-%m-%d").to_string(),
            notes: new_lot.notes.clone(),
            created_at: now.to_rfc3339(),
            updated_at: now.to_rfc3339(),
        }
    }
}

impl From<LotDB> for Lot {
    fn from(db: LotDB) -> Self {
        Self {
            shares: parse_decimal(&db.shares, "lot.shares"),
            purchase_price: parse_decimal(&db.purchase_price, "lot.purchase_price"),
            purchase_date: parse_date(&db.purchase_date, "lot.purchase_date"),
            created_at: parse_timestamp(&db.created_at, "lot.created_at"),
            updated_at: parse_timestamp(&db.updated_at, "lot.updated_at"),
            id: db.id,
            symbol: db.symbol,
            notes: db.notes,
        }
    }
}

/// Changeset for partial lot updates; `None` fields are left untouched.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::lots)]
pub struct LotUpdateDB {
    pub shares: Option<String>,
    pub notes: Option<String>,
    pub updated_at: String,
}

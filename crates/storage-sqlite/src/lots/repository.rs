use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use lotfolio_core::errors::{Error, Result};
use lotfolio_core::lots::{Lot, LotRepositoryTrait, LotUpdate, NewLot};

use super::model::{LotDB, LotUpdateDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::lots;
use crate::schema::lots::dsl::*;

pub struct LotRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl LotRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl LotRepositoryTrait for LotRepository {
    fn get_lot(&self, lot_id: &str) -> Result<Lot> {
        let mut conn = get_connection(&self.pool)?;
        let row = lots
            .find(lot_id)
            .first::<LotDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        row.map(Lot::from)
            .ok_or_else(|| Error::NotFound(format!("Lot {} not found", lot_id)))
    }

    fn get_lots(&self) -> Result<Vec<Lot>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = lots
            .order((symbol.asc(), purchase_date.asc()))
            .load::<LotDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Lot::from).collect())
    }

    fn get_lots_by_symbol(&self, symbol_filter: &str) -> Result<Vec<Lot>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = lots
            .filter(symbol.eq(symbol_filter))
            .order(purchase_date.asc())
            .load::<LotDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Lot::from).collect())
    }

    async fn create_lot(&self, new_lot: NewLot) -> Result<Lot> {
        self.writer
            .exec(move |conn| -> Result<Lot> {
                let row = LotDB::from_new_lot(&new_lot, Uuid::new_v4().to_string(), Utc::now());
                let inserted = diesel::insert_into(lots::table)
                    .values(&row)
                    .returning(LotDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Lot::from(inserted))
            })
            .await
    }

    async fn update_lot(&self, update: LotUpdate) -> Result<Lot> {
        let LotUpdate {
            id: lot_id,
            shares: new_shares,
            notes: new_notes,
        } = update;

        self.writer
            .exec(move |conn| -> Result<Lot> {
                let changes = LotUpdateDB {
                    shares: new_shares.map(|s| s.to_string()),
                    notes: new_notes,
                    updated_at: Utc::now().to_rfc3339(),
                };
                let affected = diesel::update(lots.find(lot_id.clone()))
                    .set(&changes)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(Error::NotFound(format!("Lot {} not found", lot_id)));
                }
                let row = lots
                    .find(lot_id)
                    .first::<LotDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Lot::from(row))
            })
            .await
    }

    async fn delete_lot(&self, lot_id: &str) -> Result<bool> {
        let id_owned = lot_id.to_string();
        self.writer
            .exec(move |conn| -> Result<bool> {
                let deleted = diesel::delete(lots.find(id_owned))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(deleted > 0)
            })
            .await
    }
}

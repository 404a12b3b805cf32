use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::lots_model::{canonical_symbol, Lot, LotUpdate, NewLot};
use super::lots_traits::{LotRepositoryTrait, LotServiceTrait};
use crate::Result;

/// Service enforcing ledger invariants in front of the repository.
///
/// Validation failures are surfaced to the caller and never retried.
pub struct LotService {
    repository: Arc<dyn LotRepositoryTrait>,
}

impl LotService {
    pub fn new(repository: Arc<dyn LotRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl LotServiceTrait for LotService {
    fn get_lot(&self, lot_id: &str) -> Result<Lot> {
        self.repository.get_lot(lot_id)
    }

    fn get_lots(&self) -> Result<Vec<Lot>> {
        self.repository.get_lots()
    }

    fn get_lots_by_symbol(&self, symbol: &str) -> Result<Vec<Lot>> {
        self.repository.get_lots_by_symbol(&canonical_symbol(symbol))
    }

    async fn add_lot(&self, mut new_lot: NewLot) -> Result<Lot> {
        new_lot.validate()?;
        debug!(
            "Adding lot: {} {} @ {}",
            new_lot.shares, new_lot.symbol, new_lot.purchase_price
        );
        self.repository.create_lot(new_lot).await
    }

    async fn update_lot(&self, update: LotUpdate) -> Result<Lot> {
        update.validate()?;
        self.repository.update_lot(update).await
    }

    async fn remove_lot(&self, lot_id: &str) -> Result<bool> {
        let removed = self.repository.delete_lot(lot_id).await?;
        if !removed {
            debug!("No lot found to remove for id {}", lot_id);
        }
        Ok(removed)
    }
}

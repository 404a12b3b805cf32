use async_trait::async_trait;

use super::lots_model::{Lot, LotUpdate, NewLot};
use crate::Result;

/// Contract for lot persistence.
#[async_trait]
pub trait LotRepositoryTrait: Send + Sync {
    /// Fetch one lot by id; `Error::NotFound` if it does not exist.
    fn get_lot(&self, lot_id: &str) -> Result<Lot>;

    /// All lots ordered by (symbol, purchase date) ascending.
    ///
    /// Downstream grouping relies on this ordering to keep lot order
    /// deterministic within a symbol.
    fn get_lots(&self) -> Result<Vec<Lot>>;

    /// Lots for one canonical symbol, ordered by purchase date ascending.
    fn get_lots_by_symbol(&self, symbol: &str) -> Result<Vec<Lot>>;

    async fn create_lot(&self, new_lot: NewLot) -> Result<Lot>;

    async fn update_lot(&self, update: LotUpdate) -> Result<Lot>;

    /// Returns whether a lot with the given id existed and was removed.
    async fn delete_lot(&self, lot_id: &str) -> Result<bool>;
}

/// Contract for ledger operations exposed to callers.
#[async_trait]
pub trait LotServiceTrait: Send + Sync {
    fn get_lot(&self, lot_id: &str) -> Result<Lot>;
    fn get_lots(&self) -> Result<Vec<Lot>>;
    fn get_lots_by_symbol(&self, symbol: &str) -> Result<Vec<Lot>>;
    async fn add_lot(&self, new_lot: NewLot) -> Result<Lot>;
    async fn update_lot(&self, update: LotUpdate) -> Result<Lot>;
    async fn remove_lot(&self, lot_id: &str) -> Result<bool>;
}

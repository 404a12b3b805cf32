//! Lot ledger - domain models, service, and traits.

mod lots_model;
mod lots_service;
mod lots_traits;


#[cfg(test)]
mod lots_service_tests;

pub use lots_model::{canonical_symbol, validate_symbol, Lot, LotUpdate, NewLot};
pub use lots_service::LotService;
pub use lots_traits::{LotRepositoryTrait, LotServiceTrait};

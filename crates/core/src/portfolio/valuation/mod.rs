//! Portfolio-wide valuation over the lot ledger.

mod valuation_model;
mod valuation_service;

#[cfg(test)]
mod valuation_service_tests;

pub use valuation_model::{DayChange, LotValuation, Portfolio, ValuedLot};
pub use valuation_service::{build_portfolio, value_lots, ValuationService, ValuationServiceTrait};

//! Per-holding attribution of portfolio gains and losses.

mod performance_calculator;
mod performance_model;


pub use performance_calculator::{analyze_portfolio, contribution_pct};
pub use performance_model::{HoldingPerformance, PortfolioPerformance};

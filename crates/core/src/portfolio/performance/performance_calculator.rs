//! Ranks holdings and attributes the portfolio's move to each of them.

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::performance_model::{HoldingPerformance, PortfolioPerformance};
use crate::constants::{TOP_PERFORMERS_COUNT, UNKNOWN_SECTOR};
use crate::portfolio::holdings::PositionPricing;
use crate::portfolio::valuation::Portfolio;

/// Signed share of the portfolio's total move attributed to one holding.
///
/// The magnitude is |gain| / |total gain| x 100; zero when the total gain
/// is exactly zero. The sign answers "did this holding help or hurt the
/// direction the portfolio actually moved": it is forced negative only
/// when the holding's gain opposes the total's sign. A holding that agrees
/// with the overall direction is never shown negative, even when both are
/// losses.
pub fn contribution_pct(gain: Decimal, total_gain: Decimal) -> Decimal {
    if total_gain.is_zero() {
        return Decimal::ZERO;
    }
    let magnitude = gain.abs() / total_gain.abs() * Decimal::ONE_HUNDRED;
    let opposes = (total_gain > Decimal::ZERO && gain < Decimal::ZERO)
        || (total_gain < Decimal::ZERO && gain > Decimal::ZERO);
    if opposes {
        -magnitude
    } else {
        magnitude
    }
}

/// Compute the performance breakdown of a priced portfolio.
///
/// Only positions with price data participate; unpriced positions have no
/// gain to attribute.
pub fn analyze_portfolio(portfolio: &Portfolio) -> PortfolioPerformance {
    if portfolio.positions.is_empty() {
        return PortfolioPerformance::default();
    }

    let total_gain = portfolio.total_unrealized_gain;

    let mut holdings: Vec<HoldingPerformance> = Vec::new();
    for position in &portfolio.positions {
        let (current_value, unrealized_gain, unrealized_gain_pct, weight_pct) =
            match &position.pricing {
                PositionPricing::Priced {
                    current_value,
                    unrealized_gain,
                    unrealized_gain_pct,
                    weight_pct,
                    ..
                } => (
                    *current_value,
                    *unrealized_gain,
                    unrealized_gain_pct.unwrap_or(Decimal::ZERO),
                    weight_pct.unwrap_or(Decimal::ZERO),
                ),
                PositionPricing::Unpriced => continue,
            };

        holdings.push(HoldingPerformance {
            symbol: position.symbol.clone(),
            current_value,
            cost_basis: position.total_cost_basis,
            unrealized_gain,
            unrealized_gain_pct,
            weight_pct,
            contribution_pct: contribution_pct(unrealized_gain, total_gain),
            sector: position.sector.clone(),
        });
    }

    holdings.sort_by(|a, b| b.unrealized_gain.cmp(&a.unrealized_gain));

    let top_gainers: Vec<HoldingPerformance> = holdings
        .iter()
        .filter(|h| h.unrealized_gain > Decimal::ZERO)
        .take(TOP_PERFORMERS_COUNT)
        .cloned()
        .collect();
    let top_losers: Vec<HoldingPerformance> = holdings
        .iter()
        .rev()
        .filter(|h| h.unrealized_gain < Decimal::ZERO)
        .take(TOP_PERFORMERS_COUNT)
        .cloned()
        .collect();

    let mut sector_gains: HashMap<String, Decimal> = HashMap::new();
    let mut sector_costs: HashMap<String, Decimal> = HashMap::new();
    for holding in &holdings {
        let sector = holding
            .sector
            .clone()
            .unwrap_or_else(|| UNKNOWN_SECTOR.to_string());
        *sector_gains.entry(sector.clone()).or_insert(Decimal::ZERO) += holding.unrealized_gain;
        *sector_costs.entry(sector).or_insert(Decimal::ZERO) += holding.cost_basis;
    }
    let sector_performance: HashMap<String, Decimal> = sector_gains
        .into_iter()
        .map(|(sector, gain)| {
            let cost = sector_costs.get(&sector).copied().unwrap_or(Decimal::ZERO);
            let return_pct = if cost > Decimal::ZERO {
                gain / cost * Decimal::ONE_HUNDRED
            } else {
                Decimal::ZERO
            };
            (sector, return_pct)
        })
        .collect();

    PortfolioPerformance {
        holdings,
        top_gainers,
        top_losers,
        total_value: portfolio.total_current_value,
        total_cost_basis: portfolio.total_cost_basis,
        total_gain,
        total_gain_pct: portfolio.total_unrealized_gain_pct,
        sector_performance,
    }
}

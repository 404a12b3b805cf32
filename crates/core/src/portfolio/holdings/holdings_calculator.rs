//! Groups valued lots into one aggregated position per symbol.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use lotfolio_market_data::SymbolQuote;

use super::holdings_model::{AggregatedPosition, PositionPricing};
use crate::portfolio::valuation::ValuedLot;

/// Build one [`AggregatedPosition`] per distinct symbol.
///
/// Total shares and cost basis are always computable from the ledger;
/// price-derived fields exist only for symbols with a usable quote.
/// Weights need the portfolio-wide priced value as denominator, so they
/// are filled in a second pass once all groups are built.
///
/// The result is sorted by current value descending with unpriced
/// positions last; input lot order (the ledger's symbol/date order) is
/// preserved within each position.
pub fn aggregate_lots(
    valued_lots: &[ValuedLot],
    quotes: &HashMap<String, SymbolQuote>,
) -> Vec<AggregatedPosition> {
    let mut groups: BTreeMap<String, Vec<ValuedLot>> = BTreeMap::new();
    for valued in valued_lots {
        groups
            .entry(valued.lot.symbol.clone())
            .or_default()
            .push(valued.clone());
    }

    let mut positions: Vec<AggregatedPosition> = Vec::with_capacity(groups.len());
    for (symbol, lots) in groups {
        let total_shares: Decimal = lots.iter().map(|l| l.lot.shares).sum();
        let total_cost_basis: Decimal = lots.iter().map(|l| l.cost_basis).sum();
        let average_cost = if total_shares > Decimal::ZERO {
            total_cost_basis / total_shares
        } else {
            Decimal::ZERO
        };

        let quote = quotes.get(&symbol);
        let sector = quote.and_then(|q| q.sector.clone());
        let industry = quote.and_then(|q| q.industry.clone());

        let pricing = match quote.and_then(|q| q.effective_price()) {
            Some(current_price) => {
                let current_value = total_shares * current_price;
                let unrealized_gain = current_value - total_cost_basis;
                let unrealized_gain_pct = if total_cost_basis > Decimal::ZERO {
                    Some(unrealized_gain / total_cost_basis * Decimal::ONE_HUNDRED)
                } else {
                    None
                };
                PositionPricing::Priced {
                    current_price,
                    current_value,
                    unrealized_gain,
                    unrealized_gain_pct,
                    weight_pct: None,
                }
            }
            None => PositionPricing::Unpriced,
        };

        positions.push(AggregatedPosition {
            symbol,
            total_shares,
            total_cost_basis,
            average_cost,
            pricing,
            sector,
            industry,
            lots,
        });
    }

    // Second pass: portfolio weights against the total priced value.
    let total_value: Decimal = positions.iter().filter_map(|p| p.current_value()).sum();
    if total_value > Decimal::ZERO {
        for position in &mut positions {
            if let PositionPricing::Priced {
                current_value,
                weight_pct,
                ..
            } = &mut position.pricing
            {
                *weight_pct = Some(*current_value / total_value * Decimal::ONE_HUNDRED);
            }
        }
    }

    positions.sort_by(|a, b| b.sort_value().cmp(&a.sort_value()));
    positions
}

//! Joins the lot ledger with best-effort quotes into a valued portfolio.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use rust_decimal::Decimal;

use lotfolio_market_data::{QuoteProvider, SymbolQuote};

use super::valuation_model::{DayChange, LotValuation, Portfolio, ValuedLot};
use crate::lots::{Lot, LotRepositoryTrait};
use crate::portfolio::holdings::{aggregate_lots, AggregatedPosition};
use crate::Result;

/// Contract for the valuation entry point.
#[async_trait]
pub trait ValuationServiceTrait: Send + Sync {
    /// Run a full valuation pass over the ledger.
    ///
    /// With `include_quotes` false the provider is skipped entirely and
    /// every position comes back `Unpriced`; cost-basis totals are still
    /// exact.
    async fn compute_portfolio(&self, include_quotes: bool) -> Result<Portfolio>;
}

/// Computes portfolios from the ledger and a quote provider.
pub struct ValuationService {
    lot_repository: Arc<dyn LotRepositoryTrait>,
    quote_provider: Arc<dyn QuoteProvider>,
}

impl ValuationService {
    pub fn new(
        lot_repository: Arc<dyn LotRepositoryTrait>,
        quote_provider: Arc<dyn QuoteProvider>,
    ) -> Self {
        Self {
            lot_repository,
            quote_provider,
        }
    }

    /// Fetch quotes sequentially, one call per distinct symbol.
    ///
    /// A provider failure degrades that symbol to unpriced; it never
    /// aborts the batch. This is the engine's only failure-isolation
    /// mechanism.
    async fn collect_quotes(&self, symbols: &BTreeSet<String>) -> HashMap<String, SymbolQuote> {
        let mut quotes = HashMap::with_capacity(symbols.len());
        for symbol in symbols {
            match self.quote_provider.get_quote(symbol).await {
                Ok(quote) => {
                    quotes.insert(symbol.clone(), quote);
                }
                Err(e) => warn!("Quote lookup failed for {}: {}", symbol, e),
            }
        }
        quotes
    }
}

#[async_trait]
impl ValuationServiceTrait for ValuationService {
    async fn compute_portfolio(&self, include_quotes: bool) -> Result<Portfolio> {
        let lots = self.lot_repository.get_lots()?;
        if lots.is_empty() {
            return Ok(Portfolio::empty());
        }

        let symbols: BTreeSet<String> = lots.iter().map(|l| l.symbol.clone()).collect();
        let quotes = if include_quotes {
            self.collect_quotes(&symbols).await
        } else {
            HashMap::new()
        };
        debug!(
            "Valuing {} lots across {} symbols ({} quoted)",
            lots.len(),
            symbols.len(),
            quotes.len()
        );

        let valued_lots = value_lots(&lots, &quotes);
        let positions = aggregate_lots(&valued_lots, &quotes);
        Ok(build_portfolio(valued_lots, positions))
    }
}

/// Annotate each lot with its own valuation against the quote map.
pub fn value_lots(lots: &[Lot], quotes: &HashMap<String, SymbolQuote>) -> Vec<ValuedLot> {
    lots.iter()
        .map(|lot| {
            let cost_basis = lot.cost_basis();
            let quote = quotes.get(&lot.symbol);

            let valuation = match quote.and_then(|q| q.effective_price()) {
                Some(current_price) => {
                    let current_value = lot.shares * current_price;
                    let unrealized_gain = current_value - cost_basis;
                    let unrealized_gain_pct = if cost_basis > Decimal::ZERO {
                        unrealized_gain / cost_basis * Decimal::ONE_HUNDRED
                    } else {
                        Decimal::ZERO
                    };
                    let day_change =
                        quote
                            .and_then(|q| q.effective_previous_close())
                            .map(|previous_close| DayChange {
                                amount: (current_price - previous_close) * lot.shares,
                                pct: (current_price - previous_close) / previous_close
                                    * Decimal::ONE_HUNDRED,
                            });
                    LotValuation::Priced {
                        current_price,
                        current_value,
                        unrealized_gain,
                        unrealized_gain_pct,
                        day_change,
                    }
                }
                None => LotValuation::Unpriced,
            };

            ValuedLot {
                lot: lot.clone(),
                cost_basis,
                valuation,
            }
        })
        .collect()
}

/// Roll valued lots and aggregated positions into portfolio-wide totals.
pub fn build_portfolio(
    valued_lots: Vec<ValuedLot>,
    positions: Vec<AggregatedPosition>,
) -> Portfolio {
    let total_cost_basis: Decimal = valued_lots.iter().map(|l| l.cost_basis).sum();
    let total_current_value: Decimal = valued_lots.iter().filter_map(|l| l.current_value()).sum();
    let total_unrealized_gain = total_current_value - total_cost_basis;
    let total_unrealized_gain_pct = if total_cost_basis > Decimal::ZERO {
        total_unrealized_gain / total_cost_basis * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    let total_day_change: Decimal = valued_lots
        .iter()
        .filter_map(|l| l.day_change().map(|d| d.amount))
        .sum();
    // The day move is normalized against the portfolio's value before it.
    let base_value = total_current_value - total_day_change;
    let total_day_change_pct = if base_value > Decimal::ZERO {
        total_day_change / base_value * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    let mut sector_allocation: HashMap<String, Decimal> = HashMap::new();
    if total_current_value > Decimal::ZERO {
        for position in &positions {
            if let (Some(sector), Some(value)) =
                (position.sector.as_ref(), position.current_value())
            {
                *sector_allocation
                    .entry(sector.clone())
                    .or_insert(Decimal::ZERO) +=
                    value / total_current_value * Decimal::ONE_HUNDRED;
            }
        }
    }

    let unpriced_symbols: Vec<String> = positions
        .iter()
        .filter(|p| !p.is_priced())
        .map(|p| p.symbol.clone())
        .collect();

    Portfolio {
        lot_count: valued_lots.len(),
        symbol_count: positions.len(),
        lots: valued_lots,
        positions,
        total_cost_basis,
        total_current_value,
        total_unrealized_gain,
        total_unrealized_gain_pct,
        total_day_change,
        total_day_change_pct,
        sector_allocation,
        unpriced_symbols,
        as_of: Utc::now(),
    }
}

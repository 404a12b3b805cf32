#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use lotfolio_market_data::{MarketDataError, QuoteProvider, SymbolQuote};

    use crate::lots::{Lot, LotRepositoryTrait, LotUpdate, NewLot};
    use crate::portfolio::valuation::{ValuationService, ValuationServiceTrait};
    use crate::errors::{Error, Result};

    // --- Mock lot repository ---

    struct MockLotRepository {
        lots: Vec<Lot>,
    }

    impl MockLotRepository {
        fn new(mut lots: Vec<Lot>) -> Self {
            lots.sort_by(|a, b| {
                (a.symbol.as_str(), a.purchase_date).cmp(&(b.symbol.as_str(), b.purchase_date))
            });
            Self { lots }
        }
    }

    #[async_trait]
    impl LotRepositoryTrait for MockLotRepository {
        fn get_lot(&self, lot_id: &str) -> Result<Lot> {
            self.lots
                .iter()
                .find(|l| l.id == lot_id)
                .cloned()
                .ok_or_else(|| Error::NotFound(format!("Lot {} not found", lot_id)))
        }

        fn get_lots(&self) -> Result<Vec<Lot>> {
            Ok(self.lots.clone())
        }

        fn get_lots_by_symbol(&self, symbol: &str) -> Result<Vec<Lot>> {
            Ok(self
                .lots
                .iter()
                .filter(|l| l.symbol == symbol)
                .cloned()
                .collect())
        }

        async fn create_lot(&self, _new_lot: NewLot) -> Result<Lot> {
            unimplemented!()
        }

        async fn update_lot(&self, _update: LotUpdate) -> Result<Lot> {
            unimplemented!()
        }

        async fn delete_lot(&self, _lot_id: &str) -> Result<bool> {
            unimplemented!()
        }
    }

    // --- Mock quote provider ---

    struct MockQuoteProvider {
        quotes: HashMap<String, SymbolQuote>,
        failures: HashSet<String>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl MockQuoteProvider {
        fn new(quotes: Vec<SymbolQuote>) -> Self {
            Self {
                quotes: quotes
                    .into_iter()
                    .map(|q| (q.symbol.clone(), q))
                    .collect(),
                failures: HashSet::new(),
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn failing_for(mut self, symbol: &str) -> Self {
            self.failures.insert(symbol.to_string());
            self
        }
    }

    #[async_trait]
    impl QuoteProvider for MockQuoteProvider {
        fn id(&self) -> &'static str {
            "MOCK"
        }

        async fn get_quote(&self, symbol: &str) -> std::result::Result<SymbolQuote, MarketDataError> {
            self.calls.lock().unwrap().push(symbol.to_string());
            if self.failures.contains(symbol) {
                return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
            }
            Ok(self
                .quotes
                .get(symbol)
                .cloned()
                .unwrap_or_else(|| SymbolQuote::empty(symbol)))
        }
    }

    // --- Fixtures ---

    fn lot(id: &str, symbol: &str, shares: Decimal, price: Decimal) -> Lot {
        Lot {
            id: id.to_string(),
            symbol: symbol.to_string(),
            shares,
            purchase_price: price,
            purchase_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn quote(
        symbol: &str,
        price: Decimal,
        previous_close: Option<Decimal>,
        sector: Option<&str>,
    ) -> SymbolQuote {
        SymbolQuote {
            current_price: Some(price),
            previous_close,
            sector: sector.map(|s| s.to_string()),
            ..SymbolQuote::empty(symbol)
        }
    }

    fn service(lots: Vec<Lot>, provider: MockQuoteProvider) -> ValuationService {
        ValuationService::new(Arc::new(MockLotRepository::new(lots)), Arc::new(provider))
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_single_priced_lot_portfolio() {
        let service = service(
            vec![lot("1", "AAPL", dec!(10), dec!(50))],
            MockQuoteProvider::new(vec![quote("AAPL", dec!(60), None, None)]),
        );

        let portfolio = service.compute_portfolio(true).await.unwrap();
        assert_eq!(portfolio.total_cost_basis, dec!(500));
        assert_eq!(portfolio.total_current_value, dec!(600));
        assert_eq!(portfolio.total_unrealized_gain, dec!(100));
        assert_eq!(portfolio.total_unrealized_gain_pct, dec!(20));
        assert_eq!(portfolio.lot_count, 1);
        assert_eq!(portfolio.symbol_count, 1);
        assert!(portfolio.unpriced_symbols.is_empty());
    }

    #[tokio::test]
    async fn test_empty_ledger_yields_zero_totals() {
        let service = service(vec![], MockQuoteProvider::new(vec![]));

        let portfolio = service.compute_portfolio(true).await.unwrap();
        assert_eq!(portfolio.total_cost_basis, Decimal::ZERO);
        assert_eq!(portfolio.total_unrealized_gain_pct, Decimal::ZERO);
        assert_eq!(portfolio.lot_count, 0);
        assert!(portfolio.positions.is_empty());
    }

    #[tokio::test]
    async fn test_provider_failure_degrades_only_that_symbol() {
        let service = service(
            vec![
                lot("1", "AAPL", dec!(10), dec!(50)),
                lot("2", "FAIL", dec!(4), dec!(25)),
            ],
            MockQuoteProvider::new(vec![quote("AAPL", dec!(60), None, None)])
                .failing_for("FAIL"),
        );

        let portfolio = service.compute_portfolio(true).await.unwrap();
        // The failed symbol's cost basis still counts; its value does not.
        assert_eq!(portfolio.total_cost_basis, dec!(600));
        assert_eq!(portfolio.total_current_value, dec!(600));
        assert_eq!(portfolio.unpriced_symbols, vec!["FAIL".to_string()]);

        let fail_position = portfolio
            .positions
            .iter()
            .find(|p| p.symbol == "FAIL")
            .unwrap();
        assert!(!fail_position.is_priced());
        assert_eq!(fail_position.total_cost_basis, dec!(100));
    }

    #[tokio::test]
    async fn test_every_symbol_unpriced_still_returns_portfolio() {
        let service = service(
            vec![
                lot("1", "AAA", dec!(1), dec!(10)),
                lot("2", "BBB", dec!(2), dec!(20)),
            ],
            MockQuoteProvider::new(vec![]).failing_for("AAA").failing_for("BBB"),
        );

        let portfolio = service.compute_portfolio(true).await.unwrap();
        assert_eq!(portfolio.total_cost_basis, dec!(50));
        assert_eq!(portfolio.total_current_value, Decimal::ZERO);
        assert_eq!(portfolio.total_unrealized_gain, dec!(-50));
        assert_eq!(portfolio.unpriced_symbols.len(), 2);
        assert!(portfolio.sector_allocation.is_empty());
    }

    #[tokio::test]
    async fn test_quotes_fetched_once_per_distinct_symbol() {
        let provider = MockQuoteProvider::new(vec![quote("AAPL", dec!(60), None, None)]);
        let calls = provider.calls.clone();
        let service = service(
            vec![
                lot("1", "AAPL", dec!(1), dec!(10)),
                lot("2", "AAPL", dec!(2), dec!(20)),
                lot("3", "AAPL", dec!(3), dec!(30)),
            ],
            provider,
        );

        service.compute_portfolio(true).await.unwrap();
        assert_eq!(calls.lock().unwrap().as_slice(), ["AAPL".to_string()]);
    }

    #[tokio::test]
    async fn test_skipping_quotes_skips_the_provider() {
        let provider = MockQuoteProvider::new(vec![quote("AAPL", dec!(60), None, None)]);
        let calls = provider.calls.clone();
        let service = service(vec![lot("1", "AAPL", dec!(10), dec!(50))], provider);

        let portfolio = service.compute_portfolio(false).await.unwrap();
        assert!(calls.lock().unwrap().is_empty());
        assert_eq!(portfolio.total_cost_basis, dec!(500));
        assert_eq!(portfolio.total_current_value, Decimal::ZERO);
        assert_eq!(portfolio.unpriced_symbols, vec!["AAPL".to_string()]);
    }

    #[tokio::test]
    async fn test_day_change_totals() {
        // AAPL: (60 - 58) x 10 = 20. MSFT has no previous close: contributes 0.
        let service = service(
            vec![
                lot("1", "AAPL", dec!(10), dec!(50)),
                lot("2", "MSFT", dec!(2), dec!(100)),
            ],
            MockQuoteProvider::new(vec![
                quote("AAPL", dec!(60), Some(dec!(58)), None),
                quote("MSFT", dec!(200), None, None),
            ]),
        );

        let portfolio = service.compute_portfolio(true).await.unwrap();
        assert_eq!(portfolio.total_day_change, dec!(20));
        // 20 / (1000 - 20) x 100
        let expected = dec!(20) / dec!(980) * dec!(100);
        assert_eq!(portfolio.total_day_change_pct, expected);
    }

    #[tokio::test]
    async fn test_sector_allocation_requires_sector_and_price() {
        let service = service(
            vec![
                lot("1", "AAPL", dec!(10), dec!(50)),   // priced, Technology
                lot("2", "MSFT", dec!(2), dec!(100)),   // priced, no sector
                lot("3", "ZZZ", dec!(5), dec!(10)),     // unpriced, sector from profile
            ],
            MockQuoteProvider::new(vec![
                quote("AAPL", dec!(60), None, Some("Technology")),
                quote("MSFT", dec!(200), None, None),
                SymbolQuote {
                    sector: Some("Energy".to_string()),
                    ..SymbolQuote::empty("ZZZ")
                },
            ]),
        );

        let portfolio = service.compute_portfolio(true).await.unwrap();
        assert_eq!(portfolio.sector_allocation.len(), 1);
        // 600 of 1000 total value.
        assert_eq!(
            portfolio.sector_allocation.get("Technology"),
            Some(&dec!(60))
        );
    }

    #[tokio::test]
    async fn test_portfolio_totals_match_lot_sums() {
        let service = service(
            vec![
                lot("1", "AAPL", dec!(2.5), dec!(101.13)),
                lot("2", "AAPL", dec!(4), dec!(98.07)),
                lot("3", "ZZZ", dec!(3), dec!(7.5)),
            ],
            MockQuoteProvider::new(vec![quote("AAPL", dec!(120), None, None)]).failing_for("ZZZ"),
        );

        let portfolio = service.compute_portfolio(true).await.unwrap();

        let lot_cost: Decimal = portfolio.lots.iter().map(|l| l.cost_basis).sum();
        assert_eq!(portfolio.total_cost_basis, lot_cost);

        let position_value: Decimal = portfolio
            .positions
            .iter()
            .filter_map(|p| p.current_value())
            .sum();
        assert_eq!(portfolio.total_current_value, position_value);
    }
}

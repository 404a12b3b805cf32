#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;

    use crate::errors::{Error, Result};
    use crate::lots::{Lot, LotRepositoryTrait, LotService, LotServiceTrait, LotUpdate, NewLot};

    /// In-memory repository keeping lots in (symbol, purchase date) order.
    struct MockLotRepository {
        lots: Arc<Mutex<Vec<Lot>>>,
        next_id: Arc<Mutex<u32>>,
    }

    impl MockLotRepository {
        fn new() -> Self {
            Self {
                lots: Arc::new(Mutex::new(Vec::new())),
                next_id: Arc::new(Mutex::new(1)),
            }
        }
    }

    #[async_trait]
    impl LotRepositoryTrait for MockLotRepository {
        fn get_lot(&self, lot_id: &str) -> Result<Lot> {
            self.lots
                .lock()
                .unwrap()
                .iter()
                .find(|l| l.id == lot_id)
                .cloned()
                .ok_or_else(|| Error::NotFound(format!("Lot {} not found", lot_id)))
        }

        fn get_lots(&self) -> Result<Vec<Lot>> {
            let mut lots = self.lots.lock().unwrap().clone();
            lots.sort_by(|a, b| {
                (a.symbol.as_str(), a.purchase_date).cmp(&(b.symbol.as_str(), b.purchase_date))
            });
            Ok(lots)
        }

        fn get_lots_by_symbol(&self, symbol: &str) -> Result<Vec<Lot>> {
            let mut lots: Vec<Lot> = self
                .lots
                .lock()
                .unwrap()
                .iter()
                .filter(|l| l.symbol == symbol)
                .cloned()
                .collect();
            lots.sort_by_key(|l| l.purchase_date);
            Ok(lots)
        }

        async fn create_lot(&self, new_lot: NewLot) -> Result<Lot> {
            let mut next_id = self.next_id.lock().unwrap();
            let lot = Lot {
                id: format!("lot-{}", *next_id),
                symbol: new_lot.symbol,
                shares: new_lot.shares,
                purchase_price: new_lot.purchase_price,
                purchase_date: new_lot.purchase_date,
                notes: new_lot.notes,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            *next_id += 1;
            self.lots.lock().unwrap().push(lot.clone());
            Ok(lot)
        }

        async fn update_lot(&self, update: LotUpdate) -> Result<Lot> {
            let mut lots = self.lots.lock().unwrap();
            let lot = lots
                .iter_mut()
                .find(|l| l.id == update.id)
                .ok_or_else(|| Error::NotFound(format!("Lot {} not found", update.id)))?;
            if let Some(shares) = update.shares {
                lot.shares = shares;
            }
            if let Some(notes) = update.notes {
                lot.notes = Some(notes);
            }
            lot.updated_at = Utc::now();
            Ok(lot.clone())
        }

        async fn delete_lot(&self, lot_id: &str) -> Result<bool> {
            let mut lots = self.lots.lock().unwrap();
            let before = lots.len();
            lots.retain(|l| l.id != lot_id);
            Ok(lots.len() < before)
        }
    }

    fn service() -> LotService {
        LotService::new(Arc::new(MockLotRepository::new()))
    }

    fn new_lot(symbol: &str, day: u32) -> NewLot {
        NewLot {
            symbol: symbol.to_string(),
            shares: dec!(10),
            purchase_price: dec!(50),
            purchase_date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_add_lot_assigns_identity_and_canonicalizes() {
        let service = service();
        let lot = service.add_lot(new_lot(" aapl ", 5)).await.unwrap();
        assert_eq!(lot.symbol, "AAPL");
        assert!(!lot.id.is_empty());
    }

    #[tokio::test]
    async fn test_add_lot_rejects_invalid_input() {
        let service = service();

        let mut bad_shares = new_lot("AAPL", 5);
        bad_shares.shares = dec!(0);
        assert!(matches!(
            service.add_lot(bad_shares).await,
            Err(Error::Validation(_))
        ));

        let mut bad_symbol = new_lot("not a ticker", 5);
        bad_symbol.symbol = "not a ticker".to_string();
        assert!(matches!(
            service.add_lot(bad_symbol).await,
            Err(Error::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_get_lots_is_ordered_by_symbol_then_date() {
        let service = service();
        service.add_lot(new_lot("MSFT", 10)).await.unwrap();
        service.add_lot(new_lot("AAPL", 20)).await.unwrap();
        service.add_lot(new_lot("AAPL", 5)).await.unwrap();

        let lots = service.get_lots().unwrap();
        let keys: Vec<(String, u32)> = lots
            .iter()
            .map(|l| {
                (
                    l.symbol.clone(),
                    l.purchase_date.format("%d").to_string().parse().unwrap(),
                )
            })
            .collect();
        assert_eq!(
            keys,
            vec![
                ("AAPL".to_string(), 5),
                ("AAPL".to_string(), 20),
                ("MSFT".to_string(), 10),
            ]
        );
    }

    #[tokio::test]
    async fn test_get_lots_by_symbol_canonicalizes_input() {
        let service = service();
        service.add_lot(new_lot("AAPL", 5)).await.unwrap();

        let lots = service.get_lots_by_symbol(" aapl ").unwrap();
        assert_eq!(lots.len(), 1);
    }

    #[tokio::test]
    async fn test_update_lot_applies_given_fields_only() {
        let service = service();
        let lot = service.add_lot(new_lot("AAPL", 5)).await.unwrap();

        let updated = service
            .update_lot(LotUpdate {
                id: lot.id.clone(),
                shares: Some(dec!(25)),
                notes: None,
            })
            .await
            .unwrap();

        assert_eq!(updated.shares, dec!(25));
        assert_eq!(updated.purchase_price, lot.purchase_price);
    }

    #[tokio::test]
    async fn test_update_lot_with_no_fields_fails() {
        let service = service();
        let lot = service.add_lot(new_lot("AAPL", 5)).await.unwrap();

        let result = service
            .update_lot(LotUpdate {
                id: lot.id,
                shares: None,
                notes: None,
            })
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_unknown_lot_surfaces_not_found() {
        let service = service();
        let result = service
            .update_lot(LotUpdate {
                id: "missing".to_string(),
                shares: Some(dec!(1)),
                notes: None,
            })
            .await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_remove_lot_reports_found_flag() {
        let service = service();
        let lot = service.add_lot(new_lot("AAPL", 5)).await.unwrap();

        assert!(service.remove_lot(&lot.id).await.unwrap());
        assert!(!service.remove_lot(&lot.id).await.unwrap());
    }
}

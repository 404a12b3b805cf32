//! Lot domain models.

use chrono::{DateTime, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::LONG_TERM_HOLDING_DAYS;
use crate::errors::{Result, ValidationError};

lazy_static! {
    /// 1-5 letters with an optional class suffix (BRK.A, BF-B).
    static ref SYMBOL_PATTERN: Regex = Regex::new(r"^[A-Z]{1,5}([.-][A-Z]{1,2})?$").unwrap();
}

/// Normalize a user-supplied symbol to its canonical form: trimmed and
/// uppercased. Applied on every write and read-by-symbol.
pub fn canonical_symbol(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Check a canonical symbol against the accepted ticker format.
pub fn validate_symbol(symbol: &str) -> Result<()> {
    if SYMBOL_PATTERN.is_match(symbol) {
        Ok(())
    } else {
        Err(ValidationError::InvalidSymbol(symbol.to_string()).into())
    }
}

/// One discrete purchase of shares at a specific price and date.
///
/// Owned exclusively by the lot ledger and mutated only through ledger
/// operations. Cost basis and holding period are derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lot {
    pub id: String,
    pub symbol: String,
    pub shares: Decimal,
    pub purchase_price: Decimal,
    pub purchase_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lot {
    /// Shares times purchase price per share.
    pub fn cost_basis(&self) -> Decimal {
        self.shares * self.purchase_price
    }

    /// Days elapsed since purchase.
    pub fn holding_period_days(&self) -> i64 {
        (Utc::now().date_naive() - self.purchase_date).num_days()
    }

    /// Whether the lot qualifies for long-term capital gains treatment.
    pub fn is_long_term(&self) -> bool {
        self.holding_period_days() > LONG_TERM_HOLDING_DAYS
    }
}

/// Input model for creating a lot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLot {
    pub symbol: String,
    pub shares: Decimal,
    pub purchase_price: Decimal,
    pub purchase_date: NaiveDate,
    pub notes: Option<String>,
}

impl NewLot {
    /// Canonicalize the symbol and enforce every record-level invariant:
    /// positive shares and price, purchase date not in the future.
    pub fn validate(&mut self) -> Result<()> {
        self.symbol = canonical_symbol(&self.symbol);
        validate_symbol(&self.symbol)?;

        if self.shares <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveShares(self.shares).into());
        }
        if self.purchase_price <= Decimal::ZERO {
            return Err(ValidationError::NonPositivePrice(self.purchase_price).into());
        }
        if self.purchase_date > Utc::now().date_naive() {
            return Err(ValidationError::FutureDate(self.purchase_date).into());
        }
        Ok(())
    }
}

/// Partial update for an existing lot. `None` fields are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotUpdate {
    pub id: String,
    pub shares: Option<Decimal>,
    pub notes: Option<String>,
}

impl LotUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.shares.is_none() && self.notes.is_none() {
            return Err(ValidationError::EmptyUpdate.into());
        }
        if let Some(shares) = self.shares {
            if shares <= Decimal::ZERO {
                return Err(ValidationError::NonPositiveShares(shares).into());
            }
        }
        Ok(())
    }
}

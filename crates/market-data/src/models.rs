//! Shared market data models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Best-effort market data for a single symbol.
///
/// Every field other than `symbol` depends on what the upstream source
/// returned. Consumers must branch on the presence of price data rather
/// than substituting zero: a missing price means "unpriced", not worthless.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolQuote {
    pub symbol: String,

    /// Latest trading price, if the provider returned one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_price: Option<Decimal>,

    /// Previous session's closing price, used for day-change math.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_close: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Timestamp of the price data, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_of: Option<DateTime<Utc>>,
}

impl SymbolQuote {
    /// A quote carrying no market data at all.
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            current_price: None,
            previous_close: None,
            sector: None,
            industry: None,
            currency: None,
            as_of: None,
        }
    }

    /// The price usable for valuation: present and strictly positive.
    pub fn effective_price(&self) -> Option<Decimal> {
        self.current_price.filter(|p| *p > Decimal::ZERO)
    }

    /// The previous close usable for day-change math: present and positive.
    pub fn effective_previous_close(&self) -> Option<Decimal> {
        self.previous_close.filter(|p| *p > Decimal::ZERO)
    }
}

/// One hit from a symbol search.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolSearchResult {
    pub symbol: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_type: Option<String>,
}

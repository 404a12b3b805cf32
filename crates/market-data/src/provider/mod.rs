//! Quote provider contract and implementations.

mod yahoo;

pub use yahoo::YahooProvider;

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{SymbolQuote, SymbolSearchResult};

/// Source of per-symbol market data.
///
/// Implementations fail independently per symbol: an error from
/// [`get_quote`](Self::get_quote) describes that symbol only, and callers
/// valuing a whole portfolio downgrade it to an unpriced position instead
/// of propagating it.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and errors.
    fn id(&self) -> &'static str;

    /// Fetch a best-effort quote for one symbol.
    ///
    /// Any subset of the returned fields may be absent; a quote with no
    /// usable price is still a valid response.
    async fn get_quote(&self, symbol: &str) -> Result<SymbolQuote, MarketDataError>;

    /// Search for symbols matching the query.
    ///
    /// Default implementation reports the operation as unsupported.
    async fn search(&self, query: &str) -> Result<Vec<SymbolSearchResult>, MarketDataError> {
        let _ = query;
        Err(MarketDataError::NotSupported {
            operation: "search".to_string(),
            provider: self.id().to_string(),
        })
    }
}

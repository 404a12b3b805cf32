//! Yahoo Finance quote provider.
//!
//! Price data (latest and previous daily close) comes from the chart API
//! via the `yahoo_finance_api` connector. Company classification
//! (sector/industry) comes from the `quoteSummary` endpoint, which requires
//! crumb/cookie authentication; the crumb is fetched lazily and cached
//! process-wide. Symbol search goes through the public search endpoint.
//!
//! Every outbound request first acquires a slot from the injected
//! [`RateLimiter`].

mod models;

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use lazy_static::lazy_static;
use log::warn;
use reqwest::header;
use rust_decimal::Decimal;
use urlencoding::encode;
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::{SymbolQuote, SymbolSearchResult};
use crate::provider::QuoteProvider;
use crate::rate_limiter::RateLimiter;

use models::{YahooQuoteSummaryResponse, YahooSearchResponse};

const PROVIDER_ID: &str = "YAHOO";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Maximum number of search hits returned.
const SEARCH_LIMIT: usize = 8;

/// Cached Yahoo authentication data.
#[derive(Debug, Clone)]
struct CrumbData {
    cookie: String,
    crumb: String,
}

lazy_static! {
    /// Process-wide cache for the Yahoo authentication crumb.
    static ref YAHOO_CRUMB: RwLock<Option<CrumbData>> = RwLock::default();
}

/// Yahoo Finance implementation of [`QuoteProvider`].
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
    rate_limiter: Arc<RateLimiter>,
}

impl YahooProvider {
    pub fn new(rate_limiter: Arc<RateLimiter>) -> Result<Self, MarketDataError> {
        let connector =
            yahoo::YahooConnector::new().map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to initialize Yahoo connector: {}", e),
            })?;
        Ok(Self {
            connector,
            rate_limiter,
        })
    }

    fn provider_error(message: String) -> MarketDataError {
        MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message,
        }
    }

    // ------------------------------------------------------------------
    // Crumb/cookie authentication
    // ------------------------------------------------------------------

    async fn ensure_crumb(&self) -> Result<CrumbData, MarketDataError> {
        {
            let guard = YAHOO_CRUMB.read().unwrap_or_else(|p| p.into_inner());
            if let Some(crumb) = guard.as_ref() {
                return Ok(crumb.clone());
            }
        }
        self.fetch_crumb().await
    }

    async fn fetch_crumb(&self) -> Result<CrumbData, MarketDataError> {
        let client = reqwest::Client::new();

        let response = client
            .get("https://fc.yahoo.com")
            .send()
            .await
            .map_err(|e| Self::provider_error(format!("Failed to get cookie: {}", e)))?;

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split_once(';').map(|(v, _)| v.to_string()))
            .ok_or_else(|| Self::provider_error("Failed to parse Yahoo cookie".to_string()))?;

        let crumb = client
            .get("https://query1.finance.yahoo.com/v1/test/getcrumb")
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::COOKIE, &cookie)
            .send()
            .await
            .map_err(|e| Self::provider_error(format!("Failed to get crumb: {}", e)))?
            .text()
            .await
            .map_err(|e| Self::provider_error(format!("Failed to read crumb: {}", e)))?;

        let crumb_data = CrumbData { cookie, crumb };

        let mut guard = YAHOO_CRUMB.write().unwrap_or_else(|p| p.into_inner());
        *guard = Some(crumb_data.clone());

        Ok(crumb_data)
    }

    /// Clear the cached crumb after an authentication failure.
    fn clear_crumb(&self) {
        let mut guard = YAHOO_CRUMB.write().unwrap_or_else(|p| p.into_inner());
        *guard = None;
    }

    // ------------------------------------------------------------------
    // Price data
    // ------------------------------------------------------------------

    /// Fetch the latest close, the previous session's close, and the quote
    /// timestamp from the trailing daily range.
    async fn fetch_daily_closes(
        &self,
        symbol: &str,
    ) -> Result<(Option<Decimal>, Option<Decimal>, Option<DateTime<Utc>>), MarketDataError> {
        let response = self
            .connector
            .get_quote_range(symbol, "1d", "5d")
            .await
            .map_err(|e| {
                if matches!(e, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
                    MarketDataError::SymbolNotFound(symbol.to_string())
                } else {
                    Self::provider_error(e.to_string())
                }
            })?;

        let quotes = response
            .quotes()
            .map_err(|_| MarketDataError::SymbolNotFound(symbol.to_string()))?;

        let last = quotes
            .last()
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

        let current_price = Decimal::from_f64_retain(last.close);
        let previous_close = quotes
            .len()
            .checked_sub(2)
            .and_then(|i| quotes.get(i))
            .and_then(|q| Decimal::from_f64_retain(q.close));
        let as_of = Utc.timestamp_opt(last.timestamp as i64, 0).single();

        Ok((current_price, previous_close, as_of))
    }

    // ------------------------------------------------------------------
    // Classification data
    // ------------------------------------------------------------------

    /// Fetch sector, industry, and currency from `quoteSummary`.
    async fn fetch_profile(
        &self,
        symbol: &str,
    ) -> Result<(Option<String>, Option<String>, Option<String>), MarketDataError> {
        let crumb = self.ensure_crumb().await?;

        let url = format!(
            "https://query1.finance.yahoo.com/v10/finance/quoteSummary/{}?modules=price,summaryProfile&crumb={}",
            encode(symbol),
            encode(&crumb.crumb)
        );

        let client = reqwest::Client::new();
        let response = client
            .get(&url)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::COOKIE, &crumb.cookie)
            .send()
            .await
            .map_err(|e| Self::provider_error(format!("Profile request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            self.clear_crumb();
            return Err(Self::provider_error(
                "Yahoo authentication expired".to_string(),
            ));
        }

        let data: YahooQuoteSummaryResponse = response
            .json()
            .await
            .map_err(|e| Self::provider_error(format!("Failed to parse profile: {}", e)))?;

        let result = data
            .quote_summary
            .result
            .first()
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

        let summary = result.summary_profile.as_ref();
        let sector = summary
            .and_then(|s| s.sector.as_ref())
            .map(|s| format_sector(s));
        let industry = summary.and_then(|s| s.industry.clone());
        let currency = result.price.as_ref().and_then(|p| p.currency.clone());

        Ok((sector, industry, currency))
    }
}

#[async_trait]
impl QuoteProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_quote(&self, symbol: &str) -> Result<SymbolQuote, MarketDataError> {
        self.rate_limiter.acquire().await;

        let (current_price, previous_close, as_of) = self.fetch_daily_closes(symbol).await?;

        // Classification is best-effort: a profile failure must not cost
        // the caller the price it already has.
        let (sector, industry, currency) = match self.fetch_profile(symbol).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!("Profile lookup failed for {}: {}", symbol, e);
                (None, None, None)
            }
        };

        Ok(SymbolQuote {
            symbol: symbol.to_string(),
            current_price,
            previous_close,
            sector,
            industry,
            currency,
            as_of,
        })
    }

    async fn search(&self, query: &str) -> Result<Vec<SymbolSearchResult>, MarketDataError> {
        self.rate_limiter.acquire().await;

        let client = reqwest::Client::new();
        let response = client
            .get("https://query2.finance.yahoo.com/v1/finance/search")
            .query(&[
                ("q", query),
                ("quotesCount", "8"),
                ("newsCount", "0"),
                ("listsCount", "0"),
                ("enableFuzzyQuery", "true"),
                ("quotesQueryId", "tss_match_phrase_query"),
            ])
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| Self::provider_error(format!("Search request failed: {}", e)))?;

        let data: YahooSearchResponse = response
            .json()
            .await
            .map_err(|e| Self::provider_error(format!("Failed to parse search response: {}", e)))?;

        Ok(data
            .quotes
            .into_iter()
            .filter(|q| matches!(q.quote_type.as_str(), "EQUITY" | "ETF"))
            .filter(|q| !q.symbol.is_empty())
            .take(SEARCH_LIMIT)
            .map(|q| {
                let name = q
                    .short_name
                    .or(q.long_name)
                    .unwrap_or_else(|| q.symbol.clone());
                SymbolSearchResult {
                    symbol: q.symbol,
                    name,
                    exchange: q.exchange,
                    quote_type: Some(q.quote_type),
                }
            })
            .collect())
    }
}

/// Convert snake_case sector identifiers to Title Case.
fn format_sector(sector: &str) -> String {
    sector
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

//! Market data access for the lotfolio engine.
//!
//! This crate owns everything that talks to the outside world for prices:
//! the [`QuoteProvider`] contract, the Yahoo Finance implementation, and
//! the sliding-window [`RateLimiter`] that gates outbound requests.
//!
//! Failures are scoped to a single symbol: a provider error for one symbol
//! must never be treated as fatal to a batch of lookups.

pub mod errors;
pub mod models;
pub mod provider;
pub mod rate_limiter;

pub use errors::MarketDataError;
pub use models::{SymbolQuote, SymbolSearchResult};
pub use provider::{QuoteProvider, YahooProvider};
pub use rate_limiter::RateLimiter;

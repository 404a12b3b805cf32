//! Error types for market data operations.

use thiserror::Error;

/// Errors that can occur while fetching market data.
///
/// Every variant is scoped to a single request; callers aggregating data
/// for several symbols should downgrade a failure to "no data for this
/// symbol" instead of aborting the batch.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested symbol was not found by the provider.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited { provider: String },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout { provider: String },

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError { provider: String, message: String },

    /// The provider returned data that failed validation checks.
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    /// The operation is not implemented by this provider.
    #[error("Operation '{operation}' not supported by provider {provider}")]
    NotSupported { operation: String, provider: String },
}

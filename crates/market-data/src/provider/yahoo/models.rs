//! Serde models for the Yahoo `quoteSummary` and search responses.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct YahooQuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    pub quote_summary: YahooQuoteSummary,
}

#[derive(Debug, Deserialize)]
pub struct YahooQuoteSummary {
    #[serde(default)]
    pub result: Vec<YahooQuoteSummaryResult>,
}

#[derive(Debug, Deserialize)]
pub struct YahooQuoteSummaryResult {
    #[serde(rename = "summaryProfile")]
    pub summary_profile: Option<YahooSummaryProfile>,
    pub price: Option<YahooPrice>,
}

#[derive(Debug, Deserialize)]
pub struct YahooSummaryProfile {
    pub sector: Option<String>,
    pub industry: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct YahooPrice {
    pub currency: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct YahooSearchResponse {
    #[serde(default)]
    pub quotes: Vec<YahooSearchQuote>,
}

#[derive(Debug, Deserialize)]
pub struct YahooSearchQuote {
    #[serde(default)]
    pub symbol: String,
    #[serde(rename = "shortname")]
    pub short_name: Option<String>,
    #[serde(rename = "longname")]
    pub long_name: Option<String>,
    pub exchange: Option<String>,
    #[serde(rename = "quoteType", default)]
    pub quote_type: String,
}

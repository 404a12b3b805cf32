//! Conversion helpers for TEXT-encoded columns.
//!
//! Decimals, dates, and timestamps are stored as TEXT. Loads parse
//! tolerantly: corrupt data is logged and replaced with a safe default
//! instead of failing the whole query.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

/// Parse a TEXT decimal column, falling back to zero on corrupt data.
pub(crate) fn parse_decimal(value: &str, field: &str) -> Decimal {
    Decimal::from_str(value).unwrap_or_else(|e| {
        log::error!(
            "Failed to parse {} '{}': {}. Falling back to ZERO.",
            field,
            value,
            e
        );
        Decimal::ZERO
    })
}

/// Parse a `%Y-%m-%d` TEXT date column.
pub(crate) fn parse_date(value: &str, field: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap_or_else(|e| {
        log::error!(
            "Failed to parse {} '{}': {}. Falling back to today.",
            field,
            value,
            e
        );
        Utc::now().date_naive()
    })
}

/// Parse an RFC 3339 TEXT timestamp column.
pub(crate) fn parse_timestamp(value: &str, field: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|e| {
            log::error!(
                "Failed to parse {} '{}': {}. Falling back to now.",
                field,
                value,
                e
            );
            Utc::now()
        })
}

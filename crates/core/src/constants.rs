/// Holding period, in days, beyond which a lot counts as long-term.
pub const LONG_TERM_HOLDING_DAYS: i64 = 365;

/// Number of holdings reported as top gainers and top losers.
pub const TOP_PERFORMERS_COUNT: usize = 5;

/// Default trailing window for portfolio history, in days.
pub const DEFAULT_HISTORY_DAYS: u32 = 90;

/// Sector bucket for holdings without classification data.
pub const UNKNOWN_SECTOR: &str = "Unknown";

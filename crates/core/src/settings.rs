//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_HISTORY_DAYS;

const DEFAULT_DB_PATH: &str = "data/portfolio.db";
const DEFAULT_QUOTE_REQUESTS_PER_MINUTE: u32 = 60;

/// Runtime configuration for an embedding application.
///
/// Values come from the environment, falling back to defaults suitable
/// for a single-user installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Path to the SQLite database file.
    pub db_path: String,
    /// Sliding-window budget for outbound quote requests.
    pub quote_requests_per_minute: u32,
    /// Trailing window used when no explicit history range is given.
    pub history_window_days: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.to_string(),
            quote_requests_per_minute: DEFAULT_QUOTE_REQUESTS_PER_MINUTE,
            history_window_days: DEFAULT_HISTORY_DAYS,
        }
    }
}

impl Settings {
    /// Read settings from `LOTFOLIO_*` environment variables.
    ///
    /// Unset or unparseable variables keep their defaults.
    pub fn from_env() -> Self {
        let defaults = Settings::default();
        Settings {
            db_path: std::env::var("LOTFOLIO_DB_PATH").unwrap_or(defaults.db_path),
            quote_requests_per_minute: env_u32("LOTFOLIO_QUOTE_REQUESTS_PER_MINUTE")
                .unwrap_or(defaults.quote_requests_per_minute),
            history_window_days: env_u32("LOTFOLIO_HISTORY_DAYS")
                .unwrap_or(defaults.history_window_days),
        }
    }
}

fn env_u32(key: &str) -> Option<u32> {
    std::env::var(key).ok().and_then(|raw| raw.parse().ok())
}

//! Quote payload returned by the quote endpoint.
//!
//! Field names follow the backend's camelCase JSON. `name` and `volume` are optional:
//! some backends send them, others do not.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time price snapshot for a single ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Upper-case ticker symbol (e.g., `AAPL`).
    pub symbol: String,
    /// Company name, when the backend knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Last traded price.
    pub price: f64,
    /// Absolute change against the previous close.
    pub change: f64,
    /// Relative change against the previous close, in percent.
    pub change_percent: f64,
    /// Session high.
    pub high: f64,
    /// Session low.
    pub low: f64,
    /// Session open.
    pub open: f64,
    /// Previous session close.
    pub previous_close: f64,
    /// Traded volume, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
    /// Quote time in seconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl Quote {
    /// `price - previous_close`; upstream `change` is expected to be close to this.
    pub fn implied_change(&self) -> f64 {
        self.price - self.previous_close
    }

    /// Quote time as a UTC date, if the backend sent a valid timestamp.
    pub fn quoted_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
    }
}

//! Backend endpoint layout and small helpers for building request URLs.

use url::Url;

use crate::error::StockError;

/// Backend address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
/// Environment variable that overrides the backend address.
pub const BASE_URL_ENV: &str = "STOCKSTREAM_API_URL";
/// News look-back window in days when the caller does not pick one.
pub const DEFAULT_NEWS_DAYS: u32 = 7;

/// `GET {base}/api/stocks/quote/{SYMBOL}`
pub const QUOTE_PATH: &[&str] = &["api", "stocks", "quote"];
/// `GET {base}/api/stocks/news/{SYMBOL}?days={N}`
pub const NEWS_PATH: &[&str] = &["api", "stocks", "news"];
/// `GET {base}/api/stocks/search?q={query}`
pub const SEARCH_PATH: &[&str] = &["api", "stocks", "search"];
/// `GET {base}/health`
pub const HEALTH_PATH: &[&str] = &["health"];

/// Parse a base URL, rejecting ones that cannot carry a path (e.g. `mailto:`).
pub fn parse_base_url(raw: &str) -> Result<Url, StockError> {
    let url = Url::parse(raw.trim())?;
    if url.cannot_be_a_base() {
        return Err(StockError::InvalidBaseUrl(raw.to_string()));
    }
    Ok(url)
}

/// Append percent-encoded path `segments` to `base`.
///
/// A trailing slash on `base` is ignored, so `http://host/` and `http://host` give the
/// same endpoint. Query and fragment of `base` are dropped.
pub fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, StockError> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|_| StockError::InvalidBaseUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

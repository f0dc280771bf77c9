//! News article payload returned by the news endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One company news item. Articles keep the backend's order (relevance/recency).
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    /// Identifier, unique within one response.
    pub id: u64,
    pub headline: String,
    #[serde(default)]
    pub summary: String,
    pub url: String,
    /// Thumbnail URL. Upstream sends `""` when there is none.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub category: String,
    /// Publication time in seconds since the Unix epoch.
    pub datetime: i64,
    /// Related symbol(s) as sent by upstream, e.g. `AAPL`.
    #[serde(default)]
    pub related: String,
}

impl NewsArticle {
    /// Publication time as a UTC date.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.datetime, 0)
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

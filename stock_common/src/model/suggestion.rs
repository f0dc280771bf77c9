//! Typeahead match returned by the search endpoint.

use serde::{Deserialize, Serialize};

use crate::model::envelope::Envelope;

/// One search match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSuggestion {
    /// Ticker symbol to commit when the suggestion is picked.
    pub symbol: String,
    /// Human-readable name, e.g. `APPLE INC`.
    #[serde(default)]
    pub description: String,
    /// Instrument type tag, e.g. `Common Stock`.
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Body of the search endpoint: either a bare list or an envelope around one.
#[allow(missing_docs)]
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SearchResponse {
    List(Vec<SearchSuggestion>),
    Envelope(Envelope<Vec<SearchSuggestion>>),
}

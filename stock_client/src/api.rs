//! HTTP access to the StockStream backend.
//!
//! `StockApi` is the seam the suggestion engine and the fetch orchestrator depend on;
//! `ApiClient` is its `reqwest` implementation. Every call is a single attempt: it
//! either returns a complete value or exactly one `StockError`.
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use stock_common::model::{
    Envelope, HealthStatus, NewsArticle, Quote, SearchResponse, SearchSuggestion,
};
use stock_common::net::{self, HEALTH_PATH, NEWS_PATH, QUOTE_PATH, SEARCH_PATH};
use stock_common::symbol::canonicalize;
use stock_common::{Result, StockError};

/// Upper bound for one request, connect included.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Operations offered by the backend.
#[async_trait]
pub trait StockApi: Send + Sync {
    /// Quote for `symbol`; the symbol is trimmed and upper-cased before sending.
    async fn fetch_quote(&self, symbol: &str) -> Result<Quote>;

    /// News for `symbol` over the last `days` days, in backend order.
    async fn fetch_news(&self, symbol: &str, days: u32) -> Result<Vec<NewsArticle>>;

    /// Typeahead matches for `query`. Callers only invoke this for queries of two or
    /// more characters.
    async fn search_suggestions(&self, query: &str) -> Result<Vec<SearchSuggestion>>;
}

/// Which 404 error a resource maps to.
#[derive(Clone, Copy)]
enum Resource {
    Quote,
    News,
    Other,
}

impl Resource {
    fn not_found(self, subject: &str) -> StockError {
        match self {
            Resource::Quote | Resource::Other => StockError::NotFound(subject.to_string()),
            Resource::News => StockError::NoNewsFound(subject.to_string()),
        }
    }
}

/// `reqwest`-backed client for a fixed backend base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Creates a client for `base_url` (e.g. `http://localhost:8000`).
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = net::parse_base_url(base_url)?;
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        info!("Stock API client targeting {}", base_url);
        Ok(Self { client, base_url })
    }

    /// Backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full URL of the quote endpoint for an already canonical symbol.
    pub fn quote_url(&self, symbol: &str) -> Result<Url> {
        net::endpoint(&self.base_url, &[QUOTE_PATH, &[symbol][..]].concat())
    }

    /// Full URL of the news endpoint for an already canonical symbol.
    pub fn news_url(&self, symbol: &str, days: u32) -> Result<Url> {
        let mut url = net::endpoint(&self.base_url, &[NEWS_PATH, &[symbol][..]].concat())?;
        url.query_pairs_mut()
            .append_pair("days", &days.to_string());
        Ok(url)
    }

    /// Full URL of the search endpoint.
    pub fn search_url(&self, query: &str) -> Result<Url> {
        let mut url = net::endpoint(&self.base_url, SEARCH_PATH)?;
        url.query_pairs_mut().append_pair("q", query);
        Ok(url)
    }

    /// Checks `GET /health`.
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = net::endpoint(&self.base_url, HEALTH_PATH)?;
        let response = self.send(url, "health").await?;
        decode_body(response, Resource::Other, "health").await
    }

    async fn send(&self, url: Url, subject: &str) -> Result<Response> {
        debug!("GET {}", url);
        self.client.get(url).send().await.map_err(|e| {
            if e.is_connect() {
                warn!("Backend unreachable: {}", e);
                StockError::BackendUnavailable
            } else {
                warn!("Request for '{}' failed: {}", subject, e);
                StockError::FetchFailed(subject.to_string())
            }
        })
    }

    async fn get_enveloped<T: DeserializeOwned>(
        &self,
        url: Url,
        resource: Resource,
        subject: &str,
    ) -> Result<T> {
        let response = self.send(url, subject).await?;
        let envelope: Envelope<T> = decode_body(response, resource, subject).await?;
        envelope.into_result(subject)
    }
}

/// Maps status and body of `response` into `T` or one `StockError`.
///
/// 404 maps per `resource`. Other non-success statuses become `ApiError` when the body
/// is a failed envelope, and `FetchFailed` otherwise.
async fn decode_body<T: DeserializeOwned>(
    response: Response,
    resource: Resource,
    subject: &str,
) -> Result<T> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(resource.not_found(subject));
    }

    let text = response.text().await.map_err(|e| {
        warn!("Reading response body for '{}' failed: {}", subject, e);
        StockError::FetchFailed(subject.to_string())
    })?;

    if !status.is_success() {
        warn!("Backend answered {} for '{}'", status, subject);
        return match serde_json::from_str::<Envelope<serde_json::Value>>(&text) {
            Ok(envelope) if !envelope.success => Err(envelope
                .into_result(subject)
                .err()
                .unwrap_or_else(|| StockError::FetchFailed(subject.to_string()))),
            _ => Err(StockError::FetchFailed(subject.to_string())),
        };
    }

    serde_json::from_str(&text).map_err(|e| {
        debug!("Undecodable body for '{}': {} ({})", subject, e, text);
        StockError::FetchFailed(subject.to_string())
    })
}

/// Canonical symbol, or `EmptySymbol` if nothing is left after trimming.
fn canonical_symbol(raw: &str) -> Result<String> {
    let symbol = canonicalize(raw);
    if symbol.is_empty() {
        return Err(StockError::EmptySymbol);
    }
    Ok(symbol)
}

#[async_trait]
impl StockApi for ApiClient {
    async fn fetch_quote(&self, symbol: &str) -> Result<Quote> {
        let symbol = canonical_symbol(symbol)?;
        let url = self.quote_url(&symbol)?;
        self.get_enveloped(url, Resource::Quote, &symbol).await
    }

    async fn fetch_news(&self, symbol: &str, days: u32) -> Result<Vec<NewsArticle>> {
        let symbol = canonical_symbol(symbol)?;
        let url = self.news_url(&symbol, days)?;
        self.get_enveloped(url, Resource::News, &symbol).await
    }

    async fn search_suggestions(&self, query: &str) -> Result<Vec<SearchSuggestion>> {
        let query = query.trim();
        let url = self.search_url(query)?;
        let response = self.send(url, query).await?;
        match decode_body::<SearchResponse>(response, Resource::Other, query).await? {
            SearchResponse::List(list) => Ok(list),
            SearchResponse::Envelope(envelope) => envelope.into_result(query),
        }
    }
}

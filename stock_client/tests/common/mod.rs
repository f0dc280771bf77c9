#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use stock_client::api::StockApi;
use stock_common::model::{NewsArticle, Quote, SearchSuggestion};
use stock_common::{Result, StockError};

/// In-memory `StockApi` with scripted delays and failures.
#[derive(Default)]
pub struct MockApi {
    pub search_calls: Mutex<Vec<String>>,
    pub quote_calls: Mutex<Vec<String>>,
    pub news_calls: Mutex<Vec<(String, u32)>>,
    pub search_delay: Duration,
    pub news_delay: Duration,
    /// Symbol whose quote takes `slow_delay` to arrive.
    pub slow_symbol: Option<String>,
    pub slow_delay: Duration,
    pub fail_search: bool,
    pub fail_news: bool,
    /// Symbols whose quote lookup answers 404.
    pub missing_symbols: Vec<String>,
}

impl MockApi {
    pub fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().unwrap().clone()
    }

    pub fn quote_calls(&self) -> Vec<String> {
        self.quote_calls.lock().unwrap().clone()
    }

    pub fn news_calls(&self) -> Vec<(String, u32)> {
        self.news_calls.lock().unwrap().clone()
    }
}

pub fn quote(symbol: &str) -> Quote {
    Quote {
        symbol: symbol.to_string(),
        name: None,
        price: 150.25,
        change: -2.10,
        change_percent: -1.38,
        high: 152.30,
        low: 148.10,
        open: 151.00,
        previous_close: 152.35,
        volume: None,
        timestamp: Some(1_716_998_400),
    }
}

pub fn article(id: u64, symbol: &str) -> NewsArticle {
    NewsArticle {
        id,
        headline: format!("{} headline {}", symbol, id),
        summary: String::new(),
        url: format!("https://news.example.com/{}", id),
        image: None,
        source: "Reuters".to_string(),
        category: "company".to_string(),
        datetime: 1_716_998_400,
        related: symbol.to_string(),
    }
}

#[async_trait]
impl StockApi for MockApi {
    async fn fetch_quote(&self, symbol: &str) -> Result<Quote> {
        self.quote_calls.lock().unwrap().push(symbol.to_string());
        if self.slow_symbol.as_deref() == Some(symbol) {
            tokio::time::sleep(self.slow_delay).await;
        }
        if self.missing_symbols.iter().any(|s| s == symbol) {
            return Err(StockError::NotFound(symbol.to_string()));
        }
        Ok(quote(symbol))
    }

    async fn fetch_news(&self, symbol: &str, days: u32) -> Result<Vec<NewsArticle>> {
        self.news_calls.lock().unwrap().push((symbol.to_string(), days));
        tokio::time::sleep(self.news_delay).await;
        if self.fail_news {
            return Err(StockError::NoNewsFound(symbol.to_string()));
        }
        Ok(vec![article(1, symbol), article(2, symbol)])
    }

    /// Answers `Q`, `QX`, `QY` for query `q`; nothing for queries starting with `zz`.
    async fn search_suggestions(&self, query: &str) -> Result<Vec<SearchSuggestion>> {
        self.search_calls.lock().unwrap().push(query.to_string());
        tokio::time::sleep(self.search_delay).await;
        if self.fail_search {
            return Err(StockError::FetchFailed(query.to_string()));
        }
        if query.starts_with("zz") {
            return Ok(Vec::new());
        }
        let upper = query.to_uppercase();
        Ok(["", "X", "Y"]
            .iter()
            .map(|suffix| SearchSuggestion {
                symbol: format!("{}{}", upper, suffix),
                description: format!("match for {}", query),
                kind: "Common Stock".to_string(),
            })
            .collect())
    }
}

//! Submit handling: paired quote and news fetches with independent failure policy.
//!
//! Each submit starts an orchestration run. The run spawns the quote fetch and the news
//! fetch as separate tasks; each reports its own `Settlement`, so one failing never
//! cancels or delays the other. Settlements are applied as they arrive:
//!
//! - quote success replaces the displayed quote; quote failure clears it and sets the
//!   user-visible error message;
//! - news success replaces the article list; news failure empties it and is only logged.
//!
//! Both loading flags clear once both settlements of the run are applied. Runs are
//! numbered; a new submit aborts the previous run's tasks, and any settlement tagged
//! with an older run number is dropped.
use std::sync::Arc;

use log::{debug, info, warn};
use stock_common::Result;
use stock_common::model::{NewsArticle, Quote};
use stock_common::net::DEFAULT_NEWS_DAYS;
use stock_common::symbol::canonicalize;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;

use crate::api::StockApi;

/// Everything the page displays. Only `FetchOrchestrator` mutates it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageState {
    /// Symbol of the latest run.
    pub symbol: Option<String>,
    pub quote: Option<Quote>,
    pub articles: Vec<NewsArticle>,
    /// User-visible error banner.
    pub error: Option<String>,
    pub quote_loading: bool,
    pub news_loading: bool,
}

impl PageState {
    pub fn is_loading(&self) -> bool {
        self.quote_loading || self.news_loading
    }
}

/// Outcome of one half of a run.
#[derive(Debug)]
pub enum Settlement {
    Quote { run: u64, result: Result<Quote> },
    News { run: u64, result: Result<Vec<NewsArticle>> },
}

impl Settlement {
    /// Run number the settlement belongs to.
    pub fn run(&self) -> u64 {
        match self {
            Settlement::Quote { run, .. } | Settlement::News { run, .. } => *run,
        }
    }
}

/// Owns the page state and runs quote/news fetches on submit.
pub struct FetchOrchestrator<A: StockApi + ?Sized + 'static> {
    api: Arc<A>,
    news_days: u32,
    state: PageState,
    run: u64,
    outstanding: u8,
    tasks: Vec<JoinHandle<()>>,
    tx: UnboundedSender<Settlement>,
    rx: UnboundedReceiver<Settlement>,
}

impl<A: StockApi + ?Sized + 'static> FetchOrchestrator<A> {
    /// Creates an orchestrator fetching news over the default seven days.
    pub fn new(api: Arc<A>) -> Self {
        Self::with_news_days(api, DEFAULT_NEWS_DAYS)
    }

    pub fn with_news_days(api: Arc<A>, news_days: u32) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            api,
            news_days,
            state: PageState::default(),
            run: 0,
            outstanding: 0,
            tasks: Vec::new(),
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// Number of the latest run; `0` before the first submit.
    pub fn current_run(&self) -> u64 {
        self.run
    }

    /// Starts a run for `query`. Returns its number, or `None` if the query is blank.
    pub fn submit(&mut self, query: &str) -> Option<u64> {
        let symbol = canonicalize(query);
        if symbol.is_empty() {
            return None;
        }

        self.abort_tasks();
        self.run += 1;
        let run = self.run;
        info!("Run {}: fetching quote and news for {}", run, symbol);

        self.state.symbol = Some(symbol.clone());
        self.state.quote_loading = true;
        self.state.news_loading = true;
        self.state.error = None;
        self.outstanding = 2;

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let quote_symbol = symbol.clone();
        self.tasks.push(tokio::spawn(async move {
            let result = api.fetch_quote(&quote_symbol).await;
            let _ = tx.send(Settlement::Quote { run, result });
        }));

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let days = self.news_days;
        self.tasks.push(tokio::spawn(async move {
            let result = api.fetch_news(&symbol, days).await;
            let _ = tx.send(Settlement::News { run, result });
        }));

        Some(run)
    }

    /// Applies one settlement. Returns `false` if it belonged to a superseded run.
    pub fn apply(&mut self, settlement: Settlement) -> bool {
        if settlement.run() != self.run || self.outstanding == 0 {
            debug!(
                "Dropping settlement of run {} (current run {})",
                settlement.run(),
                self.run
            );
            return false;
        }

        match settlement {
            Settlement::Quote { result, .. } => match result {
                Ok(quote) => self.state.quote = Some(quote),
                Err(e) => {
                    info!("Quote lookup failed: {}", e);
                    self.state.quote = None;
                    self.state.error = Some(e.to_string());
                }
            },
            Settlement::News { result, .. } => match result {
                Ok(articles) => self.state.articles = articles,
                Err(e) => {
                    warn!("News unavailable, showing none: {}", e);
                    self.state.articles.clear();
                }
            },
        }

        self.outstanding -= 1;
        if self.outstanding == 0 {
            self.state.quote_loading = false;
            self.state.news_loading = false;
            self.tasks.clear();
        }
        true
    }

    /// Waits for the next settlement and applies it.
    pub async fn tick(&mut self) -> bool {
        match self.rx.recv().await {
            Some(settlement) => self.apply(settlement),
            None => false,
        }
    }

    /// Applies settlements until the current run has fully settled.
    pub async fn settle(&mut self) {
        while self.state.is_loading() {
            self.tick().await;
        }
    }

    /// Submits `query` and waits for the run to settle. Returns `false` for a blank query.
    pub async fn search(&mut self, query: &str) -> bool {
        if self.submit(query).is_none() {
            return false;
        }
        self.settle().await;
        true
    }

    fn abort_tasks(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl<A: StockApi + ?Sized + 'static> Drop for FetchOrchestrator<A> {
    fn drop(&mut self) {
        self.abort_tasks();
    }
}

//! Typeahead suggestions for the search input.
//!
//! `SuggestionEngine` turns raw input into a debounced suggestion fetch and keeps the
//! selection state of the resulting dropdown. It moves through four phases:
//!
//! - `Idle` — trimmed query shorter than two characters; list empty, dropdown hidden.
//! - `Pending` — a debounce timer is armed but has not fired yet.
//! - `Loading` — the timer fired and the fetch is in flight.
//! - `Shown` — the fetch resolved; the dropdown is visible if the list is non-empty.
//!
//! Only one timer slot exists. Every input change aborts the task in that slot (timer
//! or in-flight fetch alike) before a new one is armed, and bumps a generation counter.
//! The task reports back over a channel; updates carrying an older generation are
//! dropped, so a late response can never replace newer suggestions.
//!
//! Suggestion failures are silent: the list is cleared and the dropdown hidden.
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use stock_common::Result;
use stock_common::model::SearchSuggestion;
use strum_macros::{Display, EnumString};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;

use crate::api::StockApi;

/// Quiet period after the last keystroke before suggestions are fetched.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);
/// Shortest trimmed query that triggers a fetch.
pub const MIN_QUERY_CHARS: usize = 2;

/// Lifecycle phase of the current query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Pending,
    Loading,
    Shown,
}

/// Keys the dropdown reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Key {
    Down,
    Up,
    Enter,
    #[strum(serialize = "esc", serialize = "escape")]
    Escape,
}

/// Message from a debounce task back to its engine.
#[derive(Debug)]
pub enum SuggestionUpdate {
    /// The timer fired and the fetch was issued.
    Started { generation: u64 },
    /// The fetch finished.
    Resolved {
        generation: u64,
        result: Result<Vec<SearchSuggestion>>,
    },
}

/// Debounced suggestion fetching plus dropdown selection state.
pub struct SuggestionEngine<A: StockApi + ?Sized + 'static> {
    api: Arc<A>,
    query: String,
    suggestions: Vec<SearchSuggestion>,
    phase: Phase,
    visible: bool,
    cursor: Option<usize>,
    generation: u64,
    pending: Option<JoinHandle<()>>,
    tx: UnboundedSender<SuggestionUpdate>,
    rx: UnboundedReceiver<SuggestionUpdate>,
}

impl<A: StockApi + ?Sized + 'static> SuggestionEngine<A> {
    /// Creates an idle engine. Must be used inside a tokio runtime.
    pub fn new(api: Arc<A>) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            api,
            query: String::new(),
            suggestions: Vec::new(),
            phase: Phase::Idle,
            visible: false,
            cursor: None,
            generation: 0,
            pending: None,
            tx,
            rx,
        }
    }

    /// Current raw query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current suggestion list (possibly stale while `Pending`/`Loading`).
    pub fn suggestions(&self) -> &[SearchSuggestion] {
        &self.suggestions
    }

    /// Whether the dropdown is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Highlighted index; `None` means no highlight.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn highlighted(&self) -> Option<&SearchSuggestion> {
        self.cursor.and_then(|i| self.suggestions.get(i))
    }

    /// Handles a change of the input text.
    ///
    /// Unchanged text is ignored. Otherwise the pending timer is cancelled and, if the
    /// trimmed query is long enough, a new one is armed.
    pub fn on_input(&mut self, text: &str) {
        if text == self.query {
            return;
        }
        self.query = text.to_string();
        self.cancel_pending();

        if self.query.trim().chars().count() < MIN_QUERY_CHARS {
            self.suggestions.clear();
            self.visible = false;
            self.cursor = None;
            self.phase = Phase::Idle;
            return;
        }

        self.phase = Phase::Pending;
        self.arm();
    }

    /// Handles a key press. Returns the committed symbol, if the key committed one.
    ///
    /// Keys only act while the dropdown is visible with at least one entry.
    pub fn on_key(&mut self, key: Key) -> Option<String> {
        if !self.visible || self.suggestions.is_empty() {
            return None;
        }
        let last = self.suggestions.len() - 1;

        match key {
            Key::Down => {
                self.cursor = Some(match self.cursor {
                    None => 0,
                    Some(i) => (i + 1).min(last),
                });
                None
            }
            Key::Up => {
                self.cursor = match self.cursor {
                    Some(i) if i > 0 => Some(i - 1),
                    _ => None,
                };
                None
            }
            Key::Enter => self.cursor.and_then(|i| self.commit(i)),
            Key::Escape => {
                self.visible = false;
                self.cursor = None;
                None
            }
        }
    }

    /// Pointer click on entry `index`; commits it regardless of the cursor.
    pub fn click(&mut self, index: usize) -> Option<String> {
        if !self.visible {
            return None;
        }
        self.commit(index)
    }

    /// Pointer press outside the dropdown: hide without committing.
    pub fn click_outside(&mut self) {
        self.visible = false;
        self.cursor = None;
    }

    /// Input regained focus: re-show the dropdown if there is anything to show.
    pub fn focus(&mut self) {
        if !self.suggestions.is_empty() {
            self.visible = true;
        }
    }

    /// Applies one update from a debounce task. Returns `false` for stale updates.
    pub fn apply(&mut self, update: SuggestionUpdate) -> bool {
        match update {
            SuggestionUpdate::Started { generation } if generation == self.generation => {
                self.phase = Phase::Loading;
                true
            }
            SuggestionUpdate::Resolved { generation, result } if generation == self.generation => {
                self.pending = None;
                self.phase = Phase::Shown;
                self.cursor = None;
                match result {
                    Ok(list) => {
                        debug!("{} suggestions for '{}'", list.len(), self.query.trim());
                        self.visible = !list.is_empty();
                        self.suggestions = list;
                    }
                    Err(e) => {
                        debug!("Suggestion fetch for '{}' failed: {}", self.query.trim(), e);
                        self.suggestions.clear();
                        self.visible = false;
                    }
                }
                true
            }
            stale => {
                debug!("Dropping stale suggestion update: {:?}", stale);
                false
            }
        }
    }

    /// Waits for the next update from the debounce task and applies it.
    pub async fn tick(&mut self) -> bool {
        match self.rx.recv().await {
            Some(update) => self.apply(update),
            None => false,
        }
    }

    fn commit(&mut self, index: usize) -> Option<String> {
        let symbol = self.suggestions.get(index)?.symbol.clone();
        self.cancel_pending();
        self.query = symbol.clone();
        self.visible = false;
        self.cursor = None;
        if self.phase != Phase::Idle {
            self.phase = Phase::Shown;
        }
        Some(symbol)
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        self.generation += 1;
    }

    fn arm(&mut self) {
        let generation = self.generation;
        let query = self.query.trim().to_string();
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(DEBOUNCE_WINDOW).await;
            if tx.send(SuggestionUpdate::Started { generation }).is_err() {
                return;
            }
            let result = api.search_suggestions(&query).await;
            let _ = tx.send(SuggestionUpdate::Resolved { generation, result });
        }));
    }
}

impl<A: StockApi + ?Sized + 'static> Drop for SuggestionEngine<A> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

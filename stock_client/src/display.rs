//! Plain-text rendering of the page state for the terminal.
use std::fmt::Write;

use stock_common::model::{NewsArticle, Quote, SearchSuggestion};
use strum_macros::Display;

use crate::orchestrator::PageState;

/// Direction of a price change; zero counts as a gain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Trend {
    #[strum(serialize = "▲")]
    Gain,
    #[strum(serialize = "▼")]
    Loss,
}

impl Trend {
    pub fn of(change: f64) -> Self {
        if change >= 0.0 { Trend::Gain } else { Trend::Loss }
    }
}

/// `150.25` -> `$150.25`
pub fn format_price(value: f64) -> String {
    format!("${:.2}", value)
}

/// `(-2.1, -1.38)` -> `-2.10 (-1.38%)`; positive values get an explicit `+`.
pub fn format_change(change: f64, change_percent: f64) -> String {
    format!("{:+.2} ({:+.2}%)", change, change_percent)
}

/// `1250000` -> `1,250,000`
pub fn format_volume(volume: u64) -> String {
    let digits = volume.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Quote card.
pub fn render_quote(quote: &Quote) -> String {
    let mut out = String::new();
    let trend = Trend::of(quote.change);

    let _ = match &quote.name {
        Some(name) => writeln!(out, "{}  {}", quote.symbol, name),
        None => writeln!(out, "{}", quote.symbol),
    };
    let _ = writeln!(
        out,
        "  {}  {} {}",
        format_price(quote.price),
        trend,
        format_change(quote.change, quote.change_percent)
    );
    let _ = writeln!(
        out,
        "  High {}  Low {}  Open {}  Prev close {}",
        format_price(quote.high),
        format_price(quote.low),
        format_price(quote.open),
        format_price(quote.previous_close)
    );
    if let Some(volume) = quote.volume {
        let _ = writeln!(out, "  Volume {}", format_volume(volume));
    }
    if let Some(at) = quote.quoted_at() {
        let _ = writeln!(out, "  As of {}", at.format("%Y-%m-%d %H:%M UTC"));
    }
    out
}

/// News list, or a placeholder when there is none.
pub fn render_articles(articles: &[NewsArticle]) -> String {
    if articles.is_empty() {
        return "No news available\n".to_string();
    }
    let mut out = String::new();
    for article in articles {
        let when = article
            .published_at()
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        let _ = writeln!(out, "- {}", article.headline);
        let _ = writeln!(out, "  {} | {} | {}", article.source, when, article.url);
    }
    out
}

/// Dropdown lines, numbered from 1, with `>` on the highlighted entry.
pub fn render_suggestions(suggestions: &[SearchSuggestion], cursor: Option<usize>) -> String {
    let mut out = String::new();
    for (i, s) in suggestions.iter().enumerate() {
        let marker = if cursor == Some(i) { '>' } else { ' ' };
        let _ = writeln!(out, "{} {:>2}. {:<8} {}  [{}]", marker, i + 1, s.symbol, s.description, s.kind);
    }
    out
}

/// Error banner, quote card and news list for the current page state.
pub fn render_page(state: &PageState) -> String {
    let mut out = String::new();
    if state.is_loading() {
        out.push_str("Searching...\n");
    }
    if let Some(error) = &state.error {
        let _ = writeln!(out, "! {}", error);
    }
    if let Some(quote) = &state.quote {
        out.push_str(&render_quote(quote));
    }
    if state.symbol.is_some() && !state.news_loading {
        out.push_str("News:\n");
        out.push_str(&render_articles(&state.articles));
    }
    out
}

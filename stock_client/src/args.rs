//! Command-line arguments for the StockStream client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::{Parser, Subcommand};
use stock_common::net::{BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_NEWS_DAYS};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Backend base URL.
    #[clap(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// How many days of news to fetch.
    #[clap(long, default_value_t = DEFAULT_NEWS_DAYS)]
    pub days: u32,

    /// What to do; interactive search when omitted.
    #[command(subcommand)]
    pub mode: Option<Mode>,
}

/// Client modes.
#[derive(Debug, Subcommand)]
pub enum Mode {
    /// Show quote and news for each symbol.
    Quote {
        /// Symbols to look up.
        symbols: Vec<String>,

        /// Path to a text file with symbols to look up.
        /// Symbols may be separated by commas, spaces, or new lines.
        #[clap(long)]
        path: Option<String>,
    },
    /// List typeahead matches for a query.
    Search {
        /// Free text, e.g. a company name.
        #[clap(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Check that the backend is up.
    Health,
    /// Interactive search with suggestions.
    Interactive,
}

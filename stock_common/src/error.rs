//! Error types shared by every consumer of the stock API.
//!
//! The `StockError` enum collapses transport failures, backend-reported failures, and
//! local validation problems into one type, so each API operation either returns a
//! complete value or exactly one typed error.
use std::io;

use thiserror::Error;

/// Unified error type for the StockStream client.
#[derive(Error, Debug)]
pub enum StockError {
    /// The backend answered 404 for a quote lookup.
    #[error("Stock symbol '{0}' not found")]
    NotFound(String),

    /// The backend answered 404 for a news lookup.
    #[error("No news found for '{0}'")]
    NoNewsFound(String),

    /// The backend could not be reached at all (connection refused, DNS failure, ...).
    #[error("Cannot connect to the server. Please make sure the backend is running")]
    BackendUnavailable,

    /// The backend answered with `success = false`; carries its message verbatim.
    #[error("{0}")]
    ApiError(String),

    /// Any other transport or decoding failure for the given symbol or query.
    #[error("Failed to fetch data for '{0}'")]
    FetchFailed(String),

    /// A symbol was empty after trimming.
    #[error("Stock symbol is required")]
    EmptySymbol,

    /// A symbol contained characters that never appear in a ticker.
    #[error("Invalid stock symbol: {0}")]
    InvalidSymbol(String),

    /// The configured backend base URL could not be used to build endpoints.
    #[error("Invalid backend URL: {0}")]
    InvalidBaseUrl(String),

    /// I/O error from reading symbol files or the terminal.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<url::ParseError> for StockError {
    fn from(err: url::ParseError) -> Self {
        StockError::InvalidBaseUrl(err.to_string())
    }
}

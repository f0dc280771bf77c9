//! StockStream client library.
//!
//! - `api` — `StockApi` trait and its HTTP implementation `ApiClient`.
//! - `suggest` — debounced typeahead suggestions and dropdown selection.
//! - `orchestrator` — paired quote/news fetches on submit and the page state.
//! - `display` — text rendering of quotes, news and suggestions.
//! - `input` — line commands of the interactive mode.
pub mod api;
pub mod display;
pub mod input;
pub mod orchestrator;
pub mod suggest;

pub use api::{ApiClient, StockApi};
pub use orchestrator::{FetchOrchestrator, PageState};
pub use suggest::SuggestionEngine;

//!
//! Common types and utilities shared by consumers of the StockStream backend.
//!
//! This crate aggregates:
//! - `error` — unified error type `StockError` used across the workspace.
//! - `result` — handy `Result<T, StockError>` alias.
//! - `symbol` — ticker canonicalization and symbol-file parsing.
//! - `model` — JSON payloads of the quote, news, search and health endpoints.
//! - `net` — endpoint paths, defaults and URL helpers.
#![warn(missing_docs)]
pub mod error;
pub mod model;
pub mod net;
pub mod result;
pub mod symbol;

pub use error::StockError;
pub use result::Result;
pub use symbol::Symbol;

//! Data model types exchanged with the stock backend.
//!
//! - `quote` — quote snapshot for one symbol.
//! - `news` — company news articles.
//! - `suggestion` — typeahead search matches.
//! - `envelope` — the `{success, data, error}` wrapper and its error mapping.
//! - `health` — backend health check payload.
pub mod envelope;
pub mod health;
pub mod news;
pub mod quote;
pub mod suggestion;

pub use envelope::Envelope;
pub use health::HealthStatus;
pub use news::NewsArticle;
pub use quote::Quote;
pub use suggestion::{SearchResponse, SearchSuggestion};

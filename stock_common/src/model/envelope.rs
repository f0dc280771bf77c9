//! The `{success, data, error}` wrapper the backend puts around every resource.

use serde::Deserialize;

use crate::error::StockError;

/// Message used when the backend reports a failure without saying why.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Response envelope.
#[allow(missing_docs)]
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Unwrap the payload, or turn the envelope into exactly one error.
    ///
    /// - `success = false` gives `ApiError` with the backend's message.
    /// - `success = true` without `data` gives `FetchFailed(subject)`.
    pub fn into_result(self, subject: &str) -> Result<T, StockError> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(StockError::FetchFailed(subject.to_string())),
            (false, _) => Err(StockError::ApiError(
                self.error
                    .filter(|msg| !msg.trim().is_empty())
                    .unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            )),
        }
    }
}

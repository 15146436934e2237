//! Error report handed to the fallback website.

use serde::{Deserialize, Serialize};

/// Describes a failed remote fetch so the fallback website can show what
/// went wrong and for which amount.
///
/// Travels as `data=<urlencoded base64 json>` on the error-landing URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub error: String,
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
    pub amount: String,
}

impl ErrorReport {
    pub fn new(error: impl Into<String>, timestamp: i64, amount: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            timestamp,
            amount: amount.into(),
        }
    }
}

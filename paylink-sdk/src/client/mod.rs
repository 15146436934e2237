//! HTTP client for the remote payment endpoint.
//!
//! Gated behind the `client` cargo feature so downstream crates that only
//! need the payload codec do not pull in `reqwest`.

mod payment;

pub use payment::{DEFAULT_PAYMENT_ENDPOINT, PaymentClient};

use reqwest::StatusCode;

/// Errors produced by the payment endpoint client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, TLS, connection reset, timeout, …).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("api error: status {status}, body: {body}")]
    Api { status: StatusCode, body: String },

    /// Response body could not be deserialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

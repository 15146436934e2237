//! Payment endpoint client.
//!
//! The endpoint is a static JSON document: no authentication, no query
//! parameters, a single `GET`.

use reqwest::Client;
use url::Url;

use super::ClientError;
use crate::objects::RemotePayment;

/// Where the payment document is published unless configured otherwise.
pub const DEFAULT_PAYMENT_ENDPOINT: &str = "https://danil12121.github.io/payment.json";

/// Typed HTTP client for the remote payment document.
#[derive(Debug, Clone)]
pub struct PaymentClient {
    http: Client,
    endpoint: Url,
}

impl PaymentClient {
    /// Create a new `PaymentClient`.
    ///
    /// * `endpoint` – full URL of the payment document
    ///   (e.g. `https://pay.example.com/payment.json`).
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: Client::new(),
            endpoint,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `GET <endpoint>` – fetch the amount (and usually the currency) to show.
    pub async fn fetch_payment(&self) -> Result<RemotePayment, ClientError> {
        let resp = self.http.get(self.endpoint.clone()).send().await?;
        parse_response(resp).await
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Api { status, body });
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(ClientError::Json)
}

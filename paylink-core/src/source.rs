//! Remote-fetch capability used by the resolver.

use async_trait::async_trait;
use paylink_sdk::client::{ClientError, PaymentClient};
use paylink_sdk::objects::RemotePayment;
use thiserror::Error;

/// Errors surfaced by a [`PaymentSource`].
///
/// The `Display` text ends up verbatim in the status line.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Any other transport failure, carrying its message.
    #[error("{0}")]
    Unavailable(String),
}

/// Something that can produce the payment to display.
#[async_trait]
pub trait PaymentSource: Send + Sync {
    async fn fetch_payment(&self) -> Result<RemotePayment, FetchError>;
}

#[async_trait]
impl PaymentSource for PaymentClient {
    async fn fetch_payment(&self) -> Result<RemotePayment, FetchError> {
        Ok(PaymentClient::fetch_payment(self).await?)
    }
}

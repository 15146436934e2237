//! PaymentDataResolver.
//!
//! Decides what amount, currency and status the payment window shows, and
//! what URL the "visit website" action opens. Three paths lead to a state:
//! - decode-from-payload: the launch URL carries `data=<b64 json>`
//! - fetch-from-remote: no payload, or (dual-path) an undecodable one
//! - error-fallback: the fetch failed; (redirecting) an error report is
//!   packed into the fallback URL
//!
//! Every operation takes the current [`DisplayState`] by value and returns
//! the next one. Failures never escape; they become status lines.

use crate::cancel::CancelToken;
use crate::config::ResolverConfig;
use crate::fallback::SerializationError;
use crate::source::{FetchError, PaymentSource};
use crate::state::{DisplayState, Status};
use paylink_sdk::objects::{ErrorReport, PaymentInfo, RemotePayment};
use paylink_sdk::payload::{DecodeError, decode_object, extract_data, is_blank};
use tracing::{debug, info, warn};
use url::Url;

/// Outcome of resolving the launch argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Nothing to decode; the caller should fetch from the remote endpoint.
    NoPayload,
    /// Final state for this launch.
    Resolved(DisplayState),
    /// Show this state and recover with a remote fetch.
    Recover(DisplayState),
}

/// Result of one remote fetch, before it is applied to a state.
pub type FetchOutcome = Result<RemotePayment, FetchError>;

pub struct PaymentDataResolver<S> {
    config: ResolverConfig,
    source: S,
}

impl<S: PaymentSource> PaymentDataResolver<S> {
    pub fn new(config: ResolverConfig, source: S) -> Self {
        Self { config, source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn site_url(&self) -> Url {
        self.config.site.base_url().clone()
    }

    /// State shown before anything has been resolved.
    pub fn initial_state(&self) -> DisplayState {
        DisplayState::initial(self.site_url())
    }

    /// Resolve the argument the OS launched the application with.
    pub fn resolve_from_launch_payload(
        &self,
        raw: Option<&str>,
        current: DisplayState,
    ) -> Resolution {
        let Some(raw) = raw.filter(|r| !is_blank(r)) else {
            debug!("No launch payload");
            return Resolution::NoPayload;
        };

        let encoded = match extract_data(raw, &self.config.scheme_prefix) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(error = %e, "Launch URL carries no usable payload");
                return Resolution::Resolved(
                    current
                        .with_status(Status::InvalidFormat)
                        .with_fallback_url(self.site_url()),
                );
            }
        };

        match self.decode_payload(&encoded, current.clone()) {
            Ok(state) => Resolution::Resolved(state),
            Err(e) => {
                warn!(error = %e, "Failed to decode launch payload");
                let state = self.decode_failure_state(current);
                if self.config.variant.fetch_on_decode_failure() {
                    Resolution::Recover(state)
                } else {
                    Resolution::Resolved(state)
                }
            }
        }
    }

    /// Decode a base64 JSON payload into the state to display.
    ///
    /// On success the fallback URL forwards the payload unchanged so the
    /// website can parse it too.
    pub fn decode_payload(
        &self,
        encoded: &str,
        current: DisplayState,
    ) -> Result<DisplayState, DecodeError> {
        let object = decode_object(encoded)?;
        let variant = self.config.variant;
        let info = PaymentInfo::from_object(
            &object,
            variant.amount_format(),
            variant.missing_currency(),
        );
        let fallback_url = self
            .config
            .site
            .with_payload(encoded)
            .unwrap_or_else(|e| {
                warn!(error = %e, "Failed to build landing URL");
                self.site_url()
            });
        info!(amount = %info.amount, currency = %info.currency, "Payment decoded from launch payload");

        Ok(current
            .with_payment(info.amount, info.currency)
            .with_status(Status::Decoded)
            .with_fallback_url(fallback_url))
    }

    /// State after a [`DecodeError`]: amount and currency are kept.
    pub fn decode_failure_state(&self, current: DisplayState) -> DisplayState {
        current
            .with_status(self.config.variant.decode_failure_status())
            .with_fallback_url(self.site_url())
    }

    /// State shown while a fetch is in flight.
    ///
    /// The fallback URL is reset first so "visit website" stays usable.
    pub fn loading_state(&self, current: DisplayState) -> DisplayState {
        current
            .with_loading(true)
            .with_status(Status::Loading)
            .with_fallback_url(self.site_url())
    }

    /// Issue one request to the payment source.
    ///
    /// Returns `None` when `cancel` fires first.
    pub async fn fetch(&self, cancel: &mut CancelToken) -> Option<FetchOutcome> {
        if cancel.is_cancelled() {
            return None;
        }
        tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                debug!("Payment fetch cancelled");
                None
            }

            outcome = self.source.fetch_payment() => Some(outcome),
        }
    }

    /// Apply a fetch outcome to `current`.
    pub fn complete_fetch(&self, current: DisplayState, outcome: FetchOutcome) -> DisplayState {
        let variant = self.config.variant;
        match outcome {
            Ok(payment) => {
                let amount = payment.amount.render(variant.amount_format());
                let currency = payment.currency.unwrap_or_else(|| current.currency.clone());
                info!(amount = %amount, currency = %currency, "Payment loaded");
                current
                    .with_payment(amount, currency)
                    .with_status(variant.loaded_status())
                    .with_loading(false)
            }
            Err(e) => {
                let message = e.to_string();
                warn!(error = %message, "Failed to load payment");
                let amount = current.amount.clone();
                let failed = current
                    .with_status(Status::LoadFailed(message.clone()))
                    .with_loading(false);
                if !variant.redirect_on_fetch_error() {
                    return failed;
                }
                match self.build_error_fallback(&message, &amount) {
                    Ok(url) => failed.with_fallback_url(url),
                    Err(e) => {
                        warn!(error = %e, "Failed to build error fallback URL");
                        failed
                    }
                }
            }
        }
    }

    /// Loading state, one fetch, then the resulting state.
    ///
    /// Returns `None` if the fetch was cancelled; the caller must then leave
    /// its state untouched.
    pub async fn fetch_remote(
        &self,
        current: DisplayState,
        cancel: &mut CancelToken,
    ) -> Option<DisplayState> {
        let loading = self.loading_state(current);
        let outcome = self.fetch(cancel).await?;
        if cancel.is_cancelled() {
            return None;
        }
        Some(self.complete_fetch(loading, outcome))
    }

    /// Error-landing URL carrying `error`, the current time and `current_amount`.
    pub fn build_error_fallback(
        &self,
        error: &str,
        current_amount: &str,
    ) -> Result<Url, SerializationError> {
        let report = ErrorReport::new(error, unix_millis(), current_amount);
        self.config.site.with_error_report(&report)
    }
}

fn unix_millis() -> i64 {
    let now = time::OffsetDateTime::now_utc();
    now.unix_timestamp() * 1000 + i64::from(now.millisecond())
}

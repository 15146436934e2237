//! Shared types for the paylink payment display.
//!
//! * [`objects`] – wire types exchanged with the payment endpoint and the
//!   fallback website.
//! * [`payload`] – the launch-payload codec (`scheme://...?data=<b64 json>`).
//! * `client` – typed HTTP client for the remote payment endpoint, gated
//!   behind the `client` cargo feature.

#![forbid(unsafe_code)]

#[cfg(feature = "client")]
pub mod client;
pub mod objects;
pub mod payload;

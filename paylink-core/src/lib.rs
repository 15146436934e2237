#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]
#![forbid(unsafe_code)]

pub mod cancel;
pub mod config;
pub mod fallback;
pub mod resolver;
pub mod session;
pub mod source;
pub mod state;
pub mod store;

pub use config::{ResolverConfig, Variant};
pub use resolver::{PaymentDataResolver, Resolution};
pub use session::Session;
pub use state::{DisplayState, Status};

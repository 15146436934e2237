//! Resolver configuration.
//!
//! The payment window ships in two flavours that differ only in defaults and
//! recovery behaviour; [`Variant`] selects between them.

use crate::fallback::FallbackSite;
use crate::state::Status;
use paylink_sdk::objects::AmountFormat;
use paylink_sdk::objects::payment::{DEFAULT_CURRENCY, UNSPECIFIED_CURRENCY};
use paylink_sdk::payload::DEFAULT_SCHEME_PREFIX;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Behavioural flavour of the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Keeps the raw payload around and falls back to the remote endpoint
    /// when it cannot be decoded.
    #[default]
    DualPath,
    /// Never retries; a failed fetch instead prepares an error-report URL for
    /// the fallback website.
    Redirecting,
}

impl Variant {
    pub fn fetch_on_decode_failure(self) -> bool {
        matches!(self, Self::DualPath)
    }

    pub fn redirect_on_fetch_error(self) -> bool {
        matches!(self, Self::Redirecting)
    }

    pub fn amount_format(self) -> AmountFormat {
        match self {
            Self::DualPath => AmountFormat::Verbatim,
            Self::Redirecting => AmountFormat::Truncated,
        }
    }

    pub fn missing_currency(self) -> &'static str {
        match self {
            Self::DualPath => DEFAULT_CURRENCY,
            Self::Redirecting => UNSPECIFIED_CURRENCY,
        }
    }

    pub fn decode_failure_status(self) -> Status {
        match self {
            Self::DualPath => Status::ProcessingFailed,
            Self::Redirecting => Status::DecryptionFailed,
        }
    }

    pub fn loaded_status(self) -> Status {
        match self {
            Self::DualPath => Status::Loaded,
            Self::Redirecting => Status::LoadedBrief,
        }
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dual-path" => Ok(Self::DualPath),
            "redirecting" => Ok(Self::Redirecting),
            other => Err(format!(
                "unknown variant `{other}`, expected `dual-path` or `redirecting`"
            )),
        }
    }
}

/// Validated runtime configuration of a [`PaymentDataResolver`].
///
/// [`PaymentDataResolver`]: crate::resolver::PaymentDataResolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    pub variant: Variant,
    /// Prefix stripped from launch URLs before looking for `data=`.
    pub scheme_prefix: String,
    pub site: FallbackSite,
}

impl ResolverConfig {
    pub fn new(variant: Variant, site: FallbackSite) -> Self {
        Self {
            variant,
            scheme_prefix: DEFAULT_SCHEME_PREFIX.to_owned(),
            site,
        }
    }

    pub fn with_scheme_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.scheme_prefix = prefix.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_flags() {
        let dual = Variant::DualPath;
        assert!(dual.fetch_on_decode_failure());
        assert!(!dual.redirect_on_fetch_error());
        assert_eq!(dual.missing_currency(), "RUB");

        let redirecting = Variant::Redirecting;
        assert!(!redirecting.fetch_on_decode_failure());
        assert!(redirecting.redirect_on_fetch_error());
        assert_eq!(redirecting.amount_format(), AmountFormat::Truncated);
        assert_eq!(redirecting.missing_currency(), "Не указана валюта");
    }

    #[test]
    fn test_variant_names() {
        let v: Variant = serde_json::from_str("\"dual-path\"").unwrap();
        assert_eq!(v, Variant::DualPath);
        let v: Variant = serde_json::from_str("\"redirecting\"").unwrap();
        assert_eq!(v, Variant::Redirecting);
        assert_eq!("redirecting".parse::<Variant>(), Ok(Variant::Redirecting));
        assert!("both".parse::<Variant>().is_err());
    }
}

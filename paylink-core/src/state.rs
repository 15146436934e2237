//! What the payment window shows.

use paylink_sdk::objects::payment::{DEFAULT_AMOUNT, DEFAULT_CURRENCY};
use serde::Serialize;
use std::fmt;
use url::Url;

/// Status line of the payment window.
///
/// The `Display` impl yields the exact text the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Status {
    /// Nothing resolved yet.
    Waiting,
    /// Launch payload decoded.
    Decoded,
    /// The launch URL had no usable `data` parameter.
    InvalidFormat,
    /// Payload could not be decoded; a remote fetch follows.
    ProcessingFailed,
    /// Payload could not be decoded; no recovery is attempted.
    DecryptionFailed,
    Loading,
    Loaded,
    /// Success wording of displays that only receive an amount.
    LoadedBrief,
    /// Remote fetch failed with the given message.
    LoadFailed(String),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Waiting => f.write_str("Ожидание данных..."),
            Self::Decoded => f.write_str("Данные получены"),
            Self::InvalidFormat => f.write_str("Ошибка: неверный формат данных"),
            Self::ProcessingFailed => f.write_str("Ошибка обработки данных"),
            Self::DecryptionFailed => f.write_str("Ошибка расшифровки данных"),
            Self::Loading => f.write_str("Загрузка данных..."),
            Self::Loaded => f.write_str("Данные успешно загружены"),
            Self::LoadedBrief => f.write_str("Успешно загружено"),
            Self::LoadFailed(message) => write!(f, "Ошибка: {message}"),
        }
    }
}

/// Snapshot of everything the payment window renders.
///
/// States are never mutated in place; every transition produces a new
/// value via the `with_*` builders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayState {
    pub amount: String,
    pub currency: String,
    pub status: Status,
    pub loading: bool,
    /// Target of the "visit website" action.
    pub fallback_url: Url,
}

impl DisplayState {
    /// Initial state: default amount and currency, waiting for data.
    pub fn initial(site_url: Url) -> Self {
        Self {
            amount: DEFAULT_AMOUNT.to_owned(),
            currency: DEFAULT_CURRENCY.to_owned(),
            status: Status::Waiting,
            loading: false,
            fallback_url: site_url,
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_payment(mut self, amount: String, currency: String) -> Self {
        self.amount = amount;
        self.currency = currency;
        self
    }

    pub fn with_loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn with_fallback_url(mut self, url: Url) -> Self {
        self.fallback_url = url;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        assert_eq!(Status::Decoded.to_string(), "Данные получены");
        assert_eq!(
            Status::LoadFailed("timeout".into()).to_string(),
            "Ошибка: timeout"
        );
    }

    #[test]
    fn test_initial_state() {
        let site = Url::parse("https://example.com/").unwrap();
        let state = DisplayState::initial(site.clone());
        assert_eq!(state.amount, "0");
        assert_eq!(state.currency, "RUB");
        assert_eq!(state.status, Status::Waiting);
        assert!(!state.loading);
        assert_eq!(state.fallback_url, site);
    }
}

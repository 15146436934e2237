//! Payment amount and currency, as carried by launch payloads and returned
//! by the remote payment endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Amount shown when a payload does not carry one.
pub const DEFAULT_AMOUNT: &str = "0";

/// Currency shown when a payload does not carry one.
pub const DEFAULT_CURRENCY: &str = "RUB";

/// Placeholder shown instead of a currency by displays that have no default.
pub const UNSPECIFIED_CURRENCY: &str = "Не указана валюта";

/// How numeric amounts are turned into display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountFormat {
    /// Print the JSON number as written (`12.5` stays `12.5`).
    #[default]
    Verbatim,
    /// Drop the fractional part (`12.5` becomes `12`).
    Truncated,
}

/// An amount as it appears on the wire: either a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(Number),
    Text(String),
}

impl Amount {
    /// Accept numbers and strings; every other JSON type is treated as absent.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(Self::Number(n.clone())),
            Value::String(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }

    pub fn render(&self, format: AmountFormat) -> String {
        match (self, format) {
            (Self::Text(s), _) => s.clone(),
            (Self::Number(n), AmountFormat::Verbatim) => n.to_string(),
            (Self::Number(n), AmountFormat::Truncated) => {
                if n.is_f64() {
                    // `+ 0.0` turns -0 into 0
                    n.as_f64()
                        .map(|f| format!("{:.0}", f.trunc() + 0.0))
                        .unwrap_or_else(|| n.to_string())
                } else {
                    n.to_string()
                }
            }
        }
    }
}

/// Decoded amount and currency, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInfo {
    pub amount: String,
    pub currency: String,
}

impl PaymentInfo {
    /// Read `amount` and `currency` from a flat JSON object.
    ///
    /// Missing or wrong-typed fields fall back to [`DEFAULT_AMOUNT`] and
    /// `missing_currency`.
    pub fn from_object(
        object: &Map<String, Value>,
        format: AmountFormat,
        missing_currency: &str,
    ) -> Self {
        let amount = object
            .get("amount")
            .and_then(Amount::from_value)
            .map(|a| a.render(format))
            .unwrap_or_else(|| DEFAULT_AMOUNT.to_owned());
        let currency = object
            .get("currency")
            .and_then(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .unwrap_or_else(|| missing_currency.to_owned());
        Self { amount, currency }
    }
}

/// Response body of the remote payment endpoint.
///
/// Some deployments only send the amount; `currency` is then absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemotePayment {
    pub amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

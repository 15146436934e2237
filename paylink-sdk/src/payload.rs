//! Launch payload codec.
//!
//! The OS hands the application a custom-scheme URL of the form:
//!
//! ```text
//! paymentapp://<anything>?data=<urlencoded base64 json>[&...]
//! ```
//!
//! The `data` value, once percent-decoded, is standard base64 (RFC 4648)
//! of a UTF-8 JSON object. The same encoding is used in the other direction
//! when an [`ErrorReport`](crate::objects::ErrorReport) is handed to the
//! fallback website.

use serde::Serialize;
use serde_json::{Map, Value};

/// Scheme prefix registered for the application.
pub const DEFAULT_SCHEME_PREFIX: &str = "paymentapp://";

/// Query key carrying the encoded payload.
pub const DATA_PARAM: &str = "data=";

/// Errors produced while pulling the `data` parameter out of a launch URL.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("launch url has no data parameter")]
    MissingData,
    #[error("data parameter is empty")]
    EmptyData,
    #[error("invalid percent-encoding: {0}")]
    UrlDecode(#[from] std::string::FromUtf8Error),
}

/// Errors produced while decoding a base64 JSON payload.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid base64 encoding")]
    InvalidBase64,
    #[error("payload is not valid utf-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("payload is not a json object")]
    NotAnObject,
}

/// Whether a launch argument carries anything worth decoding.
pub fn is_blank(raw: &str) -> bool {
    raw.trim().is_empty()
}

/// Extract and percent-decode the `data` parameter of a launch URL.
///
/// The scheme prefix is stripped when present; everything between `data=`
/// and the next `&` (or the end of the string) is the encoded payload.
pub fn extract_data(raw: &str, scheme_prefix: &str) -> Result<String, ExtractError> {
    let raw = raw.trim();
    let stripped = raw.strip_prefix(scheme_prefix).unwrap_or(raw);
    let start = stripped
        .find(DATA_PARAM)
        .ok_or(ExtractError::MissingData)?
        + DATA_PARAM.len();
    let rest = &stripped[start..];
    let value = rest.split('&').next().unwrap_or_default();
    if value.is_empty() {
        return Err(ExtractError::EmptyData);
    }
    Ok(urlencoding::decode(value)?.into_owned())
}

/// Decode a base64 string into the flat JSON object it carries.
///
/// Padding is optional on input.
pub fn decode_object(encoded: &str) -> Result<Map<String, Value>, DecodeError> {
    let bytes = fast32::base64::RFC4648_NOPAD
        .decode_str(encoded.trim().trim_end_matches('='))
        .map_err(|_| DecodeError::InvalidBase64)?;
    let text = std::str::from_utf8(&bytes)?;
    let value: Value = serde_json::from_str(text)?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(DecodeError::NotAnObject),
    }
}

/// Serialize `value` to JSON and encode it as padded standard base64.
pub fn encode_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_vec(value)?;
    Ok(encode_padded(&json))
}

fn encode_padded(bytes: &[u8]) -> String {
    let mut encoded = fast32::base64::RFC4648_NOPAD.encode(bytes);
    let padding = (4 - encoded.len() % 4) % 4;
    encoded.extend(std::iter::repeat_n('=', padding));
    encoded
}

//! URLs opened by the "visit website" action.
//!
//! ```text
//! https://<site>/                                      no data
//! https://<site>/<landing>?data=<urlencoded payload>   decoded or error payload
//! ```

use paylink_sdk::objects::ErrorReport;
use paylink_sdk::payload::encode_json;
use thiserror::Error;
use url::Url;

/// Public site shown when the app cannot display a payment itself.
pub const DEFAULT_SITE_URL: &str = "https://serebrovskaya.github.io/ifAppNotFound/";

/// Page of the site that re-parses a `data=` payload.
pub const DEFAULT_LANDING_PATH: &str = "folder_for_pay/index_pay.html";

/// Errors that can occur while building an error-report URL.
#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("failed to serialize error report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid landing url: {0}")]
    Url(#[from] url::ParseError),
}

/// The fallback website and the pages on it that accept payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackSite {
    base: Url,
    landing_path: String,
    error_landing_path: String,
}

impl FallbackSite {
    /// `landing_path` and `error_landing_path` are resolved against `base`.
    pub fn new(
        base: Url,
        landing_path: impl Into<String>,
        error_landing_path: impl Into<String>,
    ) -> Result<Self, url::ParseError> {
        let site = Self {
            base,
            landing_path: landing_path.into(),
            error_landing_path: error_landing_path.into(),
        };
        // Reject paths that cannot be joined up front.
        site.base.join(&site.landing_path)?;
        site.base.join(&site.error_landing_path)?;
        Ok(site)
    }

    /// The public site with the default landing pages.
    pub fn default_site() -> Result<Self, url::ParseError> {
        Self::new(
            Url::parse(DEFAULT_SITE_URL)?,
            DEFAULT_LANDING_PATH,
            DEFAULT_LANDING_PATH,
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Landing page carrying the payload exactly as it arrived at launch.
    pub fn with_payload(&self, encoded: &str) -> Result<Url, url::ParseError> {
        Ok(with_data(self.base.join(&self.landing_path)?, encoded))
    }

    /// Error-landing page carrying a base64 JSON [`ErrorReport`].
    pub fn with_error_report(&self, report: &ErrorReport) -> Result<Url, SerializationError> {
        let encoded = encode_json(report)?;
        Ok(with_data(self.base.join(&self.error_landing_path)?, &encoded))
    }
}

fn with_data(mut url: Url, encoded: &str) -> Url {
    url.set_query(Some(&format!("data={}", urlencoding::encode(encoded))));
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use paylink_sdk::payload::decode_object;

    fn site() -> FallbackSite {
        FallbackSite::new(
            Url::parse("https://pay.example.com/app/").unwrap(),
            "landing/index.html",
            "landing/error.html",
        )
        .unwrap()
    }

    fn data_param(url: &Url) -> String {
        let query = url.query().unwrap();
        let value = query.strip_prefix("data=").unwrap();
        urlencoding::decode(value).unwrap().into_owned()
    }

    #[test]
    fn test_default_site() {
        let site = FallbackSite::default_site().unwrap();
        assert_eq!(site.base_url().as_str(), DEFAULT_SITE_URL);
        let url = site.with_payload("abc").unwrap();
        assert_eq!(
            url.as_str(),
            "https://serebrovskaya.github.io/ifAppNotFound/folder_for_pay/index_pay.html?data=abc"
        );
    }

    #[test]
    fn test_payload_is_percent_encoded() {
        let url = site().with_payload("eyJh+b/c==").unwrap();
        assert_eq!(url.path(), "/app/landing/index.html");
        assert_eq!(url.query(), Some("data=eyJh%2Bb%2Fc%3D%3D"));
        assert_eq!(data_param(&url), "eyJh+b/c==");
    }

    #[test]
    fn test_error_report_round_trip() {
        let report = ErrorReport::new("timeout", 1_700_000_000_000, "250");
        let url = site().with_error_report(&report).unwrap();
        assert_eq!(url.path(), "/app/landing/error.html");

        let object = decode_object(&data_param(&url)).unwrap();
        assert_eq!(object["error"], "timeout");
        assert_eq!(object["amount"], "250");
        assert_eq!(object["timestamp"], 1_700_000_000_000_i64);
    }
}

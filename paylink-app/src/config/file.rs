//! TOML file configuration structures.
//!
//! These structs directly map to the `paylink.toml` file format. Every
//! section is optional; a missing file behaves like an empty one.

use paylink_core::Variant;
use paylink_core::fallback::{DEFAULT_LANDING_PATH, DEFAULT_SITE_URL};
use paylink_sdk::client::DEFAULT_PAYMENT_ENDPOINT;
use paylink_sdk::payload::DEFAULT_SCHEME_PREFIX;
use serde::{Deserialize, Serialize};

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub site: SiteConfig,
    pub remote: RemoteConfig,
    pub launch: LaunchConfig,
    pub resolver: ResolverSection,
}

/// Fallback website section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Root of the fallback website. Must end with `/`.
    pub base_url: String,
    /// Page that receives a decoded launch payload.
    pub landing_path: String,
    /// Page that receives an error report; defaults to `landing_path`.
    pub error_landing_path: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SITE_URL.to_owned(),
            landing_path: DEFAULT_LANDING_PATH.to_owned(),
            error_landing_path: None,
        }
    }
}

/// Remote payment endpoint section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub endpoint: String,
    /// Request timeout in seconds. Unset means the transport default.
    pub timeout_secs: Option<u64>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_PAYMENT_ENDPOINT.to_owned(),
            timeout_secs: None,
        }
    }
}

/// Launch URL section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    pub scheme_prefix: String,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            scheme_prefix: DEFAULT_SCHEME_PREFIX.to_owned(),
        }
    }
}

/// Resolver behaviour section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSection {
    pub variant: Variant,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parsing() {
        let toml_str = r#"
[site]
base_url = "https://pay.example.com/"
landing_path = "pay/index.html"
error_landing_path = "pay/error.html"

[remote]
endpoint = "https://api.example.com/api/payment"
timeout_secs = 10

[launch]
scheme_prefix = "examplepay://"

[resolver]
variant = "redirecting"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.site.base_url, "https://pay.example.com/");
        assert_eq!(config.site.error_landing_path.as_deref(), Some("pay/error.html"));
        assert_eq!(config.remote.timeout_secs, Some(10));
        assert_eq!(config.launch.scheme_prefix, "examplepay://");
        assert_eq!(config.resolver.variant, Variant::Redirecting);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: FileConfig = toml::from_str("[remote]\ntimeout_secs = 5\n").unwrap();
        assert_eq!(config.remote.endpoint, DEFAULT_PAYMENT_ENDPOINT);
        assert_eq!(config.remote.timeout_secs, Some(5));
        assert_eq!(config.site.base_url, DEFAULT_SITE_URL);
        assert_eq!(config.site.landing_path, DEFAULT_LANDING_PATH);
        assert_eq!(config.launch.scheme_prefix, "paymentapp://");
        assert_eq!(config.resolver.variant, Variant::DualPath);

        let empty: FileConfig = toml::from_str("").unwrap();
        assert!(empty.site.error_landing_path.is_none());
    }

    #[test]
    fn test_unknown_variant_is_rejected() {
        let result: Result<FileConfig, _> = toml::from_str("[resolver]\nvariant = \"both\"\n");
        assert!(result.is_err());
    }
}

//! Configuration module for paylink-app.
//!
//! Handles loading configuration from an optional TOML file and applying
//! command-line overrides.

pub mod file;

use crate::config::file::FileConfig;
use paylink_core::fallback::FallbackSite;
use paylink_core::{ResolverConfig, Variant};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("invalid url `{value}`: {source}")]
    UrlError {
        value: String,
        source: url::ParseError,
    },

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Values given on the command line that win over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub variant: Option<Variant>,
    pub endpoint: Option<Url>,
}

/// Remote endpoint settings.
#[derive(Debug, Clone)]
pub struct RemoteSettings {
    pub endpoint: Url,
    pub timeout: Option<Duration>,
}

/// Loaded configuration result containing all parts.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub resolver: ResolverConfig,
    pub remote: RemoteSettings,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: PathBuf,
    overrides: Overrides,
}

impl ConfigLoader {
    pub fn new(config_path: impl AsRef<Path>, overrides: Overrides) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            overrides,
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file, or fall back to defaults if it does not exist
    /// 2. Apply CLI overrides
    /// 3. Validate the configuration
    /// 4. Build the loaded configuration
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let file_config = match std::fs::read_to_string(&self.config_path) {
            Ok(content) => toml::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(
                    "No configuration file at {:?}, using defaults",
                    self.config_path
                );
                FileConfig::default()
            }
            Err(e) => return Err(e.into()),
        };
        self.build(file_config)
    }

    fn build(&self, mut file_config: FileConfig) -> Result<LoadedConfig, ConfigError> {
        if let Some(variant) = self.overrides.variant {
            file_config.resolver.variant = variant;
        }

        let endpoint = match &self.overrides.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => parse_url(&file_config.remote.endpoint)?,
        };
        let base_url = parse_url(&file_config.site.base_url)?;

        self.validate(&file_config, &base_url, &endpoint)?;

        let error_landing = file_config
            .site
            .error_landing_path
            .clone()
            .unwrap_or_else(|| file_config.site.landing_path.clone());
        let site = FallbackSite::new(base_url, file_config.site.landing_path.clone(), error_landing)
            .map_err(|source| ConfigError::UrlError {
                value: file_config.site.landing_path.clone(),
                source,
            })?;

        Ok(LoadedConfig {
            resolver: ResolverConfig::new(file_config.resolver.variant, site)
                .with_scheme_prefix(file_config.launch.scheme_prefix),
            remote: RemoteSettings {
                endpoint,
                timeout: file_config.remote.timeout_secs.map(Duration::from_secs),
            },
        })
    }

    fn validate(
        &self,
        config: &FileConfig,
        base_url: &Url,
        endpoint: &Url,
    ) -> Result<(), ConfigError> {
        // Landing paths are joined onto the base, which drops a last segment
        // not followed by a slash.
        if !base_url.path().ends_with('/') {
            return Err(ConfigError::ValidationError(format!(
                "site base_url must end with '/': {base_url}"
            )));
        }
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError(format!(
                "remote endpoint must be http(s): {endpoint}"
            )));
        }
        if config.launch.scheme_prefix.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "launch scheme_prefix must not be empty".to_owned(),
            ));
        }
        if config.remote.timeout_secs == Some(0) {
            return Err(ConfigError::ValidationError(
                "remote timeout_secs must be positive".to_owned(),
            ));
        }
        Ok(())
    }
}

fn parse_url(value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|source| ConfigError::UrlError {
        value: value.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loader(overrides: Overrides) -> ConfigLoader {
        ConfigLoader::new("/nonexistent/paylink.toml", overrides)
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let loaded = loader(Overrides::default()).load().unwrap();
        assert_eq!(loaded.resolver.variant, Variant::DualPath);
        assert_eq!(loaded.resolver.scheme_prefix, "paymentapp://");
        assert_eq!(
            loaded.resolver.site.base_url().as_str(),
            "https://serebrovskaya.github.io/ifAppNotFound/"
        );
        assert_eq!(
            loaded.remote.endpoint.as_str(),
            "https://danil12121.github.io/payment.json"
        );
        assert!(loaded.remote.timeout.is_none());
    }

    #[test]
    fn test_overrides_win() {
        let overrides = Overrides {
            variant: Some(Variant::Redirecting),
            endpoint: Some(Url::parse("http://127.0.0.1:9000/api/payment").unwrap()),
        };
        let loaded = loader(overrides).load().unwrap();
        assert_eq!(loaded.resolver.variant, Variant::Redirecting);
        assert_eq!(loaded.remote.endpoint.path(), "/api/payment");
    }

    #[test]
    fn test_validation_errors() {
        let mut config = FileConfig::default();
        config.site.base_url = "https://pay.example.com/app".to_owned();
        assert!(matches!(
            loader(Overrides::default()).build(config),
            Err(ConfigError::ValidationError(_))
        ));

        let mut config = FileConfig::default();
        config.remote.endpoint = "ftp://files.example.com/payment.json".to_owned();
        assert!(matches!(
            loader(Overrides::default()).build(config),
            Err(ConfigError::ValidationError(_))
        ));

        let mut config = FileConfig::default();
        config.remote.endpoint = "not a url".to_owned();
        assert!(matches!(
            loader(Overrides::default()).build(config),
            Err(ConfigError::UrlError { .. })
        ));
    }

    #[test]
    fn test_error_landing_defaults_to_landing() {
        let mut config = FileConfig::default();
        config.site.landing_path = "pay.html".to_owned();
        let loaded = loader(Overrides::default()).build(config).unwrap();
        let site = &loaded.resolver.site;
        assert_eq!(
            site.with_payload("x").unwrap().path(),
            "/ifAppNotFound/pay.html"
        );
    }
}

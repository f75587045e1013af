//! Content store location.
//!
//! The only recognised option is the base URL of the content store. When
//! unset, the store is assumed to share the site's origin under `/api`.

use crate::traits::{SourceConfig, SourceError, SourceResult};
use serde::{Deserialize, Serialize};

/// Environment variable holding the content store base URL.
pub const API_URL_ENV: &str = "EQ_API_URL";

/// Environment variable holding the site origin used to absolutize relative
/// base URLs.
pub const SITE_ORIGIN_ENV: &str = "EQ_SITE_ORIGIN";

pub const DEFAULT_API_PATH: &str = "/api";

pub const DEFAULT_SITE_ORIGIN: &str = "http://127.0.0.1:3001";

fn default_api_url() -> String {
    DEFAULT_API_PATH.to_string()
}

fn default_site_origin() -> String {
    DEFAULT_SITE_ORIGIN.to_string()
}

fn default_timeout() -> u64 {
    10
}

/// Where the content store lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentStoreConfig {
    /// Absolute URL, or a path relative to `site_origin`.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_site_origin")]
    pub site_origin: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ContentStoreConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            site_origin: default_site_origin(),
            timeout_secs: default_timeout(),
        }
    }
}

impl ContentStoreConfig {
    /// Reads `EQ_API_URL` and `EQ_SITE_ORIGIN`, keeping defaults for unset
    /// or empty variables.
    pub fn from_env() -> Self {
        Self::default().with_overrides(
            std::env::var(API_URL_ENV).ok(),
            std::env::var(SITE_ORIGIN_ENV).ok(),
        )
    }

    /// Applies optional overrides; empty strings count as unset.
    pub fn with_overrides(mut self, api_url: Option<String>, site_origin: Option<String>) -> Self {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.api_url = url.trim().to_string();
        }
        if let Some(origin) = site_origin.filter(|o| !o.trim().is_empty()) {
            self.site_origin = origin.trim().to_string();
        }
        self
    }

    pub fn is_relative(&self) -> bool {
        !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://")
    }

    /// Absolute base URL of the store, without a trailing slash.
    pub fn base_url(&self) -> SourceResult<String> {
        if !self.is_relative() {
            return Ok(self.api_url.trim_end_matches('/').to_string());
        }

        let origin = self.site_origin.trim_end_matches('/');
        if !origin.starts_with("http://") && !origin.starts_with("https://") {
            return Err(SourceError::ConfigError(format!(
                "site origin must be absolute to resolve {}: {}",
                self.api_url, self.site_origin
            )));
        }

        let path = self.api_url.trim_start_matches('/').trim_end_matches('/');
        if path.is_empty() {
            Ok(origin.to_string())
        } else {
            Ok(format!("{}/{}", origin, path))
        }
    }

    /// Source configuration for [`crate::HttpContentSource`].
    pub fn source_config(&self) -> SourceResult<SourceConfig> {
        Ok(SourceConfig::new(&self.base_url()?).with_timeout(self.timeout_secs))
    }
}

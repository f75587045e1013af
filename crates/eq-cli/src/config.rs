//! Configuration loading for the Equilibrar CLI.

use anyhow::{Context, Result};
use eq_api::DEFAULT_PORT;
use eq_hydration::config::{API_URL_ENV, DEFAULT_SITE_ORIGIN, SITE_ORIGIN_ENV};
use eq_hydration::ContentStoreConfig;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::Path;

/// Environment variable overriding the listening port.
pub const PORT_ENV: &str = "PORT";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,

    /// Where pages hydrate from.
    #[serde(default)]
    pub content_store: ContentStoreConfig,

    #[serde(default)]
    pub logging: LogSettings,
}

/// Listening socket of the site server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Serve `/api-docs/openapi.json`.
    #[serde(default = "default_true")]
    pub enable_openapi: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_true() -> bool {
    true
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_openapi: true,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Saves configuration to a file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let contents = serde_yaml::to_string(self)?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Overlays `EQ_API_URL`, `EQ_SITE_ORIGIN` and `PORT`.
    pub fn with_env(self) -> Result<Self> {
        self.with_overrides(
            std::env::var(API_URL_ENV).ok(),
            std::env::var(SITE_ORIGIN_ENV).ok(),
            std::env::var(PORT_ENV).ok(),
        )
    }

    /// Applies overrides. Empty values count as unset; a port that does
    /// not parse is an error.
    pub fn with_overrides(
        mut self,
        api_url: Option<String>,
        site_origin: Option<String>,
        port: Option<String>,
    ) -> Result<Self> {
        self.content_store = self.content_store.with_overrides(api_url, site_origin);

        if let Some(port) = port.filter(|p| !p.trim().is_empty()) {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}: {}", PORT_ENV, port))?;
        }

        Ok(self)
    }

    /// Content store location as seen by a server bound to `host:port`.
    ///
    /// A relative store URL with the stock origin points back at this
    /// server, so the origin follows the bound port.
    pub fn store_for_server(&self, host: &str, port: u16) -> ContentStoreConfig {
        let mut store = self.content_store.clone();
        if store.is_relative() && store.site_origin == DEFAULT_SITE_ORIGIN {
            store.site_origin = format!("http://{}:{}", origin_host(host), port);
        }
        store
    }
}

/// Host part of a URL that reaches a server bound to `host`.
///
/// Wildcard binds map to loopback; IPv6 literals are bracketed.
fn origin_host(host: &str) -> String {
    let bare = host.trim_start_matches('[').trim_end_matches(']');
    match bare.parse::<IpAddr>() {
        Ok(ip) if ip.is_unspecified() => "127.0.0.1".to_string(),
        Ok(IpAddr::V6(ip)) => format!("[{}]", ip),
        Ok(IpAddr::V4(ip)) => ip.to_string(),
        Err(_) if bare.is_empty() => "127.0.0.1".to_string(),
        Err(_) => bare.to_string(),
    }
}

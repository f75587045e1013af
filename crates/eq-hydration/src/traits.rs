//! Content source trait definitions.
//!
//! A content source is the remote side of hydration: anything that can
//! answer "give me entity X" or "give me collection Y". The fallback side is
//! a synchronous lookup into a local catalog.

use async_trait::async_trait;
use eq_core::{Catalog, CollectionKind, Entity, HealthStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur when talking to a content source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Server error: status {0}")]
    ServerError(u16),

    #[error("Unexpected status: {0}")]
    UnexpectedStatus(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl SourceError {
    /// True only when the source positively reported that the entity does
    /// not exist. Every other error is a transport or server failure.
    pub fn is_definitive_absence(&self) -> bool {
        matches!(self, SourceError::NotFound(_))
    }

    /// Short label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            SourceError::NotFound(_) => "not_found",
            SourceError::ConnectionFailed(_) => "connection_failed",
            SourceError::Timeout(_) => "timeout",
            SourceError::RequestFailed(_) => "request_failed",
            SourceError::ServerError(_) => "server_error",
            SourceError::UnexpectedStatus(_) => "unexpected_status",
            SourceError::InvalidResponse(_) => "invalid_response",
            SourceError::ConfigError(_) => "config_error",
        }
    }
}

/// Result type for content source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Configuration for a remote content source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Source name, used in logs.
    pub name: String,
    /// Absolute base URL of the content store API (e.g. `http://host/api`).
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Additional headers to send.
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl SourceConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            name: "content-store".to_string(),
            base_url: base_url.to_string(),
            timeout_secs: 10,
            headers: HashMap::new(),
        }
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Remote side of hydration.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Source name for logs.
    fn name(&self) -> &str;

    /// Fetches one entity. A definitive absence is `SourceError::NotFound`.
    async fn fetch_one(&self, kind: CollectionKind, slug: &str) -> SourceResult<Entity>;

    /// Fetches a whole collection.
    async fn fetch_all(&self, kind: CollectionKind) -> SourceResult<Vec<Entity>>;

    /// Checks that the source is alive.
    async fn health_check(&self) -> SourceResult<HealthStatus>;
}

/// Local side of hydration.
pub trait FallbackLookup: Send + Sync {
    fn find(&self, kind: CollectionKind, slug: &str) -> Option<Entity>;

    fn list(&self, kind: CollectionKind) -> Vec<Entity>;
}

impl FallbackLookup for Catalog {
    fn find(&self, kind: CollectionKind, slug: &str) -> Option<Entity> {
        Catalog::find(self, kind, slug)
    }

    fn list(&self, kind: CollectionKind) -> Vec<Entity> {
        Catalog::list(self, kind)
    }
}

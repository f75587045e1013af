//! HTTP content source.
//!
//! Talks to the content store over its JSON API. Each call is a single
//! attempt: no retries, no backoff. Falling back is the caller's job.

use crate::traits::{ContentSource, SourceConfig, SourceError, SourceResult};
use async_trait::async_trait;
use eq_core::{ApiResponse, CollectionKind, Entity, HealthStatus, Program, Service};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

/// Content source backed by the content store's HTTP API.
pub struct HttpContentSource {
    client: Client,
    config: SourceConfig,
}

impl HttpContentSource {
    /// Creates a new source from configuration.
    pub fn new(config: SourceConfig) -> SourceResult<Self> {
        if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
            return Err(SourceError::ConfigError(format!(
                "base URL must be absolute: {}",
                config.base_url
            )));
        }

        let mut headers = reqwest::header::HeaderMap::new();
        for (key, value) in &config.headers {
            if let (Ok(name), Ok(val)) = (
                reqwest::header::HeaderName::try_from(key.as_str()),
                reqwest::header::HeaderValue::try_from(value.as_str()),
            ) {
                headers.insert(name, val);
            }
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| SourceError::ConfigError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Builds a URL from a path.
    pub fn build_url(&self, path: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn entity_path(kind: CollectionKind, slug: &str) -> String {
        format!("{}/{}", kind.path_segment(), urlencoding::encode(slug))
    }

    /// Sends one GET and maps transport failures and error statuses.
    async fn get(&self, path: &str) -> SourceResult<Response> {
        let url = self.build_url(path);
        debug!(url = %url, "GET");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout(e.to_string())
            } else if e.is_connect() {
                SourceError::ConnectionFailed(e.to_string())
            } else {
                SourceError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        match status {
            StatusCode::NOT_FOUND => Err(SourceError::NotFound(url)),
            s if s.is_server_error() => Err(SourceError::ServerError(s.as_u16())),
            s => Err(SourceError::UnexpectedStatus(s.as_u16())),
        }
    }

    /// Parses a JSON response body.
    async fn parse_json_response<T: DeserializeOwned>(response: Response) -> SourceResult<T> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SourceError::InvalidResponse(e.to_string()))?;

        serde_json::from_str(&text).map_err(|e| {
            SourceError::InvalidResponse(format!(
                "Failed to parse response (status {}): {} - Body: {}",
                status,
                e,
                text.chars().take(500).collect::<String>()
            ))
        })
    }

    /// GETs an envelope and unwraps its payload.
    async fn get_data<T: DeserializeOwned>(&self, path: &str) -> SourceResult<T> {
        let response = self.get(path).await?;
        let envelope: ApiResponse<T> = Self::parse_json_response(response).await?;
        envelope.into_data().ok_or_else(|| {
            SourceError::InvalidResponse(format!("envelope for {} carried no data", path))
        })
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    fn name(&self) -> &str {
        &self.config.name
    }

    #[instrument(skip(self), fields(source = %self.config.name))]
    async fn fetch_one(&self, kind: CollectionKind, slug: &str) -> SourceResult<Entity> {
        let path = Self::entity_path(kind, slug);
        match kind {
            CollectionKind::Program => self.get_data::<Program>(&path).await.map(Entity::Program),
            CollectionKind::Service => self.get_data::<Service>(&path).await.map(Entity::Service),
        }
    }

    #[instrument(skip(self), fields(source = %self.config.name))]
    async fn fetch_all(&self, kind: CollectionKind) -> SourceResult<Vec<Entity>> {
        let path = kind.path_segment();
        match kind {
            CollectionKind::Program => Ok(self
                .get_data::<Vec<Program>>(path)
                .await?
                .into_iter()
                .map(Entity::Program)
                .collect()),
            CollectionKind::Service => Ok(self
                .get_data::<Vec<Service>>(path)
                .await?
                .into_iter()
                .map(Entity::Service)
                .collect()),
        }
    }

    async fn health_check(&self) -> SourceResult<HealthStatus> {
        let response = self.get("health").await?;
        Self::parse_json_response(response).await
    }
}

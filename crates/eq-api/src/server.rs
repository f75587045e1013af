//! Site server implementation.

use axum::{http::header, middleware, response::IntoResponse, routing::get, Router};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use utoipa::OpenApi;

use crate::error::{ApiError, ErrorResponse};
use crate::middleware::{cors_layer, request_id, request_logging, security_headers};
use crate::routes;
use crate::state::AppState;
use crate::web;
use eq_core::models::{
    ProgramEnvelope, ProgramListEnvelope, ServiceEnvelope, ServiceListEnvelope,
};
use eq_core::{Author, GridItem, HealthStatus, Program, Service};

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3001;

/// Path of the OpenAPI document.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Address to bind to.
    pub bind_address: SocketAddr,
    /// Serve the OpenAPI document.
    pub enable_openapi: bool,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            enable_openapi: true,
        }
    }
}

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::programs::list_programs,
        crate::routes::programs::get_program,
        crate::routes::services::list_services,
        crate::routes::services::get_service,
        crate::routes::health::health_check,
    ),
    components(
        schemas(
            Program,
            Service,
            Author,
            GridItem,
            HealthStatus,
            ProgramEnvelope,
            ProgramListEnvelope,
            ServiceEnvelope,
            ServiceListEnvelope,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Programs", description = "Therapeutic programs"),
        (name = "Services", description = "Clinical services"),
        (name = "Health", description = "Content store liveness"),
    ),
    info(
        title = "Equilibrar Content Store",
        version = "0.1.0",
        description = "Read-only content API for programs and services",
        license(name = "MIT"),
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Result<impl IntoResponse, ApiError> {
    let body = ApiDoc::openapi().to_pretty_json()?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}

/// Site server: content store API plus rendered pages.
pub struct ApiServer {
    config: ApiServerConfig,
    state: AppState,
}

impl ApiServer {
    pub fn new(state: AppState, config: ApiServerConfig) -> Self {
        Self { config, state }
    }

    /// Creates a server with default configuration.
    pub fn with_state(state: AppState) -> Self {
        Self::new(state, ApiServerConfig::default())
    }

    pub fn config(&self) -> &ApiServerConfig {
        &self.config
    }

    /// Builds the router.
    pub fn router(&self) -> Router {
        let mut app = routes::create_router(self.state.clone());

        if self.config.enable_openapi {
            app = app.route(OPENAPI_PATH, get(openapi_json));
        }

        // Pages last: their fallback catches every path not matched above.
        app.merge(web::create_web_router(self.state.clone()))
            .layer(middleware::from_fn(security_headers))
            .layer(middleware::from_fn(request_logging))
            .layer(middleware::from_fn(request_id))
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer())
            .layer(CatchPanicLayer::new())
    }

    /// Runs the server until Ctrl+C or SIGTERM.
    pub async fn run(self) -> Result<(), std::io::Error> {
        self.run_until(shutdown_signal()).await
    }

    /// Runs the server with a custom shutdown signal.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.config.bind_address).await?;
        self.serve(listener, shutdown).await
    }

    /// Serves on an already bound listener.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        let addr = listener.local_addr()?;

        info!(address = %addr, "Starting site server");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Site server shut down gracefully");
        Ok(())
    }
}

/// Default shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eq_hydration::MockContentSource;
    use std::sync::Arc;

    #[test]
    fn test_router_creation() {
        let state = AppState::bundled(Arc::new(MockContentSource::new("store")));
        let server = ApiServer::with_state(state);
        let _router = server.router();
        assert_eq!(server.config().bind_address.port(), DEFAULT_PORT);
    }

    #[test]
    fn test_openapi_lists_content_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/programs",
            "/api/programs/{slug}",
            "/api/services",
            "/api/services/{slug}",
            "/api/health",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {}",
                expected
            );
        }
    }

    #[test]
    fn test_openapi_content_responses_use_envelopes() {
        let json = ApiDoc::openapi().to_json().unwrap();
        for schema in [
            "ProgramEnvelope",
            "ProgramListEnvelope",
            "ServiceEnvelope",
            "ServiceListEnvelope",
        ] {
            assert!(
                json.contains(&format!("\"#/components/schemas/{}\"", schema)),
                "no response references {}",
                schema
            );
        }
    }
}

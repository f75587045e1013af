//! Serve command - starts the site server.

use anyhow::{Context, Result};
use colored::Colorize;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use eq_api::{ApiServer, ApiServerConfig, AppState};
use eq_core::BOUND_ROUTES;
use eq_hydration::HttpContentSource;

use crate::config::AppConfig;

/// Server configuration from CLI arguments.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    /// Port to listen on.
    pub port: u16,
    /// Hostname to bind to.
    pub host: String,
    /// Serve the OpenAPI document.
    pub enable_openapi: bool,
}

impl ServeConfig {
    /// Server settings from the loaded configuration, with CLI overrides.
    pub fn from_app_config(config: &AppConfig, port: Option<u16>, host: Option<String>) -> Self {
        Self {
            port: port.unwrap_or(config.server.port),
            host: host.unwrap_or_else(|| config.server.host.clone()),
            enable_openapi: config.server.enable_openapi,
        }
    }

    /// Socket to bind. IPv6 hosts may be given with or without brackets.
    pub fn bind_address(&self) -> Result<SocketAddr> {
        let host = self.host.trim_start_matches('[').trim_end_matches(']');
        let ip: IpAddr = host
            .parse()
            .with_context(|| format!("Invalid bind address: {}:{}", self.host, self.port))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Builds the application state: the bundled catalog is served under
/// `/api`, and pages hydrate over HTTP from the configured store.
pub fn build_state(config: &ServeConfig, app_config: &AppConfig) -> Result<AppState> {
    let store = app_config.store_for_server(&config.host, config.port);
    let source_config = store
        .source_config()
        .context("Invalid content store configuration")?;
    let source =
        HttpContentSource::new(source_config).context("Failed to create content store client")?;

    Ok(AppState::bundled(Arc::new(source)))
}

/// Runs the site server.
pub async fn run_server(config: ServeConfig, app_config: AppConfig) -> Result<()> {
    println!("{} Starting Equilibrar site server...", "[server]".cyan());

    let bind_address = config.bind_address()?;
    let store_url = app_config
        .store_for_server(&config.host, config.port)
        .base_url()
        .context("Invalid content store configuration")?;
    let state = build_state(&config, &app_config)?;

    let server_config = ApiServerConfig {
        bind_address,
        enable_openapi: config.enable_openapi,
    };

    println!();
    println!("{}", "Equilibrar Site Server".bold());
    println!("{}", "═".repeat(40));
    println!("  {} http://{}", "Address:".cyan(), bind_address);
    println!("  {} {}", "Content store:".cyan(), store_url);

    if config.enable_openapi {
        println!(
            "  {} http://{}{}",
            "OpenAPI:".cyan(),
            bind_address,
            eq_api::server::OPENAPI_PATH
        );
    }

    println!();
    println!("{}", "Endpoints:".bold());
    println!("  GET  /api/health              - Content store health");
    println!("  GET  /api/programs            - List programs");
    println!("  GET  /api/programs/:slug      - Get program");
    println!("  GET  /api/services            - List services");
    println!("  GET  /api/services/:slug      - Get service");
    println!("  GET  /                        - Home page");
    for route in BOUND_ROUTES {
        println!("  GET  {:<26}- {} detail", route.path, route.kind);
    }
    println!();
    println!("Press {} to stop", "Ctrl+C".yellow());
    println!();

    let server = ApiServer::new(state, server_config);
    server.run().await.context("Server error")?;

    println!();
    println!("{} Server stopped", "[server]".cyan());

    Ok(())
}

//! Configuration and content validation.
//!
//! Findings are collected rather than returned early so one run reports
//! everything that needs fixing.

use crate::config::AppConfig;
use colored::Colorize;
use eq_core::{Catalog, CollectionKind, Entity};
use eq_hydration::ContentSource;
use std::str::FromStr;

/// Result of a validation run.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Problems that prevent startup.
    pub errors: Vec<String>,
    /// Problems worth fixing that don't prevent startup.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Prints the result to the console.
    pub fn print(&self) {
        if !self.warnings.is_empty() {
            println!();
            println!("{}", "Warnings:".yellow().bold());
            for warning in &self.warnings {
                println!("  {} {}", "⚠".yellow(), warning);
            }
        }

        if !self.errors.is_empty() {
            println!();
            println!("{}", "Errors:".red().bold());
            for error in &self.errors {
                println!("  {} {}", "✗".red(), error);
            }
        }

        if self.errors.is_empty() && self.warnings.is_empty() {
            println!("  {} Configuration OK", "✓".green());
        }
    }
}

/// Validates configuration and the bundled catalog before startup.
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(config: &AppConfig) -> ValidationResult {
        let mut result = ValidationResult::new();

        Self::validate_content_store(config, &mut result);
        Self::validate_server(config, &mut result);
        Self::validate_logging(config, &mut result);
        Self::validate_catalog(Catalog::bundled(), &mut result);

        result
    }

    fn validate_content_store(config: &AppConfig, result: &mut ValidationResult) {
        let store = &config.content_store;

        if let Err(e) = store.base_url() {
            result.add_error(format!("Content store URL cannot be resolved: {}", e));
        }

        if store.timeout_secs == 0 {
            result.add_error("content_store.timeout_secs must be greater than zero");
        }
    }

    fn validate_server(config: &AppConfig, result: &mut ValidationResult) {
        if config.server.host.trim().is_empty() {
            result.add_error("server.host is empty");
        }

        if config.server.port == 0 {
            result.add_warning("server.port is 0; the OS will pick an ephemeral port");
        }
    }

    fn validate_logging(config: &AppConfig, result: &mut ValidationResult) {
        if tracing::Level::from_str(config.logging.level.trim()).is_err() {
            result.add_warning(format!(
                "Unknown log level '{}'; using info",
                config.logging.level
            ));
        }
    }

    /// Slug invariants of the fallback dataset.
    pub fn validate_catalog(catalog: &Catalog, result: &mut ValidationResult) {
        for finding in catalog.validate() {
            result.add_error(format!("Fallback catalog: {}", finding));
        }
    }

    /// Compares the store's collections with the bundled dataset.
    ///
    /// Drift is reported as warnings. An unreachable store is a warning
    /// too, since pages still render from the fallback.
    pub async fn check_drift(source: &dyn ContentSource, result: &mut ValidationResult) {
        let mut programs = Vec::new();
        let mut services = Vec::new();

        for kind in CollectionKind::all() {
            match source.fetch_all(kind).await {
                Ok(entities) => {
                    for entity in entities {
                        match entity {
                            Entity::Program(p) => programs.push(p),
                            Entity::Service(s) => services.push(s),
                        }
                    }
                }
                Err(e) => {
                    result.add_warning(format!(
                        "Content store {} unavailable ({}); drift not checked",
                        source.name(),
                        e
                    ));
                    return;
                }
            }
        }

        let store = Catalog::new(programs, services);
        let bundled = Catalog::bundled();

        for (kind, slug) in store.missing_from(bundled) {
            result.add_warning(format!(
                "{} '{}' is in the content store but has no fallback",
                kind, slug
            ));
        }
        for (kind, slug) in bundled.missing_from(&store) {
            result.add_warning(format!(
                "{} '{}' is bundled but missing from the content store",
                kind, slug
            ));
        }
    }
}

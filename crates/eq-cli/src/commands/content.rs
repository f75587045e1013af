//! Content commands - resolve entities the way the site pages do.

use anyhow::{Context, Result};
use colored::Colorize;
use std::sync::Arc;

use eq_core::{CollectionKind, Entity, BOUND_ROUTES};
use eq_hydration::{ContentSource, HttpContentSource};

use crate::config::AppConfig;

/// HTTP source for the configured content store.
pub fn content_source(config: &AppConfig) -> Result<Arc<dyn ContentSource>> {
    let source_config = config
        .content_store
        .source_config()
        .context("Invalid content store configuration")?;
    let source =
        HttpContentSource::new(source_config).context("Failed to create content store client")?;
    Ok(Arc::new(source))
}

/// Renders one entity as text or pretty JSON.
pub fn print_entity(entity: &Entity, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(entity)?);
    }

    let mut out = Vec::new();
    out.push(format!("{}", entity.title().bold()));
    out.push("─".repeat(entity.title().chars().count().max(20)));
    out.push(format!("  {} {}", "Kind:".cyan(), entity.kind()));
    out.push(format!("  {} {}", "Slug:".cyan(), entity.slug()));
    out.push(format!("  {} {}", "Id:".cyan(), entity.id()));

    match entity {
        Entity::Program(program) => {
            out.push(format!("  {} {}", "Subtitle:".cyan(), program.subtitle));
            out.push(format!("  {} {}", "Price:".cyan(), program.formatted_price()));
            out.push(format!("  {} {}", "Duration:".cyan(), program.duration));
            out.push(format!("  {} {}", "Author:".cyan(), program.author.name));
            out.push(format!("  {} {}", "Checkout:".cyan(), program.checkout_url()));
        }
        Entity::Service(service) => {
            out.push(format!("  {} {}", "Subtitle:".cyan(), service.subtitle));
            out.push(format!("  {} {}", "Booking:".cyan(), service.booking_url()));
        }
    }

    Ok(out.join("\n"))
}

/// Renders a collection as a table or a JSON array.
pub fn print_entities(kind: CollectionKind, entities: &[Entity], json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(entities)?);
    }

    let mut out = Vec::new();
    out.push(format!("{} ({})", kind.path_segment().bold(), entities.len()));
    out.push(format!("{:<26} {}", "SLUG".bold(), "TITLE".bold()));
    for entity in entities {
        out.push(format!("{:<26} {}", entity.slug(), entity.title()));
    }

    Ok(out.join("\n"))
}

/// Renders the page routing table.
pub fn print_routes(json: bool) -> Result<String> {
    if json {
        let routes: Vec<_> = BOUND_ROUTES
            .iter()
            .map(|route| {
                serde_json::json!({
                    "path": route.path,
                    "kind": route.kind,
                    "slug": route.slug,
                })
            })
            .collect();
        return Ok(serde_json::to_string_pretty(&routes)?);
    }

    let mut out = Vec::new();
    out.push(format!("{:<26} {:<9} {}", "PATH".bold(), "KIND".bold(), "SLUG".bold()));
    out.push(format!("{:<26} {:<9} {}", "/", "home", "-"));
    for route in BOUND_ROUTES {
        out.push(format!("{:<26} {:<9} {}", route.path, route.kind, route.slug));
    }
    out.push(format!("{:<26} {:<9} {}", "/:slug", "program", ":slug"));

    Ok(out.join("\n"))
}

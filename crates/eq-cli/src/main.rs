//! Equilibrar CLI
//!
//! Command-line interface for the Equilibrar site: runs the server and
//! resolves content the same way the pages do.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};

mod commands;
mod config;
mod validator;

use commands::{content_source, print_entities, print_entity, print_routes, run_server, ServeConfig};
use config::AppConfig;
use eq_core::CollectionKind;
use eq_hydration::HydrationClient;
use validator::ConfigValidator;

#[derive(Parser)]
#[command(name = "equilibrar")]
#[command(version)]
#[command(about = "Equilibrar clinic site server and content tools", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    format: OutputFormat,

    /// Content store base URL
    #[arg(long, env = "EQ_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start the site server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Validate configuration and exit
        #[arg(long)]
        validate_only: bool,
    },

    /// Resolve one program or service, falling back to bundled content
    Fetch {
        /// Collection (program, service)
        kind: CollectionKind,

        /// Entity slug
        slug: String,
    },

    /// List a collection, falling back to bundled content
    List {
        /// Collection (program, service)
        kind: CollectionKind,
    },

    /// Show the page routing table
    Routes,

    /// Validate configuration and compare the store with bundled content
    Validate {
        /// Skip the content store comparison
        #[arg(long)]
        offline: bool,
    },

    /// Show current configuration
    Config {
        /// Also write the effective configuration to this file
        #[arg(long, value_name = "FILE")]
        write: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = match AppConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) if cli.config.is_some() => return Err(e),
        Err(_) => {
            if cli.verbose {
                eprintln!("Using default configuration (no config file found)");
            }
            AppConfig::default()
        }
    };
    let config = config
        .with_env()?
        .with_overrides(cli.api_url.clone(), None, None)?;

    let logging = if cli.verbose {
        eq_observability::LoggingConfig::development()
    } else {
        eq_observability::LoggingConfig::default().with_level_name(&config.logging.level)
    };
    eq_observability::init_logging_with_config(eq_observability::LoggingConfig {
        json_format: config.logging.json || cli.format == OutputFormat::Json,
        ..logging
    });

    let json = cli.format == OutputFormat::Json;

    match cli.command {
        Commands::Serve {
            port,
            host,
            validate_only,
        } => cmd_serve(ServeConfig::from_app_config(&config, port, host), config, validate_only).await,
        Commands::Fetch { kind, slug } => cmd_fetch(&config, kind, &slug, json).await,
        Commands::List { kind } => cmd_list(&config, kind, json).await,
        Commands::Routes => {
            println!("{}", print_routes(json)?);
            Ok(())
        }
        Commands::Validate { offline } => cmd_validate(&config, offline).await,
        Commands::Config { write } => cmd_config(&config, json, write.as_deref()),
    }
}

fn default_config_path() -> PathBuf {
    PathBuf::from("config/equilibrar.yaml")
}

async fn cmd_serve(serve_config: ServeConfig, app_config: AppConfig, validate_only: bool) -> Result<()> {
    println!("{}", "Validating configuration...".cyan());

    let validation_result = ConfigValidator::validate(&app_config);
    validation_result.print();

    if validation_result.has_errors() {
        println!();
        println!(
            "{}",
            "Server startup aborted due to configuration errors. Fix the errors above and try again."
                .red()
                .bold()
        );
        std::process::exit(1);
    }

    if validate_only {
        println!();
        println!("{}", "Configuration is valid. Server can be started.".green().bold());
        return Ok(());
    }

    println!();
    run_server(serve_config, app_config).await
}

async fn cmd_fetch(config: &AppConfig, kind: CollectionKind, slug: &str, json: bool) -> Result<()> {
    let client = HydrationClient::new(content_source(config)?);

    match client.resolve(kind, slug).await {
        Some(entity) => {
            println!("{}", print_entity(&entity, json)?);
            Ok(())
        }
        None => {
            if json {
                println!("null");
            } else {
                println!("{} {} '{}' not found", "✗".red(), kind, slug);
            }
            std::process::exit(1);
        }
    }
}

async fn cmd_list(config: &AppConfig, kind: CollectionKind, json: bool) -> Result<()> {
    let client = HydrationClient::new(content_source(config)?);
    let entities = client.resolve_all(kind).await;
    println!("{}", print_entities(kind, &entities, json)?);
    Ok(())
}

async fn cmd_validate(config: &AppConfig, offline: bool) -> Result<()> {
    let store_url = config
        .content_store
        .base_url()
        .unwrap_or_else(|_| config.content_store.api_url.clone());
    println!("Validating configuration for store: {}", store_url.cyan());

    let mut validation_result = ConfigValidator::validate(config);
    if !offline && !validation_result.has_errors() {
        let source = content_source(config)?;
        ConfigValidator::check_drift(source.as_ref(), &mut validation_result).await;
    }
    validation_result.print();

    println!();
    println!("{}", "Configuration Summary".bold());
    println!("─────────────────────");
    println!("  Listen: {}:{}", config.server.host, config.server.port);
    println!("  Content store: {}", store_url);
    println!("  Timeout: {}s", config.content_store.timeout_secs);
    println!("  Log level: {}", config.logging.level);

    if validation_result.has_errors() {
        println!();
        println!("{}", "Configuration validation failed. Fix the errors above.".red().bold());
        std::process::exit(1);
    } else if validation_result.has_warnings() {
        println!();
        println!("{}", "Configuration is valid with warnings.".yellow().bold());
    } else {
        println!();
        println!("{}", "Configuration is valid.".green().bold());
    }

    Ok(())
}

fn cmd_config(config: &AppConfig, json: bool, write: Option<&Path>) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
    } else {
        let yaml = serde_yaml::to_string(config).context("Failed to render configuration")?;
        println!("{}", "Current Configuration".bold());
        println!("─────────────────────────");
        print!("{}", yaml);
    }

    if let Some(path) = write {
        config.save(path)?;
        eprintln!("{} Configuration written to {}", "✓".green(), path.display());
    }
    Ok(())
}

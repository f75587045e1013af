//! Logging infrastructure for the Equilibrar site.
//!
//! Structured logging on top of the tracing ecosystem. The default filter
//! covers every workspace crate at the configured level; `RUST_LOG`
//! overrides it entirely.

use std::str::FromStr;
use tracing::Level;
use tracing::Subscriber;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan, writer::BoxMakeWriter},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Workspace crates covered by the default filter.
const WORKSPACE_TARGETS: [&str; 5] = [
    "eq_core",
    "eq_hydration",
    "eq_api",
    "eq_observability",
    "eq_cli",
];

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level.
    pub level: Level,
    /// Whether to use JSON format.
    pub json_format: bool,
    /// Whether to include span events.
    pub include_spans: bool,
    /// Whether to include file/line info.
    pub include_location: bool,
    /// Whether to include thread IDs.
    pub include_thread_ids: bool,
    /// Whether to include target (module path).
    pub include_target: bool,
    /// Where log lines go. Stdout is left to command output.
    pub writer: LogWriter,
}

/// Destination of formatted log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogWriter {
    Stdout,
    #[default]
    Stderr,
}

impl LogWriter {
    fn make_writer(self) -> BoxMakeWriter {
        match self {
            LogWriter::Stdout => BoxMakeWriter::new(std::io::stdout),
            LogWriter::Stderr => BoxMakeWriter::new(std::io::stderr),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            json_format: false,
            include_spans: false,
            include_location: false,
            include_thread_ids: false,
            include_target: true,
            writer: LogWriter::Stderr,
        }
    }
}

impl LoggingConfig {
    /// Verbose output for local work.
    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            json_format: false,
            include_spans: true,
            include_location: true,
            include_thread_ids: true,
            include_target: true,
            writer: LogWriter::Stderr,
        }
    }

    /// JSON output for log aggregation.
    pub fn production() -> Self {
        Self {
            level: Level::INFO,
            json_format: true,
            include_spans: false,
            include_location: false,
            include_thread_ids: false,
            include_target: true,
            writer: LogWriter::Stderr,
        }
    }

    /// Overrides the level from a name such as `"debug"`. Unknown names
    /// keep the current level.
    pub fn with_level_name(mut self, name: &str) -> Self {
        if let Ok(level) = Level::from_str(name.trim()) {
            self.level = level;
        }
        self
    }

    /// Filter directive used when `RUST_LOG` is unset.
    pub fn default_directive(&self) -> String {
        WORKSPACE_TARGETS
            .iter()
            .map(|target| format!("{}={}", target, self.level))
            .chain(std::iter::once(format!("tower_http={}", self.level)))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Initializes the logging system with default configuration.
pub fn init_logging() {
    init_logging_with_config(LoggingConfig::default());
}

/// Initializes the logging system with the given configuration.
///
/// Does nothing if a global subscriber is already installed.
pub fn init_logging_with_config(config: LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));

    let result = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer(&config, config.writer.make_writer()))
        .try_init();

    if let Err(e) = result {
        tracing::debug!(error = %e, "Logging already initialized");
    }
}

/// Formatting layer for `config`, writing to `writer`.
fn fmt_layer<S>(config: &LoggingConfig, writer: BoxMakeWriter) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let span_events = if config.include_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let layer = fmt::layer()
        .with_writer(writer)
        .with_span_events(span_events)
        .with_file(config.include_location)
        .with_line_number(config.include_location)
        .with_thread_ids(config.include_thread_ids)
        .with_target(config.include_target);

    if config.json_format {
        layer.json().boxed()
    } else {
        layer.boxed()
    }
}

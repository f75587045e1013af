//! # eq-observability
//!
//! Logging setup shared by the Equilibrar server and CLI.

pub mod logging;

pub use logging::{init_logging, init_logging_with_config, LogWriter, LoggingConfig};

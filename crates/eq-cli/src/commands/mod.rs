//! CLI command implementations.

pub mod content;
pub mod serve;

pub use content::{content_source, print_entities, print_entity, print_routes};
pub use serve::{run_server, ServeConfig};

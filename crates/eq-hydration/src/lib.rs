//! # eq-hydration
//!
//! Content store client for the Equilibrar site.
//!
//! This crate resolves programs and services against the remote content
//! store and falls back to the bundled catalog when the store cannot be
//! reached. It also provides the async sessions that drive the view
//! controllers from `eq-core`.

pub mod client;
pub mod config;
pub mod fallback;
pub mod http;
pub mod mock;
pub mod session;
pub mod traits;

pub use traits::{ContentSource, FallbackLookup, SourceConfig, SourceError, SourceResult};

pub use client::HydrationClient;
pub use config::ContentStoreConfig;
pub use fallback::{BundledFallback, CountingFallback};
pub use http::HttpContentSource;
pub use mock::{MockBehavior, MockContentSource};
pub use session::{HydrationSession, ListingSession, ProgramPage};

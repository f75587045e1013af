//! # eq-core
//!
//! Content model and view logic for the Equilibrar site.
//!
//! This crate holds the program/service records and their response
//! envelope, the bundled fallback catalog, the page routing table, the
//! loading/not-found/ready view controllers, and the scroll page tracker
//! used by program detail pages. Nothing here performs I/O.

pub mod catalog;
pub mod models;
pub mod routes;
pub mod scroll;
pub mod view;

pub use catalog::{Catalog, CatalogError};
pub use models::{
    ApiResponse, Author, CollectionKind, ContentEntity, Entity, GridItem, HealthStatus, Program,
    Service,
};
pub use routes::{BoundRoute, Route, BOUND_ROUTES};
pub use scroll::{
    IntersectionEvent, PageTracker, ScrollBehavior, ScrollContainer, SectionWatcher,
    TrackerError, PAGE_COUNT,
};
pub use view::{
    DetailController, ListingController, ListingState, Navigation, Rendered, ResolutionTicket,
    ViewState,
};

//! Static page routing table.
//!
//! Every page is bound to a fixed slug. A single-segment dynamic path
//! (`/:slug`) also resolves, as a program detail page, but only after the
//! bound routes have been checked.

use crate::models::CollectionKind;
use serde::Serialize;

/// Which page template a path renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum Route {
    Home,
    ServiceDetail { slug: String },
    ProgramDetail { slug: String },
    /// Path that no page handles.
    Unknown { path: String },
}

/// One bound entry of the routing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundRoute {
    pub path: &'static str,
    pub kind: CollectionKind,
    pub slug: &'static str,
}

/// Bound content routes, in navigation order.
pub const BOUND_ROUTES: &[BoundRoute] = &[
    BoundRoute {
        path: "/psiquiatria",
        kind: CollectionKind::Service,
        slug: "psiquiatria",
    },
    BoundRoute {
        path: "/psicologia",
        kind: CollectionKind::Service,
        slug: "psicologia",
    },
    BoundRoute {
        path: "/programa-angustia",
        kind: CollectionKind::Program,
        slug: "programa-angustia",
    },
    BoundRoute {
        path: "/programa-culpa",
        kind: CollectionKind::Program,
        slug: "programa-culpa",
    },
    BoundRoute {
        path: "/programa-irritabilidad",
        kind: CollectionKind::Program,
        slug: "programa-irritabilidad",
    },
];

impl Route {
    /// Maps a request path to a page. The path is percent-decoded first;
    /// one that does not decode to UTF-8 is unknown.
    pub fn resolve(path: &str) -> Route {
        let decoded = match urlencoding::decode(path) {
            Ok(decoded) => decoded,
            Err(_) => {
                return Route::Unknown {
                    path: path.to_string(),
                }
            }
        };
        let trimmed = decoded.trim_end_matches('/');
        if trimmed.is_empty() {
            return Route::Home;
        }

        if let Some(bound) = BOUND_ROUTES.iter().find(|r| r.path == trimmed) {
            return Route::for_kind(bound.kind, bound.slug);
        }

        match trimmed.strip_prefix('/') {
            Some(slug) if !slug.is_empty() && !slug.contains('/') => Route::ProgramDetail {
                slug: slug.to_string(),
            },
            _ => Route::Unknown {
                path: path.to_string(),
            },
        }
    }

    pub fn for_kind(kind: CollectionKind, slug: &str) -> Route {
        match kind {
            CollectionKind::Program => Route::ProgramDetail {
                slug: slug.to_string(),
            },
            CollectionKind::Service => Route::ServiceDetail {
                slug: slug.to_string(),
            },
        }
    }

    /// Slug the page hydrates, if any.
    pub fn slug(&self) -> Option<&str> {
        match self {
            Route::ServiceDetail { slug } | Route::ProgramDetail { slug } => Some(slug.as_str()),
            Route::Home | Route::Unknown { .. } => None,
        }
    }

    /// Program detail pages render without the site footer.
    pub fn shows_footer(&self) -> bool {
        !matches!(self, Route::ProgramDetail { .. })
    }
}

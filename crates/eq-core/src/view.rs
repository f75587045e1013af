//! View controller state machines.
//!
//! A detail view moves `Loading -> Ready(entity)` or `Loading -> NotFound`.
//! The slug is the view's key: changing it discards the held entity and
//! restarts from `Loading`. Every restart bumps a generation counter and
//! hands out a [`ResolutionTicket`]; results presented with an older ticket
//! are dropped, so a slow response for a previous slug can never overwrite
//! the state produced for the current one.
//!
//! Controllers do no I/O. Callers resolve the ticket's slug however they
//! like and feed the result back through `complete`.

use crate::models::{CollectionKind, ContentEntity};
use serde::Serialize;
use tracing::{debug, warn};

/// Link target of the "back to home" affordance.
pub const HOME_HREF: &str = "/";

/// Proof that a resolution was issued for a particular generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolutionTicket {
    generation: u64,
    slug: String,
}

impl ResolutionTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Slug the caller must resolve.
    pub fn slug(&self) -> &str {
        &self.slug
    }
}

/// State of a detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<T> {
    Loading,
    NotFound { slug: String },
    Ready(T),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ViewState::Ready(_))
    }

    pub fn entity(&self) -> Option<&T> {
        match self {
            ViewState::Ready(entity) => Some(entity),
            _ => None,
        }
    }

    /// Short state name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Loading => "loading",
            ViewState::NotFound { .. } => "not_found",
            ViewState::Ready(_) => "ready",
        }
    }
}

/// Outcome of pointing a controller at a slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The view entered `Loading`; resolve the ticket's slug.
    Resolve(ResolutionTicket),
    /// Same slug as before; nothing restarts.
    Unchanged,
    /// No slug was given; the view went straight to `NotFound`.
    MissingSlug,
}

impl Navigation {
    pub fn ticket(self) -> Option<ResolutionTicket> {
        match self {
            Navigation::Resolve(ticket) => Some(ticket),
            _ => None,
        }
    }
}

/// Branding placeholder shown while loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadingView {
    pub label: &'static str,
}

/// Message shown when the requested slug does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotFoundView {
    pub message: String,
    pub slug: String,
    pub home_href: &'static str,
    pub home_label: &'static str,
}

/// What a detail view renders in its current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered<'a, T> {
    Loading(LoadingView),
    NotFound(NotFoundView),
    Ready(&'a T),
}

fn loading_label(kind: CollectionKind) -> &'static str {
    match kind {
        CollectionKind::Program => "Cargando Experiencia...",
        CollectionKind::Service => "Cargando Servicio...",
    }
}

fn not_found_message(kind: CollectionKind, slug: &str) -> String {
    match kind {
        CollectionKind::Program => format!("Programa no encontrado ({}).", slug),
        CollectionKind::Service => format!("Servicio no encontrado ({}).", slug),
    }
}

/// Controller for a single-entity page (program or service detail).
#[derive(Debug, Clone)]
pub struct DetailController<T> {
    slug: Option<String>,
    generation: u64,
    mounted: bool,
    state: ViewState<T>,
}

impl<T: ContentEntity> Default for DetailController<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ContentEntity> DetailController<T> {
    pub fn new() -> Self {
        Self {
            slug: None,
            generation: 0,
            mounted: false,
            state: ViewState::Loading,
        }
    }

    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }

    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Starts the view for `slug`, always restarting the state machine.
    pub fn mount(&mut self, slug: Option<&str>) -> Navigation {
        self.mounted = true;
        self.restart(slug)
    }

    /// Points the view at `slug`, restarting only if the slug changed.
    pub fn navigate(&mut self, slug: Option<&str>) -> Navigation {
        if self.mounted && self.slug.as_deref() == slug {
            return Navigation::Unchanged;
        }
        self.mount(slug)
    }

    fn restart(&mut self, slug: Option<&str>) -> Navigation {
        self.generation += 1;
        self.slug = slug.filter(|s| !s.is_empty()).map(str::to_string);

        match &self.slug {
            Some(slug) => {
                debug!(kind = %T::KIND, slug = %slug, generation = self.generation, "View entering loading");
                self.state = ViewState::Loading;
                Navigation::Resolve(ResolutionTicket {
                    generation: self.generation,
                    slug: slug.clone(),
                })
            }
            None => {
                warn!(kind = %T::KIND, "No slug provided to detail view");
                self.state = ViewState::NotFound {
                    slug: String::new(),
                };
                Navigation::MissingSlug
            }
        }
    }

    /// Applies a resolution result. Returns `false` if the ticket is stale.
    pub fn complete(&mut self, ticket: &ResolutionTicket, result: Option<T>) -> bool {
        if ticket.generation != self.generation {
            debug!(
                kind = %T::KIND,
                slug = %ticket.slug,
                stale_generation = ticket.generation,
                current_generation = self.generation,
                "Discarding stale resolution"
            );
            return false;
        }

        self.state = match result {
            Some(entity) => ViewState::Ready(entity),
            None => ViewState::NotFound {
                slug: ticket.slug.clone(),
            },
        };
        debug!(kind = %T::KIND, slug = %ticket.slug, state = self.state.name(), "View resolved");
        true
    }

    /// Drops the view. Any outstanding ticket becomes stale.
    pub fn unmount(&mut self) {
        self.generation += 1;
        self.mounted = false;
        self.slug = None;
        self.state = ViewState::Loading;
    }

    pub fn render(&self) -> Rendered<'_, T> {
        match &self.state {
            ViewState::Loading => Rendered::Loading(LoadingView {
                label: loading_label(T::KIND),
            }),
            ViewState::NotFound { slug } => Rendered::NotFound(NotFoundView {
                message: not_found_message(T::KIND, slug),
                slug: slug.clone(),
                home_href: HOME_HREF,
                home_label: "Volver al inicio",
            }),
            ViewState::Ready(entity) => Rendered::Ready(entity),
        }
    }
}

/// State of a listing view. There is no not-found state: an empty list is
/// a valid result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingState<T> {
    Loading,
    Ready(Vec<T>),
}

/// Controller for a collection listing (the home page's program grid).
#[derive(Debug, Clone)]
pub struct ListingController<T> {
    generation: u64,
    state: ListingState<T>,
}

impl<T: ContentEntity> Default for ListingController<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ContentEntity> ListingController<T> {
    pub fn new() -> Self {
        Self {
            generation: 0,
            state: ListingState::Loading,
        }
    }

    pub fn state(&self) -> &ListingState<T> {
        &self.state
    }

    /// Restarts the listing and returns the generation to complete with.
    pub fn mount(&mut self) -> u64 {
        self.generation += 1;
        self.state = ListingState::Loading;
        self.generation
    }

    /// Applies a listing result. Returns `false` if `generation` is stale.
    pub fn complete(&mut self, generation: u64, items: Vec<T>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.state = ListingState::Ready(items);
        true
    }

    pub fn items(&self) -> &[T] {
        match &self.state {
            ListingState::Ready(items) => items,
            ListingState::Loading => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ListingState::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::models::{Program, Service};

    fn culpa() -> Program {
        Catalog::bundled().get("programa-culpa").unwrap()
    }

    fn angustia() -> Program {
        Catalog::bundled().get("programa-angustia").unwrap()
    }

    #[test]
    fn test_initial_state_is_loading() {
        let view: DetailController<Program> = DetailController::new();
        assert!(view.state().is_loading());
        assert_eq!(
            view.render(),
            Rendered::Loading(LoadingView {
                label: "Cargando Experiencia..."
            })
        );
    }

    #[test]
    fn test_mount_then_ready() {
        let mut view = DetailController::new();
        let ticket = view.mount(Some("programa-culpa")).ticket().unwrap();
        assert_eq!(ticket.slug(), "programa-culpa");
        assert!(view.state().is_loading());

        assert!(view.complete(&ticket, Some(culpa())));
        match view.render() {
            Rendered::Ready(program) => assert_eq!(program.title, "Redefinir la Culpa"),
            other => panic!("Expected Ready, got {:?}", other),
        }
    }

    #[test]
    fn test_null_result_is_not_found_with_slug() {
        let mut view: DetailController<Service> = DetailController::new();
        let ticket = view.mount(Some("no-existe")).ticket().unwrap();
        assert!(view.complete(&ticket, None));

        match view.render() {
            Rendered::NotFound(nf) => {
                assert_eq!(nf.slug, "no-existe");
                assert!(nf.message.contains("no-existe"));
                assert_eq!(nf.home_href, "/");
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_slug_goes_to_not_found() {
        let mut view: DetailController<Program> = DetailController::new();
        assert_eq!(view.mount(None), Navigation::MissingSlug);
        assert!(matches!(view.state(), ViewState::NotFound { .. }));

        let mut view: DetailController<Program> = DetailController::new();
        assert_eq!(view.mount(Some("")), Navigation::MissingSlug);
    }

    #[test]
    fn test_slug_change_resets_to_loading() {
        let mut view = DetailController::new();
        let first = view.mount(Some("programa-culpa")).ticket().unwrap();
        view.complete(&first, Some(culpa()));
        assert!(view.state().is_ready());

        let second = view.navigate(Some("programa-angustia")).ticket().unwrap();
        assert!(view.state().is_loading());
        assert!(view.state().entity().is_none());
        assert!(second.generation() > first.generation());
    }

    #[test]
    fn test_same_slug_does_not_restart() {
        let mut view = DetailController::new();
        let ticket = view.mount(Some("programa-culpa")).ticket().unwrap();
        assert_eq!(view.navigate(Some("programa-culpa")), Navigation::Unchanged);
        view.complete(&ticket, Some(culpa()));
        assert_eq!(view.navigate(Some("programa-culpa")), Navigation::Unchanged);
        assert!(view.state().is_ready());
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut view = DetailController::new();
        let a = view.mount(Some("programa-angustia")).ticket().unwrap();
        let b = view.navigate(Some("programa-culpa")).ticket().unwrap();

        // B arrives first, then the slow A.
        assert!(view.complete(&b, Some(culpa())));
        assert!(!view.complete(&a, Some(angustia())));

        assert_eq!(view.state().entity().unwrap().slug, "programa-culpa");
    }

    #[test]
    fn test_stale_not_found_does_not_clobber_ready() {
        let mut view = DetailController::new();
        let a = view.mount(Some("no-existe")).ticket().unwrap();
        let b = view.navigate(Some("programa-culpa")).ticket().unwrap();
        assert!(view.complete(&b, Some(culpa())));
        assert!(!view.complete(&a, None));
        assert!(view.state().is_ready());
    }

    #[test]
    fn test_unmount_invalidates_tickets() {
        let mut view = DetailController::new();
        let ticket = view.mount(Some("programa-culpa")).ticket().unwrap();
        view.unmount();
        assert!(!view.complete(&ticket, Some(culpa())));
        assert!(view.state().is_loading());
    }

    #[test]
    fn test_listing_ready_even_when_empty() {
        let mut listing: ListingController<Program> = ListingController::new();
        assert!(listing.is_loading());
        let generation = listing.mount();
        assert!(listing.complete(generation, Vec::new()));
        assert_eq!(listing.state(), &ListingState::Ready(Vec::new()));
        assert!(listing.items().is_empty());
    }

    #[test]
    fn test_listing_discards_stale_generation() {
        let mut listing: ListingController<Program> = ListingController::new();
        let first = listing.mount();
        let second = listing.mount();
        assert!(listing.complete(second, Catalog::bundled().programs().to_vec()));
        assert!(!listing.complete(first, Vec::new()));
        assert_eq!(listing.items().len(), 3);
    }
}

//! Server-rendered site pages.
//!
//! Every page is resolved through [`Route::resolve`], so the bound routes
//! win over the dynamic `/:slug` form. Detail pages hydrate through the
//! state's [`HydrationClient`](eq_hydration::HydrationClient) and render
//! whatever state the view settles in.

pub mod templates;

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use eq_core::{ContentEntity, Program, Rendered, Route, Service};
use eq_hydration::{HydrationSession, ListingSession};
use tracing::debug;

use crate::state::AppState;
use templates::{
    HomeTemplate, LoadingTemplate, NotFoundTemplate, ProgramCard, ProgramDetailTemplate,
    ServiceCard, ServiceDetailTemplate,
};

/// Creates the page router. Unmatched paths fall through to the route
/// table.
pub fn create_web_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .fallback(page)
        .with_state(state)
}

async fn home(State(state): State<AppState>) -> Response {
    render_home(&state).await
}

async fn page(State(state): State<AppState>, uri: Uri) -> Response {
    let route = Route::resolve(uri.path());
    debug!(path = %uri.path(), ?route, "Resolved page route");

    match route {
        Route::Home => render_home(&state).await,
        Route::ServiceDetail { ref slug } => {
            render_detail::<Service, _>(&state, slug, route.shows_footer(), |service| {
                HtmlTemplate(ServiceDetailTemplate::new(service)).into_response()
            })
            .await
        }
        Route::ProgramDetail { ref slug } => {
            render_detail::<Program, _>(&state, slug, route.shows_footer(), |program| {
                HtmlTemplate(ProgramDetailTemplate::new(program)).into_response()
            })
            .await
        }
        Route::Unknown { path } => (
            StatusCode::NOT_FOUND,
            HtmlTemplate(NotFoundTemplate::unknown_path(&path)),
        )
            .into_response(),
    }
}

async fn render_home(state: &AppState) -> Response {
    let programs = ListingSession::<Program>::new(state.hydration.clone());
    let services = ListingSession::<Service>::new(state.hydration.clone());
    let (programs, services) = tokio::join!(programs.load(), services.load());

    HtmlTemplate(HomeTemplate {
        show_footer: Route::Home.shows_footer(),
        programs: programs.iter().map(ProgramCard::from).collect(),
        services: services.iter().map(ServiceCard::from).collect(),
    })
    .into_response()
}

/// Hydrates a detail view for `slug` and renders its settled state.
async fn render_detail<T, F>(state: &AppState, slug: &str, show_footer: bool, ready: F) -> Response
where
    T: ContentEntity,
    F: FnOnce(&T) -> Response,
{
    let session = HydrationSession::<T>::new(state.hydration.clone());
    session.load(Some(slug)).await;

    session
        .with_controller(|view| match view.render() {
            Rendered::Ready(entity) => ready(entity),
            Rendered::NotFound(not_found) => (
                StatusCode::NOT_FOUND,
                HtmlTemplate(NotFoundTemplate::new(&not_found, show_footer)),
            )
                .into_response(),
            Rendered::Loading(loading) => {
                HtmlTemplate(LoadingTemplate::new(&loading, show_footer)).into_response()
            }
        })
        .await
}

/// Wrapper for rendering askama templates as responses.
pub struct HtmlTemplate<T>(pub T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: askama::Template,
{
    fn into_response(self) -> Response {
        use axum::response::Html;

        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "Template rendering error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Template error: {}", err),
                )
                    .into_response()
            }
        }
    }
}

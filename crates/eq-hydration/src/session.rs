//! Async drivers for the view controllers.
//!
//! A session owns one controller behind a lock and runs each resolution as
//! its own task. Tasks report back through the controller's generation
//! check, so a slow answer for an old slug is dropped no matter when it
//! lands.

use crate::client::HydrationClient;
use eq_core::scroll::REGISTRATION_DELAY;
use eq_core::{
    ContentEntity, DetailController, IntersectionEvent, ListingController, ListingState,
    Navigation, PageTracker, Program, ScrollContainer, SectionWatcher, TrackerError, ViewState,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

/// Drives a [`DetailController`] against a [`HydrationClient`].
pub struct HydrationSession<T> {
    client: HydrationClient,
    controller: Arc<RwLock<DetailController<T>>>,
}

impl<T> Clone for HydrationSession<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            controller: Arc::clone(&self.controller),
        }
    }
}

impl<T: ContentEntity> HydrationSession<T> {
    pub fn new(client: HydrationClient) -> Self {
        Self {
            client,
            controller: Arc::new(RwLock::new(DetailController::new())),
        }
    }

    /// Mounts the view on `slug`. Returns the resolution task, if any.
    pub async fn mount(&self, slug: Option<&str>) -> Option<JoinHandle<bool>> {
        let navigation = self.controller.write().await.mount(slug);
        self.dispatch(navigation)
    }

    /// Points the view at `slug`. Returns the resolution task when the slug
    /// changed. The task yields `false` if its result arrived stale.
    pub async fn navigate(&self, slug: Option<&str>) -> Option<JoinHandle<bool>> {
        let navigation = self.controller.write().await.navigate(slug);
        self.dispatch(navigation)
    }

    fn dispatch(&self, navigation: Navigation) -> Option<JoinHandle<bool>> {
        let ticket = navigation.ticket()?;
        let client = self.client.clone();
        let controller = Arc::clone(&self.controller);

        Some(tokio::spawn(async move {
            let result = client.get::<T>(ticket.slug()).await;
            let applied = controller.write().await.complete(&ticket, result);
            if !applied {
                debug!(kind = %T::KIND, slug = %ticket.slug(), "Resolution superseded");
            }
            applied
        }))
    }

    /// Navigates and waits for the resolution to settle.
    #[instrument(skip(self), fields(kind = %T::KIND))]
    pub async fn load(&self, slug: Option<&str>) -> ViewState<T> {
        if let Some(task) = self.navigate(slug).await {
            // A panicked task leaves the view in Loading.
            let _ = task.await;
        }
        self.state().await
    }

    pub async fn state(&self) -> ViewState<T> {
        self.controller.read().await.state().clone()
    }

    /// Read access to the controller, e.g. for rendering.
    pub async fn with_controller<R>(&self, f: impl FnOnce(&DetailController<T>) -> R) -> R {
        f(&*self.controller.read().await)
    }

    pub async fn unmount(&self) {
        self.controller.write().await.unmount();
    }
}

/// Drives a [`ListingController`].
pub struct ListingSession<T> {
    client: HydrationClient,
    controller: Arc<RwLock<ListingController<T>>>,
}

impl<T: ContentEntity> ListingSession<T> {
    pub fn new(client: HydrationClient) -> Self {
        Self {
            client,
            controller: Arc::new(RwLock::new(ListingController::new())),
        }
    }

    /// Restarts the listing and spawns its resolution.
    pub async fn refresh(&self) -> JoinHandle<bool> {
        let generation = self.controller.write().await.mount();
        let client = self.client.clone();
        let controller = Arc::clone(&self.controller);

        tokio::spawn(async move {
            let items = client.list::<T>().await;
            controller.write().await.complete(generation, items)
        })
    }

    /// Refreshes and waits for the items.
    pub async fn load(&self) -> Vec<T> {
        let _ = self.refresh().await.await;
        self.items().await
    }

    pub async fn items(&self) -> Vec<T> {
        self.controller.read().await.items().to_vec()
    }

    pub async fn state(&self) -> ListingState<T> {
        self.controller.read().await.state().clone()
    }
}

/// A program detail page: the detail view plus its section tracker.
pub struct ProgramPage<W> {
    session: HydrationSession<Program>,
    tracker: PageTracker,
    watcher: W,
    registration_delay: Duration,
}

impl<W: SectionWatcher + Send> ProgramPage<W> {
    pub fn new(client: HydrationClient, watcher: W) -> Self {
        Self {
            session: HydrationSession::new(client),
            tracker: PageTracker::new(),
            watcher,
            registration_delay: REGISTRATION_DELAY,
        }
    }

    pub fn with_registration_delay(mut self, delay: Duration) -> Self {
        self.registration_delay = delay;
        self
    }

    /// Loads `slug` and, once content is ready, registers the sections.
    ///
    /// A new slug puts the view back in Loading, so the previous program's
    /// sections are torn down before the resolution is awaited.
    pub async fn open(&mut self, slug: Option<&str>) -> ViewState<Program> {
        if let Some(task) = self.session.navigate(slug).await {
            // A new ticket means the view restarted in Loading.
            self.tracker.content_changed(false, &mut self.watcher);
            // A panicked task leaves the view in Loading.
            let _ = task.await;
        }

        let state = self.session.state().await;
        if self.tracker.content_changed(state.is_ready(), &mut self.watcher) {
            self.tracker
                .register_after(&mut self.watcher, self.registration_delay)
                .await;
        }
        state
    }

    pub fn on_intersection(&mut self, event: IntersectionEvent) -> bool {
        self.tracker.on_intersection(event)
    }

    pub fn jump_to_page<C: ScrollContainer + ?Sized>(
        &self,
        index: usize,
        container: &mut C,
    ) -> Result<f64, TrackerError> {
        self.tracker.jump_to_page(index, container)
    }

    pub fn current_page(&self) -> usize {
        self.tracker.current_page()
    }

    pub fn tracker(&self) -> &PageTracker {
        &self.tracker
    }

    pub fn watcher(&self) -> &W {
        &self.watcher
    }

    pub fn session(&self) -> &HydrationSession<Program> {
        &self.session
    }

    /// Tears down the tracker and unmounts the view.
    pub async fn close(&mut self) {
        self.tracker.teardown(&mut self.watcher);
        self.session.unmount().await;
    }
}

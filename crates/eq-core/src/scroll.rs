//! Scroll-synchronised page tracking for the program detail view.
//!
//! The program page is six full-viewport sections. A watcher reports
//! visibility changes per section; the most recent report of a section that
//! is intersecting with at least half of it visible sets the current page.
//! Jumping to a page only scrolls. The index itself follows once the
//! watcher reports the section as visible.

use std::time::Duration;
use thiserror::Error;
use tracing::{debug, trace};

/// Number of sections on a program page.
pub const PAGE_COUNT: usize = 6;

/// Minimum visible fraction for a section to become current.
pub const VISIBILITY_THRESHOLD: f64 = 0.5;

/// Delay between content becoming ready and section registration, so the
/// sections exist before they are observed.
pub const REGISTRATION_DELAY: Duration = Duration::from_millis(100);

/// Side-navigation labels, by section index.
pub const SECTION_LABELS: [&str; PAGE_COUNT] = [
    "Inicio",
    "El Problema",
    "La Solución",
    "Arquitectura",
    "Proceso",
    "Inscripción",
];

/// Errors raised by the page tracker.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("page {index} is out of range (0..{count})")]
    PageOutOfRange { index: usize, count: usize },
}

/// One visibility report from the section watcher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEvent {
    pub index: usize,
    pub is_intersecting: bool,
    /// Visible fraction of the section, 0.0 to 1.0.
    pub ratio: f64,
}

impl IntersectionEvent {
    pub fn new(index: usize, is_intersecting: bool, ratio: f64) -> Self {
        Self {
            index,
            is_intersecting,
            ratio,
        }
    }

    /// Whether this report is strong enough to move the current page.
    pub fn qualifies(&self) -> bool {
        self.is_intersecting && self.ratio >= VISIBILITY_THRESHOLD
    }
}

/// Observes section elements and reports their visibility.
pub trait SectionWatcher {
    /// Starts observing the section tagged with `index`.
    fn observe(&mut self, index: usize);

    /// Stops all observation.
    fn disconnect(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// The scrollable container holding the sections.
pub trait ScrollContainer {
    fn viewport_height(&self) -> f64;

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);
}

/// Tracks which section of a program page is current.
#[derive(Debug, Clone)]
pub struct PageTracker {
    current_page: usize,
    page_count: usize,
    observing: bool,
}

impl Default for PageTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PageTracker {
    pub fn new() -> Self {
        Self::with_page_count(PAGE_COUNT)
    }

    pub fn with_page_count(page_count: usize) -> Self {
        Self {
            current_page: 0,
            page_count,
            observing: false,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn is_observing(&self) -> bool {
        self.observing
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.current_page == index
    }

    /// Reacts to content availability.
    ///
    /// Returns `true` when the caller should schedule [`register`] after
    /// [`REGISTRATION_DELAY`]. Content going away tears the watcher down.
    ///
    /// [`register`]: PageTracker::register
    pub fn content_changed<W: SectionWatcher + ?Sized>(
        &mut self,
        content_ready: bool,
        watcher: &mut W,
    ) -> bool {
        if content_ready {
            !self.observing
        } else {
            self.teardown(watcher);
            false
        }
    }

    /// Registers every section with the watcher.
    pub fn register<W: SectionWatcher + ?Sized>(&mut self, watcher: &mut W) {
        if self.observing {
            watcher.disconnect();
        }
        for index in 0..self.page_count {
            watcher.observe(index);
        }
        self.observing = true;
        debug!(sections = self.page_count, "Page tracker observing sections");
    }

    /// Waits for the registration delay, then registers.
    pub async fn register_after<W: SectionWatcher + ?Sized>(
        &mut self,
        watcher: &mut W,
        delay: Duration,
    ) {
        tokio::time::sleep(delay).await;
        self.register(watcher);
    }

    /// Disconnects the watcher. Later events are ignored until the next
    /// registration.
    pub fn teardown<W: SectionWatcher + ?Sized>(&mut self, watcher: &mut W) {
        if self.observing {
            watcher.disconnect();
            self.observing = false;
            self.current_page = 0;
            debug!("Page tracker disconnected");
        }
    }

    /// Applies one watcher report. Returns `true` if the current page changed.
    pub fn on_intersection(&mut self, event: IntersectionEvent) -> bool {
        if !self.observing || event.index >= self.page_count || !event.qualifies() {
            trace!(?event, observing = self.observing, "Ignoring intersection event");
            return false;
        }
        let changed = self.current_page != event.index;
        self.current_page = event.index;
        changed
    }

    /// Applies a batch of reports in delivery order; the last qualifying one
    /// wins.
    pub fn on_intersections<I>(&mut self, events: I) -> usize
    where
        I: IntoIterator<Item = IntersectionEvent>,
    {
        for event in events {
            self.on_intersection(event);
        }
        self.current_page
    }

    /// Smooth-scrolls so section `index` sits at the top of the viewport.
    ///
    /// Returns the scroll offset requested. The current page is left alone.
    pub fn jump_to_page<C: ScrollContainer + ?Sized>(
        &self,
        index: usize,
        container: &mut C,
    ) -> Result<f64, TrackerError> {
        if index >= self.page_count {
            return Err(TrackerError::PageOutOfRange {
                index,
                count: self.page_count,
            });
        }
        let top = container.viewport_height() * index as f64;
        container.scroll_to(top, ScrollBehavior::Smooth);
        Ok(top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingWatcher {
        observed: Vec<usize>,
        disconnects: usize,
    }

    impl SectionWatcher for RecordingWatcher {
        fn observe(&mut self, index: usize) {
            self.observed.push(index);
        }

        fn disconnect(&mut self) {
            self.disconnects += 1;
            self.observed.clear();
        }
    }

    struct RecordingContainer {
        height: f64,
        scrolls: Vec<(f64, ScrollBehavior)>,
    }

    impl ScrollContainer for RecordingContainer {
        fn viewport_height(&self) -> f64 {
            self.height
        }

        fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
            self.scrolls.push((top, behavior));
        }
    }

    fn observing_tracker() -> (PageTracker, RecordingWatcher) {
        let mut tracker = PageTracker::new();
        let mut watcher = RecordingWatcher::default();
        tracker.register(&mut watcher);
        (tracker, watcher)
    }

    #[test]
    fn test_register_observes_every_section() {
        let (tracker, watcher) = observing_tracker();
        assert!(tracker.is_observing());
        assert_eq!(watcher.observed, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_section_crossing_threshold_becomes_current() {
        let (mut tracker, _watcher) = observing_tracker();
        assert!(tracker.on_intersection(IntersectionEvent::new(3, true, 0.5)));
        assert_eq!(tracker.current_page(), 3);
        assert!(tracker.is_active(3));
    }

    #[test]
    fn test_jump_then_intersection_sets_page() {
        let (mut tracker, _watcher) = observing_tracker();
        let mut container = RecordingContainer {
            height: 800.0,
            scrolls: Vec::new(),
        };

        tracker.on_intersection(IntersectionEvent::new(3, true, 0.9));
        assert_eq!(tracker.current_page(), 3);

        let top = tracker.jump_to_page(1, &mut container).unwrap();
        assert_eq!(top, 800.0);
        assert_eq!(container.scrolls, vec![(800.0, ScrollBehavior::Smooth)]);
        // Jumping alone does not move the index.
        assert_eq!(tracker.current_page(), 3);

        tracker.on_intersection(IntersectionEvent::new(1, true, 0.75));
        assert_eq!(tracker.current_page(), 1);
    }

    #[test]
    fn test_weak_or_leaving_events_are_ignored() {
        let (mut tracker, _watcher) = observing_tracker();
        tracker.on_intersection(IntersectionEvent::new(2, true, 0.6));
        assert!(!tracker.on_intersection(IntersectionEvent::new(4, true, 0.49)));
        assert!(!tracker.on_intersection(IntersectionEvent::new(4, false, 0.8)));
        assert_eq!(tracker.current_page(), 2);
    }

    #[test]
    fn test_last_qualifying_event_wins() {
        let (mut tracker, _watcher) = observing_tracker();
        let page = tracker.on_intersections([
            IntersectionEvent::new(1, true, 0.7),
            IntersectionEvent::new(2, true, 0.6),
            IntersectionEvent::new(3, true, 0.2),
        ]);
        assert_eq!(page, 2);
    }

    #[test]
    fn test_out_of_range_event_is_ignored() {
        let (mut tracker, _watcher) = observing_tracker();
        assert!(!tracker.on_intersection(IntersectionEvent::new(6, true, 1.0)));
        assert_eq!(tracker.current_page(), 0);
    }

    #[test]
    fn test_jump_out_of_range_fails() {
        let tracker = PageTracker::new();
        let mut container = RecordingContainer {
            height: 600.0,
            scrolls: Vec::new(),
        };
        assert_eq!(
            tracker.jump_to_page(6, &mut container),
            Err(TrackerError::PageOutOfRange { index: 6, count: 6 })
        );
        assert!(container.scrolls.is_empty());
    }

    #[test]
    fn test_events_before_registration_are_ignored() {
        let mut tracker = PageTracker::new();
        assert!(!tracker.on_intersection(IntersectionEvent::new(2, true, 1.0)));
        assert_eq!(tracker.current_page(), 0);
    }

    #[test]
    fn test_teardown_disconnects_and_ignores_late_events() {
        let (mut tracker, mut watcher) = observing_tracker();
        tracker.on_intersection(IntersectionEvent::new(4, true, 1.0));
        tracker.teardown(&mut watcher);

        assert_eq!(watcher.disconnects, 1);
        assert!(!tracker.is_observing());
        assert!(!tracker.on_intersection(IntersectionEvent::new(2, true, 1.0)));

        // Second teardown is a no-op.
        tracker.teardown(&mut watcher);
        assert_eq!(watcher.disconnects, 1);
    }

    #[test]
    fn test_content_changed_schedules_and_tears_down() {
        let mut tracker = PageTracker::new();
        let mut watcher = RecordingWatcher::default();

        assert!(tracker.content_changed(true, &mut watcher));
        tracker.register(&mut watcher);
        assert!(!tracker.content_changed(true, &mut watcher));

        assert!(!tracker.content_changed(false, &mut watcher));
        assert_eq!(watcher.disconnects, 1);
        assert!(!tracker.is_observing());
    }

    #[tokio::test]
    async fn test_register_after_waits_for_delay() {
        let mut tracker = PageTracker::new();
        let mut watcher = RecordingWatcher::default();
        let start = std::time::Instant::now();

        tracker
            .register_after(&mut watcher, REGISTRATION_DELAY)
            .await;

        assert!(start.elapsed() >= REGISTRATION_DELAY);
        assert!(tracker.is_observing());
        assert_eq!(watcher.observed.len(), PAGE_COUNT);
    }
}

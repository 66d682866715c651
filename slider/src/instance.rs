//! Slider instances: setup, handle and teardown.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, warn};
use pagedom::{Document, ObserverId};

use crate::arrows::{init_arrow_navigation, navigate_to, step, Step};
use crate::error::SliderError;
use crate::options::SliderOptions;
use crate::progress::init_progress_bar;
use crate::scroll::{disarm_settle, init_drag_to_scroll, ScrollMapping};
use crate::state::{SharedState, SliderState};
use crate::teardown::Teardown;

/// Marker attribute set on a slider root while an instance is bound to it.
pub const READY_ATTR: &str = "data-slider-ready";

/// Unique identifier for a Slider instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SliderId(usize);

impl SliderId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for SliderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__slider_{}", self.0)
    }
}

#[derive(Debug)]
struct SliderInner {
    id: SliderId,
    root: String,
    state: SharedState,
    teardown: RefCell<Teardown>,
    observer: Cell<Option<ObserverId>>,
}

impl SliderInner {
    fn destroy(&self, doc: &mut Document) -> bool {
        if !self.state.borrow_mut().retire() {
            return false;
        }

        self.teardown.borrow_mut().run(doc);
        disarm_settle(doc, &self.state);
        if let Some(observer) = self.observer.take() {
            doc.disconnect(observer);
        }
        doc.remove_attr(&self.root, READY_ATTR);

        debug!("Slider {} on '{}' destroyed", self.id, self.root);
        true
    }
}

/// Handle to one live slider.
///
/// Cloning the handle does not create a new slider; all clones control the
/// same instance.
#[derive(Debug, Clone)]
pub struct Slider {
    inner: Rc<SliderInner>,
}

impl Slider {
    /// Bind a slider to `root`, or do nothing if the markup is incomplete or
    /// already bound. Problems are logged, never raised.
    pub fn init(doc: &mut Document, root: &str, options: &SliderOptions) -> Option<Self> {
        match Self::try_init(doc, root, options) {
            Ok(slider) => Some(slider),
            Err(e) => {
                debug!("Slider not initialized: {e}");
                None
            }
        }
    }

    /// Like [`Slider::init`], but reports why nothing was bound.
    pub fn try_init(
        doc: &mut Document,
        root: &str,
        options: &SliderOptions,
    ) -> Result<Self, SliderError> {
        if !doc.contains(root) {
            return Err(SliderError::MissingRoot(root.to_string()));
        }
        if doc.attr(root, READY_ATTR).is_some() {
            return Err(SliderError::AlreadyInitialized(root.to_string()));
        }

        let container = doc
            .query_selector(root, &options.viewport)
            .unwrap_or_else(|| root.to_string());
        let count = item_count(doc, root, &container, options);
        if count == 0 {
            return Err(SliderError::Empty(root.to_string()));
        }

        let mapping = match doc.attr(root, "data-mapping") {
            Some(raw) => raw.parse::<ScrollMapping>().unwrap_or_else(|e| {
                warn!("Slider '{root}': {e}, using {:?}", options.mapping);
                options.mapping
            }),
            None => options.mapping,
        };

        let part = |selector: &str| doc.query_selector(root, selector);
        let state = SliderState::new(container, count)
            .with_progress(part(&options.track), part(&options.indicator))
            .with_controls(part(&options.prev), part(&options.next))
            .with_mapping(mapping)
            .with_settle_timeout(options.settle_timeout())
            .shared();

        state.borrow().render(doc);

        let mut teardown = Teardown::new("slider");
        teardown.merge(init_arrow_navigation(doc, &state, options.keyboard));
        teardown.merge(init_progress_bar(doc, &state));
        if options.drag {
            teardown.merge(init_drag_to_scroll(doc, &state));
        }

        doc.set_attr(root, READY_ATTR, "");

        let inner = Rc::new(SliderInner {
            id: SliderId::new(),
            root: root.to_string(),
            state,
            teardown: RefCell::new(teardown),
            observer: Cell::new(None),
        });

        if options.auto_destroy {
            let watched = Rc::clone(&inner);
            let container = inner.state.borrow().container().to_string();
            let observer = doc.observe_removal(&container, move |doc| {
                // Fired once; the observer is already gone.
                watched.observer.set(None);
                watched.destroy(doc);
            });
            inner.observer.set(Some(observer));
        }

        debug!(
            "Slider {} on '{root}': {count} items, {} listeners",
            inner.id,
            inner.teardown.borrow().listener_count()
        );
        Ok(Self { inner })
    }

    /// Tear the instance down: unregister listeners, cancel pending timers
    /// and frames, and release the root for a later init. Safe to call more
    /// than once; returns true only the first time.
    pub fn destroy(&self, doc: &mut Document) -> bool {
        self.inner.destroy(doc)
    }

    pub fn is_destroyed(&self) -> bool {
        !self.inner.state.borrow().is_alive()
    }

    pub fn id(&self) -> SliderId {
        self.inner.id
    }

    /// Id of the element the slider was bound to.
    pub fn root(&self) -> &str {
        &self.inner.root
    }

    /// Shared state, for hosts that want to drive behaviors directly.
    pub fn state(&self) -> SharedState {
        Rc::clone(&self.inner.state)
    }

    pub fn index(&self) -> usize {
        self.inner.state.borrow().current_index()
    }

    pub fn item_count(&self) -> usize {
        self.inner.state.borrow().item_count()
    }

    pub fn is_animating(&self) -> bool {
        self.inner.state.borrow().is_animating()
    }

    /// Go to stop `index` (clamped), animating the container.
    pub fn go_to(&self, doc: &mut Document, index: usize) -> bool {
        navigate_to(doc, &self.inner.state, index)
    }

    pub fn next(&self, doc: &mut Document) -> bool {
        step(doc, &self.inner.state, Step::Next)
    }

    pub fn prev(&self, doc: &mut Document) -> bool {
        step(doc, &self.inner.state, Step::Prev)
    }
}

/// `data-count` on the root wins; otherwise count item elements.
fn item_count(doc: &Document, root: &str, container: &str, options: &SliderOptions) -> usize {
    if let Some(raw) = doc.attr(root, "data-count") {
        match raw.trim().parse::<usize>() {
            Ok(count) => return count,
            Err(_) => warn!(
                "{}",
                SliderError::InvalidCount {
                    root: root.to_string(),
                    value: raw.to_string(),
                }
            ),
        }
    }
    doc.query_selector_all(container, &options.item).len()
}

//! Per-instance slider state.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use log::debug;
use pagedom::{Document, ListenerId, TimerId};

use crate::scroll::ScrollMapping;

/// State shared by every behavior of one slider instance.
pub type SharedState = Rc<RefCell<SliderState>>;

/// Whether a programmatic scroll is in flight.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// At rest; scroll sync may update the index.
    #[default]
    Idle,
    /// A smooth scroll is driving the container toward the current index.
    Animating,
}

/// Settle signals armed by the last programmatic scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PendingSettle {
    pub(crate) listener: ListenerId,
    pub(crate) timer: TimerId,
}

/// Single source of truth for one slider: which stop is active, which
/// elements show it, and whether a scroll animation is running.
///
/// Control elements are referenced by id only; the slider listens to them
/// but never owns them.
#[derive(Debug)]
pub struct SliderState {
    container: String,
    progress_track: Option<String>,
    progress_indicator: Option<String>,
    prev_control: Option<String>,
    next_control: Option<String>,

    /// Fixed at construction.
    item_count: usize,
    /// Always `< item_count` when `item_count > 0`.
    current_index: usize,
    motion: Motion,

    mapping: ScrollMapping,
    settle_timeout: Duration,
    pending_settle: Option<PendingSettle>,

    /// Cleared on teardown; every callback checks it before touching state.
    alive: bool,
}

impl SliderState {
    /// Create state for a scroll container holding `count` items.
    pub fn new(container: impl Into<String>, count: usize) -> Self {
        Self {
            container: container.into(),
            progress_track: None,
            progress_indicator: None,
            prev_control: None,
            next_control: None,
            item_count: count,
            current_index: 0,
            motion: Motion::Idle,
            mapping: ScrollMapping::default(),
            settle_timeout: Duration::from_millis(700),
            pending_settle: None,
            alive: true,
        }
    }

    pub fn with_progress(mut self, track: Option<String>, indicator: Option<String>) -> Self {
        self.progress_track = track;
        self.progress_indicator = indicator;
        self
    }

    pub fn with_controls(mut self, prev: Option<String>, next: Option<String>) -> Self {
        self.prev_control = prev;
        self.next_control = next;
        self
    }

    pub fn with_mapping(mut self, mapping: ScrollMapping) -> Self {
        self.mapping = mapping;
        self
    }

    pub fn with_settle_timeout(mut self, timeout: Duration) -> Self {
        self.settle_timeout = timeout;
        self
    }

    /// Wrap for sharing between behaviors.
    pub fn shared(self) -> SharedState {
        Rc::new(RefCell::new(self))
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn progress_track(&self) -> Option<&str> {
        self.progress_track.as_deref()
    }

    pub fn progress_indicator(&self) -> Option<&str> {
        self.progress_indicator.as_deref()
    }

    pub fn prev_control(&self) -> Option<&str> {
        self.prev_control.as_deref()
    }

    pub fn next_control(&self) -> Option<&str> {
        self.next_control.as_deref()
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Index of the last stop, `None` for an empty slider.
    pub fn last_index(&self) -> Option<usize> {
        self.item_count.checked_sub(1)
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    pub fn is_animating(&self) -> bool {
        self.motion == Motion::Animating
    }

    pub fn mapping(&self) -> ScrollMapping {
        self.mapping
    }

    pub fn settle_timeout(&self) -> Duration {
        self.settle_timeout
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Make `index` the active stop and update the bound indicator.
    ///
    /// Callers pass valid indices; the setter does not clamp. Out-of-range
    /// indices, empty sliders and torn-down instances are ignored. Returns
    /// true if the index changed.
    pub fn set(&mut self, doc: &mut Document, index: usize) -> bool {
        if !self.alive || self.item_count == 0 {
            return false;
        }
        if index >= self.item_count {
            debug!(
                "Slider '{}': ignoring index {index} (count {})",
                self.container, self.item_count
            );
            return false;
        }

        let changed = self.current_index != index;
        self.current_index = index;
        self.render(doc);
        changed
    }

    /// Write the current index into the indicator, track and controls.
    pub fn render(&self, doc: &mut Document) {
        if self.item_count == 0 {
            return;
        }
        let count = self.item_count;
        let index = self.current_index;

        if let Some(indicator) = &self.progress_indicator {
            let width = 100.0 / count as f32;
            doc.set_style(indicator, "width", format!("{width:.2}%"));
            doc.set_style(indicator, "left", format!("{:.2}%", width * index as f32));
        }

        if let Some(track) = &self.progress_track {
            doc.set_attr(track, "aria-valuemin", "1");
            doc.set_attr(track, "aria-valuemax", count.to_string());
            doc.set_attr(track, "aria-valuenow", (index + 1).to_string());
        }

        if let Some(prev) = &self.prev_control {
            doc.set_attr(prev, "aria-disabled", (index == 0).to_string());
        }
        if let Some(next) = &self.next_control {
            doc.set_attr(next, "aria-disabled", (index + 1 == count).to_string());
        }
    }

    pub(crate) fn begin_animation(&mut self) {
        self.motion = Motion::Animating;
    }

    pub(crate) fn finish_animation(&mut self) {
        self.motion = Motion::Idle;
    }

    pub(crate) fn arm_settle(&mut self, pending: PendingSettle) -> Option<PendingSettle> {
        self.pending_settle.replace(pending)
    }

    pub(crate) fn take_settle(&mut self) -> Option<PendingSettle> {
        self.pending_settle.take()
    }

    /// Mark the instance dead. Returns false if it already was.
    pub(crate) fn retire(&mut self) -> bool {
        let was_alive = self.alive;
        self.alive = false;
        self.motion = Motion::Idle;
        was_alive
    }
}

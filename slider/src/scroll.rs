//! Programmatic scrolling to a stop, settle detection and drag-to-scroll.

use std::cell::Cell;
use std::rc::Rc;
use std::str::FromStr;

use log::{debug, trace};
use pagedom::{Document, EventKind, ListenerOptions, ScrollBehavior, ScrollMetrics};
use serde::Deserialize;

use crate::error::SliderError;
use crate::state::{PendingSettle, SharedState};
use crate::teardown::Teardown;

/// Attribute present on the container while the user drags it.
pub const DRAGGING_ATTR: &str = "data-dragging";

/// Sub-pixel distance treated as "already there".
const POSITION_TOLERANCE: f32 = 0.5;

/// How a stop index maps to a horizontal scroll offset.
#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScrollMapping {
    /// Stops are spread evenly over the scrollable range: the first stop
    /// sits at offset 0, the last at the maximum offset.
    #[default]
    Proportional,
    /// Every item is `width` pixels wide; stop `i` sits at `i * width`,
    /// clamped to the scrollable range.
    ItemWidth { width: f32 },
}

impl ScrollMapping {
    /// Scroll offset that shows stop `index` of `count`.
    pub fn offset(self, index: usize, count: usize, metrics: ScrollMetrics) -> f32 {
        let raw = match self {
            ScrollMapping::Proportional => {
                if count <= 1 {
                    0.0
                } else {
                    index as f32 / (count - 1) as f32 * metrics.max_left()
                }
            }
            ScrollMapping::ItemWidth { width } => index as f32 * width,
        };
        metrics.clamp(raw)
    }

    /// Nearest stop for the current scroll offset.
    pub fn index_at(self, metrics: ScrollMetrics, count: usize) -> usize {
        let Some(last) = count.checked_sub(1) else {
            return 0;
        };
        match self {
            ScrollMapping::Proportional => {
                let nearest = (scroll_fraction(metrics) * last as f32).round() as usize;
                nearest.min(last)
            }
            ScrollMapping::ItemWidth { width } => {
                if !(width > 0.0) || !metrics.left.is_finite() {
                    return 0;
                }
                // The tail items may all fit once the strip is scrolled to its end.
                if metrics.can_scroll() && metrics.max_left() - metrics.left < POSITION_TOLERANCE {
                    return last;
                }
                ((metrics.left / width).round().max(0.0) as usize).min(last)
            }
        }
    }
}

impl FromStr for ScrollMapping {
    type Err = SliderError;

    /// Parses `proportional` or `item:<px>`, as written in `data-mapping`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if raw.eq_ignore_ascii_case("proportional") {
            return Ok(ScrollMapping::Proportional);
        }
        let width = raw
            .strip_prefix("item:")
            .or_else(|| raw.strip_prefix("item-width:"))
            .and_then(|px| px.trim().trim_end_matches("px").parse::<f32>().ok())
            .filter(|width| width.is_finite() && *width > 0.0)
            .ok_or_else(|| SliderError::InvalidMapping(s.to_string()))?;
        Ok(ScrollMapping::ItemWidth { width })
    }
}

/// Position of the container within its scrollable range, in `0.0..=1.0`.
///
/// Content that does not overflow reports 0 rather than dividing by zero.
pub fn scroll_fraction(metrics: ScrollMetrics) -> f32 {
    let max = metrics.max_left();
    if !(max > 0.0) || !metrics.left.is_finite() {
        return 0.0;
    }
    (metrics.left / max).clamp(0.0, 1.0)
}

/// Smooth-scroll the container to stop `index`.
///
/// Enters [`Motion::Animating`](crate::Motion::Animating) until the scroll
/// settles, either through `ScrollEnd` or the settle timeout, whichever
/// comes first. Unless `force` is set, a container already resting at the
/// target is left alone. Returns true if an animation started.
pub fn scroll_to_index(doc: &mut Document, state: &SharedState, index: usize, force: bool) -> bool {
    let (container, target, idle, timeout) = {
        let s = state.borrow();
        let Some(last) = s.last_index() else {
            return false;
        };
        if !s.is_alive() {
            return false;
        }
        let Some(metrics) = doc.scroll_metrics(s.container()) else {
            return false;
        };
        let target = s.mapping().offset(index.min(last), s.item_count(), metrics);
        if !force && !s.is_animating() && (metrics.left - target).abs() < POSITION_TOLERANCE {
            trace!("Slider '{}': already at stop {index}", s.container());
            return false;
        }
        (
            s.container().to_string(),
            target,
            !s.is_animating(),
            s.settle_timeout(),
        )
    };

    disarm_settle(doc, state);

    if !doc.scroll_to(&container, target, ScrollBehavior::Smooth) {
        // Nothing will move, so no settle signal is coming.
        state.borrow_mut().finish_animation();
        return false;
    }

    if idle {
        debug!("Slider '{container}': animating to stop {index}");
    }
    state.borrow_mut().begin_animation();

    // Kept until settle disarms it: a ScrollEnd queued by an earlier user
    // scroll may still arrive while this animation is running.
    let listener = {
        let state = Rc::clone(state);
        let watched = container.clone();
        doc.add_listener(
            &container,
            EventKind::ScrollEnd,
            ListenerOptions::new(),
            move |doc, _| {
                if doc.is_scrolling(&watched) {
                    trace!("Slider '{watched}': ignoring stale scroll end");
                    return;
                }
                settle(doc, &state);
            },
        )
    };
    let timer = {
        let state = Rc::clone(state);
        doc.set_timeout(timeout, move |doc| {
            trace!("Settle timeout fired");
            settle(doc, &state);
        })
    };
    state
        .borrow_mut()
        .arm_settle(PendingSettle { listener, timer });

    true
}

/// Return to idle and disarm whichever settle signal has not fired yet.
pub(crate) fn settle(doc: &mut Document, state: &SharedState) {
    {
        let mut s = state.borrow_mut();
        if !s.is_alive() {
            return;
        }
        s.finish_animation();
    }
    disarm_settle(doc, state);
    trace!("Slider '{}': settled", state.borrow().container());
}

/// Unregister the pending settle listener and timer, if any.
pub(crate) fn disarm_settle(doc: &mut Document, state: &SharedState) {
    let pending = state.borrow_mut().take_settle();
    if let Some(pending) = pending {
        doc.remove_listener(pending.listener);
        doc.clear_timeout(pending.timer);
    }
}

/// Where a drag started.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragOrigin {
    x: f32,
    left: f32,
}

/// Let the user drag the container horizontally with the pointer.
///
/// Dragging scrolls instantly; the resulting scroll events feed the
/// progress bar's scroll sync. Starting a drag mid-animation hands control
/// to the user.
pub fn init_drag_to_scroll(doc: &mut Document, state: &SharedState) -> Teardown {
    let mut teardown = Teardown::new("drag");
    let container = state.borrow().container().to_string();
    let root = doc.root_id().to_string();
    let origin: Rc<Cell<Option<DragOrigin>>> = Rc::default();

    {
        let state = Rc::clone(state);
        let origin = Rc::clone(&origin);
        let target = container.clone();
        teardown.listener(doc.add_listener(
            &container,
            EventKind::PointerDown,
            ListenerOptions::new(),
            move |doc, event| {
                let Some((x, _)) = event.position() else {
                    return;
                };
                let (alive, animating) = {
                    let s = state.borrow();
                    (s.is_alive(), s.is_animating())
                };
                if !alive {
                    return;
                }
                let Some(left) = doc.scroll_left(&target) else {
                    return;
                };
                if animating {
                    settle(doc, &state);
                    doc.scroll_to(&target, left, ScrollBehavior::Instant);
                }
                origin.set(Some(DragOrigin { x, left }));
                doc.set_attr(&target, DRAGGING_ATTR, "");
            },
        ));
    }

    // Moves and releases are tracked page-wide so the drag survives the
    // pointer leaving the strip.
    {
        let state = Rc::clone(state);
        let origin = Rc::clone(&origin);
        let container = container.clone();
        teardown.listener(doc.add_listener(
            &root,
            EventKind::PointerMove,
            ListenerOptions::new(),
            move |doc, event| {
                let Some(start) = origin.get() else {
                    return;
                };
                if !state.borrow().is_alive() {
                    origin.set(None);
                    return;
                }
                let Some((x, _)) = event.position() else {
                    return;
                };
                doc.scroll_to(&container, start.left - (x - start.x), ScrollBehavior::Instant);
            },
        ));
    }

    {
        let origin = Rc::clone(&origin);
        let container = container.clone();
        teardown.listener(doc.add_listener(
            &root,
            EventKind::PointerUp,
            ListenerOptions::new(),
            move |doc, _| {
                if origin.take().is_some() {
                    doc.remove_attr(&container, DRAGGING_ATTR);
                }
            },
        ));
    }

    teardown.action(move |doc| {
        if origin.take().is_some() {
            doc.remove_attr(&container, DRAGGING_ATTR);
        }
    });

    teardown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_fraction_guards_non_overflowing_content() {
        assert_eq!(scroll_fraction(ScrollMetrics::new(0.0, 300.0, 300.0)), 0.0);
        assert_eq!(scroll_fraction(ScrollMetrics::new(10.0, 200.0, 300.0)), 0.0);
        assert_eq!(scroll_fraction(ScrollMetrics::new(150.0, 600.0, 300.0)), 0.5);
        assert_eq!(scroll_fraction(ScrollMetrics::new(f32::NAN, 600.0, 300.0)), 0.0);
    }

    #[test]
    fn test_proportional_offsets_span_range() {
        let metrics = ScrollMetrics::new(0.0, 1300.0, 400.0);
        let mapping = ScrollMapping::Proportional;
        assert_eq!(mapping.offset(0, 4, metrics), 0.0);
        assert_eq!(mapping.offset(3, 4, metrics), 900.0);
        assert!((mapping.offset(1, 4, metrics) - 300.0).abs() < 0.01);
        assert_eq!(mapping.offset(0, 1, metrics), 0.0);
    }

    #[test]
    fn test_proportional_round_trips_every_stop() {
        let mapping = ScrollMapping::Proportional;
        for count in 1..8 {
            for index in 0..count {
                let mut metrics = ScrollMetrics::new(0.0, 2000.0, 350.0);
                metrics.left = mapping.offset(index, count, metrics);
                assert_eq!(mapping.index_at(metrics, count), index);
            }
        }
    }

    #[test]
    fn test_item_width_clamps_and_snaps_to_end() {
        let mapping = ScrollMapping::ItemWidth { width: 300.0 };
        let metrics = ScrollMetrics::new(0.0, 1500.0, 700.0);
        assert_eq!(mapping.offset(1, 5, metrics), 300.0);
        assert_eq!(mapping.offset(4, 5, metrics), 800.0);

        let at_end = ScrollMetrics::new(800.0, 1500.0, 700.0);
        assert_eq!(mapping.index_at(at_end, 5), 4);
        let near_second = ScrollMetrics::new(320.0, 1500.0, 700.0);
        assert_eq!(mapping.index_at(near_second, 5), 1);
    }

    #[test]
    fn test_index_at_empty_is_zero() {
        let metrics = ScrollMetrics::new(100.0, 1000.0, 300.0);
        assert_eq!(ScrollMapping::Proportional.index_at(metrics, 0), 0);
        assert_eq!(ScrollMapping::ItemWidth { width: 0.0 }.index_at(metrics, 3), 0);
    }

    #[test]
    fn test_parse_mapping() {
        assert_eq!("proportional".parse::<ScrollMapping>(), Ok(ScrollMapping::Proportional));
        assert_eq!(
            "item:320".parse::<ScrollMapping>(),
            Ok(ScrollMapping::ItemWidth { width: 320.0 })
        );
        assert_eq!(
            "item-width: 280px".parse::<ScrollMapping>(),
            Ok(ScrollMapping::ItemWidth { width: 280.0 })
        );
        assert!("item:-4".parse::<ScrollMapping>().is_err());
        assert!("cards".parse::<ScrollMapping>().is_err());
    }
}

//! Progress track: click-to-seek, indicator scrubbing and scroll sync.

use std::cell::Cell;
use std::rc::Rc;

use log::{debug, trace};
use pagedom::{Document, EventKind, FrameId, ListenerOptions, Rect, ScrollBehavior};

use crate::scroll::{scroll_to_index, settle};
use crate::state::SharedState;
use crate::teardown::Teardown;

/// Horizontal position of `x` within `rect`, in `0.0..=1.0`.
///
/// A degenerate (zero-width or non-finite) track resolves to 0.
pub fn track_fraction(rect: Rect, x: f32) -> f32 {
    if !(rect.width > 0.0) || !rect.width.is_finite() || !x.is_finite() {
        return 0.0;
    }
    ((x - rect.x) / rect.width).clamp(0.0, 1.0)
}

/// Stop selected by a click at fraction `pct` of the track:
/// `floor(pct * count)`, clamped to `[0, count - 1]`.
pub fn index_at_fraction(pct: f32, count: usize) -> usize {
    let Some(last) = count.checked_sub(1) else {
        return 0;
    };
    if !pct.is_finite() || pct <= 0.0 {
        return 0;
    }
    ((pct * count as f32).floor() as usize).min(last)
}

/// Seek to the stop under horizontal position `x` on the progress track.
///
/// Returns the selected index, or `None` when the slider has no track or
/// no items.
pub fn seek(doc: &mut Document, state: &SharedState, x: f32) -> Option<usize> {
    let (rect, count) = {
        let s = state.borrow();
        if !s.is_alive() || s.is_empty() {
            return None;
        }
        (doc.bounding_rect(s.progress_track()?)?, s.item_count())
    };

    let index = index_at_fraction(track_fraction(rect, x), count);
    trace!("Track seek at x={x}: stop {index}");

    scroll_to_index(doc, state, index, true);
    state.borrow_mut().set(doc, index);
    Some(index)
}

/// Recompute the active stop from the container's scroll position.
///
/// Ignored while a programmatic scroll is animating, so the sync never
/// fights the animation it observes. Returns true if the index changed.
pub fn sync_from_scroll(doc: &mut Document, state: &SharedState) -> bool {
    let index = {
        let s = state.borrow();
        if !s.is_alive() || s.is_empty() || s.is_animating() {
            return false;
        }
        let Some(metrics) = doc.scroll_metrics(s.container()) else {
            return false;
        };
        s.mapping().index_at(metrics, s.item_count())
    };
    state.borrow_mut().set(doc, index)
}

/// Bind the progress track and keep it in sync with manual scrolling.
///
/// Any part may be missing: without a track there is no seeking, without an
/// indicator no scrubbing; scroll sync only needs the container.
pub fn init_progress_bar(doc: &mut Document, state: &SharedState) -> Teardown {
    let mut teardown = Teardown::new("progress");
    let root = doc.root_id().to_string();
    let (container, track, indicator) = {
        let s = state.borrow();
        (
            s.container().to_string(),
            s.progress_track().filter(|id| doc.contains(id)).map(str::to_string),
            s.progress_indicator()
                .filter(|id| doc.contains(id))
                .map(str::to_string),
        )
    };

    match &track {
        Some(track) => {
            let state = Rc::clone(state);
            let indicator = indicator.clone();
            teardown.listener(doc.add_listener(
                track,
                EventKind::Click,
                ListenerOptions::new(),
                move |doc, event| {
                    // The indicator is a drag handle; clicks on it are not seeks.
                    if let Some(indicator) = &indicator {
                        if doc.is_inclusive_descendant(event.target(), indicator) {
                            return;
                        }
                    }
                    if let Some((x, _)) = event.position() {
                        seek(doc, &state, x);
                    }
                },
            ));
        }
        None => debug!("Slider '{container}': no progress track, seeking disabled"),
    }

    // Scroll sync, throttled to one recompute per frame.
    let pending: Rc<Cell<Option<FrameId>>> = Rc::default();
    {
        let state = Rc::clone(state);
        let pending = Rc::clone(&pending);
        teardown.listener(doc.add_listener(
            &container,
            EventKind::Scroll,
            ListenerOptions::new(),
            move |doc, _| {
                if pending.get().is_some() {
                    return;
                }
                {
                    let s = state.borrow();
                    if !s.is_alive() || s.is_animating() {
                        return;
                    }
                }
                let state = Rc::clone(&state);
                let slot = Rc::clone(&pending);
                let frame = doc.request_animation_frame(move |doc| {
                    slot.set(None);
                    sync_from_scroll(doc, &state);
                });
                pending.set(Some(frame));
            },
        ));
    }
    teardown.action(move |doc| {
        if let Some(frame) = pending.take() {
            doc.cancel_animation_frame(frame);
        }
    });

    match (&track, &indicator) {
        (Some(track), Some(indicator)) => {
            bind_scrubbing(doc, state, &root, &container, track, indicator, &mut teardown);
        }
        _ => debug!("Slider '{container}': no progress indicator, scrubbing disabled"),
    }

    teardown
}

/// Dragging the indicator scrubs the container across its scroll range.
fn bind_scrubbing(
    doc: &mut Document,
    state: &SharedState,
    root: &str,
    container: &str,
    track: &str,
    indicator: &str,
    teardown: &mut Teardown,
) {
    let scrubbing = Rc::new(Cell::new(false));

    {
        let state = Rc::clone(state);
        let scrubbing = Rc::clone(&scrubbing);
        let container = container.to_string();
        teardown.listener(doc.add_listener(
            indicator,
            EventKind::PointerDown,
            ListenerOptions::new(),
            move |doc, _| {
                let (alive, animating) = {
                    let s = state.borrow();
                    (s.is_alive(), s.is_animating())
                };
                if !alive {
                    return;
                }
                if animating {
                    settle(doc, &state);
                    // Hold the strip where it is.
                    if let Some(left) = doc.scroll_left(&container) {
                        doc.scroll_to(&container, left, ScrollBehavior::Instant);
                    }
                }
                scrubbing.set(true);
            },
        ));
    }

    {
        let state = Rc::clone(state);
        let scrubbing = Rc::clone(&scrubbing);
        let container = container.to_string();
        let track = track.to_string();
        teardown.listener(doc.add_listener(
            root,
            EventKind::PointerMove,
            ListenerOptions::new(),
            move |doc, event| {
                if !scrubbing.get() {
                    return;
                }
                if !state.borrow().is_alive() {
                    scrubbing.set(false);
                    return;
                }
                let (Some((x, _)), Some(rect), Some(max)) = (
                    event.position(),
                    doc.bounding_rect(&track),
                    doc.max_scroll_left(&container),
                ) else {
                    return;
                };
                let pct = track_fraction(rect, x);
                doc.scroll_to(&container, pct * max, ScrollBehavior::Instant);
            },
        ));
    }

    {
        let scrubbing = Rc::clone(&scrubbing);
        teardown.listener(doc.add_listener(
            root,
            EventKind::PointerUp,
            ListenerOptions::new(),
            move |_, _| scrubbing.set(false),
        ));
    }

    teardown.action(move |_| scrubbing.set(false));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_at_fraction_floors_and_clamps() {
        assert_eq!(index_at_fraction(0.0, 5), 0);
        assert_eq!(index_at_fraction(0.19, 5), 0);
        assert_eq!(index_at_fraction(0.2, 5), 1);
        assert_eq!(index_at_fraction(0.999, 5), 4);
        assert_eq!(index_at_fraction(1.0, 5), 4);
        assert_eq!(index_at_fraction(-0.3, 5), 0);
        assert_eq!(index_at_fraction(f32::NAN, 5), 0);
        assert_eq!(index_at_fraction(0.5, 0), 0);
    }

    #[test]
    fn test_track_fraction_guards_degenerate_tracks() {
        let track = Rect::new(100.0, 0.0, 400.0, 4.0);
        assert_eq!(track_fraction(track, 100.0), 0.0);
        assert_eq!(track_fraction(track, 300.0), 0.5);
        assert_eq!(track_fraction(track, 900.0), 1.0);
        assert_eq!(track_fraction(track, 20.0), 0.0);

        let collapsed = Rect::new(100.0, 0.0, 0.0, 4.0);
        assert_eq!(track_fraction(collapsed, 100.0), 0.0);
        assert_eq!(track_fraction(collapsed, 250.0), 0.0);
    }
}

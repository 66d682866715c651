//! Prev/next controls and keyboard stepping.

use std::rc::Rc;

use log::debug;
use pagedom::{Document, EventKind, Key, ListenerOptions};

use crate::scroll::scroll_to_index;
use crate::state::SharedState;
use crate::teardown::Teardown;

/// Direction of a single arrow step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Prev,
    Next,
}

impl Step {
    /// Neighbouring stop, clamped to `[0, last]`.
    pub fn target(self, current: usize, last: usize) -> usize {
        match self {
            Step::Prev => current.saturating_sub(1),
            Step::Next => (current + 1).min(last),
        }
    }
}

/// Jump to `index` (clamped): update the state right away for instant
/// indicator feedback, then animate the container there.
///
/// Returns false without touching anything when the clamped target is the
/// current stop.
pub fn navigate_to(doc: &mut Document, state: &SharedState, index: usize) -> bool {
    let target = {
        let s = state.borrow();
        let Some(last) = s.last_index() else {
            return false;
        };
        if !s.is_alive() {
            return false;
        }
        let target = index.min(last);
        if target == s.current_index() {
            return false;
        }
        target
    };

    state.borrow_mut().set(doc, target);
    scroll_to_index(doc, state, target, false);
    true
}

/// Move one stop in `direction`. A step past either end is a no-op.
pub fn step(doc: &mut Document, state: &SharedState, direction: Step) -> bool {
    let target = {
        let s = state.borrow();
        let Some(last) = s.last_index() else {
            return false;
        };
        direction.target(s.current_index(), last)
    };
    navigate_to(doc, state, target)
}

fn bind_control(
    doc: &mut Document,
    state: &SharedState,
    control: Option<String>,
    direction: Step,
    teardown: &mut Teardown,
) {
    let Some(control) = control else {
        debug!(
            "Slider '{}': no {direction:?} control, arrow disabled",
            state.borrow().container()
        );
        return;
    };
    if !doc.contains(&control) {
        debug!("Slider control '{control}' is not attached, arrow disabled");
        return;
    }

    let state = Rc::clone(state);
    teardown.listener(doc.add_listener(
        &control,
        EventKind::Click,
        ListenerOptions::new(),
        move |doc, _| {
            step(doc, &state, direction);
        },
    ));
}

/// Bind the prev/next controls (and optionally arrow keys on the container)
/// to stepping through the slider.
pub fn init_arrow_navigation(doc: &mut Document, state: &SharedState, keyboard: bool) -> Teardown {
    let mut teardown = Teardown::new("arrows");
    let (prev, next, container) = {
        let s = state.borrow();
        (
            s.prev_control().map(str::to_string),
            s.next_control().map(str::to_string),
            s.container().to_string(),
        )
    };

    bind_control(doc, state, prev, Step::Prev, &mut teardown);
    bind_control(doc, state, next, Step::Next, &mut teardown);

    if keyboard {
        let state = Rc::clone(state);
        teardown.listener(doc.add_listener(
            &container,
            EventKind::KeyDown,
            ListenerOptions::new(),
            move |doc, event| {
                let last = state.borrow().last_index().unwrap_or(0);
                match event.key() {
                    Some(Key::Left) => {
                        step(doc, &state, Step::Prev);
                    }
                    Some(Key::Right) => {
                        step(doc, &state, Step::Next);
                    }
                    Some(Key::Home) => {
                        navigate_to(doc, &state, 0);
                    }
                    Some(Key::End) => {
                        navigate_to(doc, &state, last);
                    }
                    _ => {}
                }
            },
        ));
    }

    teardown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_target_clamps_at_bounds() {
        assert_eq!(Step::Prev.target(0, 4), 0);
        assert_eq!(Step::Prev.target(3, 4), 2);
        assert_eq!(Step::Next.target(3, 4), 4);
        assert_eq!(Step::Next.target(4, 4), 4);
        assert_eq!(Step::Next.target(0, 0), 0);
    }
}

mod common;

use pagedom::{Element, Key, Rect};
use slider::{init_arrow_navigation, SliderState};
use slider::{Slider, SliderOptions};

use common::*;

// ============================================================================
// Stepping
// ============================================================================

#[test]
fn test_next_twice_then_clamps_then_prev() {
    let (mut doc, slider) = booted(3);

    doc.click_center("gallery-next");
    assert_eq!(slider.index(), 1);
    settle(&mut doc);
    doc.click_center("gallery-next");
    assert_eq!(slider.index(), 2);
    settle(&mut doc);

    doc.click_center("gallery-next");
    assert_eq!(slider.index(), 2);
    assert!(!slider.is_animating());

    doc.click_center("gallery-prev");
    assert_eq!(slider.index(), 1);
    settle(&mut doc);
    assert_close(doc.scroll_left("gallery-viewport").unwrap(), MAX_LEFT / 2.0);
}

#[test]
fn test_prev_at_start_is_noop() {
    let (mut doc, slider) = booted(4);
    let timers = doc.pending_timers();

    doc.click_center("gallery-prev");
    assert_eq!(slider.index(), 0);
    assert!(!slider.is_animating());
    assert_eq!(doc.pending_timers(), timers);
}

#[test]
fn test_index_updates_before_scroll_finishes() {
    let (mut doc, slider) = booted(5);

    doc.click_center("gallery-next");
    assert_eq!(slider.index(), 1);
    assert!(slider.is_animating());
    assert_eq!(doc.scroll_left("gallery-viewport"), Some(0.0));

    settle(&mut doc);
    assert!(!slider.is_animating());
    assert_close(doc.scroll_left("gallery-viewport").unwrap(), MAX_LEFT / 4.0);
}

#[test]
fn test_rapid_clicks_follow_latest_target() {
    let (mut doc, slider) = booted(5);

    doc.click_center("gallery-next");
    doc.advance_frames(3);
    doc.click_center("gallery-next");
    doc.advance_frames(2);
    doc.click_center("gallery-next");
    assert_eq!(slider.index(), 3);

    settle(&mut doc);
    assert_eq!(slider.index(), 3);
    assert_close(doc.scroll_left("gallery-viewport").unwrap(), MAX_LEFT * 0.75);
    assert_eq!(doc.pending_timers(), 0);
}

#[test]
fn test_teardown_twice_then_click_does_nothing() {
    let mut doc = gallery(3);
    let state = SliderState::new("gallery-viewport", 3)
        .with_controls(Some("gallery-prev".into()), Some("gallery-next".into()))
        .shared();

    let mut teardown = init_arrow_navigation(&mut doc, &state, true);
    assert!(!teardown.is_done());
    assert_eq!(doc.listener_count(), 3);
    doc.click_center("gallery-next");
    assert_eq!(state.borrow().current_index(), 1);
    settle(&mut doc);

    assert!(teardown.run(&mut doc));
    assert!(!teardown.run(&mut doc));
    assert!(teardown.is_done());
    assert_eq!(doc.listener_count(), 0);

    doc.click_center("gallery-next");
    doc.key_down("gallery-viewport", Key::End);
    assert_eq!(state.borrow().current_index(), 1);
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_indicator_and_controls_render() {
    let (mut doc, slider) = booted(3);
    assert_eq!(doc.style("gallery-indicator", "width"), Some("33.33%"));
    assert_eq!(doc.style("gallery-indicator", "left"), Some("0.00%"));
    assert_eq!(doc.attr("gallery-prev", "aria-disabled"), Some("true"));
    assert_eq!(doc.attr("gallery-next", "aria-disabled"), Some("false"));
    assert_eq!(doc.attr("gallery-track", "aria-valuenow"), Some("1"));
    assert_eq!(doc.attr("gallery-track", "aria-valuemax"), Some("3"));

    slider.go_to(&mut doc, 2);
    assert_eq!(doc.style("gallery-indicator", "left"), Some("66.67%"));
    assert_eq!(doc.attr("gallery-prev", "aria-disabled"), Some("false"));
    assert_eq!(doc.attr("gallery-next", "aria-disabled"), Some("true"));
    assert_eq!(doc.attr("gallery-track", "aria-valuenow"), Some("3"));
}

// ============================================================================
// Keyboard
// ============================================================================

#[test]
fn test_keyboard_steps_and_jumps() {
    let (mut doc, slider) = booted(5);

    doc.key_down("gallery-viewport", Key::Right);
    assert_eq!(slider.index(), 1);
    doc.key_down("gallery-item-1", Key::End);
    assert_eq!(slider.index(), 4);
    doc.key_down("gallery-viewport", Key::Left);
    assert_eq!(slider.index(), 3);
    doc.key_down("gallery-viewport", Key::Home);
    assert_eq!(slider.index(), 0);

    doc.key_down("gallery-viewport", Key::Enter);
    assert_eq!(slider.index(), 0);
}

#[test]
fn test_keyboard_can_be_disabled() {
    let (mut doc, slider) = booted_with(5, &SliderOptions::new().keyboard(false));

    doc.key_down("gallery-viewport", Key::Right);
    assert_eq!(slider.index(), 0);

    doc.click_center("gallery-next");
    assert_eq!(slider.index(), 1);
}

// ============================================================================
// Partial markup
// ============================================================================

#[test]
fn test_missing_controls_leave_rest_working() {
    let markup = Element::section()
        .id("bare")
        .flag("data-slider")
        .child(
            Element::div()
                .id("bare-viewport")
                .flag("data-slider-viewport")
                .rect(Rect::new(0.0, 0.0, VIEWPORT_WIDTH, 200.0))
                .scroll_width(STRIP_WIDTH)
                .children(
                    (0..4).map(|i| Element::div().id(format!("bare-{i}")).flag("data-slider-item")),
                ),
        );
    let mut doc = page([markup]);

    let slider = Slider::init(&mut doc, "bare", &SliderOptions::default()).unwrap();
    assert_eq!(slider.item_count(), 4);
    assert!(slider.next(&mut doc));
    assert_eq!(slider.index(), 1);
    settle(&mut doc);
    assert!(slider.prev(&mut doc));
    assert_eq!(slider.index(), 0);
}

mod common;

use pagedom::{Event, Rect};
use slider::{seek, Motion};

use common::*;

// ============================================================================
// Click-to-seek
// ============================================================================

#[test]
fn test_click_near_end_selects_last_stop() {
    let (mut doc, slider) = booted(5);

    doc.click("gallery-track", track_x(0.999), 324.0);
    assert_eq!(slider.index(), 4);
    assert!(slider.is_animating());

    settle(&mut doc);
    assert_eq!(slider.index(), 4);
    assert_close(doc.scroll_left("gallery-viewport").unwrap(), MAX_LEFT);
}

#[test]
fn test_click_floors_fraction() {
    let (mut doc, slider) = booted(5);

    doc.click("gallery-track", track_x(0.39), 324.0);
    assert_eq!(slider.index(), 1);
    doc.click("gallery-track", track_x(0.41), 324.0);
    assert_eq!(slider.index(), 2);
    doc.click("gallery-track", TRACK_X - 50.0, 324.0);
    assert_eq!(slider.index(), 0);
}

#[test]
fn test_click_on_indicator_is_not_a_seek() {
    let (mut doc, slider) = booted(5);

    doc.click("gallery-indicator", track_x(0.9), 324.0);
    assert_eq!(slider.index(), 0);
    assert!(!slider.is_animating());
}

#[test]
fn test_zero_width_track_seeks_to_first() {
    let (mut doc, slider) = booted(5);
    slider.go_to(&mut doc, 3);
    settle(&mut doc);

    doc.set_rect("gallery-track", Rect::new(TRACK_X, 320.0, 0.0, 8.0));
    doc.click("gallery-track", track_x(0.8), 324.0);
    assert_eq!(slider.index(), 0);

    settle(&mut doc);
    assert_eq!(doc.scroll_left("gallery-viewport"), Some(0.0));
}

#[test]
fn test_seek_on_current_stop_still_updates() {
    let (mut doc, slider) = booted(5);
    let state = slider.state();

    assert_eq!(seek(&mut doc, &state, track_x(0.1)), Some(0));
    assert_eq!(state.borrow().motion(), Motion::Idle);
    assert_eq!(doc.pending_timers(), 0);
    assert_eq!(doc.attr("gallery-track", "aria-valuenow"), Some("1"));
}

// ============================================================================
// Scroll sync
// ============================================================================

#[test]
fn test_index_unchanged_while_animating() {
    let (mut doc, slider) = booted(5);

    slider.go_to(&mut doc, 4);
    for _ in 0..10 {
        doc.advance_frames(1);
        assert_eq!(slider.index(), 4);
    }
    let left = doc.scroll_left("gallery-viewport").unwrap();
    assert!(left > 0.0 && left < MAX_LEFT);

    settle(&mut doc);
    assert_eq!(slider.index(), 4);
}

#[test]
fn test_synthetic_scroll_mid_flight_is_ignored() {
    let (mut doc, slider) = booted(5);

    slider.go_to(&mut doc, 1);
    doc.advance_frames(6);
    doc.dispatch(Event::Scroll {
        target: "gallery-viewport".into(),
    });
    assert_eq!(doc.pending_frames(), 0);
    doc.advance_frames(1);
    assert_eq!(slider.index(), 1);

    settle(&mut doc);
    assert_eq!(slider.index(), 1);
}

#[test]
fn test_manual_scroll_syncs_next_frame() {
    let (mut doc, slider) = booted(5);

    doc.user_scroll("gallery-viewport", MAX_LEFT / 2.0);
    assert_eq!(slider.index(), 0);

    doc.advance_frames(1);
    assert_eq!(slider.index(), 2);
    assert_eq!(doc.style("gallery-indicator", "left"), Some("40.00%"));
}

#[test]
fn test_scroll_sync_is_throttled_to_one_frame() {
    let (mut doc, slider) = booted(5);

    doc.user_scroll("gallery-viewport", 100.0);
    doc.user_scroll("gallery-viewport", 700.0);
    doc.user_scroll("gallery-viewport", 1250.0);
    doc.flush_events();
    assert_eq!(doc.pending_frames(), 1);
    assert_eq!(slider.index(), 0);

    doc.advance_frames(1);
    assert_eq!(doc.pending_frames(), 0);
    assert_eq!(slider.index(), 3);
}

#[test]
fn test_manual_scroll_interrupts_animation() {
    let (mut doc, slider) = booted(5);

    slider.go_to(&mut doc, 4);
    doc.advance_frames(4);
    doc.pointer_down("gallery-viewport", 200.0, 150.0);
    assert!(!slider.is_animating());
    doc.pointer_up("page", 200.0, 150.0);

    doc.user_scroll("gallery-viewport", MAX_LEFT / 4.0);
    doc.advance_frames(1);
    assert_eq!(slider.index(), 1);
}

// ============================================================================
// Scrubbing
// ============================================================================

#[test]
fn test_scrub_indicator_scrolls_container() {
    let (mut doc, slider) = booted(5);

    doc.pointer_down("gallery-indicator", track_x(0.1), 324.0);
    doc.pointer_move("page", track_x(0.5), 324.0);
    assert_close(doc.scroll_left("gallery-viewport").unwrap(), MAX_LEFT / 2.0);

    doc.advance_frames(1);
    assert_eq!(slider.index(), 2);

    doc.pointer_move("page", track_x(1.4), 500.0);
    assert_close(doc.scroll_left("gallery-viewport").unwrap(), MAX_LEFT);
    doc.pointer_up("page", track_x(1.4), 500.0);
    doc.advance_frames(1);
    assert_eq!(slider.index(), 4);

    doc.pointer_move("page", track_x(0.0), 324.0);
    assert_close(doc.scroll_left("gallery-viewport").unwrap(), MAX_LEFT);
}

#[test]
fn test_scrub_takes_over_animation() {
    let (mut doc, slider) = booted(5);

    slider.go_to(&mut doc, 4);
    doc.advance_frames(3);
    doc.pointer_down("gallery-indicator", track_x(0.1), 324.0);
    assert!(!slider.is_animating());
    assert_eq!(doc.pending_timers(), 0);

    doc.pointer_move("page", track_x(0.25), 324.0);
    doc.advance_frames(1);
    assert_eq!(slider.index(), 1);
}

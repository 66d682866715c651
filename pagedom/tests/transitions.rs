use std::time::Duration;

use pagedom::{
    Document, Easing, Element, Rect, ScrollBehavior, TransitionConfig, FRAME_INTERVAL,
};

fn strip(config: TransitionConfig) -> Document {
    let mut doc = Document::new(
        Element::div().id("root").child(
            Element::div()
                .id("strip")
                .rect(Rect::new(0.0, 0.0, 200.0, 100.0))
                .scroll_width(1200.0),
        ),
    );
    doc.set_scroll_transition(config);
    doc
}

// =============================================================================
// Easing
// =============================================================================

#[test]
fn test_every_easing_spans_zero_to_one_without_overshoot() {
    for easing in [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
    ] {
        let samples: Vec<f32> = (0..=20).map(|i| easing.apply(i as f32 / 20.0)).collect();
        assert_eq!(samples[0], 0.0, "{easing:?} start");
        assert_eq!(samples[20], 1.0, "{easing:?} end");
        assert!(
            samples.windows(2).all(|w| w[0] <= w[1] && w[1] <= 1.0),
            "{easing:?} must rise monotonically"
        );
    }
}

#[test]
fn test_ease_in_out_is_symmetric() {
    for i in 0..=10 {
        let t = i as f32 / 10.0;
        let mirrored = 1.0 - Easing::EaseInOut.apply(1.0 - t);
        assert!((Easing::EaseInOut.apply(t) - mirrored).abs() < 1e-5);
    }
}

// =============================================================================
// Transition progress
// =============================================================================

#[test]
fn test_progress_saturates_after_duration() {
    let config = TransitionConfig::new(Duration::from_millis(100), Easing::Linear);
    assert_eq!(config.progress(Duration::ZERO), 0.0);
    assert!((config.progress(Duration::from_millis(50)) - 0.5).abs() < 0.001);
    assert_eq!(config.progress(Duration::from_millis(250)), 1.0);
}

#[test]
fn test_zero_duration_completes_immediately() {
    let config = TransitionConfig::new(Duration::ZERO, Easing::EaseIn);
    assert_eq!(config.progress(Duration::ZERO), 1.0);
}

#[test]
fn test_default_matches_browser_smooth_scroll() {
    let config = TransitionConfig::default();
    assert_eq!(config.duration, Duration::from_millis(320));
    assert_eq!(config.easing, Easing::EaseInOut);
}

// =============================================================================
// Eased scrolling
// =============================================================================

#[test]
fn test_ease_in_lags_linear_mid_scroll() {
    let duration = FRAME_INTERVAL * 10;
    let mut linear = strip(TransitionConfig::new(duration, Easing::Linear));
    let mut eased = strip(TransitionConfig::new(duration, Easing::EaseIn));

    for doc in [&mut linear, &mut eased] {
        doc.scroll_to("strip", 1000.0, ScrollBehavior::Smooth);
        doc.advance_frames(5);
    }

    let linear_left = linear.scroll_left("strip").unwrap();
    let eased_left = eased.scroll_left("strip").unwrap();
    assert!((linear_left - 500.0).abs() < 0.5);
    assert!((eased_left - 250.0).abs() < 0.5);

    for doc in [&mut linear, &mut eased] {
        doc.advance_frames(5);
        assert_eq!(doc.scroll_left("strip"), Some(1000.0));
        assert!(!doc.is_scrolling("strip"));
    }
}

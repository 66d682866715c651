#![allow(dead_code)]

use std::time::Duration;

use pagedom::{Document, Element, Rect};
use slider::{Slider, SliderOptions};

/// Viewport geometry shared by every fixture slider: 400px wide showing a
/// 2000px strip, so the scrollable range is 1600px.
pub const VIEWPORT_WIDTH: f32 = 400.0;
pub const STRIP_WIDTH: f32 = 2000.0;
pub const MAX_LEFT: f32 = STRIP_WIDTH - VIEWPORT_WIDTH;

/// Progress track spans x = 100..600.
pub const TRACK_X: f32 = 100.0;
pub const TRACK_WIDTH: f32 = 500.0;

pub const SETTLE_LIMIT: Duration = Duration::from_secs(2);

/// Full slider markup with `count` items, ids prefixed by `name`.
pub fn slider_markup(name: &str, count: usize) -> Element {
    let items = (0..count).map(|i| {
        Element::div()
            .id(format!("{name}-item-{i}"))
            .flag("data-slider-item")
            .rect(Rect::new(i as f32 * 400.0, 0.0, 400.0, 300.0))
    });

    Element::section()
        .id(name)
        .flag("data-slider")
        .rect(Rect::new(0.0, 0.0, 800.0, 400.0))
        .child(
            Element::div()
                .id(format!("{name}-viewport"))
                .flag("data-slider-viewport")
                .rect(Rect::new(0.0, 0.0, VIEWPORT_WIDTH, 300.0))
                .scroll_width(STRIP_WIDTH)
                .children(items),
        )
        .child(
            Element::div()
                .id(format!("{name}-track"))
                .flag("data-slider-track")
                .rect(Rect::new(TRACK_X, 320.0, TRACK_WIDTH, 8.0))
                .child(
                    Element::div()
                        .id(format!("{name}-indicator"))
                        .flag("data-slider-indicator")
                        .rect(Rect::new(TRACK_X, 320.0, 100.0, 8.0)),
                ),
        )
        .child(
            Element::button()
                .id(format!("{name}-prev"))
                .flag("data-slider-prev")
                .rect(Rect::new(620.0, 310.0, 40.0, 40.0)),
        )
        .child(
            Element::button()
                .id(format!("{name}-next"))
                .flag("data-slider-next")
                .rect(Rect::new(680.0, 310.0, 40.0, 40.0)),
        )
}

/// A page whose `content` region holds the given children.
pub fn page(children: impl IntoIterator<Item = Element>) -> Document {
    Document::new(
        Element::div()
            .id("page")
            .rect(Rect::new(0.0, 0.0, 1200.0, 900.0))
            .child(Element::main().id("content").children(children)),
    )
}

/// A page with one slider named `gallery`.
pub fn gallery(count: usize) -> Document {
    page([slider_markup("gallery", count)])
}

/// [`gallery`] with a slider already bound.
pub fn booted(count: usize) -> (Document, Slider) {
    booted_with(count, &SliderOptions::default())
}

pub fn booted_with(count: usize, options: &SliderOptions) -> (Document, Slider) {
    let mut doc = gallery(count);
    let slider = Slider::try_init(&mut doc, "gallery", options).unwrap();
    (doc, slider)
}

/// Horizontal position at `pct` of the fixture track.
pub fn track_x(pct: f32) -> f32 {
    TRACK_X + pct * TRACK_WIDTH
}

pub fn settle(doc: &mut Document) {
    doc.run_until_idle(SETTLE_LIMIT);
}

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 0.01,
        "expected {expected}, got {actual}"
    );
}

//! Slider configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::scroll::ScrollMapping;

/// Selectors and behavior switches for a slider.
///
/// Part selectors are resolved inside the slider root. Deserializes from
/// the host page's config with every field optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SliderOptions {
    /// Selector for slider roots, used by [`SliderRegistry`](crate::SliderRegistry).
    pub root: String,
    /// Scroll container; the root itself when nothing matches.
    pub viewport: String,
    /// Items counted when the root has no `data-count`.
    pub item: String,
    pub track: String,
    pub indicator: String,
    pub prev: String,
    pub next: String,

    /// Index-to-offset strategy, overridable per slider with `data-mapping`.
    pub mapping: ScrollMapping,
    /// Upper bound on how long a programmatic scroll may stay unsettled.
    pub settle_timeout_ms: u64,

    /// Arrow/Home/End keys on the container.
    pub keyboard: bool,
    /// Pointer drag-to-scroll on the container.
    pub drag: bool,
    /// Destroy the instance when its scroll container leaves the document.
    pub auto_destroy: bool,
}

impl Default for SliderOptions {
    fn default() -> Self {
        Self {
            root: "[data-slider]".into(),
            viewport: "[data-slider-viewport]".into(),
            item: "[data-slider-item]".into(),
            track: "[data-slider-track]".into(),
            indicator: "[data-slider-indicator]".into(),
            prev: "[data-slider-prev]".into(),
            next: "[data-slider-next]".into(),
            mapping: ScrollMapping::default(),
            settle_timeout_ms: 700,
            keyboard: true,
            drag: true,
            auto_destroy: true,
        }
    }
}

impl SliderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mapping(mut self, mapping: ScrollMapping) -> Self {
        self.mapping = mapping;
        self
    }

    pub fn settle_after(mut self, timeout: Duration) -> Self {
        self.settle_timeout_ms = timeout.as_millis().try_into().unwrap_or(u64::MAX);
        self
    }

    pub fn keyboard(mut self, enabled: bool) -> Self {
        self.keyboard = enabled;
        self
    }

    pub fn drag(mut self, enabled: bool) -> Self {
        self.drag = enabled;
        self
    }

    pub fn auto_destroy(mut self, enabled: bool) -> Self {
        self.auto_destroy = enabled;
        self
    }

    pub fn settle_timeout(&self) -> Duration {
        Duration::from_millis(self.settle_timeout_ms)
    }
}

use std::collections::HashMap;
use std::time::Duration;

use crate::event::Event;
use crate::transitions::{lerp, TransitionConfig};

/// Sub-pixel distance treated as "already there".
const EPSILON: f32 = 0.5;

/// Horizontal scroll extents of an element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollMetrics {
    /// Current offset from the left edge of the content.
    pub left: f32,
    /// Total width of the content.
    pub scroll_width: f32,
    /// Width of the visible box.
    pub client_width: f32,
}

impl ScrollMetrics {
    pub fn new(left: f32, scroll_width: f32, client_width: f32) -> Self {
        Self {
            left,
            scroll_width,
            client_width,
        }
    }

    /// Largest valid offset; zero when the content does not overflow.
    pub fn max_left(&self) -> f32 {
        (self.scroll_width - self.client_width).max(0.0)
    }

    pub fn can_scroll(&self) -> bool {
        self.max_left() > 0.0
    }

    /// Clamp an offset into `[0, max_left]`. Non-finite offsets map to 0.
    pub fn clamp(&self, left: f32) -> f32 {
        if !left.is_finite() {
            return 0.0;
        }
        left.clamp(0.0, self.max_left())
    }
}

/// How a programmatic scroll reaches its destination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollBehavior {
    #[default]
    Instant,
    Smooth,
}

/// A smooth scroll in flight.
#[derive(Debug, Clone, Copy)]
struct ScrollAnimation {
    from: f32,
    to: f32,
    start: Duration,
    config: TransitionConfig,
}

impl ScrollAnimation {
    /// Offset at `now`, and whether the animation has arrived.
    fn sample(&self, now: Duration) -> (f32, bool) {
        let elapsed = now.saturating_sub(self.start);
        if elapsed >= self.config.duration {
            return (self.to, true);
        }
        let t = self.config.progress(elapsed);
        (lerp(self.from, self.to, t), false)
    }
}

/// Tracks smooth scrolls across frames.
#[derive(Debug)]
pub(crate) struct ScrollState {
    animations: HashMap<String, ScrollAnimation>,
    config: TransitionConfig,
    /// Reduced motion flag - when true, smooth scrolls complete instantly.
    reduced_motion: bool,
    /// When false, arrivals do not emit `ScrollEnd`.
    scrollend_supported: bool,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            animations: HashMap::new(),
            config: TransitionConfig::default(),
            reduced_motion: false,
            scrollend_supported: true,
        }
    }
}

/// Outcome of a scroll request, applied by the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ScrollPlan {
    /// Nothing to do.
    Stay,
    /// Jump to the offset now.
    Jump(f32),
    /// Animation registered; frames will move the element.
    Animate,
}

impl ScrollState {
    pub(crate) fn set_config(&mut self, config: TransitionConfig) {
        self.config = config;
    }

    pub(crate) fn set_reduced_motion(&mut self, enabled: bool) {
        self.reduced_motion = enabled;
    }

    pub(crate) fn set_scrollend_supported(&mut self, supported: bool) {
        self.scrollend_supported = supported;
    }

    pub(crate) fn scrollend_supported(&self) -> bool {
        self.scrollend_supported
    }

    pub(crate) fn is_animating(&self, id: &str) -> bool {
        self.animations.contains_key(id)
    }

    pub(crate) fn has_active(&self) -> bool {
        !self.animations.is_empty()
    }

    pub(crate) fn cancel(&mut self, id: &str) -> bool {
        self.animations.remove(id).is_some()
    }

    /// Decide how to move `id` from `metrics.left` to `target` (already clamped).
    pub(crate) fn plan(
        &mut self,
        id: &str,
        metrics: ScrollMetrics,
        target: f32,
        behavior: ScrollBehavior,
        now: Duration,
    ) -> ScrollPlan {
        let smooth = behavior == ScrollBehavior::Smooth && !self.reduced_motion;

        if !smooth {
            self.cancel(id);
            return if metrics.left == target {
                ScrollPlan::Stay
            } else {
                ScrollPlan::Jump(target)
            };
        }

        if (metrics.left - target).abs() < EPSILON {
            // Browsers fire neither scroll nor scrollend for a no-distance smooth scroll.
            self.cancel(id);
            return ScrollPlan::Stay;
        }

        // Restarting mid-flight starts from the current offset, which frames keep up to date.
        self.animations.insert(
            id.to_string(),
            ScrollAnimation {
                from: metrics.left,
                to: target,
                start: now,
                config: self.config,
            },
        );
        ScrollPlan::Animate
    }

    /// Advance every animation to `now`.
    /// Returns the new offsets and the events to queue.
    pub(crate) fn step(&mut self, now: Duration) -> (Vec<(String, f32)>, Vec<Event>) {
        let mut offsets = Vec::new();
        let mut events = Vec::new();
        let mut finished = Vec::new();

        let mut ids: Vec<&String> = self.animations.keys().collect();
        ids.sort();
        for id in ids {
            let animation = &self.animations[id];
            let (left, done) = animation.sample(now);
            offsets.push((id.clone(), left));
            events.push(Event::Scroll { target: id.clone() });
            if done {
                finished.push(id.clone());
                if self.scrollend_supported {
                    events.push(Event::ScrollEnd { target: id.clone() });
                }
            }
        }

        for id in finished {
            self.animations.remove(&id);
        }

        (offsets, events)
    }

    /// Forget animations for elements no longer in the tree.
    pub(crate) fn cleanup(&mut self, removed: &[String]) {
        for id in removed {
            self.cancel(id);
        }
    }
}

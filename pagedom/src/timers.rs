use std::collections::BTreeMap;
use std::time::Duration;

use crate::document::Document;

/// Length of one animation frame on the virtual clock (~60 fps).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub(crate) type Callback = Box<dyn FnOnce(&mut Document)>;

/// Handle returned by [`Document::set_timeout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub(crate) u64);

/// Handle returned by [`Document::request_animation_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameId(pub(crate) u64);

struct Timer {
    due: Duration,
    callback: Callback,
}

/// Pending timeouts and animation-frame callbacks.
#[derive(Default)]
pub(crate) struct TimerQueue {
    timers: BTreeMap<TimerId, Timer>,
    frames: BTreeMap<FrameId, Callback>,
}

impl std::fmt::Debug for TimerQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerQueue")
            .field("timers", &self.timers.len())
            .field("frames", &self.frames.len())
            .finish()
    }
}

impl TimerQueue {
    pub(crate) fn add_timer(&mut self, id: TimerId, due: Duration, callback: Callback) {
        self.timers.insert(id, Timer { due, callback });
    }

    pub(crate) fn remove_timer(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    /// Pop the earliest timer due at or before `now`. Ties fire in registration order.
    pub(crate) fn pop_due(&mut self, now: Duration) -> Option<Callback> {
        let id = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.due <= now)
            .min_by_key(|(id, timer)| (timer.due, **id))
            .map(|(id, _)| *id)?;
        self.timers.remove(&id).map(|timer| timer.callback)
    }

    pub(crate) fn add_frame(&mut self, id: FrameId, callback: Callback) {
        self.frames.insert(id, callback);
    }

    pub(crate) fn remove_frame(&mut self, id: FrameId) -> bool {
        self.frames.remove(&id).is_some()
    }

    /// Take every frame callback registered so far.
    /// Callbacks requested while these run land in the next frame.
    pub(crate) fn take_frames(&mut self) -> Vec<Callback> {
        std::mem::take(&mut self.frames).into_values().collect()
    }

    pub(crate) fn timer_count(&self) -> usize {
        self.timers.len()
    }

    pub(crate) fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

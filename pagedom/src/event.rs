/// Events delivered to listeners, each targeted at one element.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Primary-button click.
    Click { target: String, x: f32, y: f32 },
    /// Pointer pressed.
    PointerDown { target: String, x: f32, y: f32 },
    /// Pointer moved (pressed or not).
    PointerMove { target: String, x: f32, y: f32 },
    /// Pointer released.
    PointerUp { target: String, x: f32, y: f32 },
    /// Scroll offset of the target changed.
    Scroll { target: String },
    /// A scroll of the target came to rest.
    ScrollEnd { target: String },
    /// Key press, targeted at the element that had it routed to.
    KeyDown { target: String, key: Key },
    /// Page finished loading, on first load and after every soft navigation.
    PageLoad { target: String },
}

impl Event {
    pub fn target(&self) -> &str {
        match self {
            Event::Click { target, .. }
            | Event::PointerDown { target, .. }
            | Event::PointerMove { target, .. }
            | Event::PointerUp { target, .. }
            | Event::Scroll { target }
            | Event::ScrollEnd { target }
            | Event::KeyDown { target, .. }
            | Event::PageLoad { target } => target,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Event::Click { .. } => EventKind::Click,
            Event::PointerDown { .. } => EventKind::PointerDown,
            Event::PointerMove { .. } => EventKind::PointerMove,
            Event::PointerUp { .. } => EventKind::PointerUp,
            Event::Scroll { .. } => EventKind::Scroll,
            Event::ScrollEnd { .. } => EventKind::ScrollEnd,
            Event::KeyDown { .. } => EventKind::KeyDown,
            Event::PageLoad { .. } => EventKind::PageLoad,
        }
    }

    /// Pointer coordinates for pointer-like events.
    pub fn position(&self) -> Option<(f32, f32)> {
        match self {
            Event::Click { x, y, .. }
            | Event::PointerDown { x, y, .. }
            | Event::PointerMove { x, y, .. }
            | Event::PointerUp { x, y, .. } => Some((*x, *y)),
            _ => None,
        }
    }

    pub fn key(&self) -> Option<Key> {
        match self {
            Event::KeyDown { key, .. } => Some(*key),
            _ => None,
        }
    }
}

/// Event type used when registering listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    PointerDown,
    PointerMove,
    PointerUp,
    Scroll,
    ScrollEnd,
    KeyDown,
    PageLoad,
}

impl EventKind {
    /// Whether the event propagates from its target up through the ancestors.
    pub fn bubbles(self) -> bool {
        !matches!(
            self,
            EventKind::Scroll | EventKind::ScrollEnd | EventKind::PageLoad
        )
    }
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    Escape,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
}

/// Handle returned by [`Document::add_listener`](crate::Document::add_listener).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub(crate) u64);

/// Registration options for a listener.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    /// Remove the listener after its first invocation.
    pub once: bool,
}

impl ListenerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn once() -> Self {
        Self { once: true }
    }
}

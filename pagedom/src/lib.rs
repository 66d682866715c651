pub mod document;
pub mod element;
pub mod event;
pub mod rect;
pub mod scroll;
pub mod timers;
pub mod transitions;

pub use document::{Document, Node, ObserverId};
pub use element::{Element, Selector, SelectorError};
pub use event::{Event, EventKind, Key, ListenerId, ListenerOptions};
pub use rect::Rect;
pub use scroll::{ScrollBehavior, ScrollMetrics};
pub use timers::{FrameId, TimerId, FRAME_INTERVAL};
pub use transitions::{Easing, TransitionConfig};

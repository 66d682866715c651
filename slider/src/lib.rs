//! Horizontal slider behaviors for [`pagedom`] pages.
//!
//! A slider is one scrollable strip with discrete stops, driven by
//! prev/next arrows, a clickable progress track, free-form dragging and
//! passive scroll sync. Each instance owns its state and listener handles;
//! [`Slider::destroy`] tears everything down.

pub mod arrows;
pub mod boot;
pub mod error;
pub mod instance;
pub mod options;
pub mod progress;
pub mod scroll;
pub mod state;
pub mod teardown;

pub use arrows::{init_arrow_navigation, navigate_to, step, Step};
pub use boot::SliderRegistry;
pub use error::SliderError;
pub use instance::{Slider, SliderId, READY_ATTR};
pub use options::SliderOptions;
pub use progress::{index_at_fraction, init_progress_bar, seek, sync_from_scroll, track_fraction};
pub use scroll::{init_drag_to_scroll, scroll_fraction, scroll_to_index, ScrollMapping};
pub use state::{Motion, SharedState, SliderState};
pub use teardown::Teardown;

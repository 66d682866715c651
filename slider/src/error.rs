use thiserror::Error;

/// Reasons a slider could not be set up.
///
/// None of these reach the page: [`Slider::init`](crate::Slider::init) logs
/// them and leaves the markup alone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SliderError {
    #[error("slider root '{0}' not found")]
    MissingRoot(String),

    #[error("slider '{0}' is already initialized")]
    AlreadyInitialized(String),

    #[error("slider '{0}' has no items")]
    Empty(String),

    #[error("invalid item count {value:?} on slider '{root}'")]
    InvalidCount {
        /// The slider root element.
        root: String,
        /// The raw attribute value.
        value: String,
    },

    #[error("invalid scroll mapping {0:?}, expected \"proportional\" or \"item:<px>\"")]
    InvalidMapping(String),
}

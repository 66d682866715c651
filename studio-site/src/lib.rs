//! The studio's portfolio site, hosted on a [`pagedom`] document: a featured
//! strip on the home page and a gallery per project, all driven by
//! [`slider`].

pub mod cli;
pub mod config;
pub mod error;
pub mod page;
pub mod paths;
pub mod session;

pub use config::{Project, SiteConfig};
pub use error::SiteError;
pub use page::Route;
pub use session::{Session, SliderReport};

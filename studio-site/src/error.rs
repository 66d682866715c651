use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the site binary.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("unknown page '{0}', expected \"home\" or \"projects/<slug>\"")]
    UnknownRoute(String),

    #[error("no project named '{0}'")]
    UnknownProject(String),
}

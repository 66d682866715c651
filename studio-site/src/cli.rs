//! CLI argument parsing via clap.

use std::path::PathBuf;

use clap::Parser;

/// Render the studio site and walk through its sliders.
#[derive(Debug, Parser)]
#[command(name = "studio-site", version)]
pub struct Args {
    /// Page to open first, e.g. `home` or `projects/harbor-house`.
    #[arg(default_value = "home")]
    pub page: String,

    /// Path to config file (default: the platform config dir's site.json).
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Log file (default: config's log_file, then the platform cache dir).
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Also log to the terminal.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Only open the page; skip the walkthrough of every page.
    #[arg(long = "no-tour")]
    pub no_tour: bool,
}

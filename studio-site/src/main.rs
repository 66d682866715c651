use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{info, warn};
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

use studio_site::cli::Args;
use studio_site::{paths, Route, Session, SiteConfig, SiteError};

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), SiteError> {
    let config_path = args.config.clone().or_else(paths::config_file);
    let config = match &config_path {
        Some(path) => SiteConfig::load(path)?,
        None => SiteConfig::default(),
    };

    let log_path = args
        .log_file
        .clone()
        .or_else(|| config.log_file.clone())
        .or_else(paths::log_file)
        .unwrap_or_else(|| PathBuf::from("studio-site.log"));
    init_logging(&log_path, args.verbose)?;
    match &config_path {
        Some(path) => info!("Config: {}", path.display()),
        None => warn!("No config directory, using defaults"),
    }

    let route: Route = args.page.parse()?;
    let mut session = Session::open(config);
    if route != Route::Home {
        session.visit(route)?;
    }

    let reports = if args.no_tour {
        session.exercise()
    } else {
        session.tour()?
    };
    for report in &reports {
        println!("{report}");
    }

    session.close();
    Ok(())
}

fn init_logging(path: &Path, verbose: bool) -> Result<(), SiteError> {
    let io_error = |source| SiteError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(io_error)?;
    }
    let log_file = File::create(path).map_err(io_error)?;

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![WriteLogger::new(
        LevelFilter::Debug,
        Config::default(),
        log_file,
    )];
    if verbose {
        loggers.push(TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    CombinedLogger::init(loggers)?;
    Ok(())
}

//! Logging setup on top of `log4rs`. The library only emits through the `log` facade;
//! binaries and embedding services pick one of these initialisers.

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::Path;

use crate::errors::QueryError;

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}";

/// Initializes the logging system from the default file `log4rs.yaml` in the working directory.
///
/// # Errors
/// Returns an error if the file is missing or invalid, or a logger is already installed.
pub fn init() -> Result<(), QueryError> {
    init_path(Path::new("log4rs.yaml"))
}

/// Initializes the logging system from a specific config file path.
///
/// # Errors
/// Returns an error if the file is missing or invalid, or a logger is already installed.
pub fn init_path(path: &Path) -> Result<(), QueryError> {
    log4rs::init_file(path, log4rs::config::Deserializers::default())
        .map_err(|e| QueryError::Logging(e.to_string()))
}

/// Maps `error|warn|info|debug|trace|off` to a level filter; anything else is `warn`.
#[must_use]
pub fn level_from_str(level: Option<&str>) -> LevelFilter {
    match level.map(str::to_ascii_lowercase).as_deref() {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("info") => LevelFilter::Info,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        _ => LevelFilter::Warn,
    }
}

/// Builds a stderr configuration. Dropped-token traces (`mongo_query::dev`) are only
/// routed when `level` is `trace`.
///
/// # Errors
/// Returns an error if the configuration is rejected by `log4rs`.
pub fn console_config(level: Option<&str>) -> Result<Config, QueryError> {
    let level = level_from_str(level);
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();
    let dev_level = if level == LevelFilter::Trace { LevelFilter::Trace } else { LevelFilter::Off };
    Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .logger(Logger::builder().build("mongo_query::dev", dev_level))
        .build(Root::builder().appender("stderr").build(level))
        .map_err(|e| QueryError::Logging(e.to_string()))
}

/// Configure stderr logging globally for the process.
///
/// # Errors
/// Returns an error if the configuration is invalid or a logger is already installed.
pub fn configure_logging(level: Option<&str>) -> Result<(), QueryError> {
    let config = console_config(level)?;
    log4rs::init_config(config).map_err(|e| QueryError::Logging(e.to_string()))?;
    Ok(())
}

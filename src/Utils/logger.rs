use crate::errors::{PolyError, PolyResult};
use log::{LevelFilter, info};
use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

/// level name -> filter, `None` means the default `info`
pub fn parse_level(level: Option<&str>) -> PolyResult<LevelFilter> {
    let level = match level {
        None => return Ok(LevelFilter::Info),
        Some(level) => level.trim().to_lowercase(),
    };
    match level.as_str() {
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" => Ok(LevelFilter::Warn),
        "error" => Ok(LevelFilter::Error),
        "off" => Ok(LevelFilter::Off),
        _ => Err(PolyError::construction(format!(
            "loglevel must be debug, info, warn, error or off, got {}",
            level
        ))),
    }
}

/// Installs a terminal logger for the `log` macros used by the library.
///
/// Returns `Ok(false)` when a logger was already installed (the first one stays active).
pub fn init_logger(level: Option<&str>) -> PolyResult<bool> {
    let log_option = parse_level(level)?;
    let logger_instance = CombinedLogger::init(vec![TermLogger::new(
        log_option,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
    match logger_instance {
        Ok(()) => {
            info!("logger started with loglevel: {}", log_option);
            Ok(true)
        }
        Err(_) => Ok(false),
    }
}

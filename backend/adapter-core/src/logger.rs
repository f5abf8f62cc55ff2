//! Logging setup for applications hosting the adapters.
//!
//! The library itself only emits through the `log` facade; call
//! [`initialize`] once at startup to get coloured stdout plus a plain log file.

use crate::error::LoggerError;

use common::ErrorLocation;

use std::io::stdout;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::Color::{Blue, Green, Magenta, Red, Yellow};
use fern::colors::ColoredLevelConfig;
use humantime::format_rfc3339;
use log::{LevelFilter, info, warn};

static LOGGER_INITIALIZED: AtomicBool = AtomicBool::new(false);

// Held across the install so a concurrent caller never sees a half-finished one.
static INSTALL_LOCK: Mutex<()> = Mutex::new(());

const LOG_FILE_NAME: &str = "service-adapters.log";

#[cfg(debug_assertions)]
const LOG_LEVEL: LevelFilter = LevelFilter::Debug;

#[cfg(not(debug_assertions))]
const LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Initialize dual output (stdout + `{log_dir}/service-adapters.log`).
///
/// Safe to call more than once and from several threads: after a successful
/// call, later calls log a warning and return `Ok`. A failed call leaves the
/// logger uninstalled so it can be retried, and callers racing with it wait
/// for its outcome instead of returning `Ok` early.
///
/// # Errors
///
/// Returns [`LoggerError`] if the log file cannot be created or another
/// global logger is already installed.
pub fn initialize(log_dir: &Path) -> Result<(), LoggerError> {
    if LOGGER_INITIALIZED.load(Ordering::SeqCst) {
        warn!("Logger already initialized");
        return Ok(());
    }

    let _guard = INSTALL_LOCK.lock().unwrap_or_else(PoisonError::into_inner);

    if LOGGER_INITIALIZED.load(Ordering::SeqCst) {
        warn!("Logger already initialized");
        return Ok(());
    }

    initialize_internal(log_dir)?;
    LOGGER_INITIALIZED.store(true, Ordering::SeqCst);

    info!("Logger initialized with level: {LOG_LEVEL:?}");
    Ok(())
}

#[track_caller]
fn initialize_internal(log_dir: &Path) -> Result<(), LoggerError> {
    let log_file_path = log_dir.join(LOG_FILE_NAME);

    let color_configuration = ColoredLevelConfig::new()
        .debug(Blue)
        .info(Green)
        .warn(Yellow)
        .error(Red)
        .trace(Magenta);

    let stdout_dispatch = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message} [{target}]",
                date = format_rfc3339(SystemTime::now()),
                level = color_configuration.color(record.level()),
                message = message,
                target = record.target(),
            ))
        })
        .chain(stdout());

    let log_file = fern::log_file(&log_file_path).map_err(|e| LoggerError::LogFile {
        message: format!("{}: {e}", log_file_path.display()),
        location: ErrorLocation::from(std::panic::Location::caller()),
    })?;

    let file_dispatch = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message} [{file}:{line}]",
                date = format_rfc3339(SystemTime::now()),
                level = record.level(),
                message = message,
                file = record.file().unwrap_or("unknown"),
                line = record.line().unwrap_or(0)
            ))
        })
        .chain(log_file);

    Dispatch::new()
        .level(LOG_LEVEL)
        .chain(stdout_dispatch)
        .chain(file_dispatch)
        .apply()
        .map_err(|e| LoggerError::Dispatch {
            message: e.to_string(),
            location: ErrorLocation::from(std::panic::Location::caller()),
        })?;

    Ok(())
}

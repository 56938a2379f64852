//! Generic logger utility functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use log::{self, info};
use fern;
use colored::{ColoredString, Colorize};
use std::fmt;
use thiserror::Error;

// Internal imports
use crate::session;

// Re-exports
pub use log::LevelFilter;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with initialising the logger.
#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error("Expected a log level less than `INFO`, found `{0}`")]
    InvalidMinLogLevel(log::LevelFilter),

    #[error("Error initialising the log file: {0}")]
    LogFileInitError(std::io::Error),

    #[error("An error occured while setting up the logger: {0}")]
    FernInitError(log::SetLoggerError)
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Initialise the logger for this execution.
///
/// Records go to stdout with coloured level tags and to the session log file with plain tags.
///
/// `target_levels` lowers the level of individual targets (e.g. modules which log every cycle)
/// below `min_level`. A target can never be made more verbose than `min_level`.
///
/// # Notes
///
/// - `min_level` must be greater than `log::Level::Info`.
///
/// # Safety
///
/// - This function must only be called once to prevent corrupting logs.
pub fn logger_init(
    min_level: self::LevelFilter,
    target_levels: &[(&'static str, LevelFilter)],
    session: &session::Session
) -> Result<(), LoggerInitError> {

    if min_level < log::Level::Info {
        return Err(LoggerInitError::InvalidMinLogLevel(min_level))
    }

    let log_file = fern::log_file(session.log_file_path.clone())
        .map_err(LoggerInitError::LogFileInitError)?;

    let stdout = fern::Dispatch::new()
        .format(|out, message, record| {
            write_record(out, level_to_str(record.level()), message, record)
        })
        .chain(std::io::stdout());

    // No colour codes in the file
    let file = fern::Dispatch::new()
        .format(|out, message, record| {
            write_record(out, level_to_plain_str(record.level()), message, record)
        })
        .chain(log_file);

    let mut dispatch = fern::Dispatch::new().level(min_level);

    for (target, level) in target_levels.iter() {
        dispatch = dispatch.level_for(*target, target_level(min_level, *level));
    }

    dispatch
        .chain(stdout)
        .chain(file)
        .apply()
        .map_err(LoggerInitError::FernInitError)?;

    info!("Logging initialised");
    info!("    Session epoch: {}", session::get_epoch());
    info!("    Log level: {:?}", min_level);
    for (target, level) in target_levels.iter() {
        info!("    {} limited to: {:?}", target, target_level(min_level, *level));
    }
    info!("    Log file path: {:?}", session.log_file_path);

    Ok(())
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Write a single record with the given level tag.
///
/// Debug and trace records include their target.
fn write_record<T: fmt::Display>(
    out: fern::FormatCallback,
    tag: T,
    message: &fmt::Arguments,
    record: &log::Record
) {
    if record.level() > log::Level::Info {
        out.finish(format_args!(
            "[{:10.6} {}] {}: {}",
            session::get_elapsed_seconds(),
            tag,
            record.target(),
            message
        ))
    }
    else {
        out.finish(format_args!(
            "[{:10.6} {}] {}",
            session::get_elapsed_seconds(),
            tag,
            message
        ))
    }
}

/// The level a limited target is logged at.
fn target_level(min_level: LevelFilter, limit: LevelFilter) -> LevelFilter {
    std::cmp::min(min_level, limit)
}

/// Get the coloured string representation of a log level
fn level_to_str(level: log::Level) -> ColoredString {
    let tag = level_to_plain_str(level);

    match level {
        log::Level::Trace => tag.dimmed().italic(),
        log::Level::Debug => tag.dimmed(),
        log::Level::Info  => tag.normal(),
        log::Level::Warn  => tag.yellow(),
        log::Level::Error => tag.red().bold()
    }
}

/// Get the string representation of a log level
fn level_to_plain_str(level: log::Level) -> &'static str {
    match level {
        log::Level::Trace => "TRC",
        log::Level::Debug => "DBG",
        log::Level::Info  => "INF",
        log::Level::Warn  => "WRN",
        log::Level::Error => "ERR"
    }
}

//! FFI logging backend that routes logs to the host via callback
//!
//! Installs a `log` backend that forwards records to a UniFFI
//! [`LogCallback`], so crate logs show up in the host framework's own logs.

use std::sync::{Arc, OnceLock, RwLock};

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

use super::types::{FfiLogLevel, LogCallback};

/// Global storage for the FFI logger
static FFI_LOGGER: OnceLock<FfiLogger> = OnceLock::new();

struct LoggerState {
    callback: Option<Arc<dyn LogCallback>>,
    max_level: LevelFilter,
}

/// Logger that forwards to a callback when one is set
struct FfiLogger {
    state: RwLock<LoggerState>,
}

impl FfiLogger {
    fn new(max_level: LevelFilter) -> Self {
        Self {
            state: RwLock::new(LoggerState {
                callback: None,
                max_level,
            }),
        }
    }

    fn set_callback(&self, callback: Option<Arc<dyn LogCallback>>) {
        if let Ok(mut state) = self.state.write() {
            state.callback = callback;
        }
    }

    fn set_max_level(&self, level: LevelFilter) {
        if let Ok(mut state) = self.state.write() {
            state.max_level = level;
        }
    }

    /// Callback to use for `metadata`, if it passes the level filter
    fn sink_for(&self, metadata: &Metadata) -> Option<Arc<dyn LogCallback>> {
        let state = self.state.read().ok()?;
        if metadata.level() > state.max_level {
            return None;
        }
        state.callback.clone()
    }
}

impl Log for FfiLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.sink_for(metadata).is_some()
    }

    fn log(&self, record: &Record) {
        // Clone the callback out so the lock is not held across host code
        let Some(callback) = self.sink_for(record.metadata()) else {
            return;
        };

        callback.on_log(
            FfiLogLevel::from(record.level()),
            record.target().to_string(),
            record.args().to_string(),
        );
    }

    fn flush(&self) {}
}

/// Install the FFI logger as the global logger
///
/// Calling it again once installed only updates the level. Returns an error
/// if a different logger was installed first, in which case no records will
/// ever reach the callback.
pub fn init_ffi_logger(max_level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = FFI_LOGGER.get_or_init(|| FfiLogger::new(max_level));
    if let Err(e) = log::set_logger(logger) {
        if !is_global(logger) {
            return Err(e);
        }
    }
    logger.set_max_level(max_level);
    log::set_max_level(max_level);
    Ok(())
}

/// Whether `logger` is the one `log` dispatches to
fn is_global(logger: &FfiLogger) -> bool {
    std::ptr::addr_eq(log::logger() as *const dyn Log, logger as *const FfiLogger)
}

/// Set the callback that receives log messages; `None` drops them
pub fn set_log_callback(callback: Option<Arc<dyn LogCallback>>) {
    if let Some(logger) = FFI_LOGGER.get() {
        logger.set_callback(callback);
    }
}

/// Update the maximum log level
pub fn set_log_level(level: LevelFilter) {
    if let Some(logger) = FFI_LOGGER.get() {
        logger.set_max_level(level);
        log::set_max_level(level);
    }
}

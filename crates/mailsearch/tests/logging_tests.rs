//! Log bridge installation when the host already owns the `log` backend
//!
//! Kept in its own test binary since it installs a process-wide logger.

use log::{LevelFilter, Log, Metadata, Record};
use mailsearch::ffi::{FfiLogLevel, LogCallback, SearchToolError, initialize_logging};

struct HostLogger;

impl Log for HostLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, _record: &Record) {}

    fn flush(&self) {}
}

static HOST_LOGGER: HostLogger = HostLogger;

struct Ignore;

impl LogCallback for Ignore {
    fn on_log(&self, _level: FfiLogLevel, _target: String, _message: String) {}
}

#[test]
fn test_initialize_logging_reports_foreign_logger() {
    log::set_logger(&HOST_LOGGER).unwrap();
    log::set_max_level(LevelFilter::Warn);

    let err = initialize_logging(Box::new(Ignore), FfiLogLevel::Info).unwrap_err();
    assert!(matches!(err, SearchToolError::Config { .. }));

    // A second attempt fails the same way rather than pretending to succeed
    assert!(initialize_logging(Box::new(Ignore), FfiLogLevel::Debug).is_err());
    assert_eq!(log::max_level(), LevelFilter::Warn);
}

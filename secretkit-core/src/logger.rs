//! Forwarding of `log` records to a host-provided logger.

use std::sync::{Arc, OnceLock};

/// A sink for `SecretKit` log messages, implemented by the host application.
///
/// # Examples
///
/// ```rust
/// use secretkit_core::logger::{Logger, LogLevel};
///
/// struct StderrLogger;
///
/// impl Logger for StderrLogger {
///     fn log(&self, level: LogLevel, message: String) {
///         eprintln!("[{level:?}] {message}");
///     }
/// }
/// ```
///
/// ## Swift
///
/// ```swift
/// final class SecretKitLoggerBridge: SecretKit.Logger {
///     func log(level: SecretKit.LogLevel, message: String) {
///         os_log("%{public}@", message)
///     }
/// }
///
/// SecretKit.setLogger(logger: SecretKitLoggerBridge(), minLevel: .info) // once, at launch
/// ```
#[uniffi::export(with_foreign)]
pub trait Logger: Sync + Send {
    /// Records `message` at `level`.
    fn log(&self, level: LogLevel, message: String);
}

/// Severity of a log message, most verbose first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, uniffi::Enum)]
pub enum LogLevel {
    /// Very detailed tracing output.
    Trace,
    /// Debugging information.
    Debug,
    /// Session transitions.
    Info,
    /// Situations the user may want to know about.
    Warn,
    /// Failures.
    Error,
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Self::Error,
            log::Level::Warn => Self::Warn,
            log::Level::Info => Self::Info,
            log::Level::Debug => Self::Debug,
            log::Level::Trace => Self::Trace,
        }
    }
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::Trace,
            LogLevel::Debug => Self::Debug,
            LogLevel::Info => Self::Info,
            LogLevel::Warn => Self::Warn,
            LogLevel::Error => Self::Error,
        }
    }
}

/// `log::Log` implementation that hands records to the host [`Logger`].
struct ForeignLogger;

impl ForeignLogger {
    /// Debug and trace records from dependencies are dropped.
    fn accepts(module_path: Option<&str>, level: log::Level) -> bool {
        level <= log::Level::Info
            || module_path.is_some_and(|path| path.starts_with("secretkit"))
    }
}

impl log::Log for ForeignLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata())
            || !Self::accepts(record.module_path(), record.level())
        {
            return;
        }
        if let Some(logger) = LOGGER_INSTANCE.get() {
            logger.log(record.level().into(), record.args().to_string());
        }
    }

    fn flush(&self) {}
}

static LOGGER_INSTANCE: OnceLock<Arc<dyn Logger>> = OnceLock::new();

/// Installs the host logger and sets the minimum level forwarded to it.
///
/// Only the first logger is kept; later calls only adjust the level.
#[uniffi::export]
pub fn set_logger(logger: Arc<dyn Logger>, min_level: LogLevel) {
    if LOGGER_INSTANCE.set(logger).is_ok() {
        if let Err(e) = init_logger() {
            eprintln!("Failed to set logger: {e}");
        }
    } else {
        log::debug!("logger already set, keeping the existing one");
    }
    log::set_max_level(min_level.into());
}

/// Registers [`ForeignLogger`] with the `log` facade.
///
/// # Errors
///
/// Returns a `log::SetLoggerError` if another `log` implementation is already installed.
fn init_logger() -> Result<(), log::SetLoggerError> {
    static LOGGER: ForeignLogger = ForeignLogger;
    log::set_logger(&LOGGER)
}

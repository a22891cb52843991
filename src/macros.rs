//! Logging macros for ergonomic log message formatting.
//!
//! These macros format their arguments like `format!` and forward to the
//! matching [`Logger`](crate::Logger) method, returning its `Result`.
//!
//! # Examples
//!
//! ```
//! use queued_logger::prelude::*;
//! use queued_logger::info;
//!
//! let logger = Logger::new(LogLevel::Info, MemorySink::new(), OutputFormat::Text)?;
//!
//! info!(logger, "Server started")?;
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port)?;
//! # logger.close()?;
//! # Ok::<(), queued_logger::LoggerError>(())
//! ```

/// Log a message at an explicit level.
///
/// ```
/// # use queued_logger::prelude::*;
/// # let logger = Logger::new(LogLevel::Debug, MemorySink::new(), OutputFormat::Text)?;
/// use queued_logger::log;
/// log!(logger, LogLevel::Info, "Simple message")?;
/// log!(logger, LogLevel::Error, "Error code: {}", 500)?;
/// # Ok::<(), queued_logger::LoggerError>(())
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal message, wait for the drain, then run the fatal handler.
///
/// Unlike the other macros this goes through [`Logger::fatal`](crate::Logger::fatal),
/// not `log`.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatal(format!($($arg)+))
    };
}

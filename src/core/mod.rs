//! Core logger types and traits

pub mod config;
pub mod error;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod output_format;
pub mod overflow_policy;
pub mod queue;
pub mod shutdown;
pub mod sink;
pub mod timestamp;
mod worker;

pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use log_entry::LogEntry;
pub use log_level::{level_name, LogLevel};
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use output_format::{format_json, format_text, OutputFormat};
pub use overflow_policy::OverflowPolicy;
pub use queue::{Admission, MessageQueue, DEFAULT_CAPACITY};
pub use shutdown::{exit_process, FatalHandler, LifecycleState, ShutdownReason, FATAL_EXIT_CODE};
pub use sink::Sink;
pub use timestamp::TimestampFormat;

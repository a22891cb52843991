//! # Queued Logger
//!
//! A minimal structured logger. Application threads submit leveled,
//! timestamped messages; a single background worker filters, formats and
//! writes them to a sink.
//!
//! ## Features
//!
//! - **Bounded queue with backpressure**: producers block instead of losing records
//! - **Single writer**: lines never interleave, and appear in dequeue order
//! - **Drain on shutdown**: `close` and FATAL both write everything already queued
//! - **JSON or text lines**: `{"level":1,"msg":"..","time":".."}` or `<time> [INFO] ..`

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        FatalHandler, LifecycleState, LogEntry, LogLevel, Logger, LoggerBuilder, LoggerConfig,
        LoggerError, LoggerMetrics, OutputFormat, OverflowPolicy, Result, ShutdownReason, Sink,
        TimestampFormat,
    };
    pub use crate::sinks::{ConsoleSink, FileSink, MemorySink, WriterSink};
}

pub use crate::core::{
    level_name, FatalHandler, LifecycleState, LogEntry, LogLevel, Logger, LoggerBuilder,
    LoggerConfig, LoggerError, LoggerMetrics, OutputFormat, OverflowPolicy, Result,
    ShutdownReason, Sink, TimestampFormat, FATAL_EXIT_CODE,
};
pub use sinks::{ConsoleSink, FileSink, MemorySink, WriterSink};

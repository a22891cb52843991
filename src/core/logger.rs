//! Logger facade
//!
//! Producers on any thread call [`Logger::log`] and friends; records travel
//! through a bounded queue to a single worker thread that owns the sink.

use super::{
    config::LoggerConfig,
    error::{LoggerError, Result},
    log_entry::LogEntry,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    output_format::OutputFormat,
    overflow_policy::OverflowPolicy,
    queue::{Admission, MessageQueue},
    shutdown::{exit_process, FatalHandler, LifecycleState, ShutdownCoordinator, ShutdownReason},
    sink::Sink,
    timestamp::TimestampFormat,
    worker::Worker,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const WORKER_THREAD_NAME: &str = "queued-logger-worker";

/// Handle to a running logger
///
/// Share it between threads with `Arc<Logger>`. Every method takes `&self`.
///
/// # Contract
///
/// - Submitting after the logger reached its terminal state (after `close`, or
///   after a FATAL record was processed) is rejected with
///   [`LoggerError::LoggerStopped`].
/// - `close` must be called once; a second call returns
///   [`LoggerError::AlreadyClosed`]. Dropping an unclosed logger closes it.
pub struct Logger {
    queue: Arc<MessageQueue<LogEntry>>,
    shutdown: Arc<ShutdownCoordinator>,
    metrics: Arc<LoggerMetrics>,
    worker: Mutex<Option<thread::JoinHandle<()>>>,
    close_requested: AtomicBool,
    threshold: LogLevel,
    format: OutputFormat,
    overflow_policy: OverflowPolicy,
}

impl Logger {
    /// Start a logger writing to `sink` with the default queue capacity
    ///
    /// # Example
    ///
    /// ```
    /// use queued_logger::prelude::*;
    ///
    /// let sink = MemorySink::new();
    /// let logger = Logger::new(LogLevel::Info, sink.clone(), OutputFormat::Text)?;
    /// logger.debug("dropped by the threshold")?;
    /// logger.info("written")?;
    /// logger.close()?;
    ///
    /// assert_eq!(sink.lines().len(), 1);
    /// # Ok::<(), queued_logger::LoggerError>(())
    /// ```
    pub fn new(threshold: LogLevel, sink: impl Sink + 'static, format: OutputFormat) -> Result<Self> {
        Logger::builder().threshold(threshold).format(format).build(sink)
    }

    /// Start a logger from a configuration value
    pub fn from_config(config: LoggerConfig, sink: impl Sink + 'static) -> Result<Self> {
        Self::start(config, Box::new(sink), exit_process())
    }

    fn start(config: LoggerConfig, sink: Box<dyn Sink>, on_fatal: FatalHandler) -> Result<Self> {
        config.validate()?;

        let queue = Arc::new(
            MessageQueue::new(config.capacity, config.overflow_policy)?
                .with_pinned(|entry: &LogEntry| entry.level >= LogLevel::Error),
        );
        let metrics = Arc::new(LoggerMetrics::new());
        let (shutdown, completion) = ShutdownCoordinator::new();

        let worker = Worker {
            queue: Arc::clone(&queue),
            sink,
            threshold: config.threshold,
            format: config.format,
            timestamp_format: config.timestamp_format,
            metrics: Arc::clone(&metrics),
            shutdown: Arc::clone(&shutdown),
            on_fatal,
            fallback: Box::new(std::io::stdout()),
            completion,
        };

        let handle = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || worker.run())?;

        Ok(Self {
            queue,
            shutdown,
            metrics,
            worker: Mutex::new(Some(handle)),
            close_requested: AtomicBool::new(false),
            threshold: config.threshold,
            format: config.format,
            overflow_policy: config.overflow_policy,
        })
    }

    /// Submit a record. Blocks while the queue is full under [`OverflowPolicy::Block`].
    pub fn log(&self, level: LogLevel, message: impl Into<String>) -> Result<()> {
        self.submit(LogEntry::new(level, message))
    }

    fn submit(&self, entry: LogEntry) -> Result<()> {
        // ERROR and FATAL records are never discarded by a dropping policy:
        // they wait for space here and are pinned once queued.
        let admission = if entry.level >= LogLevel::Error && self.overflow_policy.may_drop() {
            self.queue.push_blocking(entry)?
        } else {
            self.queue.push(entry)?
        };

        match admission {
            Admission::Queued => {}
            Admission::QueuedAfterWait => {
                self.metrics.record_queue_full();
            }
            Admission::Rejected(_) | Admission::Evicted(_) => {
                self.metrics.record_queue_full();
                self.alert_dropped();
            }
        }
        Ok(())
    }

    fn alert_dropped(&self) {
        let dropped_count = self.metrics.record_dropped();

        // Alert on first drop and periodically thereafter
        if dropped_count == 0 || (dropped_count + 1) % 1000 == 0 {
            eprintln!(
                "[LOGGER WARNING] Queue full, {} logs dropped under {} policy. \
                 Consider increasing capacity or using the Block policy.",
                dropped_count + 1,
                self.overflow_policy
            );
        }
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Debug, message)
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Info, message)
    }

    #[inline]
    pub fn warning(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Warning, message)
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Error, message)
    }

    /// Submit a FATAL record and wait for the drain that follows it
    ///
    /// Once every record admitted up to and including this one has been
    /// written, the fatal handler runs with exit code 1. With the default
    /// handler the process exits and this call never returns.
    pub fn fatal(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Fatal, message)?;
        self.shutdown.wait();
        Ok(())
    }

    /// Stop accepting records, drain the queue and stop the worker
    pub fn close(&self) -> Result<()> {
        if self.close_requested.swap(true, Ordering::AcqRel) {
            return Err(LoggerError::AlreadyClosed);
        }

        self.queue.close();
        self.shutdown.begin_drain(ShutdownReason::Closed);
        self.join_worker()
    }

    fn join_worker(&self) -> Result<()> {
        let handle = self.worker.lock().take();
        if let Some(handle) = handle {
            if let Err(e) = handle.join() {
                eprintln!("[LOGGER ERROR] Worker thread panicked during shutdown: {:?}", e);
                return Err(LoggerError::other("worker thread panicked during shutdown"));
            }
        }
        Ok(())
    }

    /// Wait for the worker to stop without initiating shutdown
    ///
    /// Returns `false` if `timeout` elapsed first.
    pub fn wait_for_shutdown(&self, timeout: Duration) -> bool {
        self.shutdown.wait_timeout(timeout)
    }

    /// Whether new records are still admitted
    pub fn is_accepting(&self) -> bool {
        !self.queue.is_closed()
    }

    pub fn state(&self) -> LifecycleState {
        self.shutdown.state()
    }

    pub fn shutdown_reason(&self) -> Option<ShutdownReason> {
        self.shutdown.reason()
    }

    pub fn threshold(&self) -> LogLevel {
        self.threshold
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Number of records waiting for the worker
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn capacity(&self) -> usize {
        self.queue.capacity()
    }

    /// Get the logger metrics
    ///
    /// # Example
    ///
    /// ```
    /// use queued_logger::prelude::*;
    ///
    /// let logger = Logger::new(LogLevel::Info, MemorySink::new(), OutputFormat::Json)?;
    /// logger.info("hello")?;
    /// logger.close()?;
    ///
    /// let metrics = logger.metrics();
    /// assert_eq!(metrics.written_count(), 1);
    /// # Ok::<(), queued_logger::LoggerError>(())
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if !self.close_requested.load(Ordering::Acquire) {
            if let Err(e) = self.close() {
                eprintln!("[LOGGER ERROR] Failed to close logger on drop: {}", e);
            }
        }

        let failed = self.metrics.failed_count();
        if failed > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shut down after {} failed writes",
                failed
            );
        }
    }
}

/// Builder for constructing a Logger with a fluent API
///
/// # Example
/// ```
/// use queued_logger::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder()
///     .threshold(LogLevel::Debug)
///     .format(OutputFormat::Json)
///     .capacity(1000)
///     .overflow_policy(OverflowPolicy::Block)
///     .on_fatal(Arc::new(|code| eprintln!("fatal, would exit with {}", code)))
///     .build(MemorySink::new())?;
/// # logger.close()?;
/// # Ok::<(), queued_logger::LoggerError>(())
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    on_fatal: Option<FatalHandler>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            on_fatal: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn threshold(mut self, level: LogLevel) -> Self {
        self.config.threshold = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.config.format = format;
        self
    }

    /// Set the queue capacity
    #[must_use = "builder methods return a new value"]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    /// Set the overflow policy. Default is `Block`.
    #[must_use = "builder methods return a new value"]
    pub fn overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.config.overflow_policy = policy;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.config.timestamp_format = format;
        self
    }

    /// Replace the process-exit behavior that follows a FATAL record
    #[must_use = "builder methods return a new value"]
    pub fn on_fatal(mut self, handler: FatalHandler) -> Self {
        self.on_fatal = Some(handler);
        self
    }

    /// Build the Logger and start its worker
    pub fn build(self, sink: impl Sink + 'static) -> Result<Logger> {
        let on_fatal = self.on_fatal.unwrap_or_else(exit_process);
        Logger::start(self.config, Box::new(sink), on_fatal)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//! The single consumer: drains the queue, filters, formats and writes
//!
//! The worker owns the sink outright. It is the only code that ever touches it,
//! so writes need no lock and appear in exactly the order they were dequeued.

use super::error::{LoggerError, Result};
use super::log_entry::LogEntry;
use super::log_level::LogLevel;
use super::metrics::LoggerMetrics;
use super::output_format::{format_text, OutputFormat};
use super::queue::MessageQueue;
use super::shutdown::{
    CompletionGuard, FatalHandler, ShutdownCoordinator, ShutdownReason, FATAL_EXIT_CODE,
};
use super::sink::Sink;
use super::timestamp::TimestampFormat;
use std::any::Any;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Upper bound on records taken from the queue per lock acquisition
const BATCH_SIZE: usize = 50;

pub(crate) struct Worker {
    pub(crate) queue: Arc<MessageQueue<LogEntry>>,
    pub(crate) sink: Box<dyn Sink>,
    pub(crate) threshold: LogLevel,
    pub(crate) format: OutputFormat,
    pub(crate) timestamp_format: TimestampFormat,
    pub(crate) metrics: Arc<LoggerMetrics>,
    pub(crate) shutdown: Arc<ShutdownCoordinator>,
    pub(crate) on_fatal: FatalHandler,
    /// Last-resort output when the sink rejects a failure report (stdout)
    pub(crate) fallback: Box<dyn Write + Send>,
    // Declared last so waiters are released only after `Drop` has run.
    pub(crate) completion: CompletionGuard,
}

impl Worker {
    pub(crate) fn run(mut self) {
        let mut batch = Vec::with_capacity(BATCH_SIZE);
        let mut fatal_seen = false;

        while self.queue.pop_batch(BATCH_SIZE, &mut batch) {
            for entry in batch.drain(..) {
                self.process(&entry);

                if entry.is_fatal() && !fatal_seen {
                    // Stop admissions; whatever is already queued still gets drained.
                    fatal_seen = true;
                    self.queue.close();
                    self.shutdown.begin_drain(ShutdownReason::Fatal);
                }
            }
            self.flush_sink();
        }

        self.shutdown.finish();

        if fatal_seen {
            (self.on_fatal)(FATAL_EXIT_CODE);
        }
    }

    /// Filter, format and write a single record
    fn process(&mut self, entry: &LogEntry) {
        if entry.level < self.threshold {
            self.metrics.record_filtered();
            return;
        }

        let result = self
            .format
            .format(entry, &self.timestamp_format)
            .and_then(|line| self.write_line(line.as_bytes()));

        match result {
            Ok(()) => {
                self.metrics.record_written();
            }
            Err(err) => self.report_failure(&err),
        }
    }

    /// Write a synthetic ERROR record describing `err`, falling back to stdout.
    ///
    /// The report bypasses the threshold.
    fn report_failure(&mut self, err: &LoggerError) {
        self.metrics.record_failed();

        let report = LogEntry::new(LogLevel::Error, format!("Logger error: {}", err));
        let line = self
            .format
            .format(&report, &self.timestamp_format)
            .unwrap_or_else(|_| format_text(&report, &self.timestamp_format));

        if let Err(write_err) = self.write_line(line.as_bytes()) {
            self.metrics.record_fallback_failed();
            // Ignored: nothing is left to report to.
            let _ = writeln!(self.fallback, "Error writing to log writer: {}", write_err);
            let _ = self.fallback.flush();
        }
    }

    fn write_line(&mut self, line: &[u8]) -> Result<()> {
        let sink = &mut self.sink;
        match panic::catch_unwind(AssertUnwindSafe(|| sink.write(line))) {
            Ok(result) => result,
            Err(panic_info) => {
                let message = panic_message(panic_info.as_ref());
                eprintln!(
                    "[LOGGER CRITICAL] Sink '{}' panicked: {}. The worker keeps running.",
                    self.sink.name(),
                    message
                );
                Err(LoggerError::sink_panicked(self.sink.name(), message))
            }
        }
    }

    fn flush_sink(&mut self) {
        let sink = &mut self.sink;
        let result = match panic::catch_unwind(AssertUnwindSafe(|| sink.flush())) {
            Ok(result) => result,
            Err(panic_info) => Err(LoggerError::sink_panicked(
                self.sink.name(),
                panic_message(panic_info.as_ref()),
            )),
        };

        if let Err(err) = result {
            self.report_failure(&err);
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        // Reached on unwind too: never leave producers blocked on a dead consumer.
        self.queue.close();
        self.shutdown.finish();
    }
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

//! Adapter turning any `io::Write` into a sink

use crate::core::{LoggerError, Result, Sink};
use std::io::Write;

/// Sink over an arbitrary writer: a pipe, a socket, a `Vec<u8>`, ...
///
/// # Example
///
/// ```
/// use queued_logger::prelude::*;
///
/// let sink = WriterSink::new(std::io::stderr()).with_name("stderr");
/// let logger = Logger::new(LogLevel::Warning, sink, OutputFormat::Text)?;
/// logger.warning("disk almost full")?;
/// logger.close()?;
/// # Ok::<(), queued_logger::LoggerError>(())
/// ```
pub struct WriterSink<W: Write + Send> {
    writer: W,
    name: String,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            name: "writer".to_string(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write(&mut self, line: &[u8]) -> Result<()> {
        self.writer
            .write_all(line)
            .map_err(|e| LoggerError::sink_write(self.name.clone(), e))
    }

    fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| LoggerError::sink_write(self.name.clone(), e))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

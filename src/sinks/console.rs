//! Console sink implementation

use crate::core::{LoggerError, Result, Sink};
use std::io::{self, Write};

/// Writes lines to standard output
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }

    fn stdout_error(&self, e: io::Error) -> LoggerError {
        LoggerError::sink_write(self.name(), e)
    }
}

impl Sink for ConsoleSink {
    fn write(&mut self, line: &[u8]) -> Result<()> {
        io::stdout()
            .lock()
            .write_all(line)
            .map_err(|e| self.stdout_error(e))
    }

    fn flush(&mut self) -> Result<()> {
        io::stdout()
            .flush()
            .map_err(|e| self.stdout_error(e))
    }

    fn name(&self) -> &str {
        "console"
    }
}

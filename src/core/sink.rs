//! Sink trait for log output destinations

use super::error::Result;

/// An append-only byte destination.
///
/// Only the logger's worker thread ever calls into a sink, so implementations
/// need no internal locking of their own.
pub trait Sink: Send {
    /// Append one complete, newline-terminated line
    fn write(&mut self, line: &[u8]) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn write(&mut self, line: &[u8]) -> Result<()> {
        (**self).write(line)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

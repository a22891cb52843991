//! Network sink for remote logging
//!
//! Sends lines to a remote server over TCP.

use crate::core::{LoggerError, Result, Sink};
use std::io::Write;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

const IO_TIMEOUT: Duration = Duration::from_secs(5);

/// Sink that streams lines to a TCP server
///
/// # Example
///
/// ```no_run
/// use queued_logger::prelude::*;
/// use queued_logger::sinks::NetworkSink;
///
/// let sink = NetworkSink::new("127.0.0.1:8080")?;
/// let logger = Logger::new(LogLevel::Info, sink, OutputFormat::Json)?;
/// logger.info("This line will be sent to 127.0.0.1:8080")?;
/// logger.close()?;
/// # Ok::<(), queued_logger::LoggerError>(())
/// ```
pub struct NetworkSink {
    stream: Option<TcpStream>,
    address: String,
    reconnect_on_error: bool,
}

impl NetworkSink {
    /// Connect to `addr` (e.g. "localhost:8080")
    pub fn new(addr: impl ToSocketAddrs + ToString) -> Result<Self> {
        let address = addr.to_string();
        let stream = Self::connect(&address)?;

        Ok(Self {
            stream: Some(stream),
            address,
            reconnect_on_error: true,
        })
    }

    /// Enable or disable a single reconnect-and-resend attempt after a failed write
    ///
    /// Default: enabled
    #[must_use]
    pub fn with_reconnect(mut self, enable: bool) -> Self {
        self.reconnect_on_error = enable;
        self
    }

    fn connect(address: &str) -> Result<TcpStream> {
        let stream = TcpStream::connect(address)?;
        stream.set_write_timeout(Some(IO_TIMEOUT))?;
        stream.set_read_timeout(Some(IO_TIMEOUT))?;
        // Enable TCP_NODELAY for low-latency logging
        stream.set_nodelay(true)?;
        Ok(stream)
    }
}

impl Sink for NetworkSink {
    fn write(&mut self, line: &[u8]) -> Result<()> {
        let result = match self.stream {
            Some(ref mut stream) => stream.write_all(line),
            None => return Err(LoggerError::other("network stream not connected")),
        };

        let err = match result {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };

        // Connection lost
        self.stream = None;
        if !self.reconnect_on_error {
            return Err(LoggerError::sink_write(self.address.clone(), err));
        }

        match Self::connect(&self.address) {
            Ok(mut stream) => {
                let resent = stream.write_all(line);
                self.stream = Some(stream);
                resent.map_err(|e| LoggerError::sink_write(self.address.clone(), e))
            }
            Err(reconnect_err) => Err(LoggerError::other(format!(
                "failed to send log line to {} and reconnect: {} (reconnect: {})",
                self.address, err, reconnect_err
            ))),
        }
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut stream) = self.stream {
            stream.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.address
    }
}

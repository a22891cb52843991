//! Error types for the logger

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Writing a formatted line to the sink failed
    #[error("error writing log message to '{sink}': {source}")]
    SinkWrite {
        sink: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed
    #[error("error formatting log message as JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A record was submitted after the logger reached its terminal state
    #[error("Logger already stopped")]
    LoggerStopped,

    /// `close` was called more than once
    #[error("Logger already closed")]
    AlreadyClosed,

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// A sink panicked while handling a line
    #[error("Sink '{sink}' panicked: {message}")]
    SinkPanicked { sink: String, message: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create a sink write error naming the failing sink
    pub fn sink_write(sink: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::SinkWrite {
            sink: sink.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn sink_panicked(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::SinkPanicked {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }

    /// Whether this error is a caller contract violation rather than a runtime failure
    pub fn is_precondition_violation(&self) -> bool {
        matches!(self, LoggerError::LoggerStopped | LoggerError::AlreadyClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = LoggerError::sink_write("file", io_err);
        assert!(matches!(err, LoggerError::SinkWrite { .. }));

        let err = LoggerError::config("MessageQueue", "capacity must be greater than zero");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::sink_write("file", io_err);
        assert_eq!(
            err.to_string(),
            "error writing log message to 'file': access denied"
        );

        let err = LoggerError::config("MessageQueue", "capacity must be greater than zero");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for MessageQueue: capacity must be greater than zero"
        );

        assert_eq!(LoggerError::LoggerStopped.to_string(), "Logger already stopped");
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_err = serde_json::from_str::<u8>("not json").unwrap_err();
        let err: LoggerError = json_err.into();
        assert!(matches!(err, LoggerError::Serialization(_)));
        assert!(err.to_string().starts_with("error formatting log message as JSON"));
    }

    #[test]
    fn test_precondition_violations() {
        assert!(LoggerError::LoggerStopped.is_precondition_violation());
        assert!(LoggerError::AlreadyClosed.is_precondition_violation());
        assert!(!LoggerError::other("boom").is_precondition_violation());
    }
}

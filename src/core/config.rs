//! Logger configuration
//!
//! Plain data, serializable so applications can embed it in their own settings
//! files. The logger itself never reads configuration from anywhere.

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::output_format::OutputFormat;
use super::overflow_policy::OverflowPolicy;
use super::queue::DEFAULT_CAPACITY;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Minimum level a record must reach to be written
    pub threshold: LogLevel,
    pub format: OutputFormat,
    /// Maximum number of records waiting for the worker
    pub capacity: usize,
    pub overflow_policy: OverflowPolicy,
    /// Timestamp layout for text lines; JSON lines always use full RFC 3339
    pub timestamp_format: TimestampFormat,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            threshold: LogLevel::Info,
            format: OutputFormat::Text,
            capacity: DEFAULT_CAPACITY,
            overflow_policy: OverflowPolicy::Block,
            timestamp_format: TimestampFormat::Rfc3339,
        }
    }
}

impl LoggerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(LoggerError::config(
                "LoggerConfig",
                "capacity must be greater than zero",
            ));
        }
        if !self.timestamp_format.is_valid() {
            return Err(LoggerError::config(
                "LoggerConfig",
                format!("invalid timestamp format {:?}", self.timestamp_format),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::default();
        assert_eq!(config.capacity, 100);
        assert_eq!(config.threshold, LogLevel::Info);
        assert_eq!(config.overflow_policy, OverflowPolicy::Block);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let config = LoggerConfig {
            capacity: 0,
            ..LoggerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_timestamp_pattern() {
        for pattern in ["", "%Q"] {
            let config = LoggerConfig {
                timestamp_format: TimestampFormat::Custom(pattern.to_string()),
                ..LoggerConfig::default()
            };
            assert!(config.validate().is_err(), "pattern {:?} accepted", pattern);
        }
    }

    #[test]
    fn test_deserialize_partial() {
        let config: LoggerConfig =
            serde_json::from_str(r#"{"threshold":0,"format":"json"}"#).unwrap();
        assert_eq!(config.threshold, LogLevel::Debug);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.capacity, 100);
    }
}

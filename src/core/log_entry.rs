//! Log entry structure

use super::error::Result;
use super::log_level::LogLevel;
use super::timestamp::rfc3339;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single immutable log record.
///
/// Serializes to the JSON line layout `{"level":<int>,"msg":"..","time":".."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    #[serde(rename = "msg")]
    pub message: String,
    #[serde(rename = "time", with = "rfc3339")]
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    /// Build a record stamped with the current time
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self::with_timestamp(level, message, Utc::now())
    }

    pub fn with_timestamp(
        level: LogLevel,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp,
        }
    }

    /// Parse a JSON line produced by [`OutputFormat::Json`](super::OutputFormat::Json)
    pub fn from_json_line(line: &str) -> Result<Self> {
        Ok(serde_json::from_str(line.trim_end_matches('\n'))?)
    }

    #[inline]
    pub fn is_fatal(&self) -> bool {
        self.level == LogLevel::Fatal
    }
}

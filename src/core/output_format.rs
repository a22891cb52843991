//! Output format configuration for log entries
//!
//! Two line layouts are supported:
//! - Json: `{"level":1,"msg":"Request processed","time":"2025-01-08T10:30:45.123Z"}`
//! - Text: `2025-01-08T10:30:45Z [INFO] Request processed`
//!
//! Formatting is pure: it reads the entry and nothing else.

use super::error::Result;
use super::log_entry::LogEntry;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output format for log entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One compact JSON object per line
    Json,

    /// Human-readable text (default)
    #[default]
    Text,
}

impl OutputFormat {
    /// Format a log entry as a complete, newline-terminated line
    pub fn format(&self, entry: &LogEntry, timestamp_format: &TimestampFormat) -> Result<String> {
        match self {
            OutputFormat::Json => format_json(entry),
            OutputFormat::Text => Ok(format_text(entry, timestamp_format)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "text",
        }
    }
}

/// Encode an entry as a compact JSON object followed by `\n`
pub fn format_json(entry: &LogEntry) -> Result<String> {
    let mut line = serde_json::to_string(entry)?;
    line.push('\n');
    Ok(line)
}

/// Render an entry as `<timestamp> [<LEVEL>] <message>\n`
pub fn format_text(entry: &LogEntry, timestamp_format: &TimestampFormat) -> String {
    format!(
        "{} [{}] {}\n",
        timestamp_format.format(&entry.timestamp),
        entry.level.to_str(),
        entry.message
    )
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" | "plain" => Ok(OutputFormat::Text),
            _ => Err(format!("Invalid output format: '{}'", s)),
        }
    }
}

//! Timestamp formatting utilities
//!
//! Text lines default to RFC 3339 with second precision. JSON lines always carry
//! a full-precision RFC 3339 timestamp so that a parsed line equals the record
//! it came from.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Timestamp format used by the text formatter
///
/// # Examples
///
/// ```
/// use queued_logger::core::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let ts = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(TimestampFormat::Rfc3339.format(&ts), "2025-01-08T10:30:45Z");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// RFC 3339 with seconds: `2025-01-08T10:30:45Z`
    #[default]
    Rfc3339,

    /// RFC 3339 with milliseconds: `2025-01-08T10:30:45.123Z`
    Rfc3339Millis,

    /// RFC 3339 with microseconds: `2025-01-08T10:30:45.123456Z`
    Rfc3339Micros,

    /// RFC 3339 with nanoseconds: `2025-01-08T10:30:45.123456789Z`
    Rfc3339Nanos,

    /// Custom strftime format
    ///
    /// ```
    /// use queued_logger::core::TimestampFormat;
    ///
    /// let format = TimestampFormat::Custom("%d/%b/%Y:%H:%M:%S %z".to_string());
    /// ```
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Rfc3339 => datetime.to_rfc3339_opts(SecondsFormat::Secs, true),
            TimestampFormat::Rfc3339Millis => {
                datetime.to_rfc3339_opts(SecondsFormat::Millis, true)
            }
            TimestampFormat::Rfc3339Micros => {
                datetime.to_rfc3339_opts(SecondsFormat::Micros, true)
            }
            TimestampFormat::Rfc3339Nanos => datetime.to_rfc3339_opts(SecondsFormat::Nanos, true),
            TimestampFormat::Custom(format_str) => {
                let mut out = String::new();
                // Invalid patterns fall back to RFC 3339 instead of panicking
                if write!(out, "{}", datetime.format(format_str)).is_err() {
                    return datetime.to_rfc3339_opts(SecondsFormat::Secs, true);
                }
                out
            }
        }
    }

    /// Whether a custom pattern contains only recognized strftime items
    pub fn is_valid(&self) -> bool {
        match self {
            TimestampFormat::Custom(pattern) => {
                !pattern.is_empty()
                    && !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
            }
            _ => true,
        }
    }

    /// Get a description of this format
    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            TimestampFormat::Rfc3339 => "RFC 3339 with seconds (2025-01-08T10:30:45Z)",
            TimestampFormat::Rfc3339Millis => "RFC 3339 with milliseconds (2025-01-08T10:30:45.123Z)",
            TimestampFormat::Rfc3339Micros => {
                "RFC 3339 with microseconds (2025-01-08T10:30:45.123456Z)"
            }
            TimestampFormat::Rfc3339Nanos => {
                "RFC 3339 with nanoseconds (2025-01-08T10:30:45.123456789Z)"
            }
            TimestampFormat::Custom(_) => "Custom strftime format",
        }
    }
}

/// Serde adapter writing `DateTime<Utc>` as full-precision RFC 3339 and
/// accepting any RFC 3339 offset on the way back in.
pub mod rfc3339 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(de::Error::custom)
    }
}

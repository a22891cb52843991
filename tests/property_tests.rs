//! Property-based tests for queued_logger using proptest

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use queued_logger::prelude::*;
use queued_logger::{core::format_json, core::format_text, level_name};

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warning),
        Just(LogLevel::Error),
        Just(LogLevel::Fatal),
    ]
}

fn any_entry() -> impl Strategy<Value = LogEntry> {
    // Seconds up to 2100-01-01, any nanosecond
    (any_level(), ".*", 0i64..4_102_444_800i64, 0u32..1_000_000_000u32).prop_map(
        |(level, message, secs, nanos)| {
            let ts = Utc.timestamp_opt(secs, nanos).unwrap();
            LogEntry::with_timestamp(level, message, ts)
        },
    )
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Test that LogLevel string conversions roundtrip correctly
    #[test]
    fn test_log_level_str_roundtrip(level in any_level()) {
        let parsed: LogLevel = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Test that LogLevel ordering follows the ordinals
    #[test]
    fn test_log_level_ordering(level1 in any_level(), level2 in any_level()) {
        let val1 = level1.ordinal();
        let val2 = level2.ordinal();

        prop_assert_eq!(level1 <= level2, val1 <= val2);
        prop_assert_eq!(level1 < level2, val1 < val2);
    }

    /// Unrecognized ordinals render as UNKNOWN, recognized ones never do
    #[test]
    fn test_level_name_total(ordinal in any::<u8>()) {
        let name = level_name(ordinal);
        if ordinal <= 4 {
            prop_assert_eq!(name, LogLevel::from_ordinal(ordinal).unwrap().to_str());
        } else {
            prop_assert_eq!(name, "UNKNOWN");
        }
    }
}

// ============================================================================
// Formatter Tests
// ============================================================================

proptest! {
    /// parse(format_json(record)) == record
    #[test]
    fn test_json_round_trip(entry in any_entry()) {
        let line = format_json(&entry).unwrap();
        prop_assert!(line.ends_with('\n'));
        prop_assert_eq!(line.matches('\n').count(), 1);

        let parsed = LogEntry::from_json_line(&line).unwrap();
        prop_assert_eq!(parsed, entry);
    }

    /// JSON lines keep the wire layout level, msg, time
    #[test]
    fn test_json_field_order(entry in any_entry()) {
        let line = format_json(&entry).unwrap();
        let expected_prefix = format!("{{\"level\":{},\"msg\":", entry.level.ordinal());
        prop_assert!(line.starts_with(&expected_prefix));
        prop_assert!(line.ends_with("Z\"}\n"), "line does not end with Z\"}}\\n: {:?}", line);
    }

    /// Text lines are `<ts> [<LEVEL>] <message>\n`
    #[test]
    fn test_text_layout(entry in any_entry()) {
        let line = format_text(&entry, &TimestampFormat::Rfc3339);
        let expected = format!(
            "{} [{}] {}\n",
            entry.timestamp.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            entry.level,
            entry.message
        );
        prop_assert_eq!(line, expected);
    }
}

// ============================================================================
// Threshold Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// A record produces exactly one line iff its level reaches the threshold
    #[test]
    fn test_threshold_emits_zero_or_one_line(
        threshold in any_level(),
        level in any_level().prop_filter("fatal terminates", |l| *l != LogLevel::Fatal),
        message in "[a-zA-Z0-9 ]{0,32}",
    ) {
        let sink = MemorySink::new();
        let logger = Logger::new(threshold, sink.clone(), OutputFormat::Text).unwrap();
        logger.log(level, message.clone()).unwrap();
        logger.close().unwrap();

        let lines = sink.lines();
        if level >= threshold {
            prop_assert_eq!(lines.len(), 1);
            let expected_suffix = format!("[{}] {}", level, message);
            prop_assert!(lines[0].ends_with(&expected_suffix));
        } else {
            prop_assert!(lines.is_empty());
        }
    }
}

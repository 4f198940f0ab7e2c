// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Splits catalog and access-log lines into fixed-arity fields.

use thiserror::Error;

/// Delimiters separating the fields of catalog and log lines.
const FIELD_DELIMITERS: &[char] = &[' ', '\t', '\n', '\r'];

/// Number of fields read from a catalog line: `<result-code> <type-name>`.
pub(crate) const CATALOG_FIELDS: usize = 2;

/// Number of leading fields read from an access-log line. Anything after them is ignored.
const LOG_FIELDS: usize = 5;

// Positions within a log line.
const ELAPSED_FIELD: usize = 1;
const RESULT_FIELD: usize = 3;
const SIZE_FIELD: usize = 4;

/// Result type for log-line classification.
pub type RecordResult<T> = std::result::Result<T, RecordError>;

/// Per-line failures. The offending line is skipped and ingestion goes on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Expected 5 fields, found {found}")]
    FieldCount { found: usize },
    #[error("Missing result code before '/'")]
    MissingResultCode,
}

/// A classified access-log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogRecord<'a> {
    pub code: &'a str,
    pub elapsed_ms: u64,
    pub size: u64,
}

/// Split `line` into at most `max` non-empty fields.
///
/// Stops at `max`; the rest of the line is not examined. The caller compares the
/// returned length against the arity it requires.
#[must_use]
pub(crate) fn tokenize(line: &str, max: usize) -> Vec<&str> {
    line.split(FIELD_DELIMITERS)
        .filter(|field| !field.is_empty())
        .take(max)
        .collect()
}

/// Split a catalog line into `(code, type_name)`.
///
/// Returns the number of fields found when the line does not hold two.
pub(crate) fn classify_catalog_line(line: &str) -> std::result::Result<(&str, &str), usize> {
    match tokenize(line, CATALOG_FIELDS).as_slice() {
        [code, type_name] => Ok((*code, *type_name)),
        fields => Err(fields.len()),
    }
}

/// Classify one access-log line.
///
/// # Errors
/// Returns an error if the line has fewer than five fields or the result field
/// has nothing before its first `/`.
pub fn classify_log_line(line: &str) -> RecordResult<LogRecord<'_>> {
    let fields = tokenize(line, LOG_FIELDS);
    if fields.len() != LOG_FIELDS {
        return Err(RecordError::FieldCount {
            found: fields.len(),
        });
    }

    // "TCP_HIT/200": only the part before the status is kept.
    let code = fields[RESULT_FIELD]
        .split('/')
        .next()
        .filter(|code| !code.is_empty())
        .ok_or(RecordError::MissingResultCode)?;

    Ok(LogRecord {
        code,
        elapsed_ms: parse_number(fields[ELAPSED_FIELD]),
        size: parse_number(fields[SIZE_FIELD]),
    })
}

/// Best-effort conversion of the leading digits of `field`.
///
/// A field without leading digits (including a negative number) yields zero.
/// Values beyond `u64::MAX` saturate.
#[must_use]
fn parse_number(field: &str) -> u64 {
    let digits = field.strip_prefix('+').unwrap_or(field);
    digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(10)
                .saturating_add(u64::from(digit - b'0'))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_collapses_delimiters() {
        assert_eq!(tokenize("  a \t b\n", 5), vec!["a", "b"]);
    }

    #[test]
    fn test_tokenize_stops_at_max() {
        assert_eq!(tokenize("a b c d", 2), vec!["a", "b"]);
    }

    #[test]
    fn test_tokenize_empty_line() {
        assert!(tokenize("", 2).is_empty());
        assert!(tokenize(" \t\n", 2).is_empty());
    }

    #[test]
    fn test_catalog_line() {
        let expected = Ok(("TCP_HIT", "HIT"));
        assert_eq!(classify_catalog_line("TCP_HIT HIT\n"), expected);
        assert_eq!(classify_catalog_line("TCP_HIT\tHIT"), expected);
    }

    #[test]
    fn test_catalog_line_extra_fields_ignored() {
        assert_eq!(
            classify_catalog_line("TCP_HIT HIT trailing words"),
            Ok(("TCP_HIT", "HIT"))
        );
    }

    #[test]
    fn test_catalog_line_too_short() {
        assert_eq!(classify_catalog_line("TCP_HIT"), Err(1));
        assert_eq!(classify_catalog_line("\n"), Err(0));
    }

    #[test]
    fn test_log_line() {
        let record = classify_log_line("- 100 - TCP_HIT/200 500").unwrap();
        assert_eq!(
            record,
            LogRecord {
                code: "TCP_HIT",
                elapsed_ms: 100,
                size: 500,
            }
        );
    }

    #[test]
    fn test_native_squid_log_line() {
        let line = concat!(
            "1226591283.124    265 10.0.0.1 TCP_MISS/200 4851 ",
            "GET http://example.com/ - DIRECT/1.2.3.4 text/html"
        );
        let record = classify_log_line(line).unwrap();
        assert_eq!(record.code, "TCP_MISS");
        assert_eq!(record.elapsed_ms, 265);
        assert_eq!(record.size, 4851);
    }

    #[test]
    fn test_log_line_without_status() {
        let record = classify_log_line("- 1 - NONE 0").unwrap();
        assert_eq!(record.code, "NONE");
    }

    #[test]
    fn test_log_line_too_few_fields() {
        assert_eq!(
            classify_log_line("- 100 - TCP_HIT/200"),
            Err(RecordError::FieldCount { found: 4 })
        );
        assert_eq!(
            classify_log_line(""),
            Err(RecordError::FieldCount { found: 0 })
        );
    }

    #[test]
    fn test_log_line_missing_result_code() {
        assert_eq!(
            classify_log_line("- 100 - /200 500"),
            Err(RecordError::MissingResultCode)
        );
    }

    #[test]
    fn test_non_numeric_fields_are_zero() {
        let record = classify_log_line("- abc - TCP_HIT/200 -").unwrap();
        assert_eq!(record.elapsed_ms, 0);
        assert_eq!(record.size, 0);
    }

    #[test]
    fn test_parse_number_leading_digits() {
        assert_eq!(parse_number("12abc"), 12);
        assert_eq!(parse_number("+7"), 7);
        assert_eq!(parse_number("-5"), 0);
        assert_eq!(parse_number("99999999999999999999999"), u64::MAX);
    }
}

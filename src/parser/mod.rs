//! JSONL transcript parsing.
//!
//! One JSON object per line:
//!
//! ```json
//! {"id":"req-1","role":"user","text":"hello","timestamp":"2026-01-05T10:00:00Z"}
//! ```
//!
//! Parse errors are non-fatal: callers log and skip the line.

use crate::model::{ChatEntry, ParseError, RequestId, Role};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Parse a single transcript line.
///
/// `line_number` is 1-based and only used for error reporting.
pub fn parse_entry(line: &str, line_number: usize) -> Result<ChatEntry, ParseError> {
    let value: Value = serde_json::from_str(line).map_err(|e| ParseError::InvalidJson {
        line: line_number,
        message: e.to_string(),
    })?;

    let id_raw = require_str(&value, "id", line_number)?;
    let id = RequestId::new(id_raw).map_err(|_| ParseError::EmptyId { line: line_number })?;

    let role_raw = require_str(&value, "role", line_number)?;
    let role = Role::parse(role_raw).ok_or_else(|| ParseError::InvalidRole {
        line: line_number,
        raw: role_raw.to_string(),
    })?;

    let text = require_str(&value, "text", line_number)?.to_string();

    let timestamp_raw = require_str(&value, "timestamp", line_number)?;
    let timestamp: DateTime<Utc> =
        timestamp_raw
            .parse()
            .map_err(|_| ParseError::InvalidTimestamp {
                line: line_number,
                raw: timestamp_raw.to_string(),
            })?;

    Ok(ChatEntry::new(id, role, text, timestamp))
}

/// Parse a batch of lines, collecting entries and errors separately.
///
/// `starting_line_number` is the 1-based number of the first line.
pub fn parse_lines(
    lines: impl IntoIterator<Item = String>,
    starting_line_number: usize,
) -> (Vec<ChatEntry>, Vec<ParseError>) {
    let mut entries = Vec::new();
    let mut errors = Vec::new();

    for (index, line) in lines.into_iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_entry(&line, starting_line_number + index) {
            Ok(entry) => entries.push(entry),
            Err(err) => errors.push(err),
        }
    }

    (entries, errors)
}

fn require_str<'a>(
    value: &'a Value,
    field: &'static str,
    line: usize,
) -> Result<&'a str, ParseError> {
    value
        .get(field)
        .and_then(Value::as_str)
        .ok_or(ParseError::MissingField { line, field })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str =
        r#"{"id":"req-1","role":"user","text":"hello","timestamp":"2026-01-05T10:00:00Z"}"#;

    #[test]
    fn parses_valid_user_entry() {
        let entry = parse_entry(VALID, 1).unwrap();
        assert_eq!(entry.id().as_str(), "req-1");
        assert_eq!(entry.role(), Role::User);
        assert_eq!(entry.text(), "hello");
    }

    #[test]
    fn parses_assistant_role() {
        let line = r#"{"id":"resp-1","role":"assistant","text":"hi","timestamp":"2026-01-05T10:00:01Z"}"#;
        let entry = parse_entry(line, 1).unwrap();
        assert_eq!(entry.role(), Role::Assistant);
    }

    #[test]
    fn malformed_json_reports_line_number() {
        let err = parse_entry(r#"{"id":"req-1","#, 42).unwrap_err();
        match err {
            ParseError::InvalidJson { line, .. } => assert_eq!(line, 42),
            other => panic!("expected InvalidJson, got {other:?}"),
        }
    }

    #[test]
    fn missing_field_names_the_field() {
        let line = r#"{"id":"req-1","role":"user","timestamp":"2026-01-05T10:00:00Z"}"#;
        let err = parse_entry(line, 7).unwrap_err();
        match err {
            ParseError::MissingField { line, field } => {
                assert_eq!(line, 7);
                assert_eq!(field, "text");
            }
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn non_string_field_counts_as_missing() {
        let line = r#"{"id":17,"role":"user","text":"x","timestamp":"2026-01-05T10:00:00Z"}"#;
        let err = parse_entry(line, 1).unwrap_err();
        assert!(matches!(err, ParseError::MissingField { field: "id", .. }));
    }

    #[test]
    fn unknown_role_is_rejected_with_raw_value() {
        let line = r#"{"id":"x","role":"system","text":"x","timestamp":"2026-01-05T10:00:00Z"}"#;
        let err = parse_entry(line, 3).unwrap_err();
        match err {
            ParseError::InvalidRole { line, raw } => {
                assert_eq!(line, 3);
                assert_eq!(raw, "system");
            }
            other => panic!("expected InvalidRole, got {other:?}"),
        }
    }

    #[test]
    fn bad_timestamp_is_rejected_with_raw_value() {
        let line = r#"{"id":"x","role":"user","text":"x","timestamp":"not-a-date"}"#;
        let err = parse_entry(line, 9).unwrap_err();
        match err {
            ParseError::InvalidTimestamp { line, raw } => {
                assert_eq!(line, 9);
                assert_eq!(raw, "not-a-date");
            }
            other => panic!("expected InvalidTimestamp, got {other:?}"),
        }
    }

    #[test]
    fn empty_id_is_rejected() {
        let line = r#"{"id":"","role":"user","text":"x","timestamp":"2026-01-05T10:00:00Z"}"#;
        let err = parse_entry(line, 5).unwrap_err();
        assert!(matches!(err, ParseError::EmptyId { line: 5 }));
    }

    #[test]
    fn parse_lines_continues_after_errors() {
        let lines = vec![
            VALID.to_string(),
            "{broken".to_string(),
            r#"{"id":"resp-1","role":"assistant","text":"hi","timestamp":"2026-01-05T10:00:01Z"}"#
                .to_string(),
        ];
        let (entries, errors) = parse_lines(lines, 1);
        assert_eq!(entries.len(), 2);
        assert_eq!(errors.len(), 1);
        match &errors[0] {
            ParseError::InvalidJson { line, .. } => assert_eq!(*line, 2),
            other => panic!("expected InvalidJson, got {other:?}"),
        }
    }

    #[test]
    fn parse_lines_skips_blank_lines() {
        let lines = vec![String::new(), "  ".to_string(), VALID.to_string()];
        let (entries, errors) = parse_lines(lines, 1);
        assert_eq!(entries.len(), 1);
        assert!(errors.is_empty());
    }

    #[test]
    fn parse_lines_preserves_line_numbering() {
        let lines = vec!["{bad1".to_string(), "{bad2".to_string()];
        let (_, errors) = parse_lines(lines, 100);
        assert_eq!(errors.len(), 2);
        let nums: Vec<_> = errors
            .iter()
            .map(|e| match e {
                ParseError::InvalidJson { line, .. } => *line,
                other => panic!("expected InvalidJson, got {other:?}"),
            })
            .collect();
        assert_eq!(nums, vec![100, 101]);
    }
}

//! Error types for the viewer.
//!
//! Structured `thiserror` taxonomy. Parse errors are non-fatal: malformed
//! transcript lines are logged and skipped so the viewer keeps working with
//! partial data. Input errors are fatal and propagate to the top-level
//! handler.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
///
/// Domain errors convert via `From`, so `?` composes cleanly all the way up
/// to `main`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read the transcript from file or stdin. Fatal.
    #[error("Failed to read input: {0}")]
    InputRead(#[from] InputError),

    /// Failed to parse a transcript line. Non-fatal at the call site; only
    /// wrapped here when a caller chooses to escalate.
    #[error("Failed to parse transcript entry: {0}")]
    Parse(#[from] ParseError),
}

/// Errors reading transcript input.
#[derive(Debug, Error)]
pub enum InputError {
    /// The transcript file does not exist at the given path.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path the user supplied.
        path: PathBuf,
    },

    /// Invoked without a file argument and stdin is an interactive terminal.
    #[error("No input source: provide a transcript path or pipe data to stdin")]
    NoInput,

    /// Any other I/O failure while reading input.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors parsing JSONL transcript lines.
///
/// Every variant carries the 1-based line number so users can jump straight
/// to the offending line.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The line is not valid JSON.
    #[error("Invalid JSON at line {line}: {message}")]
    InvalidJson {
        /// 1-based line number in the transcript.
        line: usize,
        /// The JSON parser's own message.
        message: String,
    },

    /// The JSON object lacks a required field.
    #[error("Missing required field '{field}' at line {line}")]
    MissingField {
        /// 1-based line number in the transcript.
        line: usize,
        /// Name of the missing field ("id", "role", "text", "timestamp").
        field: &'static str,
    },

    /// The "role" field holds something other than "user" or "assistant".
    #[error("Invalid role '{raw}' at line {line}")]
    InvalidRole {
        /// 1-based line number in the transcript.
        line: usize,
        /// The raw role value, preserved for diagnostics.
        raw: String,
    },

    /// The "timestamp" field does not parse as RFC 3339.
    #[error("Invalid timestamp '{raw}' at line {line}")]
    InvalidTimestamp {
        /// 1-based line number in the transcript.
        line: usize,
        /// The raw timestamp value, preserved for diagnostics.
        raw: String,
    },

    /// The "id" field is present but empty.
    #[error("Empty request id at line {line}")]
    EmptyId {
        /// 1-based line number in the transcript.
        line: usize,
    },
}

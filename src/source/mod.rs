//! Transcript input sources.
//!
//! Read-once loading from either a file path or piped stdin. Running
//! interactively with no file argument is a usage error
//! ([`InputError::NoInput`]).

use crate::model::InputError;
use std::io::{BufRead, IsTerminal};
use std::path::PathBuf;

/// Where the transcript comes from.
#[derive(Debug)]
pub enum InputSource {
    /// A transcript file supplied on the command line.
    File(PathBuf),
    /// Piped stdin.
    Stdin,
}

impl InputSource {
    /// Read all transcript lines from the source.
    pub fn read_lines(&self) -> Result<Vec<String>, InputError> {
        match self {
            InputSource::File(path) => {
                let contents = std::fs::read_to_string(path)?;
                Ok(contents.lines().map(str::to_string).collect())
            }
            InputSource::Stdin => {
                let stdin = std::io::stdin();
                let mut lines = Vec::new();
                for line in stdin.lock().lines() {
                    lines.push(line?);
                }
                Ok(lines)
            }
        }
    }
}

/// Detect the input source from an optional CLI file argument.
///
/// A provided path must exist. Without a path, stdin must be a pipe.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) => {
            if !path.exists() {
                return Err(InputError::FileNotFound { path });
            }
            Ok(InputSource::File(path))
        }
        None => {
            if std::io::stdin().is_terminal() {
                return Err(InputError::NoInput);
            }
            Ok(InputSource::Stdin)
        }
    }
}

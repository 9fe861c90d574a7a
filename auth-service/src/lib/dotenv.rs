//! Reader for `.env` style key-value files.
//!
//! Each line is scanned by a small state machine:
//!
//! ```text
//! Key --(spaces)--> Assign --'='--> Value --> Trailing
//! ```
//!
//! Spaces between tokens are skipped and `#` starts a comment. Keys are
//! `[A-Za-z_][A-Za-z0-9_]*`. Values are either double-quoted (taken
//! verbatim) or run up to a comment with trailing spaces trimmed.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

/// Why a single line could not be scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("invalid key")]
    InvalidKey,

    #[error("mismatched quotes")]
    MismatchedQuotes,

    #[error("unexpected characters after value")]
    TrailingCharacters,
}

/// First invalid line of a file, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Error)]
pub enum DotenvError {
    #[error("failed to read env file: {0}")]
    Io(#[from] io::Error),
}

/// Result of scanning a whole file.
///
/// Scanning stops at the first invalid line; `entries` holds everything read
/// before it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFile {
    pub entries: Vec<(String, String)>,
    pub error: Option<ParseError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Key,
    Assign,
    Value,
    Trailing,
}

/// Read and scan an env file.
///
/// # Returns
/// Scanned file, or `None` if it does not exist
///
/// # Errors
/// * `Io` - File exists but could not be read
pub fn load_file(path: &Path) -> Result<Option<EnvFile>, DotenvError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(parse(&contents))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(DotenvError::Io(e)),
    }
}

pub fn parse(contents: &str) -> EnvFile {
    let mut env_file = EnvFile::default();

    for (index, line) in contents.lines().enumerate() {
        match parse_line(line) {
            Ok(Some(entry)) => env_file.entries.push(entry),
            Ok(None) => {}
            Err(kind) => {
                env_file.error = Some(ParseError {
                    line: index + 1,
                    kind,
                });
                break;
            }
        }
    }

    env_file
}

/// Scan one line.
///
/// # Returns
/// Key and value, or `None` for blank and comment-only lines. A key without
/// `=` yields an empty value.
pub fn parse_line(line: &str) -> Result<Option<(String, String)>, ParseErrorKind> {
    let bytes = line.as_bytes();
    let mut state = State::Key;
    let mut cursor = 0;
    let mut key = "";
    let mut value = "";

    loop {
        while cursor < bytes.len() && bytes[cursor] == b' ' {
            cursor += 1;
        }
        if cursor == bytes.len() || bytes[cursor] == b'#' {
            break;
        }

        match state {
            State::Key => {
                if !is_key_start(bytes[cursor]) {
                    return Err(ParseErrorKind::InvalidKey);
                }
                let end = bytes[cursor..]
                    .iter()
                    .position(|&b| !is_key_char(b))
                    .map_or(bytes.len(), |offset| cursor + offset);
                key = &line[cursor..end];
                cursor = end;
                state = State::Assign;
            }
            State::Assign => {
                if bytes[cursor] != b'=' {
                    return Err(ParseErrorKind::InvalidKey);
                }
                cursor += 1;
                state = State::Value;
            }
            State::Value => {
                if bytes[cursor] == b'"' {
                    let start = cursor + 1;
                    let close = line[start..]
                        .find('"')
                        .ok_or(ParseErrorKind::MismatchedQuotes)?;
                    value = &line[start..start + close];
                    cursor = start + close + 1;
                } else {
                    let end = line[cursor..]
                        .find('#')
                        .map_or(line.len(), |offset| cursor + offset);
                    value = line[cursor..end].trim_end_matches(' ');
                    cursor = end;
                }
                state = State::Trailing;
            }
            State::Trailing => return Err(ParseErrorKind::TrailingCharacters),
        }
    }

    if key.is_empty() {
        Ok(None)
    } else {
        Ok(Some((key.to_string(), value.to_string())))
    }
}

fn is_key_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_key_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

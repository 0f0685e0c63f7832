//! Error types

use std::fmt;
use thiserror::Error;

use crate::binder::BindError;
use crate::encoder::EncodeError;

/// Multi-line construct left open at end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    BlockComment,
    QuotedValue,
    ContinuedValue,
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Construct::BlockComment => write!(f, "block comment"),
            Construct::QuotedValue => write!(f, "multi-line quoted value"),
            Construct::ContinuedValue => write!(f, "backslash-continued value"),
        }
    }
}

/// Error raised while scanning properties text.
///
/// Scanning stops at the first error; entries committed before the failing
/// line remain readable on the parser.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("cannot parse empty input")]
    EmptyInput,

    /// No `=` separator, or an empty key.
    #[error("{reason}: {content:?}, at line#{line}")]
    MalformedLine {
        line: usize,
        content: String,
        reason: &'static str,
    },

    /// Input ended inside a block comment, quoted value or continuation.
    #[error("unterminated {construct} started at line#{line}")]
    UnterminatedBlockConstruct { line: usize, construct: Construct },

    /// Key path descends through, or replaces, a value of another shape.
    #[error("key {path:?} collides with existing value at {at:?}, at line#{line}")]
    PathCollision {
        line: usize,
        path: String,
        at: String,
    },

    /// List index too far past the current end of the list.
    #[error("index {index} in key {path:?} leaves too large a gap at {at:?}, at line#{line}")]
    IndexOutOfRange {
        line: usize,
        path: String,
        at: String,
        index: usize,
    },
}

impl ParseError {
    /// Line the error refers to (0 for [`ParseError::EmptyInput`]).
    pub fn line(&self) -> usize {
        match self {
            ParseError::EmptyInput => 0,
            ParseError::MalformedLine { line, .. }
            | ParseError::UnterminatedBlockConstruct { line, .. }
            | ParseError::PathCollision { line, .. }
            | ParseError::IndexOutOfRange { line, .. } => *line,
        }
    }
}

/// Any error produced by the crate's one-call helpers.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Bind(#[from] BindError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Result type for the crate's one-call helpers.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ParseError::MalformedLine {
            line: 3,
            content: "invalid line".into(),
            reason: "invalid format(key=value)",
        };
        assert_eq!(
            err.to_string(),
            "invalid format(key=value): \"invalid line\", at line#3"
        );

        let err = ParseError::UnterminatedBlockConstruct {
            line: 7,
            construct: Construct::QuotedValue,
        };
        assert_eq!(
            err.to_string(),
            "unterminated multi-line quoted value started at line#7"
        );
    }

    #[test]
    fn test_error_line() {
        assert_eq!(ParseError::EmptyInput.line(), 0);
        let err = ParseError::PathCollision {
            line: 4,
            path: "a.b".into(),
            at: "a.b".into(),
        };
        assert_eq!(err.line(), 4);
    }
}

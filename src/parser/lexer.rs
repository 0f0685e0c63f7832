//! # Lexer
//!
//! Line-level state machine. Each trimmed physical line is fed in order;
//! the lexer either buffers it (comment, multi-line fragment) or returns a
//! finished [`LexedEntry`] ready for value resolution.
//!
//! ## Normal-mode dispatch
//!
//! ```text
//! blank            -> skip
//! # ! //           -> comment buffer
//! /*               -> comment buffer, BlockComment unless closed on the same line
//! key = '''...     -> QuotedMultilineSingle (or complete if closed on the same line)
//! key = """...     -> QuotedMultilineDouble (idem)
//! key = value\     -> BackslashContinued
//! key = value      -> complete one-line entry
//! ```

use tracing::trace;

use super::comment::CommentCollector;
use super::pending::{EntryForm, PendingEntry, ScanMode};
use super::scanner::{LineKind, RawLine, BLOCK_COMMENT_CLOSE};
use crate::model::ParseError;
use crate::utils::strings::{ends_with_continuation, split_key_value};

/// A complete logical entry, value still raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexedEntry {
    pub key: String,
    pub raw: String,
    /// Line the entry started on.
    pub line: usize,
    pub form: EntryForm,
}

impl From<PendingEntry> for LexedEntry {
    fn from(pending: PendingEntry) -> Self {
        Self {
            raw: pending.value(),
            form: pending.form(),
            key: pending.key,
            line: pending.start_line,
        }
    }
}

#[derive(Debug, Default)]
pub struct Lexer {
    mode: ScanMode,
    pending: Option<PendingEntry>,
    /// Line the open block comment started on.
    block_start: usize,
}

impl Lexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one line. Comment text goes to `comments`.
    pub fn feed(
        &mut self,
        line: RawLine<'_>,
        comments: &mut CommentCollector,
    ) -> Result<Option<LexedEntry>, ParseError> {
        match self.mode {
            ScanMode::Normal => self.feed_normal(line, comments),
            ScanMode::BlockComment => {
                comments.push(line.text);
                if line.text.ends_with(BLOCK_COMMENT_CLOSE) {
                    trace!(line = line.number, "block comment closed");
                    self.mode = ScanMode::Normal;
                }
                Ok(None)
            }
            ScanMode::QuotedMultilineSingle
            | ScanMode::QuotedMultilineDouble
            | ScanMode::BackslashContinued => {
                let done = match self.pending.as_mut() {
                    Some(pending) => pending.feed(line.text),
                    None => true,
                };
                if !done {
                    return Ok(None);
                }
                self.mode = ScanMode::Normal;
                Ok(self.pending.take().map(LexedEntry::from))
            }
        }
    }

    /// Check the final state once input is exhausted.
    pub fn finish(self) -> Result<(), ParseError> {
        let Some(construct) = self.mode.construct() else {
            return Ok(());
        };
        let line = match self.mode {
            ScanMode::BlockComment => self.block_start,
            _ => self.pending.map_or(0, |p| p.start_line),
        };
        Err(ParseError::UnterminatedBlockConstruct { line, construct })
    }

    fn feed_normal(
        &mut self,
        line: RawLine<'_>,
        comments: &mut CommentCollector,
    ) -> Result<Option<LexedEntry>, ParseError> {
        match line.kind() {
            LineKind::Blank => Ok(None),
            LineKind::LineComment => {
                comments.push(line.text);
                Ok(None)
            }
            LineKind::BlockComment { closed } => {
                comments.push(line.text);
                if !closed {
                    trace!(line = line.number, "block comment opened");
                    self.mode = ScanMode::BlockComment;
                    self.block_start = line.number;
                }
                Ok(None)
            }
            LineKind::Entry => self.start_entry(line),
        }
    }

    fn start_entry(&mut self, line: RawLine<'_>) -> Result<Option<LexedEntry>, ParseError> {
        let (key, value) = split_key_value(line.text).ok_or_else(|| ParseError::MalformedLine {
            line: line.number,
            content: line.text.to_string(),
            reason: "invalid format(key=value)",
        })?;
        if key.is_empty() {
            return Err(ParseError::MalformedLine {
                line: line.number,
                content: line.text.to_string(),
                reason: "key is empty",
            });
        }

        if let Some((mode, marker)) = ScanMode::for_quoted_value(value) {
            let rest = &value[marker.len()..];
            // Opened and closed on one line
            if let Some(inner) = rest.strip_suffix(marker) {
                return Ok(Some(LexedEntry {
                    key,
                    raw: inner.to_string(),
                    line: line.number,
                    form: EntryForm::Quoted,
                }));
            }
            trace!(line = line.number, key = %key, "quoted multi-line value");
            self.pending = Some(PendingEntry::quoted(key, line.number, mode, rest));
            self.mode = mode;
            return Ok(None);
        }

        if ends_with_continuation(value) {
            trace!(line = line.number, key = %key, "continued value");
            self.pending = Some(PendingEntry::continued(
                key,
                line.number,
                &value[..value.len() - 1],
            ));
            self.mode = ScanMode::BackslashContinued;
            return Ok(None);
        }

        Ok(Some(LexedEntry {
            key,
            raw: value.to_string(),
            line: line.number,
            form: EntryForm::OneLine,
        }))
    }
}

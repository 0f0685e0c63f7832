//! Scan Modes and Pending Entries
//!
//! Tracks multi-line constructs while the lexer walks the input. A value that
//! spans several physical lines lives in a [`PendingEntry`] until the line
//! carrying its terminating marker is seen.
//!
//! ## Modes
//!
//! | Mode | Started by | Ended by | Join |
//! |------|-----------|----------|------|
//! | `Normal` | - | - | - |
//! | `BlockComment` | `/*` line | line ending in `*/` | comment lines |
//! | `QuotedMultilineSingle` | value starting `'''` | line ending in `'''` | `\n` |
//! | `QuotedMultilineDouble` | value starting `"""` | line ending in `"""` | `\n` |
//! | `BackslashContinued` | value ending in `\` | line not ending in `\` | nothing |

use crate::model::Construct;
use crate::utils::strings::ends_with_continuation;

/// Triple single-quote marker.
pub const MULTILINE_MARK_SINGLE: &str = "'''";
/// Triple double-quote marker.
pub const MULTILINE_MARK_DOUBLE: &str = "\"\"\"";

/// Current scanner mode. Exactly one is active; `Normal` between entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    #[default]
    Normal,
    BlockComment,
    QuotedMultilineSingle,
    QuotedMultilineDouble,
    BackslashContinued,
}

impl ScanMode {
    /// Mode opened by a value starting with a triple-quote marker.
    pub fn for_quoted_value(value: &str) -> Option<(Self, &'static str)> {
        if value.starts_with(MULTILINE_MARK_SINGLE) {
            Some((ScanMode::QuotedMultilineSingle, MULTILINE_MARK_SINGLE))
        } else if value.starts_with(MULTILINE_MARK_DOUBLE) {
            Some((ScanMode::QuotedMultilineDouble, MULTILINE_MARK_DOUBLE))
        } else {
            None
        }
    }

    /// Closing marker for quoted modes.
    pub fn quote_marker(self) -> Option<&'static str> {
        match self {
            ScanMode::QuotedMultilineSingle => Some(MULTILINE_MARK_SINGLE),
            ScanMode::QuotedMultilineDouble => Some(MULTILINE_MARK_DOUBLE),
            _ => None,
        }
    }

    /// The construct left open when input ends in this mode.
    pub fn construct(self) -> Option<Construct> {
        match self {
            ScanMode::Normal => None,
            ScanMode::BlockComment => Some(Construct::BlockComment),
            ScanMode::QuotedMultilineSingle | ScanMode::QuotedMultilineDouble => {
                Some(Construct::QuotedValue)
            }
            ScanMode::BackslashContinued => Some(Construct::ContinuedValue),
        }
    }
}

/// How an entry's value was written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryForm {
    /// `key = value` on one line.
    OneLine,
    /// Triple-quoted, kept verbatim.
    Quoted,
    /// Joined from backslash-continued lines.
    Continued,
}

/// A value accumulating across physical lines.
#[derive(Debug)]
pub struct PendingEntry {
    pub key: String,
    /// Value fragments in line order.
    pub fragments: Vec<String>,
    pub mode: ScanMode,
    /// Line number of the `key = ...` line (1-based).
    pub start_line: usize,
}

impl PendingEntry {
    /// Start a triple-quoted value; `rest` is the text after the opening marker.
    pub fn quoted(key: String, start_line: usize, mode: ScanMode, rest: &str) -> Self {
        Self {
            key,
            fragments: vec![format!("{}\n", rest)],
            mode,
            start_line,
        }
    }

    /// Start a backslash-continued value; `head` has the backslash stripped.
    pub fn continued(key: String, start_line: usize, head: &str) -> Self {
        Self {
            key,
            fragments: vec![head.to_string()],
            mode: ScanMode::BackslashContinued,
            start_line,
        }
    }

    /// Feed the next trimmed physical line. Returns `true` when the line
    /// terminated the entry.
    pub fn feed(&mut self, line: &str) -> bool {
        match self.mode {
            ScanMode::QuotedMultilineSingle | ScanMode::QuotedMultilineDouble => {
                let marker = self.mode.quote_marker().unwrap_or(MULTILINE_MARK_DOUBLE);
                if let Some(head) = line.strip_suffix(marker) {
                    self.fragments.push(head.to_string());
                    true
                } else {
                    self.fragments.push(format!("{}\n", line));
                    false
                }
            }
            ScanMode::BackslashContinued => {
                if ends_with_continuation(line) {
                    self.fragments.push(line[..line.len() - 1].to_string());
                    false
                } else {
                    self.fragments.push(line.to_string());
                    true
                }
            }
            // Comments and normal lines never reach a pending entry
            ScanMode::Normal | ScanMode::BlockComment => true,
        }
    }

    /// Form of the finished value.
    pub fn form(&self) -> EntryForm {
        match self.mode {
            ScanMode::BackslashContinued => EntryForm::Continued,
            _ => EntryForm::Quoted,
        }
    }

    /// The accumulated value.
    pub fn value(&self) -> String {
        self.fragments.concat()
    }
}

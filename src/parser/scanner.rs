//! # Line Scanner
//!
//! Splits input into physical lines, trims each one and classifies it for
//! the `Normal` scan mode.
//!
//! | Kind | Trimmed line starts with |
//! |------|--------------------------|
//! | `Blank` | (empty) |
//! | `LineComment` | `#`, `!` or `//` |
//! | `BlockComment` | `/*` |
//! | `Entry` | anything else |

/// Block comment open marker.
pub const BLOCK_COMMENT_OPEN: &str = "/*";
/// Block comment close marker.
pub const BLOCK_COMMENT_CLOSE: &str = "*/";

/// A physical input line, trimmed of surrounding whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    /// 1-based line number.
    pub number: usize,
    pub text: &'a str,
}

/// Classification of a line seen in `Normal` mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    LineComment,
    /// `/*` line; `closed` when the same line also carries `*/`.
    BlockComment { closed: bool },
    Entry,
}

impl<'a> RawLine<'a> {
    pub fn new(number: usize, raw: &'a str) -> Self {
        Self {
            number,
            text: raw.trim(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }

    /// Classify this line for `Normal` mode.
    pub fn kind(&self) -> LineKind {
        let text = self.text;
        if self.is_blank() {
            LineKind::Blank
        } else if text.starts_with('#') || text.starts_with('!') || text.starts_with("//") {
            LineKind::LineComment
        } else if let Some(rest) = text.strip_prefix(BLOCK_COMMENT_OPEN) {
            LineKind::BlockComment {
                closed: rest.contains(BLOCK_COMMENT_CLOSE),
            }
        } else {
            LineKind::Entry
        }
    }
}

/// Iterate over the trimmed physical lines of `content`.
pub fn scan(content: &str) -> impl Iterator<Item = RawLine<'_>> {
    content
        .lines()
        .enumerate()
        .map(|(index, raw)| RawLine::new(index + 1, raw))
}

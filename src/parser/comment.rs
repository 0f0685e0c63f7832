//! # CommentCollector
//!
//! Accumulates comment lines until the next entry is committed, then hands
//! them over as that entry's comment.
//!
//! ## Example
//!
//! ```properties
//! # database settings
//! /* shared by all
//!    environments */
//! db.host = localhost # primary
//! ```
//!
//! With inline comments enabled, `db.host` gets the comment
//! `"# database settings\n/* shared by all\nenvironments */\n# primary"`.
//! Physical lines are trimmed before they get here, so indentation inside
//! block comments is not preserved.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut comments = CommentCollector::new();
//! comments.push("# first");
//! comments.push("# second");
//!
//! // entry flushed
//! let text = comments.take(); // Some("# first\n# second")
//! assert!(comments.is_empty());
//! ```

/// Buffer of pending comment lines.
#[derive(Debug, Default)]
pub struct CommentCollector {
    /// Comment lines, markers included.
    pub lines: Vec<String>,
}

impl CommentCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a leading comment line (one-line or part of a block).
    pub fn push(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    /// Append an inline comment split off a value line.
    pub fn push_inline(&mut self, comment: String) {
        self.lines.push(comment);
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Take the collected comment text (lines joined with `\n`) and clear
    /// the buffer.
    pub fn take(&mut self) -> Option<String> {
        if self.lines.is_empty() {
            return None;
        }
        let text = self.lines.join("\n");
        self.lines.clear();
        Some(text)
    }

    /// Split a trailing `#` / `//` comment off a value.
    ///
    /// A marker counts only outside quotes and at the start of the value or
    /// after whitespace, so `a#b` and `http://host` stay intact. A quote
    /// char only opens a quoted span when a matching quote follows.
    ///
    /// Returns the value (right-trimmed) and the comment from the marker on.
    pub fn split_inline(value: &str) -> (String, Option<String>) {
        let chars: Vec<char> = value.chars().collect();
        let mut quote: Option<char> = None;

        for (i, &c) in chars.iter().enumerate() {
            if let Some(q) = quote {
                if c == q {
                    quote = None;
                }
                continue;
            }

            match c {
                '\'' | '"' if chars[i + 1..].contains(&c) => quote = Some(c),
                '#' | '/' => {
                    let is_marker = c == '#' || chars.get(i + 1) == Some(&'/');
                    let at_boundary = i == 0 || chars[i - 1].is_whitespace();
                    if is_marker && at_boundary {
                        let code: String = chars[..i].iter().collect();
                        let comment: String = chars[i..].iter().collect();
                        return (code.trim_end().to_string(), Some(comment.trim().to_string()));
                    }
                }
                _ => {}
            }
        }

        (value.to_string(), None)
    }
}

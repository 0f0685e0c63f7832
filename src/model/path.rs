//! Key path decomposition
//!
//! A key path is a dot-separated address into the value tree. Each segment
//! may carry one or more `[N]` suffixes that address list elements:
//!
//! | Key | Segments |
//! |-----|----------|
//! | `name` | `name` |
//! | `top.sub.key` | `top`, `sub`, `key` |
//! | `top.list[0].f1` | `top`, `list` + `[0]`, `f1` |
//! | `grid[1][2]` | `grid` + `[1]`, `[2]` |
//!
//! A segment whose brackets are not well-formed (`a[x]`, `a[`) is kept as a
//! literal name.

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

lazy_static! {
    /// Segment with index suffixes: `name[0][1]`
    ///
    /// Captures:
    /// - Group 1: segment name
    /// - Group 2: all index suffixes
    static ref INDEXED_SEGMENT_RE: Regex = Regex::new(r"^([^\[\]]+)((?:\[\d+\])+)$").unwrap();

    /// A single `[N]` suffix.
    static ref INDEX_RE: Regex = Regex::new(r"\[(\d+)\]").unwrap();
}

/// One dot-separated part of a key path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub name: String,
    /// List indices applied after resolving `name`, outermost first.
    pub indices: Vec<usize>,
}

impl Segment {
    /// Parse a single segment, splitting off any `[N]` suffixes.
    pub fn parse(raw: &str) -> Self {
        if let Some(caps) = INDEXED_SEGMENT_RE.captures(raw) {
            let indices: Option<Vec<usize>> = INDEX_RE
                .captures_iter(&caps[2])
                .map(|c| c[1].parse::<usize>().ok())
                .collect();
            // Indices too large for usize fall back to a literal name
            if let Some(indices) = indices {
                return Self {
                    name: caps[1].to_string(),
                    indices,
                };
            }
        }

        Self {
            name: raw.to_string(),
            indices: Vec::new(),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for index in &self.indices {
            write!(f, "[{}]", index)?;
        }
        Ok(())
    }
}

/// A decomposed key path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    pub segments: Vec<Segment>,
}

impl KeyPath {
    /// Split `key` on `.` and parse each segment.
    pub fn parse(key: &str) -> Self {
        Self {
            segments: key.split('.').map(Segment::parse).collect(),
        }
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

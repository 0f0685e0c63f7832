//! # Parser Module
//!
//! Single-pass properties parser producing a flat map, a nested value tree
//! and a comment map.
//!
//! ## Architecture Overview
//!
//! ```text
//! parser/
//! ├── mod.rs        - This file: Parser façade
//! ├── scanner.rs    - Physical lines, trimming, line classification
//! ├── pending.rs    - ScanMode + PendingEntry (multi-line accumulation)
//! ├── lexer.rs      - Line state machine emitting LexedEntry
//! ├── comment.rs    - CommentCollector + inline comment split
//! ├── patterns.rs   - Regex patterns (VAR_REF_RE, ENV_VAR_RE)
//! ├── resolver.rs   - Quote strip, references, env, inline lists, hook
//! └── assembler.rs  - Key path → nested tree insertion
//! ```
//!
//! ## Data flow
//!
//! ```text
//! text ─► scanner ─► lexer ─► resolver ─► assembler ─► tree
//!                      │          │
//!                      ▼          └──────────────────► flat map
//!               comment collector ───────────────────► comment map
//! ```
//!
//! Scanning is fail-fast: the first malformed line, path collision or
//! oversized list index stops the pass. Entries committed before it stay
//! readable.
//!
//! ## Usage
//!
//! ```rust
//! use proptree::{ParseOptions, Parser};
//!
//! let text = "
//! ## the app name
//! name = inhere
//! top.sub.key0 = value0
//! ref = ${top.sub.key0}
//! ";
//!
//! let mut parser = Parser::with_options(ParseOptions::default());
//! parser.parse(text).unwrap();
//!
//! assert_eq!(parser.get_str("ref"), Some("value0"));
//! assert_eq!(parser.flat_map()["top.sub.key0"], "value0");
//! assert_eq!(parser.comments()["name"], "# the app name");
//! ```

mod assembler;
mod comment;
mod lexer;
mod patterns;
mod pending;
mod resolver;
mod scanner;

pub use assembler::{InsertError, MAX_INDEX_GAP};
pub use comment::CommentCollector;
pub use lexer::{LexedEntry, Lexer};
pub use pending::{EntryForm, ScanMode};
pub use resolver::{expand_env, parse_inline_list, CollectHook, Resolved, ValueResolver};
pub use scanner::{scan, LineKind, RawLine};

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::binder::{self, BindError, DecodeHook, StandardHook};
use crate::model::{
    lookup_in_map, CommentMap, FlatMap, KeyPath, Map, ParseError, ParseOptions, Value,
};

/// Properties parser.
///
/// Holds the options and hooks, plus the output of the last
/// [`parse`](Parser::parse) call. Each call starts from empty state.
#[derive(Clone, Default)]
pub struct Parser {
    options: ParseOptions,
    before_collect: Option<Arc<CollectHook>>,
    decode_hook: Option<Arc<dyn DecodeHook>>,
    flat: FlatMap,
    tree: Map,
    comments: CommentMap,
    err: Option<ParseError>,
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("options", &self.options)
            .field("flat", &self.flat)
            .field("comments", &self.comments)
            .field("err", &self.err)
            .finish_non_exhaustive()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Transform every value before it is collected into the tree.
    pub fn before_collect<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str, Value) -> Value + Send + Sync + 'static,
    {
        self.before_collect = Some(Arc::new(hook));
        self
    }

    /// Replace the standard decode hook used by [`bind_to`](Parser::bind_to).
    pub fn decode_hook<H: DecodeHook + 'static>(mut self, hook: H) -> Self {
        self.decode_hook = Some(Arc::new(hook));
        self
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse `text`, replacing any previous result.
    pub fn parse(&mut self, text: &str) -> Result<(), ParseError> {
        self.flat.clear();
        self.tree.clear();
        self.comments.clear();
        self.err = None;

        let result = self.run(text);
        if let Err(e) = &result {
            debug!(error = %e, "parse stopped");
            self.err = Some(e.clone());
        }
        result
    }

    fn run(&mut self, text: &str) -> Result<(), ParseError> {
        if text.trim().is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let Parser {
            options,
            before_collect,
            flat,
            tree,
            comments,
            ..
        } = self;
        let resolver = ValueResolver::new(options, before_collect.as_deref());
        let mut lexer = Lexer::new();
        let mut collector = CommentCollector::new();

        for line in scan(text) {
            let Some(entry) = lexer.feed(line, &mut collector)? else {
                continue;
            };

            let resolved = resolver.resolve(&entry.key, &entry.raw, entry.form, flat);
            debug!(
                line = entry.line,
                key = %entry.key,
                form = ?entry.form,
                value = %resolved.flat,
                "entry"
            );

            if let Some(comment) = resolved.inline_comment {
                collector.push_inline(comment);
            }

            assembler::insert(tree, &KeyPath::parse(&entry.key), resolved.value).map_err(
                |err| match err {
                    InsertError::Collision { at } => ParseError::PathCollision {
                        line: entry.line,
                        path: entry.key.clone(),
                        at,
                    },
                    InsertError::IndexGap { at, index } => ParseError::IndexOutOfRange {
                        line: entry.line,
                        path: entry.key.clone(),
                        at,
                        index,
                    },
                },
            )?;
            flat.insert(entry.key.clone(), resolved.flat);
            if let Some(comment) = collector.take() {
                comments.insert(entry.key, comment);
            }
        }

        lexer.finish()
    }

    /// Dotted key → string value, as used for `${...}` references.
    pub fn flat_map(&self) -> &FlatMap {
        &self.flat
    }

    /// The nested value tree.
    pub fn value_tree(&self) -> &Map {
        &self.tree
    }

    /// Dotted key → comment text.
    pub fn comments(&self) -> &CommentMap {
        &self.comments
    }

    /// Error of the last parse, if any.
    pub fn err(&self) -> Option<&ParseError> {
        self.err.as_ref()
    }

    /// Tree node at a dotted/indexed path.
    pub fn get(&self, path: &str) -> Option<&Value> {
        lookup_in_map(&self.tree, &KeyPath::parse(path))
    }

    /// String at a dotted/indexed path.
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    /// Bind the node at `path` (the whole tree for `""`) onto `T`.
    pub fn bind_to<T: DeserializeOwned>(&self, path: &str) -> Result<T, BindError> {
        let standard = StandardHook::from_options(&self.options);
        let hook: &dyn DecodeHook = match &self.decode_hook {
            Some(hook) => hook.as_ref(),
            None => &standard,
        };
        let case = self.options.field_case();

        if path.is_empty() {
            let root = Value::Map(self.tree.clone());
            return binder::bind(&root, hook, case);
        }
        let node = self
            .get(path)
            .ok_or_else(|| BindError::KeyNotFound(path.to_string()))?;
        binder::bind(node, hook, case)
    }

    /// Parse `text` and bind the whole tree onto `T`.
    pub fn unmarshal<T: DeserializeOwned>(&mut self, text: &str) -> crate::Result<T> {
        self.parse(text)?;
        Ok(self.bind_to("")?)
    }
}

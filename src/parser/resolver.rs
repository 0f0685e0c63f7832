//! # Value Resolver
//!
//! Turns the raw value text of a finished entry into its final form. Steps
//! run in a fixed order:
//!
//! 1. Quote stripping (one-line values): `'...'` / `"..."` → interior
//! 2. Inline-comment split (option, unquoted one-line values)
//! 3. Key reference: `${other.key}` / `${other.key | default}`
//! 4. Environment interpolation: `${NAME}` / `${NAME | default}` (option)
//! 5. Inline list: `[a, b, c]` (option, unquoted values)
//! 6. `before_collect` hook
//!
//! The flat map keeps the string produced by steps 1-4; the tree gets the
//! result of all six.

use std::borrow::Cow;

use tracing::warn;

use super::comment::CommentCollector;
use super::patterns::{ENV_VAR_RE, VAR_REF_RE};
use super::pending::EntryForm;
use crate::model::{FlatMap, ParseOptions, Value};

/// Caller-supplied transform applied to every value before it is collected.
pub type CollectHook = dyn Fn(&str, Value) -> Value + Send + Sync;

/// Outcome of resolving one entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// String form stored in the flat map.
    pub flat: String,
    /// Final value for the tree.
    pub value: Value,
    /// Comment split off the value line.
    pub inline_comment: Option<String>,
}

pub struct ValueResolver<'a> {
    options: &'a ParseOptions,
    before_collect: Option<&'a CollectHook>,
}

impl<'a> ValueResolver<'a> {
    pub fn new(options: &'a ParseOptions, before_collect: Option<&'a CollectHook>) -> Self {
        Self {
            options,
            before_collect,
        }
    }

    /// Resolve `raw` for `key`, using `flat` (keys parsed so far) for references.
    pub fn resolve(&self, key: &str, raw: &str, form: EntryForm, flat: &FlatMap) -> Resolved {
        let mut inline_comment = None;
        let mut quoted = form == EntryForm::Quoted;
        let mut text = raw.to_string();

        if form == EntryForm::OneLine {
            if let Some((interior, comment)) = self.strip_quotes(raw) {
                text = interior.to_string();
                inline_comment = comment;
                quoted = true;
            } else if self.options.allow_inline_comments {
                let (value, comment) = CommentCollector::split_inline(raw);
                text = value;
                inline_comment = comment;
            }
        }

        if self.options.parse_var_references {
            if let Some(resolved) = resolve_reference(&text, flat) {
                text = resolved;
            }
        }

        if self.options.parse_env_vars {
            text = expand_env(&text).into_owned();
        }

        if self.options.trim_value {
            text = text.trim().to_string();
        }

        let mut value = match self.options.allow_inline_lists && !quoted {
            true => parse_inline_list(&text).map_or_else(|| Value::from(text.as_str()), Value::from),
            false => Value::from(text.as_str()),
        };

        if let Some(hook) = self.before_collect {
            value = hook(key, value);
        }

        Resolved {
            flat: text,
            value,
            inline_comment,
        }
    }

    /// Strip a matching pair of `'` or `"` around a one-line value.
    ///
    /// Text after the closing quote is only allowed when it is an inline
    /// comment (and inline comments are enabled); otherwise the value is not
    /// treated as quoted.
    fn strip_quotes<'v>(&self, raw: &'v str) -> Option<(&'v str, Option<String>)> {
        let quote = raw.chars().next().filter(|c| *c == '\'' || *c == '"')?;
        let close = raw[1..].find(quote)? + 1;
        let interior = &raw[1..close];
        let rest = raw[close + 1..].trim();

        if rest.is_empty() {
            return Some((interior, None));
        }
        if self.options.allow_inline_comments && (rest.starts_with('#') || rest.starts_with("//")) {
            return Some((interior, Some(rest.to_string())));
        }
        None
    }
}

/// Resolve a whole-value key reference against keys seen so far.
///
/// Returns `None` when `text` is not a reference. A reference to a key not
/// (yet) in `flat` yields the default if given, else the literal text.
pub fn resolve_reference(text: &str, flat: &FlatMap) -> Option<String> {
    let caps = VAR_REF_RE.captures(text.trim())?;
    if let Some(found) = flat.get(&caps[1]) {
        return Some(found.clone());
    }
    Some(match caps.get(2) {
        Some(default) => default.as_str().to_string(),
        None => text.to_string(),
    })
}

/// Replace `${NAME}` / `${NAME | default}` tokens with environment values.
/// An unset variable without default becomes the empty string.
pub fn expand_env(text: &str) -> Cow<'_, str> {
    ENV_VAR_RE.replace_all(text, |caps: &regex::Captures| {
        match std::env::var(&caps[1]) {
            Ok(value) => value,
            Err(_) => match caps.get(2) {
                Some(default) => default.as_str().to_string(),
                None => {
                    warn!(name = &caps[1], "environment variable not set");
                    String::new()
                }
            },
        }
    })
}

/// Parse `[a, b, c]` into its trimmed elements. `[]` is an empty list.
pub fn parse_inline_list(text: &str) -> Option<Vec<String>> {
    let inner = text.trim().strip_prefix('[')?.strip_suffix(']')?;
    if inner.trim().is_empty() {
        return Some(Vec::new());
    }
    Some(inner.split(',').map(|item| item.trim().to_string()).collect())
}

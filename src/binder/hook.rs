//! # Decode Hooks
//!
//! The binder asks a [`DecodeHook`] to convert each scalar before handing it
//! to the target type. The hook sees the kind of tree node, the kind the
//! field wants, and the raw node; it either produces a typed value or
//! returns [`Coerced::Unchanged`] to let the binder apply strict rules.
//!
//! ## Standard conversions
//!
//! | Target | Accepted strings (weakly typed) |
//! |--------|---------------------------------|
//! | bool | `1 t true 0 f false` (any case), `""` → false |
//! | signed / unsigned | decimal, `0x..`, `0o..`, `0b..`, `""` → 0 |
//! | float | anything `f64::from_str` takes, `""` → 0.0 |
//! | duration | integer nanoseconds; `3s`, `1h30m`, `250ms` with `parse_time` |

use std::fmt;
use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;

use super::error::BindError;
use crate::model::{ParseOptions, Value};

lazy_static! {
    /// A whole duration string: one or more `<number><unit>` parts.
    static ref DURATION_RE: Regex =
        Regex::new(r"^(?:\d+(?:\.\d*)?|\.\d+)(?:ns|us|µs|ms|s|m|h)(?:(?:\d+(?:\.\d*)?|\.\d+)(?:ns|us|µs|ms|s|m|h))*$").unwrap();

    /// A single `<number><unit>` part.
    ///
    /// Captures:
    /// - Group 1: number
    /// - Group 2: unit
    static ref DURATION_PART_RE: Regex =
        Regex::new(r"(\d+(?:\.\d*)?|\.\d+)(ns|us|µs|ms|s|m|h)").unwrap();
}

/// Kind of tree node being converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Null,
    String,
    List,
    Map,
}

impl SourceKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => SourceKind::Null,
            Value::String(_) => SourceKind::String,
            Value::List(_) => SourceKind::List,
            Value::Map(_) => SourceKind::Map,
        }
    }
}

/// Kind of value a record field asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Bool,
    Signed,
    Unsigned,
    Float,
    Str,
    Duration,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetKind::Bool => "bool",
            TargetKind::Signed => "signed integer",
            TargetKind::Unsigned => "unsigned integer",
            TargetKind::Float => "float",
            TargetKind::Str => "string",
            TargetKind::Duration => "duration",
        };
        f.write_str(name)
    }
}

/// Result of a decode hook.
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    /// No conversion; the binder uses the raw node.
    Unchanged,
    Bool(bool),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Str(String),
    Duration(Duration),
}

/// Pluggable scalar conversion used by the binder.
pub trait DecodeHook: Send + Sync {
    fn decode(&self, from: SourceKind, to: TargetKind, raw: &Value) -> Result<Coerced, BindError>;

    /// Whether a lone scalar may bind to a sequence (as a one-element list).
    fn weakly_typed(&self) -> bool {
        true
    }
}

impl<F> DecodeHook for F
where
    F: Fn(SourceKind, TargetKind, &Value) -> Result<Coerced, BindError> + Send + Sync,
{
    fn decode(&self, from: SourceKind, to: TargetKind, raw: &Value) -> Result<Coerced, BindError> {
        self(from, to, raw)
    }
}

/// Default hook, configured from [`ParseOptions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardHook {
    pub weakly_typed: bool,
    pub parse_time: bool,
}

impl Default for StandardHook {
    fn default() -> Self {
        Self {
            weakly_typed: true,
            parse_time: false,
        }
    }
}

impl StandardHook {
    pub fn from_options(options: &ParseOptions) -> Self {
        Self {
            weakly_typed: options.weakly_typed,
            parse_time: options.parse_time,
        }
    }
}

impl DecodeHook for StandardHook {
    fn weakly_typed(&self) -> bool {
        self.weakly_typed
    }

    fn decode(&self, _from: SourceKind, to: TargetKind, raw: &Value) -> Result<Coerced, BindError> {
        let Value::String(text) = raw else {
            return Ok(Coerced::Unchanged);
        };

        match to {
            TargetKind::Duration => self.decode_duration(text),
            TargetKind::Str => Ok(Coerced::Unchanged),
            _ if !self.weakly_typed => Ok(Coerced::Unchanged),
            TargetKind::Bool => parse_bool(text).map(Coerced::Bool),
            TargetKind::Signed => parse_signed(text).map(Coerced::Signed),
            TargetKind::Unsigned => parse_unsigned(text).map(Coerced::Unsigned),
            TargetKind::Float => parse_float(text).map(Coerced::Float),
        }
    }
}

impl StandardHook {
    fn decode_duration(&self, text: &str) -> Result<Coerced, BindError> {
        let trimmed = text.trim();
        if let Ok(nanos) = trimmed.parse::<u64>() {
            return Ok(Coerced::Duration(Duration::from_nanos(nanos)));
        }
        if self.parse_time {
            return parse_duration(trimmed).map(Coerced::Duration);
        }
        Err(coercion(text, TargetKind::Duration, "expected integer nanoseconds"))
    }
}

fn coercion(value: &str, target: TargetKind, reason: impl Into<String>) -> BindError {
    BindError::Coercion {
        value: value.to_string(),
        target,
        reason: reason.into(),
    }
}

pub fn parse_bool(text: &str) -> Result<bool, BindError> {
    match text.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "f" | "false" => Ok(false),
        "1" | "t" | "true" => Ok(true),
        _ => Err(coercion(text, TargetKind::Bool, "not a boolean")),
    }
}

/// Split off a base prefix (`0x`, `0o`, `0b`) from unsigned digits.
fn radix_of(digits: &str) -> (u32, &str) {
    let lower = digits.get(..2).map(str::to_ascii_lowercase);
    match lower.as_deref() {
        Some("0x") => (16, &digits[2..]),
        Some("0o") => (8, &digits[2..]),
        Some("0b") => (2, &digits[2..]),
        _ => (10, digits),
    }
}

/// `from_str_radix` accepts its own sign; one has already been consumed.
fn reject_sign(text: &str, digits: &str, target: TargetKind) -> Result<(), BindError> {
    match digits.starts_with(['+', '-']) {
        true => Err(coercion(text, target, "invalid sign")),
        false => Ok(()),
    }
}

pub fn parse_signed(text: &str) -> Result<i64, BindError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let (radix, digits) = radix_of(unsigned);
    reject_sign(text, digits, TargetKind::Signed)?;
    let magnitude = i128::from_str_radix(digits, radix)
        .map_err(|e| coercion(text, TargetKind::Signed, e.to_string()))?;
    let value = if negative { -magnitude } else { magnitude };
    i64::try_from(value).map_err(|_| coercion(text, TargetKind::Signed, "out of range"))
}

pub fn parse_unsigned(text: &str) -> Result<u64, BindError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    let (radix, digits) = radix_of(trimmed.strip_prefix('+').unwrap_or(trimmed));
    reject_sign(text, digits, TargetKind::Unsigned)?;
    u64::from_str_radix(digits, radix).map_err(|e| coercion(text, TargetKind::Unsigned, e.to_string()))
}

pub fn parse_float(text: &str) -> Result<f64, BindError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed
        .parse::<f64>()
        .map_err(|e| coercion(text, TargetKind::Float, e.to_string()))
}

/// Parse a duration like `300ms`, `1.5h` or `2h45m`. A bare `0` is zero.
pub fn parse_duration(text: &str) -> Result<Duration, BindError> {
    if text == "0" {
        return Ok(Duration::ZERO);
    }
    if !DURATION_RE.is_match(text) {
        return Err(coercion(text, TargetKind::Duration, "invalid duration"));
    }

    let mut nanos = 0f64;
    for caps in DURATION_PART_RE.captures_iter(text) {
        let amount: f64 = caps[1]
            .parse()
            .map_err(|_| coercion(text, TargetKind::Duration, "invalid number"))?;
        let unit = match &caps[2] {
            "ns" => 1.0,
            "us" | "µs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60e9,
            _ => 3600e9,
        };
        nanos += amount * unit;
    }

    if nanos > u64::MAX as f64 {
        return Err(coercion(text, TargetKind::Duration, "out of range"));
    }
    Ok(Duration::from_nanos(nanos.round() as u64))
}

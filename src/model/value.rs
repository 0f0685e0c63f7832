//! Value tree produced by the parser

use serde::Serialize;
use std::collections::BTreeMap;

use super::path::KeyPath;

/// Nested map node of the value tree.
pub type Map = BTreeMap<String, Value>;

/// Dotted key path → string value, in the form used for `${...}` lookups.
pub type FlatMap = BTreeMap<String, String>;

/// Dotted key path → comment text (lines joined with `\n`).
pub type CommentMap = BTreeMap<String, String>;

/// A resolved node of the value tree.
///
/// Scalars are always strings: properties text carries no type information,
/// conversion happens when binding to a typed record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Hole in a list grown past its end (`a[0]` then `a[2]`).
    Null,
    String(String),
    List(Vec<Value>),
    Map(Map),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Short name of the node kind, for messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Look up a descendant by dotted/indexed path (`top.list[0].f1`).
    pub fn get(&self, path: &str) -> Option<&Value> {
        lookup(self, &KeyPath::parse(path))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items.into_iter().map(Value::String).collect())
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

/// Walk `path` starting at `root`.
pub fn lookup<'a>(root: &'a Value, path: &KeyPath) -> Option<&'a Value> {
    let mut node = root;
    for segment in &path.segments {
        node = node.as_map()?.get(&segment.name)?;
        for &index in &segment.indices {
            node = node.as_list()?.get(index)?;
        }
    }
    Some(node)
}

/// Walk `path` starting at a root map.
pub fn lookup_in_map<'a>(root: &'a Map, path: &KeyPath) -> Option<&'a Value> {
    let (first, rest) = path.segments.split_first()?;
    let mut node = root.get(&first.name)?;
    for &index in &first.indices {
        node = node.as_list()?.get(index)?;
    }
    lookup(
        node,
        &KeyPath {
            segments: rest.to_vec(),
        },
    )
}

//! # Encoder
//!
//! Flattens a value tree (or any `Serialize` record) back into properties
//! text, one `path=value` line per leaf, in key order.
//!
//! | Node | Output |
//! |------|--------|
//! | string at `a.b` | `a.b=value` |
//! | list element | `a.list[0]=value` |
//! | null | `a.b=` |
//! | multi-line string | each `\n` written as `\` + newline |
//!
//! A key containing `=` is written as `\=`. A one-line value ending in an
//! odd run of backslashes is wrapped in quotes so it does not read back as a
//! continuation.
//!
//! ## Usage
//!
//! ```rust
//! use proptree::Encoder;
//! use std::collections::BTreeMap;
//!
//! let mut config = BTreeMap::new();
//! config.insert("port", 8080);
//!
//! let text = Encoder::new().encode_serialize(&config).unwrap();
//! assert_eq!(text, "port=8080\n");
//! ```

mod convert;

use serde::Serialize;
use thiserror::Error;

use crate::model::{CommentMap, FlatMap, Map, Value};
use crate::utils::strings::{ends_with_continuation, escape_key};

/// Error raised while encoding.
#[derive(Error, Debug)]
pub enum EncodeError {
    /// Only maps (and records) have keys to write.
    #[error("only maps and records can be encoded, got {0}")]
    UnsupportedRoot(&'static str),

    #[error("failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Writes properties text, optionally preceded by per-key comments.
#[derive(Debug, Default, Clone, Copy)]
pub struct Encoder<'c> {
    comments: Option<&'c CommentMap>,
}

impl<'c> Encoder<'c> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write each key's comment (verbatim, one line per comment line)
    /// before its entry.
    pub fn with_comments(mut self, comments: &'c CommentMap) -> Self {
        self.comments = Some(comments);
        self
    }

    /// Encode a tree. The root must be a map.
    pub fn encode(&self, value: &Value) -> Result<String, EncodeError> {
        match value {
            Value::Map(map) => Ok(self.encode_map(map)),
            other => Err(EncodeError::UnsupportedRoot(other.kind_name())),
        }
    }

    pub fn encode_map(&self, map: &Map) -> String {
        let mut out = String::new();
        for (key, value) in map {
            self.write_node(&mut out, &escape_key(key), value);
        }
        out
    }

    /// Encode a flat `path -> string` map as-is.
    pub fn encode_flat(&self, flat: &FlatMap) -> String {
        let mut out = String::new();
        for (path, value) in flat {
            self.write_line(&mut out, path, value);
        }
        out
    }

    /// Encode any record or map. Numbers and booleans are stringified.
    pub fn encode_serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, EncodeError> {
        let tree = Value::from(serde_json::to_value(value)?);
        self.encode(&tree)
    }

    fn write_node(&self, out: &mut String, path: &str, value: &Value) {
        match value {
            Value::Null => self.write_line(out, path, ""),
            Value::String(s) => self.write_line(out, path, s),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    self.write_node(out, &format!("{}[{}]", path, i), item);
                }
            }
            Value::Map(map) => {
                for (key, child) in map {
                    self.write_node(out, &format!("{}.{}", path, escape_key(key)), child);
                }
            }
        }
    }

    fn write_line(&self, out: &mut String, path: &str, value: &str) {
        if let Some(comment) = self.comments.and_then(|c| c.get(path)) {
            for line in comment.lines() {
                out.push_str(line);
                out.push('\n');
            }
        }
        out.push_str(path);
        out.push('=');
        match continuation_quote(value) {
            Some(quote) => {
                out.push(quote);
                out.push_str(value);
                out.push(quote);
            }
            None => out.push_str(&value.replace('\n', "\\\n")),
        }
        out.push('\n');
    }
}

/// Quote for a one-line value whose trailing `\` would read back as a
/// continuation. `None` when the value can be written bare, or when it has
/// both quote chars.
fn continuation_quote(value: &str) -> Option<char> {
    if value.contains('\n') || !ends_with_continuation(value) {
        return None;
    }
    ['\'', '"'].into_iter().find(|q| !value.contains(*q))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    fn sample() -> Value {
        let mut sub = Map::new();
        sub.insert("key0".into(), "value0".into());
        sub.insert(
            "list".into(),
            Value::List(vec!["a".into(), Value::Null, "c".into()]),
        );
        let mut root = Map::new();
        root.insert("name".into(), "inhere".into());
        root.insert("top".into(), Value::Map(sub));
        Value::Map(root)
    }

    #[test]
    fn test_encode_tree() {
        let text = Encoder::new().encode(&sample()).unwrap();
        assert_eq!(
            text,
            "name=inhere\ntop.key0=value0\ntop.list[0]=a\ntop.list[1]=\ntop.list[2]=c\n"
        );
    }

    #[test]
    fn test_encode_requires_map_root() {
        let err = Encoder::new().encode(&Value::from("x")).unwrap_err();
        assert!(matches!(err, EncodeError::UnsupportedRoot("string")));
    }

    #[test]
    fn test_encode_multiline_and_escaped_key() {
        let mut root = Map::new();
        root.insert("a=b".into(), "x\ny".into());
        let text = Encoder::new().encode(&Value::Map(root)).unwrap();
        assert_eq!(text, "a\\=b=x\\\ny\n");
    }

    #[test]
    fn test_encode_with_comments() {
        let mut comments = CommentMap::new();
        comments.insert("name".into(), "# the name\n# second".into());
        let text = Encoder::new()
            .with_comments(&comments)
            .encode(&sample())
            .unwrap();
        assert!(text.starts_with("# the name\n# second\nname=inhere\n"));
    }

    #[test]
    fn test_trailing_backslash_is_quoted() {
        let mut flat = FlatMap::new();
        flat.insert("a".into(), "C:\\dir\\".into());
        flat.insert("b".into(), "it's\\".into());
        flat.insert("c".into(), "C:\\dir\\\\".into());
        assert_eq!(
            Encoder::new().encode_flat(&flat),
            "a='C:\\dir\\'\nb=\"it's\\\"\nc=C:\\dir\\\\\n"
        );
    }

    #[test]
    fn test_encode_flat() {
        let mut flat = FlatMap::new();
        flat.insert("b".into(), "2".into());
        flat.insert("a.c".into(), "1".into());
        assert_eq!(Encoder::new().encode_flat(&flat), "a.c=1\nb=2\n");
    }

    #[test]
    fn test_encode_serialize_struct() {
        #[derive(Serialize)]
        struct Db {
            host: String,
            port: u16,
            ssl: bool,
            replicas: Vec<String>,
        }
        let db = Db {
            host: "localhost".into(),
            port: 5432,
            ssl: false,
            replicas: vec!["r1".into()],
        };
        let text = Encoder::new().encode_serialize(&db).unwrap();
        assert_eq!(
            text,
            "host=localhost\nport=5432\nreplicas[0]=r1\nssl=false\n"
        );
    }

    #[test]
    fn test_encode_serialize_rejects_scalar() {
        assert!(matches!(
            Encoder::new().encode_serialize(&42),
            Err(EncodeError::UnsupportedRoot("string"))
        ));
    }
}
